//! Sheet command implementation
//!
//! Prints the ASO control sheet: one line per subject with a cell per exam
//! type, followed by the summary counts.

use super::{open_store, report_failure};
use crate::core::report::ControlSheet;
use crate::core::store::SubjectFilter;
use crate::domain::Sector;
use clap::Args;

/// Arguments for the sheet command
#[derive(Args, Debug)]
pub struct SheetArgs {
    /// Only subjects in this sector
    #[arg(long)]
    pub sector: Option<Sector>,

    /// Only subjects matching this search term
    #[arg(long)]
    pub search: Option<String>,

    /// Print JSON instead of tab-separated lines
    #[arg(long)]
    pub json: bool,
}

impl SheetArgs {
    /// Execute the sheet command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let mut filter = SubjectFilter::default();
        if let Some(sector) = self.sector {
            filter = filter.with_sector(sector);
        }
        if let Some(term) = &self.search {
            filter = filter.with_search(term.clone());
        }

        let sheet = store.control_sheet(&filter);
        tracing::info!(rows = sheet.rows.len(), "Control sheet built");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&sheet)?);
            return Ok(0);
        }

        // Tab separated, header line first
        println!("{}", ControlSheet::headers().join("\t"));
        for row in &sheet.rows {
            println!("{}", row.to_record().join("\t"));
        }
        println!();
        for (label, value) in sheet.summary.entries() {
            println!("{label}\t{value}");
        }
        Ok(0)
    }
}
