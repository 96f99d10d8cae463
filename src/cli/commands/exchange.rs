//! Export and import command implementations

use super::{open_store, report_failure};
use crate::core::exchange::{read_document, write_document};
use chrono::Utc;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination JSON file
    #[arg(short, long)]
    pub output: String,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Exporting records");

        println!("📤 Exporting records to {}", self.output);
        println!();

        let store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let document = store.export_document(Utc::now());
        if let Err(e) = write_document(&document, &self.output) {
            return Ok(report_failure("Failed to write export document", &e));
        }

        println!(
            "✅ Exported {} subject(s) and {} exam(s)",
            store.subjects().len(),
            store.exams().len()
        );
        println!();
        Ok(0)
    }
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Source JSON file
    #[arg(short, long)]
    pub input: String,
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Importing records");

        println!("📥 Importing records from {}", self.input);
        println!();

        // Parse before opening so a bad file never touches the store
        let document = match read_document(&self.input) {
            Ok(d) => d,
            Err(e) => return Ok(report_failure("Failed to read import document", &e)),
        };

        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let summary = match store.import_document(document) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Import rejected", &e)),
        };

        match summary.subjects {
            Some(n) => println!("✅ Subjects replaced: {n}"),
            None => println!("⏭️  Subjects untouched"),
        }
        match summary.exams {
            Some(n) => println!("✅ Exams replaced: {n}"),
            None => println!("⏭️  Exams untouched"),
        }

        match store.refresh_expirations(Utc::now()) {
            Ok(0) => {}
            Ok(n) => println!("🔄 {n} imported exam(s) moved to expired"),
            Err(e) => return Ok(report_failure("Failed to refresh expirations", &e)),
        }
        println!();
        Ok(0)
    }
}
