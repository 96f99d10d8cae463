//! Refresh command implementation

use super::{date_or_now, open_store, report_failure};
use clap::Args;

/// Arguments for the refresh command
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Reference date (YYYY-MM-DD or RFC 3339, default now)
    #[arg(long)]
    pub as_of: Option<String>,
}

impl RefreshArgs {
    /// Execute the refresh command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("🔄 Refreshing exam expirations");
        println!();

        let as_of = match date_or_now(self.as_of.as_deref()) {
            Ok(d) => d,
            Err(e) => return Ok(report_failure("Invalid --as-of", &e)),
        };

        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let transitioned = match store.refresh_expirations(as_of) {
            Ok(n) => n,
            Err(e) => return Ok(report_failure("Failed to refresh expirations", &e)),
        };

        if transitioned == 0 {
            println!("✅ No exams expired as of {}", as_of.format("%Y-%m-%d"));
        } else {
            println!(
                "✅ {transitioned} exam(s) moved to expired as of {}",
                as_of.format("%Y-%m-%d")
            );
        }

        let expiring = store.expiring_exams(as_of);
        if !expiring.is_empty() {
            println!(
                "⚠️  {} exam(s) expire within {} days",
                expiring.len(),
                store.settings().warning_window_days
            );
        }
        println!();
        Ok(0)
    }
}
