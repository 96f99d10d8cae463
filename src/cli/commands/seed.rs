//! Seed command implementation

use super::{mock_options, open_unseeded, report_failure};
use crate::config::load_config;
use chrono::Utc;
use clap::Args;

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Number of subjects to generate (defaults to mock.subject_count)
    #[arg(long)]
    pub count: Option<usize>,

    /// Random seed (defaults to mock.seed, else random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Clear existing records first
    #[arg(long)]
    pub force: bool,
}

impl SeedArgs {
    /// Execute the seed command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(count = ?self.count, seed = ?self.seed, force = self.force, "Seeding sample records");

        println!("🌱 Seeding sample records");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load configuration file", &e)),
        };

        if self.count == Some(0) {
            println!("❌ --count must be at least 1");
            return Ok(3);
        }

        let mut store = match open_unseeded(&config) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let has_records = !store.subjects().is_empty() || !store.exams().is_empty();
        if has_records {
            if !self.force {
                println!(
                    "❌ Store already holds {} subject(s) and {} exam(s)",
                    store.subjects().len(),
                    store.exams().len()
                );
                println!("   Use --force to replace them");
                return Ok(3);
            }
            if let Err(e) = store.clear() {
                return Ok(report_failure("Failed to clear existing records", &e));
            }
        }

        let options = mock_options(&config, self.count, self.seed);
        let now = Utc::now();
        let (subjects, exams) = match store.seed(&options, now) {
            Ok(counts) => counts,
            Err(e) => return Ok(report_failure("Failed to seed records", &e)),
        };
        let expired = match store.initialize(now, None) {
            Ok(report) => report.expired,
            Err(e) => return Ok(report_failure("Failed to refresh expirations", &e)),
        };

        println!("✅ Seeded {subjects} subject(s) with {exams} exam(s)");
        println!("   Variant: {}", store.variant());
        println!("   Seed: {}", options.seed);
        if expired > 0 {
            println!("   Expired on refresh: {expired}");
        }
        println!();
        Ok(0)
    }
}
