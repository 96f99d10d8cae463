//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::domain::Variant;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "aso-control.toml")]
    pub output: String,

    /// Population the store tracks (occupational or clinical)
    #[arg(long, default_value = "occupational")]
    pub variant: Variant,

    /// Include explanatory comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, variant = %self.variant, "Initializing configuration file");

        println!("📝 Initializing ASO Control configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples(self.variant)
        } else {
            Self::generate_minimal_config(self.variant)
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: aso-control validate-config");
                println!("  3. Check the indicators: aso-control indicators");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn generate_minimal_config(variant: Variant) -> String {
        format!(
            r#"# ASO Control Configuration File

[application]
log_level = "info"
variant = "{variant}"

[storage]
backend = "file"
data_dir = "./data"
key_prefix = "aso_control"
key_version = "v3"

[lifecycle]
warning_window_days = 30
adherence_goal = 100.0
default_validity_months = 12

[mock]
enabled = true
subject_count = 50

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        )
    }

    fn generate_config_with_examples(variant: Variant) -> String {
        format!(
            r#"# ASO Control Configuration File
#
# Tracks occupational health certificate (ASO) exams for employees, or
# clinical exams for patients, and reports adherence.
#
# Any value may reference an environment variable as ${{VAR_NAME}}, and any
# key may be overridden with ASO_<SECTION>_<KEY>, e.g. ASO_STORAGE_DATA_DIR.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Tracked population: "occupational" (employees, exams expire) or
# "clinical" (patients, exams can be cancelled)
variant = "{variant}"

# ============================================================================
# Storage
# ============================================================================
[storage]
# "file" keeps one JSON document per key under data_dir;
# "memory" keeps nothing between runs
backend = "file"

# Directory holding the JSON documents
data_dir = "./data"

# Keys are named <key_prefix>_<record>_<key_version>
key_prefix = "aso_control"
key_version = "v3"

# ============================================================================
# Exam Lifecycle
# ============================================================================
[lifecycle]
# Completed exams expiring within this many days are flagged
warning_window_days = 30

# Target adherence percentage shown beside the monthly buckets
adherence_goal = 100.0

# Validity in months for exams logged without an explicit one
default_validity_months = 12

# ============================================================================
# Sample Data
# ============================================================================
[mock]
# Seed an empty store with generated records on first use
enabled = true

# Number of generated subjects
subject_count = 50

# Fixed seed for reproducible sample data (random when unset)
# seed = 42

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = true

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_generated_configs_parse() {
        for variant in [Variant::Occupational, Variant::Clinical] {
            for content in [
                InitArgs::generate_minimal_config(variant),
                InitArgs::generate_config_with_examples(variant),
            ] {
                let config: AppConfig = toml::from_str(&content).unwrap();
                assert_eq!(config.application.variant, variant);
                assert!(config.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("aso-control.toml");
        std::fs::write(&output, "keep me").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            variant: Variant::Occupational,
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[lifecycle]"));
    }
}
