//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ASO Control configuration file.

use crate::config::{load_config, StorageBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let keys = config.storage.keys();
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Variant: {}", config.application.variant);
        match config.storage.backend {
            StorageBackend::File => {
                println!("  Storage: file ({})", config.storage.data_dir.display())
            }
            StorageBackend::Memory => println!("  Storage: memory"),
        }
        println!("  Storage Keys: {}", keys.all().join(", "));
        println!(
            "  Warning Window: {} days",
            config.lifecycle.warning_window_days
        );
        println!("  Adherence Goal: {}%", config.lifecycle.adherence_goal);
        println!(
            "  Default Validity: {} months",
            config.lifecycle.default_validity_months
        );
        if config.mock.enabled {
            let seed = config
                .mock
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string());
            println!(
                "  Sample Data: {} subjects (seed {})",
                config.mock.subject_count, seed
            );
        } else {
            println!("  Sample Data: disabled");
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
