//! Configuration schema types
//!
//! This module defines the configuration structure for ASO Control. Every
//! section is optional in the TOML file and falls back to its defaults.

use crate::adapters::storage::StorageKeys;
use crate::domain::Variant;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persistence backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`
    #[default]
    File,
    /// Volatile, nothing outlives the process
    Memory,
}

/// Main ASO Control configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Where records are persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Exam lifecycle tuning
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Sample data seeding
    #[serde(default)]
    pub mock: MockConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.lifecycle.validate()?;
        self.mock.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Population tracked: occupational (employees) or clinical (patients)
    #[serde(default)]
    pub variant: Variant,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            variant: Variant::default(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding one JSON file per storage key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Application prefix of every key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Schema version suffix of every key
    #[serde(default = "default_key_version")]
    pub key_version: String,
}

impl StorageConfig {
    /// Versioned keys derived from prefix and version
    pub fn keys(&self) -> StorageKeys {
        StorageKeys::new(&self.key_prefix, &self.key_version)
    }

    fn validate(&self) -> Result<(), String> {
        let key_part = |value: &str| {
            !value.is_empty()
                && value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        };

        if !key_part(&self.key_prefix) {
            return Err(format!(
                "storage.key_prefix '{}' must be non-empty and contain only letters, digits, '_' or '-'",
                self.key_prefix
            ));
        }
        if !key_part(&self.key_version) {
            return Err(format!(
                "storage.key_version '{}' must be non-empty and contain only letters, digits, '_' or '-'",
                self.key_version
            ));
        }
        if self.backend == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err("storage.data_dir cannot be empty for the file backend".to_string());
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            key_prefix: default_key_prefix(),
            key_version: default_key_version(),
        }
    }
}

/// Exam lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Days before expiration an exam counts as "expiring soon"
    #[serde(default = "default_warning_window_days")]
    pub warning_window_days: u32,

    /// Adherence goal shown next to monthly percentages
    #[serde(default = "default_adherence_goal")]
    pub adherence_goal: f64,

    /// Validity applied when an exam is logged without one
    #[serde(default = "default_validity_months")]
    pub default_validity_months: u32,
}

impl LifecycleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_validity_months == 0 {
            return Err("lifecycle.default_validity_months must be > 0".to_string());
        }
        if !(self.adherence_goal > 0.0 && self.adherence_goal <= 100.0) {
            return Err(format!(
                "lifecycle.adherence_goal must be in (0, 100], got {}",
                self.adherence_goal
            ));
        }
        if self.warning_window_days > 365 {
            return Err("lifecycle.warning_window_days must be <= 365".to_string());
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            warning_window_days: default_warning_window_days(),
            adherence_goal: default_adherence_goal(),
            default_validity_months: default_validity_months(),
        }
    }
}

/// Sample data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Seed an empty store with sample records on startup
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_subject_count")]
    pub subject_count: usize,

    /// Fixed seed for reproducible data; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MockConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.subject_count == 0 {
            return Err("mock.subject_count must be > 0 when mock.enabled = true".to_string());
        }
        if self.subject_count > 10_000 {
            return Err("mock.subject_count must be <= 10000".to_string());
        }
        Ok(())
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            subject_count: default_subject_count(),
            seed: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_key_prefix() -> String {
    "aso_control".to_string()
}

fn default_key_version() -> String {
    "v3".to_string()
}

fn default_warning_window_days() -> u32 {
    30
}

fn default_adherence_goal() -> f64 {
    100.0
}

fn default_validity_months() -> u32 {
    12
}

fn default_subject_count() -> usize {
    50
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_config_validation() {
        let mut config = StorageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.keys().subjects, "aso_control_subjects_v3");

        config.key_prefix = "bad/prefix".to_string();
        assert!(config.validate().is_err());

        config.key_prefix = "ok".to_string();
        config.key_version = String::new();
        assert!(config.validate().is_err());

        config.key_version = "v4".to_string();
        config.data_dir = PathBuf::new();
        assert!(config.validate().is_err());

        config.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lifecycle_config_validation() {
        let mut config = LifecycleConfig::default();
        assert!(config.validate().is_ok());

        config.default_validity_months = 0;
        assert!(config.validate().is_err());

        config.default_validity_months = 6;
        config.adherence_goal = 0.0;
        assert!(config.validate().is_err());

        config.adherence_goal = 95.0;
        config.warning_window_days = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_config_validation() {
        let mut config = MockConfig::default();
        assert!(config.validate().is_ok());

        config.subject_count = 0;
        assert!(config.validate().is_err());

        config.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.variant, Variant::Occupational);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.lifecycle.warning_window_days, 30);
        assert_eq!(config.lifecycle.default_validity_months, 12);
        assert_eq!(config.mock.subject_count, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_key_prefix(), "aso_control");
        assert_eq!(default_key_version(), "v3");
        assert_eq!(default_adherence_goal(), 100.0);
    }
}
