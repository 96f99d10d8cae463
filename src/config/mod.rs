//! Configuration management for ASO Control.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! ASO Control uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ASO_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aso_control::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("aso-control.toml")?;
//!
//! println!("Variant: {}", config.application.variant);
//! println!("Data dir: {}", config.storage.data_dir.display());
//! println!("Warning window: {} days", config.lifecycle.warning_window_days);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and tracked population
//! - [`StorageConfig`] - backend, data directory and key naming
//! - [`LifecycleConfig`] - warning window, adherence goal, default validity
//! - [`MockConfig`] - sample data seeding
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! variant = "occupational"
//!
//! [storage]
//! backend = "file"
//! data_dir = "${ASO_DATA_DIR}"
//!
//! [lifecycle]
//! warning_window_days = 30
//! default_validity_months = 12
//!
//! [mock]
//! enabled = true
//! subject_count = 50
//! seed = 42
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AppConfig, ApplicationConfig, LifecycleConfig, LoggingConfig, MockConfig, StorageBackend,
    StorageConfig,
};
