//! Integration tests for configuration loading and validation
//!
//! Every test here takes ENV_MUTEX since load_config reads ASO_* variables.

use aso_control::config::{load_config, StorageBackend};
use aso_control::domain::Variant;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDES: [&str; 7] = [
    "ASO_APPLICATION_LOG_LEVEL",
    "ASO_APPLICATION_VARIANT",
    "ASO_STORAGE_BACKEND",
    "ASO_STORAGE_DATA_DIR",
    "ASO_LIFECYCLE_WARNING_WINDOW_DAYS",
    "ASO_MOCK_SEED",
    "TEST_ASO_DATA_DIR",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for name in OVERRIDES {
        std::env::remove_var(name);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
variant = "clinical"

[storage]
backend = "file"
data_dir = "/srv/aso/data"
key_prefix = "clinica"
key_version = "v4"

[lifecycle]
warning_window_days = 45
adherence_goal = 90.0
default_validity_months = 6

[mock]
enabled = true
subject_count = 20
seed = 1234

[logging]
local_enabled = false
local_path = "/var/log/aso"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.variant, Variant::Clinical);
    assert_eq!(config.storage.backend, StorageBackend::File);
    assert_eq!(
        config.storage.data_dir,
        std::path::PathBuf::from("/srv/aso/data")
    );
    let keys = config.storage.keys();
    assert_eq!(keys.subjects, "clinica_subjects_v4");
    assert_eq!(keys.settings, "clinica_settings_v4");
    assert_eq!(config.lifecycle.warning_window_days, 45);
    assert_eq!(config.lifecycle.adherence_goal, 90.0);
    assert_eq!(config.lifecycle.default_validity_months, 6);
    assert_eq!(config.mock.subject_count, 20);
    assert_eq!(config.mock.seed, Some(1234));
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.variant, Variant::Occupational);
    assert_eq!(config.storage.keys().exams, "aso_control_exams_v3");
    assert_eq!(config.lifecycle.warning_window_days, 30);
    assert_eq!(config.lifecycle.adherence_goal, 100.0);
    assert_eq!(config.lifecycle.default_validity_months, 12);
    assert!(config.mock.enabled);
    assert_eq!(config.mock.subject_count, 50);
    assert_eq!(config.mock.seed, None);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_ASO_DATA_DIR", "/mnt/records");

    let file = write_config(
        r#"
[storage]
data_dir = "${TEST_ASO_DATA_DIR}"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.storage.data_dir,
        std::path::PathBuf::from("/mnt/records")
    );

    cleanup_env_vars();
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_ASO_DATA_DIR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("ASO_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("ASO_APPLICATION_VARIANT", "clinical");
    std::env::set_var("ASO_STORAGE_BACKEND", "memory");
    std::env::set_var("ASO_LIFECYCLE_WARNING_WINDOW_DAYS", "7");
    std::env::set_var("ASO_MOCK_SEED", "99");

    let file = write_config(
        r#"
[application]
log_level = "info"
variant = "occupational"

[lifecycle]
warning_window_days = 30
"#,
    );
    let config = load_config(file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.application.variant, Variant::Clinical);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.lifecycle.warning_window_days, 7);
    assert_eq!(config.mock.seed, Some(99));
}

#[test]
fn test_unparsable_override_is_a_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("ASO_LIFECYCLE_WARNING_WINDOW_DAYS", "a month");

    let file = write_config("");
    let result = load_config(file.path());
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("ASO_LIFECYCLE_WARNING_WINDOW_DAYS"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nvariant = \"hospital\"\n",
        "[application]\nlog_level = \"loud\"\n",
        "[lifecycle]\nadherence_goal = 120.0\n",
        "[mock]\nenabled = true\nsubject_count = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[storage]\nbackend = \"s3\"\n",
    ] {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}
