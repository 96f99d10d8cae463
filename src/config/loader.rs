//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AppConfig, StorageBackend};
use crate::domain::errors::AsoError;
use crate::domain::result::Result;
use regex::Regex;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (ASO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read, a referenced
/// variable is unset, the TOML is malformed, an override does not parse, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use aso_control::config::loader::load_config;
///
/// let config = load_config("aso-control.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AsoError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AsoError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| AsoError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AsoError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{}}}", var_name), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|m| m == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AsoError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads and parses one override variable; unset means `None`
fn env_override<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            AsoError::Configuration(format!("Invalid value '{raw}' for {name}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using ASO_* prefix
///
/// Environment variables follow the pattern ASO_<SECTION>_<KEY>, for example
/// ASO_STORAGE_DATA_DIR or ASO_LIFECYCLE_WARNING_WINDOW_DAYS.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    // Application
    if let Some(val) = env_override::<String>("ASO_APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("ASO_APPLICATION_VARIANT")? {
        config.application.variant = val;
    }

    // Storage
    if let Some(val) = env_override::<String>("ASO_STORAGE_BACKEND")? {
        config.storage.backend = match val.to_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(AsoError::Configuration(format!(
                    "Invalid value '{other}' for ASO_STORAGE_BACKEND: expected file or memory"
                )))
            }
        };
    }
    if let Some(val) = env_override::<PathBuf>("ASO_STORAGE_DATA_DIR")? {
        config.storage.data_dir = val;
    }
    if let Some(val) = env_override("ASO_STORAGE_KEY_PREFIX")? {
        config.storage.key_prefix = val;
    }
    if let Some(val) = env_override("ASO_STORAGE_KEY_VERSION")? {
        config.storage.key_version = val;
    }

    // Lifecycle
    if let Some(val) = env_override("ASO_LIFECYCLE_WARNING_WINDOW_DAYS")? {
        config.lifecycle.warning_window_days = val;
    }
    if let Some(val) = env_override("ASO_LIFECYCLE_ADHERENCE_GOAL")? {
        config.lifecycle.adherence_goal = val;
    }
    if let Some(val) = env_override("ASO_LIFECYCLE_DEFAULT_VALIDITY_MONTHS")? {
        config.lifecycle.default_validity_months = val;
    }

    // Mock data
    if let Some(val) = env_override("ASO_MOCK_ENABLED")? {
        config.mock.enabled = val;
    }
    if let Some(val) = env_override("ASO_MOCK_SUBJECT_COUNT")? {
        config.mock.subject_count = val;
    }
    if let Some(val) = env_override("ASO_MOCK_SEED")? {
        config.mock.seed = Some(val);
    }

    // Logging
    if let Some(val) = env_override("ASO_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("ASO_LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("ASO_LOGGING_LOCAL_ROTATION")? {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ASO_LOADER_TEST_DIR", "/srv/aso");
        let input = "data_dir = \"${ASO_LOADER_TEST_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "data_dir = \"/srv/aso\"\n");
        std::env::remove_var("ASO_LOADER_TEST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ASO_LOADER_MISSING_VAR");
        let input = "data_dir = \"${ASO_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(matches!(result, Err(AsoError::Configuration(_))));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("ASO_LOADER_COMMENTED_VAR");
        let input = "# data_dir = \"${ASO_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"
variant = "clinical"

[storage]
backend = "memory"
key_prefix = "clinic"

[lifecycle]
warning_window_days = 15

[mock]
enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.application.variant, crate::domain::Variant::Clinical);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.keys().exams, "clinic_exams_v3");
        assert_eq!(config.lifecycle.warning_window_days, 15);
        assert_eq!(config.lifecycle.default_validity_months, 12);
        assert!(!config.mock.enabled);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[lifecycle]\ndefault_validity_months = 0\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("default_validity_months"));
    }
}
