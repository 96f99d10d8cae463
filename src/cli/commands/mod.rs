//! CLI command implementations
//!
//! Every command loads the configuration, opens the record store and maps
//! domain errors to the process exit codes (2 configuration, 3 validation,
//! 4 storage, 5 fatal).

pub mod exams;
pub mod exchange;
pub mod init;
pub mod refresh;
pub mod report;
pub mod seed;
pub mod sheet;
pub mod subjects;
pub mod validate;

use crate::adapters::storage::create_store;
use crate::config::{load_config, AppConfig};
use crate::core::lifecycle::parse_date;
use crate::core::mock::MockOptions;
use crate::core::store::{RecordStore, StoreSettings};
use crate::domain::{AsoError, Result};
use chrono::{DateTime, Utc};

/// Opens the store described by `config` without seeding it
pub(crate) fn open_unseeded(config: &AppConfig) -> Result<RecordStore> {
    let backend = create_store(&config.storage)?;
    RecordStore::open(backend, StoreSettings::from_config(config))
}

/// Loads the configuration and opens an initialized store
///
/// Sample records are seeded into an empty store when `[mock] enabled` is
/// set, and expirations are refreshed against the current time.
pub(crate) fn open_store(config_path: &str) -> Result<RecordStore> {
    let config = load_config(config_path)?;
    let mut store = open_unseeded(&config)?;

    let mock = config.mock.enabled.then(|| mock_options(&config, None, None));
    let report = store.initialize(Utc::now(), mock.as_ref())?;
    if report.seeded_subjects > 0 {
        tracing::info!(
            subjects = report.seeded_subjects,
            exams = report.seeded_exams,
            "Seeded empty store with sample records"
        );
    }
    Ok(store)
}

/// Mock options from configuration, with command-line overrides
///
/// Without a configured or supplied seed a random one is drawn.
pub(crate) fn mock_options(
    config: &AppConfig,
    count: Option<usize>,
    seed: Option<u64>,
) -> MockOptions {
    let seed = seed.or(config.mock.seed).unwrap_or_else(rand::random);
    MockOptions::new(count.unwrap_or(config.mock.subject_count), seed)
        .with_validity(config.lifecycle.default_validity_months)
}

/// Parses an optional `--date` argument, defaulting to now
pub(crate) fn date_or_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(Utc::now()),
    }
}

/// Prints a failure and returns the exit code for it
pub(crate) fn report_failure(context: &str, error: &AsoError) -> i32 {
    tracing::error!(error = %error, context = context, "Command failed");

    println!("❌ {context}");
    match error {
        AsoError::InvalidInput { errors } => {
            for field in errors {
                println!("   - {field}");
            }
        }
        other => println!("   Error: {other}"),
    }
    error.exit_code()
}

/// `-` for a missing table cell
pub(crate) fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(AsoError::Configuration("x".into()) => 2; "configuration")]
    #[test_case(AsoError::field("phone", "must have 11 digits") => 3; "invalid input")]
    #[test_case(AsoError::InvalidTransition { from: "expired".into(), to: "completed".into() } => 3; "transition")]
    #[test_case(AsoError::NotFound("Exam exam-1".into()) => 3; "not found")]
    #[test_case(AsoError::Storage("disk full".into()) => 4; "storage")]
    fn test_report_failure_exit_codes(error: AsoError) -> i32 {
        report_failure("test", &error)
    }

    #[test]
    fn test_mock_options_prefers_explicit_values() {
        let mut config = AppConfig::default();
        config.mock.seed = Some(7);
        config.lifecycle.default_validity_months = 6;

        let options = mock_options(&config, None, None);
        assert_eq!(options.seed, 7);
        assert_eq!(options.subject_count, 50);
        assert_eq!(options.validity_months, 6);

        let options = mock_options(&config, Some(3), Some(9));
        assert_eq!(options.seed, 9);
        assert_eq!(options.subject_count, 3);
    }

    #[test]
    fn test_date_or_now_rejects_garbage() {
        assert!(matches!(
            date_or_now(Some("31/01/2024")),
            Err(AsoError::InvalidDate(_))
        ));
        assert!(date_or_now(None).is_ok());
    }
}
