//! Logging for the CLI and the record store
//!
//! [`init_logging`] installs a compact stderr layer and, when
//! `[logging] local_enabled` is set, a rotated JSON file layer. The macros
//! below give store mutations and refreshes a uniform set of fields so the
//! JSON log can be filtered by `action` or `record_id`.
//!
//! ```no_run
//! use aso_control::config::LoggingConfig;
//! use aso_control::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default())?;
//! aso_control::log_store_mutation!("complete_exam", "exam-42");
//! # Ok::<(), aso_control::domain::AsoError>(())
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log a record store mutation
///
/// # Example
///
/// ```no_run
/// use aso_control::log_store_mutation;
///
/// log_store_mutation!("add_exam", "exam-123");
/// ```
#[macro_export]
macro_rules! log_store_mutation {
    ($action:expr, $record_id:expr) => {
        tracing::info!(
            action = $action,
            record_id = %$record_id,
            "Record store mutated"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use aso_control::log_error_with_context;
/// use aso_control::domain::AsoError;
///
/// let error = AsoError::Storage("disk full".to_string());
/// log_error_with_context!(&error, "Failed to persist exams");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log the outcome of an expiration refresh
///
/// # Example
///
/// ```no_run
/// use aso_control::log_refresh_complete;
///
/// log_refresh_complete!(3, 120);
/// ```
#[macro_export]
macro_rules! log_refresh_complete {
    ($transitioned:expr, $total:expr) => {
        tracing::info!(
            transitioned = $transitioned,
            total_exams = $total,
            "Expiration refresh completed"
        );
    };
}
