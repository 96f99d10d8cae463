//! Domain error types
//!
//! This module defines the error hierarchy for ASO Control.
//! All errors are domain-specific and don't expose third-party types.

use std::fmt;
use thiserror::Error;

/// Main ASO Control error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum AsoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors on a single value
    #[error("Validation error: {0}")]
    Validation(String),

    /// Form validation errors, collected across every field
    #[error("Invalid input: {}", FieldErrors(.errors))]
    InvalidInput { errors: Vec<FieldError> },

    /// A date string could not be parsed, or date arithmetic left the representable range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Illegal exam status transition
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl AsoError {
    /// Shorthand for a single-field input error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AsoError::InvalidInput {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AsoError::Configuration(_) => 2,
            AsoError::Validation(_)
            | AsoError::InvalidInput { .. }
            | AsoError::InvalidDate(_)
            | AsoError::InvalidTransition { .. }
            | AsoError::NotFound(_) => 3,
            AsoError::Storage(_) | AsoError::Serialization(_) | AsoError::Io(_) => 4,
        }
    }
}

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it appears in the form
    pub field: String,

    /// User-facing message
    pub message: String,
}

impl FieldError {
    /// Creates a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AsoError {
    fn from(err: std::io::Error) -> Self {
        AsoError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AsoError {
    fn from(err: serde_json::Error) -> Self {
        AsoError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AsoError {
    fn from(err: toml::de::Error) -> Self {
        AsoError::Configuration(format!("TOML parse error: {err}"))
    }
}
