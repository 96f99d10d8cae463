//! Crate-wide result alias

use super::errors::AsoError;

/// Result of any fallible engine or store operation
///
/// ```
/// use aso_control::domain::{AsoError, Result};
///
/// fn validity(months: u32) -> Result<u32> {
///     if months == 0 {
///         return Err(AsoError::Validation("validity must be positive".into()));
///     }
///     Ok(months)
/// }
///
/// assert_eq!(validity(12).unwrap(), 12);
/// assert!(validity(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, AsoError>;
