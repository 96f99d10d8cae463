//! Expiration date derivation and status classification
//!
//! Every time-sensitive function takes an explicit `as_of` instant instead of
//! reading the clock.

use crate::domain::{AsoError, Result};
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default warning window, in days
pub const DEFAULT_WARNING_WINDOW_DAYS: u32 = 30;

/// Expiration-based classification of an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationStatus {
    Ok,
    Warning,
    Expired,
}

impl fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpirationStatus::Ok => f.write_str("ok"),
            ExpirationStatus::Warning => f.write_str("warning"),
            ExpirationStatus::Expired => f.write_str("expired"),
        }
    }
}

/// Parses a date string into a UTC instant
///
/// Accepts RFC 3339 timestamps (`2024-03-10T12:00:00Z`, any offset) and bare
/// calendar dates (`2024-03-10`, read as midnight UTC).
///
/// # Errors
///
/// Returns [`AsoError::InvalidDate`] for anything else.
///
/// # Examples
///
/// ```
/// use aso_control::core::lifecycle::parse_date;
///
/// let d = parse_date("2024-03-10").unwrap();
/// assert_eq!(d.to_rfc3339(), "2024-03-10T00:00:00+00:00");
/// assert!(parse_date("10/03/2024").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AsoError::InvalidDate(format!("'{input}' is not an ISO 8601 date")))
}

/// Adds `validity_months` calendar months to `occurred`
///
/// Day-of-month overflow clamps to the last day of the target month, so a
/// January 31st exam with one month of validity expires on February 29th in a
/// leap year (28th otherwise). The time of day is preserved.
///
/// # Errors
///
/// - [`AsoError::Validation`] when `validity_months` is zero
/// - [`AsoError::InvalidDate`] when the result is out of range
pub fn compute_expiration_date(
    occurred: DateTime<Utc>,
    validity_months: u32,
) -> Result<DateTime<Utc>> {
    if validity_months == 0 {
        return Err(AsoError::Validation(
            "validity period must be at least 1 month".to_string(),
        ));
    }
    occurred
        .checked_add_months(Months::new(validity_months))
        .ok_or_else(|| {
            AsoError::InvalidDate(format!(
                "{occurred} plus {validity_months} months is out of range"
            ))
        })
}

/// String-input variant of [`compute_expiration_date`]
pub fn compute_expiration_date_str(occurred: &str, validity_months: u32) -> Result<DateTime<Utc>> {
    compute_expiration_date(parse_date(occurred)?, validity_months)
}

/// True iff `expiration` is strictly before `as_of`
pub fn is_expired(expiration: DateTime<Utc>, as_of: DateTime<Utc>) -> bool {
    expiration < as_of
}

/// True iff `expiration` lies in `[as_of, as_of + window_days]`, both ends inclusive
pub fn is_expiring_within_window(
    expiration: DateTime<Utc>,
    window_days: u32,
    as_of: DateTime<Utc>,
) -> bool {
    let horizon = as_of
        .checked_add_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    expiration >= as_of && expiration <= horizon
}

/// Classifies an exam by its expiration date
///
/// An unknown expiration date needs attention and yields `Warning`.
pub fn classify_status(
    expiration: Option<DateTime<Utc>>,
    window_days: u32,
    as_of: DateTime<Utc>,
) -> ExpirationStatus {
    let Some(expiration) = expiration else {
        return ExpirationStatus::Warning;
    };
    if is_expired(expiration, as_of) {
        ExpirationStatus::Expired
    } else if is_expiring_within_window(expiration, window_days, as_of) {
        ExpirationStatus::Warning
    } else {
        ExpirationStatus::Ok
    }
}
