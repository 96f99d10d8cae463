//! Exam lifecycle engine
//!
//! Pure functions deriving expiration dates and classifying exams. No I/O;
//! the [`RecordStore`](crate::core::store::RecordStore) invokes these and
//! persists the results.
//!
//! # Example
//!
//! ```rust
//! use aso_control::core::lifecycle::{
//!     classify_status, compute_expiration_date, is_expired, parse_date, ExpirationStatus,
//! };
//!
//! # fn example() -> aso_control::domain::Result<()> {
//! let done = parse_date("2023-03-10")?;
//! let expires = compute_expiration_date(done, 12)?;
//! assert_eq!(expires, parse_date("2024-03-10")?);
//!
//! assert!(is_expired(expires, parse_date("2024-03-11")?));
//! assert!(!is_expired(expires, parse_date("2024-03-09")?));
//! assert_eq!(
//!     classify_status(None, 30, parse_date("2024-03-09")?),
//!     ExpirationStatus::Warning
//! );
//! # Ok(())
//! # }
//! ```

pub mod expiration;
pub mod recompute;

pub use expiration::{
    classify_status, compute_expiration_date, compute_expiration_date_str, is_expired,
    is_expiring_within_window, parse_date, ExpirationStatus, DEFAULT_WARNING_WINDOW_DAYS,
};
pub use recompute::{recompute_expiration_statuses, recompute_in_place};
