//! Core business logic for ASO Control.
//!
//! # Modules
//!
//! - [`lifecycle`] - Expiration dates, status classification and the expiry refresh
//! - [`adherence`] - Indicators, monthly buckets and per-type tallies
//! - [`store`] - The record store owning subjects and exams
//! - [`exchange`] - JSON export and import documents
//! - [`report`] - Control sheet rows and summary
//! - [`mock`] - Seeded sample data for empty stores
//!
//! # Workflow
//!
//! 1. **Open**: read persisted subjects and exams into a [`store::RecordStore`]
//! 2. **Initialize**: seed sample records when empty, then refresh expirations
//! 3. **Mutate**: register subjects, log and move exams through their lifecycle
//! 4. **Report**: indicators, monthly adherence, control sheet
//!
//! # Example
//!
//! ```rust
//! use aso_control::core::lifecycle::recompute_expiration_statuses;
//! use aso_control::core::adherence::aggregate_monthly_adherence;
//! use chrono::Utc;
//!
//! let exams = recompute_expiration_statuses(&[], Utc::now());
//! let buckets = aggregate_monthly_adherence(&[], &exams, 2024, 100.0);
//! assert_eq!(buckets.len(), 12);
//! assert_eq!(buckets[0].month, "Janeiro");
//! ```

pub mod adherence;
pub mod exchange;
pub mod lifecycle;
pub mod mock;
pub mod report;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
