//! Sample data
//!
//! Deterministic, seeded generation of subjects and exams used to populate an
//! empty store. Statuses are drawn roughly 80% completed, 10% expired (or
//! cancelled, for patients), 5% scheduled and 5% pending.

pub mod catalog;
pub mod generator;

pub use generator::{generate, MockData, MockOptions};
