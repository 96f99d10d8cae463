//! Adherence aggregation
//!
//! Single-pass tallies over in-memory exam and subject collections:
//!
//! - [`compute_adherence_percentage`] - the canonical two-decimal percentage
//! - [`aggregate_monthly_adherence`] - twelve buckets for a year
//! - [`aggregate_by_exam_type`] - ok/expired per exam type
//! - [`compute_indicators`], [`compute_adherence_stats`], [`compute_dashboard_stats`]
//!
//! Presentation-level rounding (one decimal on charts) is left to callers.

pub mod by_type;
pub mod monthly;
pub mod stats;

pub use by_type::{aggregate_by_exam_type, TypeAdherence};
pub use monthly::{aggregate_monthly_adherence, MonthlyAdherence, ADHERENCE_GOAL, MONTHS};
pub use stats::{
    compute_adherence_stats, compute_dashboard_stats, compute_indicators, AdherenceStats,
    DashboardStats, Indicators, TotalAdherence,
};

/// `numerator / denominator` rounded half-up to two decimals
///
/// Rounds on integer hundredths, so an exact `.xx5` always goes up. A zero
/// denominator yields 0.
pub(crate) fn ratio2(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let (n, d) = (numerator as u128, denominator as u128);
    let hundredths = (n * 200 + d) / (2 * d);
    hundredths as f64 / 100.0
}

/// Percentage of `subject_count` covered by `completed_count`
///
/// Returns 0 for an empty population instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use aso_control::core::adherence::compute_adherence_percentage;
///
/// assert_eq!(compute_adherence_percentage(50, 35), 70.0);
/// assert_eq!(compute_adherence_percentage(3, 1), 33.33);
/// assert_eq!(compute_adherence_percentage(0, 0), 0.0);
/// ```
pub fn compute_adherence_percentage(subject_count: usize, completed_count: usize) -> f64 {
    ratio2(completed_count.saturating_mul(100), subject_count)
}
