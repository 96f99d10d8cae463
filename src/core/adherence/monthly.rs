//! Monthly adherence buckets

use super::compute_adherence_percentage;
use crate::domain::{Exam, ExamStatus, Subject};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Fixed adherence goal, in percent
pub const ADHERENCE_GOAL: f64 = 100.0;

/// Portuguese month names, January first
pub const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Adherence figures for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAdherence {
    /// 1 = January
    pub month_number: u32,
    pub month: String,
    /// Current subject count, not a headcount for that month
    pub total_subjects: usize,
    /// Exams dated in the month
    pub total_exams: usize,
    pub completed_exams: usize,
    pub expired_exams: usize,
    pub adherence_percentage: f64,
    pub goal_percentage: f64,
}

/// Builds the twelve monthly buckets of `year`, January to December
///
/// An exam belongs to the month of its occurrence date (UTC). The adherence
/// percentage divides the month's completed exams by the *whole current*
/// subject population, so it reads as "share of today's workforce with an
/// exam completed in month X".
pub fn aggregate_monthly_adherence(
    subjects: &[Subject],
    exams: &[Exam],
    year: i32,
    goal_percentage: f64,
) -> Vec<MonthlyAdherence> {
    let mut totals = [0usize; 12];
    let mut completed = [0usize; 12];
    let mut expired = [0usize; 12];

    for exam in exams.iter().filter(|e| e.date.year() == year) {
        let idx = exam.date.month0() as usize;
        totals[idx] += 1;
        match exam.status {
            ExamStatus::Completed => completed[idx] += 1,
            ExamStatus::Expired => expired[idx] += 1,
            _ => {}
        }
    }

    let subject_count = subjects.len();
    MONTHS
        .iter()
        .enumerate()
        .map(|(idx, name)| MonthlyAdherence {
            month_number: idx as u32 + 1,
            month: (*name).to_string(),
            total_subjects: subject_count,
            total_exams: totals[idx],
            completed_exams: completed[idx],
            expired_exams: expired[idx],
            adherence_percentage: compute_adherence_percentage(subject_count, completed[idx]),
            goal_percentage,
        })
        .collect()
}
