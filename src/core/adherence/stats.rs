//! Headline indicators and summary statistics

use super::by_type::{aggregate_by_exam_type, TypeAdherence};
use super::monthly::{aggregate_monthly_adherence, MonthlyAdherence};
use super::{compute_adherence_percentage, ratio2};
use crate::domain::{Exam, ExamStatus, ExamType, Subject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dashboard indicator cards: expired, ok, total and adherence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub expired: usize,
    pub ok: usize,
    pub total: usize,
    /// Ok exams against the subject count
    pub adherence_percentage: f64,
}

/// Overall ok/expired tally
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalAdherence {
    pub ok: usize,
    pub expired: usize,
    /// Ok exams against every exam
    pub percentage: f64,
}

/// Full adherence breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceStats {
    pub total: TotalAdherence,
    pub by_exam_type: BTreeMap<ExamType, TypeAdherence>,
    pub monthly: Vec<MonthlyAdherence>,
}

/// Counters for a filtered dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_subjects: usize,
    pub total_exams: usize,
    pub completed_exams: usize,
    pub pending_exams: usize,
    pub scheduled_exams: usize,
    pub average_exams_per_subject: f64,
}

fn count(exams: &[Exam], status: ExamStatus) -> usize {
    exams.iter().filter(|e| e.status == status).count()
}

/// Computes the indicator cards
pub fn compute_indicators(subject_count: usize, exams: &[Exam]) -> Indicators {
    let ok = count(exams, ExamStatus::Completed);
    Indicators {
        expired: count(exams, ExamStatus::Expired),
        ok,
        total: exams.len(),
        adherence_percentage: compute_adherence_percentage(subject_count, ok),
    }
}

/// Computes the total, per-type and monthly breakdown for `year`
pub fn compute_adherence_stats(
    subjects: &[Subject],
    exams: &[Exam],
    year: i32,
    goal_percentage: f64,
) -> AdherenceStats {
    let ok = count(exams, ExamStatus::Completed);
    let percentage = ratio2(ok * 100, exams.len());

    AdherenceStats {
        total: TotalAdherence {
            ok,
            expired: count(exams, ExamStatus::Expired),
            percentage,
        },
        by_exam_type: aggregate_by_exam_type(exams),
        monthly: aggregate_monthly_adherence(subjects, exams, year, goal_percentage),
    }
}

/// Computes dashboard counters over an already filtered view
pub fn compute_dashboard_stats(subject_count: usize, exams: &[Exam]) -> DashboardStats {
    let average = ratio2(exams.len(), subject_count);
    DashboardStats {
        total_subjects: subject_count,
        total_exams: exams.len(),
        completed_exams: count(exams, ExamStatus::Completed),
        pending_exams: count(exams, ExamStatus::Pending),
        scheduled_exams: count(exams, ExamStatus::Scheduled),
        average_exams_per_subject: average,
    }
}
