//! Derived per-subject views

use crate::core::lifecycle::is_expiring_within_window;
use crate::core::report::last_completed_date;
use crate::domain::{Exam, ExamStatus, ExamType, Subject};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A subject with its exams, computed from the exam index on read
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub subject: Subject,
    /// Owned exams in insertion order
    pub exams: Vec<Exam>,
    /// Types with a pending exam, deduplicated
    pub pending_exam_types: Vec<ExamType>,
    /// Latest completed exam date
    pub last_exam_date: Option<DateTime<Utc>>,
}

impl SubjectView {
    pub(crate) fn build(subject: &Subject, exams: Vec<Exam>) -> Self {
        let mut pending_exam_types = Vec::new();
        for exam in exams.iter().filter(|e| e.status == ExamStatus::Pending) {
            if !pending_exam_types.contains(&exam.exam_type) {
                pending_exam_types.push(exam.exam_type);
            }
        }
        let last_exam_date = last_completed_date(&exams);

        Self {
            subject: subject.clone(),
            exams,
            pending_exam_types,
            last_exam_date,
        }
    }

    /// Completed exams whose expiration falls within `window_days` of `as_of`
    pub fn expiring(&self, window_days: u32, as_of: DateTime<Utc>) -> Vec<&Exam> {
        self.exams
            .iter()
            .filter(|e| e.status == ExamStatus::Completed)
            .filter(|e| {
                e.expiration_date
                    .is_some_and(|exp| is_expiring_within_window(exp, window_days, as_of))
            })
            .collect()
    }
}
