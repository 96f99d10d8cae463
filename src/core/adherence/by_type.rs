//! Per-exam-type adherence

use super::ratio2;
use crate::domain::{Exam, ExamStatus, ExamType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ok/expired tally for one exam type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeAdherence {
    pub ok: usize,
    pub expired: usize,
    /// `ok / (ok + expired) * 100`, two decimals; 0 when both are zero
    pub percentage: f64,
}

/// Groups exams by type and tallies completed vs expired
///
/// Types with no exams at all are omitted rather than zero-filled; a type
/// whose exams are all pending/scheduled/cancelled is present with zeros.
/// Keys iterate in [`ExamType::ALL`] order.
pub fn aggregate_by_exam_type(exams: &[Exam]) -> BTreeMap<ExamType, TypeAdherence> {
    let mut by_type: BTreeMap<ExamType, TypeAdherence> = BTreeMap::new();

    for exam in exams {
        let entry = by_type.entry(exam.exam_type).or_default();
        match exam.status {
            ExamStatus::Completed => entry.ok += 1,
            ExamStatus::Expired => entry.expired += 1,
            _ => {}
        }
    }

    for tally in by_type.values_mut() {
        tally.percentage = ratio2(tally.ok * 100, tally.ok + tally.expired);
    }

    by_type
}
