//! Export document format

use crate::core::lifecycle::compute_expiration_date;
use crate::domain::{AsoError, Exam, Result, Subject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Full snapshot of the record store
///
/// On import each list that is present replaces the stored list; an absent
/// list leaves the stored one as it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<Subject>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exams: Option<Vec<Exam>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl ExportDocument {
    /// Snapshot of both lists stamped with `exported_at`
    pub fn new(subjects: Vec<Subject>, exams: Vec<Exam>, exported_at: DateTime<Utc>) -> Self {
        Self {
            subjects: Some(subjects),
            exams: Some(exams),
            export_date: Some(exported_at),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the input is not a valid document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Checks that `exams` can live beside `subjects`
///
/// Subject ids and exam ids must be unique, every exam must reference a
/// listed subject, and the expiration date must agree with the status. When
/// an exam carries both an expiration date and a validity period, the date
/// must equal the occurrence date plus that many months.
///
/// # Errors
///
/// Returns a validation error naming the first offending record.
pub fn check_consistency(subjects: &[Subject], exams: &[Exam]) -> Result<()> {
    let mut known: HashSet<&str> = HashSet::with_capacity(subjects.len());
    for subject in subjects {
        if !known.insert(subject.id.as_str()) {
            return Err(AsoError::Validation(format!(
                "Duplicate subject id {}",
                subject.id
            )));
        }
    }

    let mut seen = HashSet::with_capacity(exams.len());
    for exam in exams {
        if !seen.insert(exam.id.as_str()) {
            return Err(AsoError::Validation(format!(
                "Duplicate exam id {}",
                exam.id
            )));
        }
        if !known.contains(exam.subject_id.as_str()) {
            return Err(AsoError::Validation(format!(
                "Exam {} references unknown subject {}",
                exam.id, exam.subject_id
            )));
        }
        check_expiration(exam)?;
    }
    Ok(())
}

fn check_expiration(exam: &Exam) -> Result<()> {
    if !exam.expiration_consistent() {
        let state = if exam.expiration_date.is_some() {
            "has"
        } else {
            "lacks"
        };
        return Err(AsoError::Validation(format!(
            "Exam {} is {} but {} an expiration date",
            exam.id, exam.status, state
        )));
    }
    if exam.validity_period == Some(0) {
        return Err(AsoError::Validation(format!(
            "Exam {} has a zero month validity period",
            exam.id
        )));
    }
    if let (Some(expiration), Some(months)) = (exam.expiration_date, exam.validity_period) {
        let expected = compute_expiration_date(exam.date, months)?;
        if expiration != expected {
            return Err(AsoError::Validation(format!(
                "Exam {} expires {} but {} months after {} is {}",
                exam.id,
                expiration.format("%Y-%m-%d"),
                months,
                exam.date.format("%Y-%m-%d"),
                expected.format("%Y-%m-%d")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{at, employee, exam};
    use crate::domain::{ExamStatus, ExamType, Sector};

    fn pair() -> (Vec<Subject>, Vec<Exam>) {
        let subjects = vec![
            employee("employee-1", "ANA PAULA SOUZA", Sector::Mod),
            employee("employee-2", "BRUNO LIMA", Sector::Ti),
        ];
        let exams = vec![
            exam("employee-1", ExamType::Ecg, ExamStatus::Completed, at(2024, 1, 31)),
            exam("employee-2", ExamType::Eeg, ExamStatus::Pending, at(2024, 3, 1)),
        ];
        (subjects, exams)
    }

    #[test]
    fn test_consistent_lists_pass() {
        let (subjects, exams) = pair();
        assert!(check_consistency(&subjects, &exams).is_ok());
    }

    #[test]
    fn test_duplicate_subject_id_is_rejected() {
        let (mut subjects, exams) = pair();
        let mut twin = subjects[0].clone();
        twin.name = "OUTRA PESSOA".to_string();
        subjects.push(twin);

        let err = check_consistency(&subjects, &exams).unwrap_err();
        assert!(matches!(err, AsoError::Validation(ref m) if m.contains("employee-1")));
    }

    #[test]
    fn test_expiration_must_follow_validity() {
        let (subjects, mut exams) = pair();
        exams[0].expiration_date = Some(at(2099, 1, 1));
        assert!(matches!(
            check_consistency(&subjects, &exams),
            Err(AsoError::Validation(_))
        ));

        // 2024-01-31 + 12 months, clamped
        exams[0].expiration_date = Some(at(2025, 1, 31));
        assert!(check_consistency(&subjects, &exams).is_ok());

        exams[0].validity_period = Some(0);
        assert!(matches!(
            check_consistency(&subjects, &exams),
            Err(AsoError::Validation(_))
        ));
    }

    #[test]
    fn test_expiration_without_validity_is_only_checked_for_presence() {
        let (subjects, mut exams) = pair();
        exams[0].validity_period = None;
        exams[0].expiration_date = Some(at(2030, 5, 5));
        assert!(check_consistency(&subjects, &exams).is_ok());

        exams[1].expiration_date = Some(at(2030, 5, 5));
        assert!(check_consistency(&subjects, &exams).is_err());
    }
}
