//! Batch expiration refresh

use super::expiration::is_expired;
use crate::domain::{Exam, ExamStatus};
use chrono::{DateTime, Utc};

/// Reclassifies completed exams whose expiration date has passed
///
/// Only `completed` exams carrying an expiration date can move, and only to
/// `expired`; `updated_at` is stamped with `as_of` on those exams alone.
/// Everything else passes through untouched, which makes the function
/// idempotent for a fixed `as_of`.
pub fn recompute_expiration_statuses(exams: &[Exam], as_of: DateTime<Utc>) -> Vec<Exam> {
    let mut out = exams.to_vec();
    recompute_in_place(&mut out, as_of);
    out
}

/// In-place form of [`recompute_expiration_statuses`]
///
/// Returns how many exams transitioned.
pub fn recompute_in_place(exams: &mut [Exam], as_of: DateTime<Utc>) -> usize {
    let mut transitioned = 0;
    for exam in exams.iter_mut() {
        if exam.status != ExamStatus::Completed {
            continue;
        }
        if let Some(expiration) = exam.expiration_date {
            if is_expired(expiration, as_of) {
                exam.status = ExamStatus::Expired;
                exam.updated_at = as_of;
                transitioned += 1;
            }
        }
    }
    transitioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExamId, ExamType, SubjectId};
    use chrono::TimeZone;

    fn exam(id: &str, status: ExamStatus, expiration: Option<DateTime<Utc>>) -> Exam {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        Exam {
            id: ExamId::new(id).unwrap(),
            subject_id: SubjectId::new("employee-1").unwrap(),
            exam_type: ExamType::Audiometria,
            category: ExamType::Audiometria.category(),
            date: created,
            scheduled_date: None,
            expiration_date: expiration,
            validity_period: Some(12),
            status,
            result: None,
            notes: None,
            doctor: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_only_overdue_completed_exams_move() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let exams = vec![
            exam("a", ExamStatus::Completed, Some(past)),
            exam("b", ExamStatus::Completed, Some(future)),
            exam("c", ExamStatus::Completed, None),
            exam("d", ExamStatus::Pending, None),
            exam("e", ExamStatus::Scheduled, None),
            exam("f", ExamStatus::Expired, Some(past)),
            exam("g", ExamStatus::Completed, Some(as_of)),
        ];

        let out = recompute_expiration_statuses(&exams, as_of);

        let statuses: Vec<ExamStatus> = out.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                ExamStatus::Expired,
                ExamStatus::Completed,
                ExamStatus::Completed,
                ExamStatus::Pending,
                ExamStatus::Scheduled,
                ExamStatus::Expired,
                ExamStatus::Completed,
            ]
        );
        assert_eq!(out[0].updated_at, as_of);
        assert_eq!(out[1], exams[1]);
        assert_eq!(out[5], exams[5]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let exams = vec![
            exam("a", ExamStatus::Completed, Some(past)),
            exam("b", ExamStatus::Pending, None),
        ];

        let once = recompute_expiration_statuses(&exams, as_of);
        let twice = recompute_expiration_statuses(&once, as_of);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_in_place_reports_transition_count() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut exams = vec![
            exam("a", ExamStatus::Completed, Some(past)),
            exam("b", ExamStatus::Completed, Some(past)),
        ];
        assert_eq!(recompute_in_place(&mut exams, as_of), 2);
        assert_eq!(recompute_in_place(&mut exams, as_of), 0);
    }
}
