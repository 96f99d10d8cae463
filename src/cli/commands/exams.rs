//! Exam commands: log, schedule, complete, cancel, annotate and remove

use super::{date_or_now, open_store, report_failure};
use crate::core::lifecycle::parse_date;
use crate::core::report::format_date_br;
use crate::core::store::ExamDetails;
use crate::domain::{Exam, ExamId, ExamStatus, ExamType, NewExam, SubjectId};
use chrono::Utc;
use clap::Args;

fn print_exam(heading: &str, exam: &Exam) {
    println!("✅ {heading}: {}", exam.id);
    println!("   Type: {}", exam.exam_type.name());
    println!("   Status: {}", exam.status.label());
    println!("   Date: {}", format_date_br(exam.date));
    if let Some(expiration) = exam.expiration_date {
        println!("   Expires: {}", format_date_br(expiration));
    }
}

/// Arguments for the log-exam command
#[derive(Args, Debug)]
pub struct LogExamArgs {
    /// Owning subject
    #[arg(long)]
    pub subject: SubjectId,

    /// Exam type slug or name, e.g. audiometria, visio-teste, ecg
    #[arg(long)]
    pub exam_type: ExamType,

    /// Occurrence date (default now)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, default_value = "completed")]
    pub status: ExamStatus,

    /// Validity in months (default lifecycle.default_validity_months)
    #[arg(long)]
    pub validity: Option<u32>,

    #[arg(long)]
    pub result: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub doctor: Option<String>,
}

impl LogExamArgs {
    /// Execute the log-exam command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let date = match date_or_now(self.date.as_deref()) {
            Ok(d) => d,
            Err(e) => return Ok(report_failure("Invalid --date", &e)),
        };
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let mut form = NewExam::new(self.subject.clone(), self.exam_type, date, self.status);
        form.validity_period = self.validity;
        form.result = self.result.clone();
        form.notes = self.notes.clone();
        form.doctor = self.doctor.clone();

        match store.add_exam(form, Utc::now()) {
            Ok(exam) => {
                print_exam("Exam logged", &exam);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Exam was not logged", &e)),
        }
    }
}

/// Arguments for the schedule-exam command
#[derive(Args, Debug)]
pub struct ScheduleExamArgs {
    #[arg(long)]
    pub id: ExamId,

    /// Appointment date
    #[arg(long)]
    pub date: String,
}

impl ScheduleExamArgs {
    /// Execute the schedule-exam command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let date = match parse_date(&self.date) {
            Ok(d) => d,
            Err(e) => return Ok(report_failure("Invalid --date", &e)),
        };
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        match store.schedule_exam(&self.id, date, Utc::now()) {
            Ok(exam) => {
                print_exam("Exam scheduled", &exam);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Exam was not scheduled", &e)),
        }
    }
}

/// Arguments for the complete-exam command
#[derive(Args, Debug)]
pub struct CompleteExamArgs {
    #[arg(long)]
    pub id: ExamId,

    /// Date the exam was done (default now)
    #[arg(long)]
    pub date: Option<String>,
}

impl CompleteExamArgs {
    /// Execute the complete-exam command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let date = match self.date.as_deref().map(parse_date).transpose() {
            Ok(d) => d,
            Err(e) => return Ok(report_failure("Invalid --date", &e)),
        };
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        match store.complete_exam(&self.id, date, Utc::now()) {
            Ok(exam) => {
                print_exam("Exam completed", &exam);
                if exam.status == ExamStatus::Expired {
                    println!("⚠️  The exam is already past its validity");
                }
                Ok(0)
            }
            Err(e) => Ok(report_failure("Exam was not completed", &e)),
        }
    }
}

/// Arguments for the cancel-exam command
#[derive(Args, Debug)]
pub struct CancelExamArgs {
    #[arg(long)]
    pub id: ExamId,
}

impl CancelExamArgs {
    /// Execute the cancel-exam command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        match store.cancel_exam(&self.id, Utc::now()) {
            Ok(exam) => {
                print_exam("Exam cancelled", &exam);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Exam was not cancelled", &e)),
        }
    }
}

/// Arguments for the annotate-exam command
///
/// An empty value clears the field.
#[derive(Args, Debug)]
pub struct AnnotateExamArgs {
    #[arg(long)]
    pub id: ExamId,

    #[arg(long)]
    pub result: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub doctor: Option<String>,
}

impl AnnotateExamArgs {
    /// Execute the annotate-exam command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let details = ExamDetails {
            result: self.result.clone(),
            notes: self.notes.clone(),
            doctor: self.doctor.clone(),
        };
        match store.update_exam_details(&self.id, details, Utc::now()) {
            Ok(exam) => {
                print_exam("Exam updated", &exam);
                for (label, value) in [
                    ("Result", &exam.result),
                    ("Notes", &exam.notes),
                    ("Doctor", &exam.doctor),
                ] {
                    if let Some(value) = value {
                        println!("   {label}: {value}");
                    }
                }
                Ok(0)
            }
            Err(e) => Ok(report_failure("Exam was not updated", &e)),
        }
    }
}

/// Arguments for the remove-exam command
#[derive(Args, Debug)]
pub struct RemoveExamArgs {
    #[arg(long)]
    pub id: ExamId,
}

impl RemoveExamArgs {
    /// Execute the remove-exam command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        match store.delete_exam(&self.id) {
            Ok(exam) => {
                println!(
                    "🗑️  Exam {} ({}) removed from subject {}",
                    exam.id,
                    exam.exam_type.name(),
                    exam.subject_id
                );
                Ok(0)
            }
            Err(e) => Ok(report_failure("Exam was not removed", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_log_exam_defaults_to_completed() {
        let cli = Cli::parse_from([
            "aso-control",
            "log-exam",
            "--subject",
            "employee-7",
            "--exam-type",
            "Hemograma c/ plaquetas",
            "--validity",
            "6",
        ]);
        let Commands::LogExam(args) = cli.command else {
            panic!("expected log-exam");
        };
        assert_eq!(args.exam_type, ExamType::Hemograma);
        assert_eq!(args.status, ExamStatus::Completed);
        assert_eq!(args.validity, Some(6));
        assert!(args.date.is_none());
    }

    #[test]
    fn test_schedule_exam_requires_date() {
        let result = Cli::try_parse_from(["aso-control", "schedule-exam", "--id", "exam-1"]);
        assert!(result.is_err());
    }
}
