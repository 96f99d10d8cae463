//! ASO control sheet
//!
//! One row per subject and one cell per exam type, the layout of the
//! spreadsheet HR keeps, plus the summary tab counts.

use super::format_date_br;
use crate::domain::{Exam, ExamStatus, ExamType, Profile, Subject, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed leading columns, before one column per [`ExamType::ALL`] entry
pub const FIXED_HEADERS: [&str; 12] = [
    "Matrícula",
    "Nome",
    "CPF",
    "Cargo",
    "Turno",
    "Setor",
    "Data Admissão",
    "Último ASO",
    "Idade",
    "Sexo",
    "Email",
    "Telefone",
];

/// One subject line of the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub registration: String,
    pub name: String,
    pub cpf: String,
    pub role: String,
    pub shift: String,
    pub sector: String,
    pub admission_date: String,
    /// Latest completed exam, `-` when none
    pub last_exam_date: String,
    pub age: u8,
    pub gender: String,
    pub email: String,
    pub phone: String,
    /// One cell per exam type, aligned with [`ExamType::ALL`]
    pub cells: Vec<String>,
}

impl SheetRow {
    /// Every column as text, in header order
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.registration.clone(),
            self.name.clone(),
            self.cpf.clone(),
            self.role.clone(),
            self.shift.clone(),
            self.sector.clone(),
            self.admission_date.clone(),
            self.last_exam_date.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.email.clone(),
            self.phone.clone(),
        ];
        record.extend(self.cells.iter().cloned());
        record
    }
}

/// Summary tab counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub total_subjects: usize,
    pub total_exams: usize,
    pub ok: usize,
    pub expired: usize,
    pub pending: usize,
    pub scheduled: usize,
}

impl SheetSummary {
    /// Label/value pairs as shown on the summary tab
    pub fn entries(&self) -> [(&'static str, usize); 6] {
        [
            ("Total de Funcionários", self.total_subjects),
            ("Total de Exames", self.total_exams),
            ("Exames Ok", self.ok),
            ("Exames Vencidos", self.expired),
            ("Exames Pendentes", self.pending),
            ("Exames Agendados", self.scheduled),
        ]
    }
}

/// The full control sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSheet {
    pub rows: Vec<SheetRow>,
    pub summary: SheetSummary,
}

impl ControlSheet {
    /// Column headers: fixed columns then exam type names
    pub fn headers() -> Vec<&'static str> {
        FIXED_HEADERS
            .iter()
            .copied()
            .chain(ExamType::ALL.iter().map(|t| t.name()))
            .collect()
    }
}

/// Text of one exam cell
pub fn exam_cell(exam: Option<&Exam>) -> String {
    let Some(exam) = exam else {
        return "-".to_string();
    };
    let date_or_blank = |date: Option<DateTime<Utc>>| date.map(format_date_br).unwrap_or_default();

    match exam.status {
        ExamStatus::Completed => format!("Ok - {}", format_date_br(exam.date)),
        ExamStatus::Expired => format!("Vencido - {}", date_or_blank(exam.expiration_date)),
        ExamStatus::Scheduled => format!(
            "Agendado - {}",
            format_date_br(exam.scheduled_date.unwrap_or(exam.date))
        ),
        ExamStatus::Pending | ExamStatus::Cancelled => "Pendente".to_string(),
    }
}

/// Latest occurrence date among completed exams
pub fn last_completed_date<'a>(exams: impl IntoIterator<Item = &'a Exam>) -> Option<DateTime<Utc>> {
    exams
        .into_iter()
        .filter(|e| e.status == ExamStatus::Completed)
        .map(|e| e.date)
        .max()
}

/// Builds the sheet for `subjects` over `exams`
///
/// For each subject and type the first matching exam in `exams` order is
/// shown. Summary counts cover only exams of the listed subjects.
pub fn build_control_sheet(subjects: &[&Subject], exams: &[Exam]) -> ControlSheet {
    let mut by_subject: HashMap<&SubjectId, Vec<&Exam>> = HashMap::new();
    for exam in exams {
        by_subject.entry(&exam.subject_id).or_default().push(exam);
    }

    let mut summary = SheetSummary {
        total_subjects: subjects.len(),
        ..SheetSummary::default()
    };

    let rows = subjects
        .iter()
        .map(|subject| {
            let owned = by_subject
                .get(&subject.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for exam in owned {
                summary.total_exams += 1;
                match exam.status {
                    ExamStatus::Completed => summary.ok += 1,
                    ExamStatus::Expired => summary.expired += 1,
                    ExamStatus::Pending => summary.pending += 1,
                    ExamStatus::Scheduled => summary.scheduled += 1,
                    ExamStatus::Cancelled => {}
                }
            }

            let cells = ExamType::ALL
                .iter()
                .map(|t| exam_cell(owned.iter().copied().find(|e| e.exam_type == *t)))
                .collect();

            build_row(subject, owned, cells)
        })
        .collect();

    ControlSheet { rows, summary }
}

fn build_row(subject: &Subject, owned: &[&Exam], cells: Vec<String>) -> SheetRow {
    let (registration, role, shift, sector, admission_date) = match &subject.profile {
        Profile::Employee {
            registration,
            sector,
            role,
            shift,
            admission_date,
        } => (
            registration.clone(),
            role.clone(),
            shift.clone(),
            sector.to_string(),
            format_date_br(*admission_date),
        ),
        Profile::Patient { .. } => Default::default(),
    };

    SheetRow {
        registration,
        name: subject.name.clone(),
        cpf: subject.cpf.to_string(),
        role,
        shift,
        sector,
        admission_date,
        last_exam_date: last_completed_date(owned.iter().copied())
            .map(format_date_br)
            .unwrap_or_else(|| "-".to_string()),
        age: subject.age,
        gender: subject.gender.to_string(),
        email: subject.email.clone(),
        phone: subject.phone.clone(),
        cells,
    }
}
