//! Exam domain model
//!
//! An [`Exam`] is one medical/occupational test instance owned by exactly one
//! subject. Its type determines its category, and its status follows the
//! lifecycle described on [`ExamStatus`].

use crate::domain::errors::AsoError;
use crate::domain::ids::{ExamId, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of exam types tracked for an ASO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "Audiometria")]
    Audiometria,
    #[serde(rename = "Visio Teste")]
    VisioTeste,
    #[serde(rename = "Raio X Tórax OIT")]
    RaioXToraxOit,
    #[serde(rename = "Coluna Lombar")]
    ColunaLombar,
    #[serde(rename = "TQHA URINA")]
    TqhaUrina,
    #[serde(rename = "Hemograma c/ plaquetas")]
    Hemograma,
    #[serde(rename = "Espirometria")]
    Espirometria,
    #[serde(rename = "Glicemia")]
    Glicemia,
    #[serde(rename = "Carboxihemoglobina")]
    Carboxihemoglobina,
    #[serde(rename = "ECG")]
    Ecg,
    #[serde(rename = "EEG")]
    Eeg,
}

impl ExamType {
    /// Every exam type, in control-sheet column order
    pub const ALL: [ExamType; 11] = [
        ExamType::Audiometria,
        ExamType::VisioTeste,
        ExamType::RaioXToraxOit,
        ExamType::ColunaLombar,
        ExamType::TqhaUrina,
        ExamType::Hemograma,
        ExamType::Espirometria,
        ExamType::Glicemia,
        ExamType::Carboxihemoglobina,
        ExamType::Ecg,
        ExamType::Eeg,
    ];

    /// Types every generated subject carries
    pub const MANDATORY: [ExamType; 4] = [
        ExamType::Audiometria,
        ExamType::VisioTeste,
        ExamType::Hemograma,
        ExamType::Ecg,
    ];

    /// Display name, as used in persisted data
    pub fn name(self) -> &'static str {
        match self {
            ExamType::Audiometria => "Audiometria",
            ExamType::VisioTeste => "Visio Teste",
            ExamType::RaioXToraxOit => "Raio X Tórax OIT",
            ExamType::ColunaLombar => "Coluna Lombar",
            ExamType::TqhaUrina => "TQHA URINA",
            ExamType::Hemograma => "Hemograma c/ plaquetas",
            ExamType::Espirometria => "Espirometria",
            ExamType::Glicemia => "Glicemia",
            ExamType::Carboxihemoglobina => "Carboxihemoglobina",
            ExamType::Ecg => "ECG",
            ExamType::Eeg => "EEG",
        }
    }

    /// ASCII command-line friendly name
    pub fn slug(self) -> &'static str {
        match self {
            ExamType::Audiometria => "audiometria",
            ExamType::VisioTeste => "visio-teste",
            ExamType::RaioXToraxOit => "raio-x-torax-oit",
            ExamType::ColunaLombar => "coluna-lombar",
            ExamType::TqhaUrina => "tqha-urina",
            ExamType::Hemograma => "hemograma",
            ExamType::Espirometria => "espirometria",
            ExamType::Glicemia => "glicemia",
            ExamType::Carboxihemoglobina => "carboxihemoglobina",
            ExamType::Ecg => "ecg",
            ExamType::Eeg => "eeg",
        }
    }

    /// Category the type belongs to
    pub fn category(self) -> ExamCategory {
        match self {
            ExamType::VisioTeste | ExamType::Audiometria => ExamCategory::Clinico,
            ExamType::Hemograma
            | ExamType::Glicemia
            | ExamType::TqhaUrina
            | ExamType::Carboxihemoglobina => ExamCategory::Laboratorial,
            ExamType::RaioXToraxOit | ExamType::ColunaLombar => ExamCategory::Imagem,
            ExamType::Espirometria => ExamCategory::Funcional,
            ExamType::Ecg => ExamCategory::Cardiologico,
            ExamType::Eeg => ExamCategory::Neurologico,
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExamType {
    type Err = String;

    /// Accepts either the display name (case-insensitive) or the slug
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExamType::ALL
            .into_iter()
            .find(|t| t.slug() == wanted || t.name().to_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ExamType::ALL.iter().map(|t| t.slug()).collect();
                format!("Unknown exam type '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

/// Exam category, derived from [`ExamType::category`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamCategory {
    #[serde(rename = "clinico")]
    Clinico,
    #[serde(rename = "laboratorial")]
    Laboratorial,
    #[serde(rename = "imagem")]
    Imagem,
    #[serde(rename = "funcional")]
    Funcional,
    #[serde(rename = "cardiológico")]
    Cardiologico,
    #[serde(rename = "neurológico")]
    Neurologico,
}

/// Exam status
///
/// ```text
/// pending --schedule--> scheduled --complete--> completed --recompute--> expired
/// pending --complete--> completed
/// any non-terminal --cancel--> cancelled   (clinical variant only)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    Completed,
    Pending,
    Scheduled,
    Cancelled,
    Expired,
}

impl ExamStatus {
    /// Whether an expiration date must be present in this status
    pub fn carries_expiration(self) -> bool {
        matches!(self, ExamStatus::Completed | ExamStatus::Expired)
    }

    /// Terminal statuses accept no further transition
    pub fn is_terminal(self) -> bool {
        matches!(self, ExamStatus::Cancelled | ExamStatus::Expired)
    }

    /// Whether `self -> next` is a legal lifecycle move, ignoring variant rules
    pub fn can_transition_to(self, next: ExamStatus) -> bool {
        use ExamStatus::*;
        match (self, next) {
            (Pending, Scheduled) | (Pending, Completed) => true,
            (Scheduled, Scheduled) | (Scheduled, Completed) => true,
            (Completed, Expired) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Checks a transition and produces the typed error on failure
    pub fn ensure_transition(self, next: ExamStatus) -> Result<(), AsoError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(AsoError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Portuguese label used in reports
    pub fn label(self) -> &'static str {
        match self {
            ExamStatus::Completed => "Ok",
            ExamStatus::Pending => "Pendente",
            ExamStatus::Scheduled => "Agendado",
            ExamStatus::Cancelled => "Cancelado",
            ExamStatus::Expired => "Vencido",
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExamStatus::Completed => "completed",
            ExamStatus::Pending => "pending",
            ExamStatus::Scheduled => "scheduled",
            ExamStatus::Cancelled => "cancelled",
            ExamStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

impl FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(ExamStatus::Completed),
            "pending" => Ok(ExamStatus::Pending),
            "scheduled" => Ok(ExamStatus::Scheduled),
            "cancelled" => Ok(ExamStatus::Cancelled),
            "expired" => Ok(ExamStatus::Expired),
            other => Err(format!(
                "Invalid exam status '{other}'. Must be one of: completed, pending, scheduled, cancelled, expired"
            )),
        }
    }
}

/// One exam instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: ExamId,

    /// Owning subject
    pub subject_id: SubjectId,

    #[serde(rename = "name")]
    pub exam_type: ExamType,

    pub category: ExamCategory,

    /// When the exam happened (or is expected to happen, for scheduled exams)
    pub date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,

    /// Present iff status is completed or expired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Validity in months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<u32>,

    pub status: ExamStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exam {
    /// Whether the stored expiration date agrees with the status
    pub fn expiration_consistent(&self) -> bool {
        self.status.carries_expiration() == self.expiration_date.is_some()
    }
}

/// Input for registering a new exam
///
/// Identifier, category, expiration date and timestamps are derived by the
/// store.
#[derive(Debug, Clone)]
pub struct NewExam {
    pub subject_id: SubjectId,
    pub exam_type: ExamType,
    pub date: DateTime<Utc>,
    pub status: ExamStatus,
    pub validity_period: Option<u32>,
    pub result: Option<String>,
    pub notes: Option<String>,
    pub doctor: Option<String>,
}

impl NewExam {
    /// Creates an exam request with no optional details
    pub fn new(
        subject_id: SubjectId,
        exam_type: ExamType,
        date: DateTime<Utc>,
        status: ExamStatus,
    ) -> Self {
        Self {
            subject_id,
            exam_type,
            date,
            status,
            validity_period: None,
            result: None,
            notes: None,
            doctor: None,
        }
    }

    /// Overrides the store's default validity
    pub fn with_validity(mut self, months: u32) -> Self {
        self.validity_period = Some(months);
        self
    }

    /// Sets the result text
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Sets free-text notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the responsible doctor
    pub fn with_doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor = Some(doctor.into());
        self
    }
}
