//! Subject domain model
//!
//! A subject is the tracked person: an employee in the occupational variant or
//! a patient in the clinical one. Exams are not embedded here; the store
//! derives per-subject exam views from its exam index.

use crate::domain::errors::{AsoError, FieldError};
use crate::domain::ids::{Cpf, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum accepted name length
pub const MIN_NAME_LENGTH: usize = 3;
/// Maximum accepted name length
pub const MAX_NAME_LENGTH: usize = 100;
/// Maximum accepted age
pub const MAX_AGE: u8 = 120;
/// Phone numbers carry area code plus nine digits
pub const PHONE_LENGTH: usize = 11;

/// Build variant: which population the application tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Employees with occupational health certificates
    #[default]
    Occupational,
    /// Patients with generic exams
    Clinical,
}

impl Variant {
    /// Whether exams may be in `status` under this variant
    ///
    /// Only the occupational variant knows `expired`; only the clinical one
    /// knows `cancelled`.
    pub fn allows(self, status: crate::domain::ExamStatus) -> bool {
        use crate::domain::ExamStatus;
        match (self, status) {
            (Variant::Occupational, ExamStatus::Cancelled) => false,
            (Variant::Clinical, ExamStatus::Expired) => false,
            _ => true,
        }
    }

    /// Prefix used for generated subject identifiers
    pub fn id_prefix(self) -> &'static str {
        match self {
            Variant::Occupational => "employee",
            Variant::Clinical => "patient",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Occupational => f.write_str("occupational"),
            Variant::Clinical => f.write_str("clinical"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "occupational" | "aso" => Ok(Variant::Occupational),
            "clinical" => Ok(Variant::Clinical),
            other => Err(format!(
                "Invalid variant '{other}'. Must be one of: occupational, clinical"
            )),
        }
    }
}

/// Gender as recorded on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::M),
            "F" | "f" => Ok(Gender::F),
            other => Err(format!("Invalid gender '{other}'. Must be M or F")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::M => f.write_str("M"),
            Gender::F => f.write_str("F"),
        }
    }
}

/// Plant sector an employee works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sector {
    Sabdaria,
    Mod,
    Smt,
    Ti,
}

impl Sector {
    pub const ALL: [Sector; 4] = [Sector::Sabdaria, Sector::Mod, Sector::Smt, Sector::Ti];
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sector::Sabdaria => "SABDARIA",
            Sector::Mod => "MOD",
            Sector::Smt => "SMT",
            Sector::Ti => "TI",
        };
        f.write_str(s)
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SABDARIA" => Ok(Sector::Sabdaria),
            "MOD" => Ok(Sector::Mod),
            "SMT" => Ok(Sector::Smt),
            "TI" => Ok(Sector::Ti),
            other => Err(format!(
                "Invalid sector '{other}'. Must be one of: SABDARIA, MOD, SMT, TI"
            )),
        }
    }
}

/// Postal address of a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Variant-specific subject fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    #[serde(rename_all = "camelCase")]
    Employee {
        /// Registration number (matrícula)
        registration: String,
        sector: Sector,
        /// Job title (cargo)
        role: String,
        /// Shift (turno)
        shift: String,
        admission_date: DateTime<Utc>,
    },
    Patient { address: Address },
}

impl Profile {
    /// Variant this profile belongs to
    pub fn variant(&self) -> Variant {
        match self {
            Profile::Employee { .. } => Variant::Occupational,
            Profile::Patient { .. } => Variant::Clinical,
        }
    }

    pub fn registration(&self) -> Option<&str> {
        match self {
            Profile::Employee { registration, .. } => Some(registration),
            Profile::Patient { .. } => None,
        }
    }

    pub fn sector(&self) -> Option<Sector> {
        match self {
            Profile::Employee { sector, .. } => Some(*sector),
            Profile::Patient { .. } => None,
        }
    }

    pub fn role(&self) -> Option<&str> {
        match self {
            Profile::Employee { role, .. } => Some(role),
            Profile::Patient { .. } => None,
        }
    }
}

/// A tracked person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub cpf: Cpf,
    pub age: u8,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form data for registering a subject
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    /// Raw CPF as typed, validated on submit
    pub cpf: String,
    pub age: u8,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub profile: Profile,
}

impl NewSubject {
    /// Validates every field and collects all failures
    ///
    /// The CPF checksum is only enforced for patients; the employee form only
    /// checks the digit count.
    pub fn validate(&self) -> Result<Cpf, AsoError> {
        let mut errors = Vec::new();

        let name_len = self.name.trim().chars().count();
        if name_len < MIN_NAME_LENGTH {
            errors.push(FieldError::new(
                "name",
                format!("must have at least {MIN_NAME_LENGTH} characters"),
            ));
        } else if name_len > MAX_NAME_LENGTH {
            errors.push(FieldError::new(
                "name",
                format!("must have at most {MAX_NAME_LENGTH} characters"),
            ));
        }

        let cpf = match Cpf::new(&self.cpf) {
            Ok(cpf) => {
                if matches!(self.profile, Profile::Patient { .. }) && !cpf.has_valid_check_digits()
                {
                    errors.push(FieldError::new("cpf", "invalid check digits"));
                }
                Some(cpf)
            }
            Err(e) => {
                errors.push(FieldError::new("cpf", e));
                None
            }
        };

        if !is_plausible_email(&self.email) {
            errors.push(FieldError::new("email", "invalid email"));
        }

        let phone_digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if phone_digits != PHONE_LENGTH || phone_digits != self.phone.chars().count() {
            errors.push(FieldError::new(
                "phone",
                format!("must have {PHONE_LENGTH} digits"),
            ));
        }

        if self.age > MAX_AGE {
            errors.push(FieldError::new("age", format!("must be between 0 and {MAX_AGE}")));
        }

        if let Profile::Employee {
            registration,
            role,
            shift,
            ..
        } = &self.profile
        {
            if registration.trim().is_empty() {
                errors.push(FieldError::new("registration", "is required"));
            }
            if role.trim().is_empty() {
                errors.push(FieldError::new("role", "is required"));
            }
            if shift.trim().is_empty() {
                errors.push(FieldError::new("shift", "is required"));
            }
        }

        match cpf {
            Some(cpf) if errors.is_empty() => Ok(cpf),
            _ => Err(AsoError::InvalidInput { errors }),
        }
    }
}

/// Partial update of a subject; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile: Option<Profile>,
}

impl SubjectPatch {
    /// Merges the patch over `subject`, producing form data to re-validate
    pub fn merge(self, subject: &Subject) -> NewSubject {
        NewSubject {
            name: self.name.unwrap_or_else(|| subject.name.clone()),
            cpf: self.cpf.unwrap_or_else(|| subject.cpf.to_string()),
            age: self.age.unwrap_or(subject.age),
            gender: self.gender.unwrap_or(subject.gender),
            email: self.email.unwrap_or_else(|| subject.email.clone()),
            phone: self.phone.unwrap_or_else(|| subject.phone.clone()),
            profile: self.profile.unwrap_or_else(|| subject.profile.clone()),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.trim().is_empty() && !domain.trim().is_empty(),
        None => false,
    }
}
