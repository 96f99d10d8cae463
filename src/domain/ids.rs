//! Domain identifier types with validation
//!
//! Newtype wrappers keep subject and exam identifiers from being mixed up,
//! and [`Cpf`] guards the national identifier format.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

/// Subject (employee or patient) identifier
///
/// # Examples
///
/// ```
/// use aso_control::domain::ids::SubjectId;
/// use std::str::FromStr;
///
/// let id = SubjectId::from_str("employee-42").unwrap();
/// assert_eq!(id.as_str(), "employee-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a new SubjectId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(SubjectId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Subject ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh identifier with the given prefix (`employee`, `patient`)
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4()))
    }

    /// Returns the subject ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Exam identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamId(String);

impl ExamId {
    /// Creates a new ExamId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Exam ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh `exam-<uuid>` identifier
    pub fn generate() -> Self {
        Self(format!("exam-{}", Uuid::new_v4()))
    }

    /// Returns the exam ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn eleven_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{11}$").expect("static regex"))
}

/// Brazilian national identifier (CPF), always exactly 11 ASCII digits
///
/// Construction only checks the shape. [`Cpf::has_valid_check_digits`] runs the
/// modulo-11 checksum for callers that enforce it.
///
/// # Examples
///
/// ```
/// use aso_control::domain::ids::Cpf;
///
/// let cpf = Cpf::new("529.982.247-25").unwrap();
/// assert_eq!(cpf.as_str(), "52998224725");
/// assert!(cpf.has_valid_check_digits());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Creates a Cpf, stripping `.` and `-` punctuation first
    pub fn new(raw: impl AsRef<str>) -> Result<Self, String> {
        let digits: String = raw
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | ' '))
            .collect();
        if !eleven_digits().is_match(&digits) {
            return Err("CPF must have exactly 11 digits".to_string());
        }
        Ok(Self(digits))
    }

    /// Builds a CPF from nine base digits, appending both check digits
    pub fn from_base_digits(base: [u8; 9]) -> Self {
        let d1 = check_digit(&base, 10);
        let mut ten = [0u8; 10];
        ten[..9].copy_from_slice(&base);
        ten[9] = d1;
        let d2 = check_digit(&ten, 11);
        let mut s: String = ten.iter().map(|d| char::from(b'0' + d)).collect();
        s.push(char::from(b'0' + d2));
        Self(s)
    }

    /// Returns the 11 digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verifies both modulo-11 check digits
    pub fn has_valid_check_digits(&self) -> bool {
        let digits: Vec<u8> = self.0.bytes().map(|b| b - b'0').collect();
        // Repeated-digit CPFs pass the arithmetic but are never issued
        if digits.iter().all(|d| *d == digits[0]) {
            return false;
        }
        check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
    }
}

fn check_digit(digits: &[u8], start_weight: u32) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (start_weight - i as u32))
        .sum();
    let rest = 11 - (sum % 11);
    if rest >= 10 {
        0
    } else {
        rest as u8
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Cpf {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl FromStr for Cpf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
