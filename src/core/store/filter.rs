//! Closed filter structures for list and dashboard queries

use crate::domain::{Exam, ExamStatus, ExamType, Gender, Sector, Subject};
use chrono::{DateTime, Utc};

/// Case-insensitive name/email match, substring match on CPF digits and
/// registration number
///
/// An empty or blank term matches everything.
pub fn matches_search(subject: &Subject, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let lowered = term.to_lowercase();
    if subject.name.to_lowercase().contains(&lowered)
        || subject.email.to_lowercase().contains(&lowered)
    {
        return true;
    }

    let digits: String = term.chars().filter(char::is_ascii_digit).collect();
    let cpf_hit = subject.cpf.as_str().contains(term)
        || (!digits.is_empty() && subject.cpf.as_str().contains(&digits));
    let registration_hit = subject
        .profile
        .registration()
        .is_some_and(|r| r.contains(term));

    cpf_hit || registration_hit
}

/// Subject-level filter; unset fields do not constrain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectFilter {
    pub search: Option<String>,
    pub sector: Option<Sector>,
    /// Exact role (cargo) match
    pub role: Option<String>,
    pub gender: Option<Gender>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
}

impl SubjectFilter {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Inclusive age range
    pub fn with_age_range(mut self, min: u8, max: u8) -> Self {
        self.min_age = Some(min);
        self.max_age = Some(max);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, subject: &Subject) -> bool {
        if let Some(term) = &self.search {
            if !matches_search(subject, term) {
                return false;
            }
        }
        if let Some(sector) = self.sector {
            if subject.profile.sector() != Some(sector) {
                return false;
            }
        }
        if let Some(role) = &self.role {
            if subject.profile.role() != Some(role.as_str()) {
                return false;
            }
        }
        if self.gender.is_some_and(|g| g != subject.gender) {
            return false;
        }
        if self.min_age.is_some_and(|min| subject.age < min) {
            return false;
        }
        if self.max_age.is_some_and(|max| subject.age > max) {
            return false;
        }
        true
    }
}

/// Dashboard filter: a subject filter plus exam-level constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    pub subjects: SubjectFilter,
    /// Empty means every type
    pub exam_types: Vec<ExamType>,
    /// Empty means every status
    pub statuses: Vec<ExamStatus>,
    /// Inclusive lower bound on the exam date
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the exam date
    pub to: Option<DateTime<Utc>>,
}

impl DashboardFilter {
    pub fn with_subjects(mut self, filter: SubjectFilter) -> Self {
        self.subjects = filter;
        self
    }

    pub fn with_exam_types(mut self, types: impl IntoIterator<Item = ExamType>) -> Self {
        self.exam_types = types.into_iter().collect();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ExamStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_date_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches_exam(&self, exam: &Exam) -> bool {
        (self.exam_types.is_empty() || self.exam_types.contains(&exam.exam_type))
            && (self.statuses.is_empty() || self.statuses.contains(&exam.status))
            && self.from.map_or(true, |from| exam.date >= from)
            && self.to.map_or(true, |to| exam.date <= to)
    }
}
