//! Subject commands: list, add and remove

use super::{date_or_now, open_store, or_dash, report_failure};
use crate::core::report::format_date_br;
use crate::core::store::SubjectFilter;
use crate::domain::{
    Address, AsoError, Gender, NewSubject, Profile, Result, Sector, SubjectId, Variant,
};
use chrono::Utc;
use clap::Args;

/// Arguments for the subjects command
#[derive(Args, Debug)]
pub struct SubjectsArgs {
    /// Show one subject with its exams
    #[arg(long)]
    pub id: Option<SubjectId>,

    /// Name, email, CPF or registration search
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub sector: Option<Sector>,

    #[arg(long)]
    pub gender: Option<Gender>,

    /// Exact role (cargo), case-insensitive
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub min_age: Option<u8>,

    #[arg(long)]
    pub max_age: Option<u8>,
}

impl SubjectsArgs {
    fn filter(&self) -> SubjectFilter {
        let mut filter = SubjectFilter::default();
        if let Some(term) = &self.search {
            filter = filter.with_search(term.clone());
        }
        if let Some(sector) = self.sector {
            filter = filter.with_sector(sector);
        }
        if let Some(gender) = self.gender {
            filter = filter.with_gender(gender);
        }
        if let Some(role) = &self.role {
            filter = filter.with_role(role.clone());
        }
        filter.min_age = self.min_age;
        filter.max_age = self.max_age;
        filter
    }

    /// Execute the subjects command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        if let Some(id) = &self.id {
            let view = match store.subject_view(id) {
                Ok(v) => v,
                Err(e) => return Ok(report_failure("Subject lookup failed", &e)),
            };

            let s = &view.subject;
            println!("👤 {} ({})", s.name, s.id);
            println!("   CPF: {}  Age: {}  Gender: {}", s.cpf, s.age, s.gender);
            println!("   Email: {}  Phone: {}", s.email, s.phone);
            if let Profile::Employee {
                registration,
                sector,
                role,
                shift,
                admission_date,
            } = &s.profile
            {
                println!("   Registration: {registration}  Sector: {sector}  Role: {role}");
                println!(
                    "   Shift: {shift}  Admitted: {}",
                    format_date_br(*admission_date)
                );
            }
            println!(
                "   Last exam: {}",
                or_dash(view.last_exam_date.map(format_date_br))
            );
            if !view.pending_exam_types.is_empty() {
                let pending: Vec<&str> = view.pending_exam_types.iter().map(|t| t.name()).collect();
                println!("   Pending: {}", pending.join(", "));
            }
            println!();

            println!(
                "{:<42} {:<24} {:<10} {:<11} {:<11}",
                "Exam ID", "Type", "Status", "Date", "Expires"
            );
            println!("{}", "-".repeat(100));
            for exam in &view.exams {
                println!(
                    "{:<42} {:<24} {:<10} {:<11} {:<11}",
                    exam.id,
                    exam.exam_type.name(),
                    exam.status.label(),
                    format_date_br(exam.date),
                    or_dash(exam.expiration_date.map(format_date_br))
                );
            }
            let expiring = view.expiring(store.settings().warning_window_days, Utc::now());
            if !expiring.is_empty() {
                println!();
                println!("⚠️  {} exam(s) expiring soon", expiring.len());
            }
            println!();
            return Ok(0);
        }

        let subjects = store.filter(&self.filter());
        println!("👥 {} subject(s)", subjects.len());
        println!();
        println!(
            "{:<46} {:<32} {:<15} {:<10} {:>5}",
            "ID", "Name", "CPF", "Sector", "Exams"
        );
        println!("{}", "-".repeat(112));
        for subject in subjects {
            println!(
                "{:<46} {:<32} {:<15} {:<10} {:>5}",
                subject.id,
                subject.name,
                subject.cpf,
                or_dash(subject.profile.sector().map(|s| s.to_string())),
                store.exams_for_subject(&subject.id).len()
            );
        }
        println!();
        Ok(0)
    }
}

/// Arguments for the add-subject command
///
/// Employee fields apply to the occupational variant, address fields to the
/// clinical one.
#[derive(Args, Debug)]
pub struct AddSubjectArgs {
    #[arg(long)]
    pub name: String,

    /// CPF, with or without punctuation
    #[arg(long)]
    pub cpf: String,

    #[arg(long)]
    pub age: u8,

    #[arg(long)]
    pub gender: Gender,

    #[arg(long)]
    pub email: String,

    /// Eleven digits, area code included
    #[arg(long)]
    pub phone: String,

    /// Registration number (matrícula)
    #[arg(long, default_value = "")]
    pub registration: String,

    #[arg(long)]
    pub sector: Option<Sector>,

    /// Job title (cargo)
    #[arg(long, default_value = "")]
    pub role: String,

    /// Shift (turno)
    #[arg(long, default_value = "")]
    pub shift: String,

    /// Admission date (default today)
    #[arg(long)]
    pub admission_date: Option<String>,

    #[arg(long, default_value = "")]
    pub street: String,

    #[arg(long, default_value = "")]
    pub number: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,

    #[arg(long, default_value = "")]
    pub zip_code: String,
}

impl AddSubjectArgs {
    fn to_form(&self, variant: Variant) -> Result<NewSubject> {
        let profile = match variant {
            Variant::Occupational => Profile::Employee {
                registration: self.registration.clone(),
                sector: self
                    .sector
                    .ok_or_else(|| AsoError::field("sector", "is required"))?,
                role: self.role.clone(),
                shift: self.shift.clone(),
                admission_date: date_or_now(self.admission_date.as_deref())?,
            },
            Variant::Clinical => Profile::Patient {
                address: Address {
                    street: self.street.clone(),
                    number: self.number.clone(),
                    city: self.city.clone(),
                    state: self.state.clone(),
                    zip_code: self.zip_code.clone(),
                },
            },
        };

        Ok(NewSubject {
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            age: self.age,
            gender: self.gender,
            email: self.email.clone(),
            phone: self.phone.clone(),
            profile,
        })
    }

    /// Execute the add-subject command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        let form = match self.to_form(store.variant()) {
            Ok(f) => f,
            Err(e) => return Ok(report_failure("Invalid subject", &e)),
        };

        match store.add_subject(form, Utc::now()) {
            Ok(subject) => {
                println!("✅ Subject registered: {} ({})", subject.name, subject.id);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Subject was not registered", &e)),
        }
    }
}

/// Arguments for the remove-subject command
#[derive(Args, Debug)]
pub struct RemoveSubjectArgs {
    #[arg(long)]
    pub id: SubjectId,
}

impl RemoveSubjectArgs {
    /// Execute the remove-subject command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut store = match open_store(config_path) {
            Ok(s) => s,
            Err(e) => return Ok(report_failure("Failed to open record store", &e)),
        };

        match store.delete_subject(&self.id) {
            Ok(exams) => {
                println!("🗑️  Subject {} removed with {} exam(s)", self.id, exams);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Subject was not removed", &e)),
        }
    }
}
