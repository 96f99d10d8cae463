//! Seeded sample record generator

use super::catalog::{CITIES, EMAIL_DOMAINS, NAMES, ROLES, SHIFTS, STREETS};
use crate::core::lifecycle::compute_expiration_date;
use crate::domain::{
    Address, AsoError, Cpf, Exam, ExamId, ExamStatus, ExamType, Gender, Profile, Result, Sector, Subject,
    SubjectId, Variant,
};
use chrono::{DateTime, Duration, Months, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Exams generated per subject, inclusive
const MIN_EXAMS: usize = 4;
const MAX_EXAMS: usize = 8;

/// Parameters of one generation run
#[derive(Debug, Clone, Copy)]
pub struct MockOptions {
    pub subject_count: usize,
    pub seed: u64,
    /// Validity applied to every generated exam
    pub validity_months: u32,
}

impl MockOptions {
    pub fn new(subject_count: usize, seed: u64) -> Self {
        Self {
            subject_count,
            seed,
            validity_months: 12,
        }
    }

    pub fn with_validity(mut self, months: u32) -> Self {
        self.validity_months = months;
        self
    }
}

/// Generated subjects and their exams
#[derive(Debug, Clone, Default)]
pub struct MockData {
    pub subjects: Vec<Subject>,
    pub exams: Vec<Exam>,
}

/// Generates sample records for `variant`
///
/// The same options, variant and `now` always produce the same records.
///
/// # Errors
///
/// Returns an error if `options.validity_months` is zero or date arithmetic
/// leaves the representable range.
pub fn generate(variant: Variant, options: &MockOptions, now: DateTime<Utc>) -> Result<MockData> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut data = MockData::default();

    for i in 0..options.subject_count {
        let subject = generate_subject(&mut rng, variant, i, now)?;
        let exam_count = rng.gen_range(MIN_EXAMS..=MAX_EXAMS);
        for exam_type in pick_exam_types(&mut rng, exam_count) {
            data.exams.push(generate_exam(
                &mut rng,
                variant,
                &subject.id,
                exam_type,
                options.validity_months,
                now,
            )?);
        }
        data.subjects.push(subject);
    }

    tracing::debug!(
        variant = %variant,
        subjects = data.subjects.len(),
        exams = data.exams.len(),
        seed = options.seed,
        "Generated sample records"
    );
    Ok(data)
}

fn random_uuid(rng: &mut StdRng) -> uuid::Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

fn generate_subject(
    rng: &mut StdRng,
    variant: Variant,
    index: usize,
    now: DateTime<Utc>,
) -> Result<Subject> {
    let name = NAMES[index % NAMES.len()];
    let id = SubjectId::new(format!("{}-{}", variant.id_prefix(), random_uuid(rng)))
        .map_err(AsoError::Validation)?;
    let gender = if rng.gen_bool(0.5) { Gender::M } else { Gender::F };
    let age: u8 = rng.gen_range(20..60);

    let profile = match variant {
        Variant::Occupational => {
            let years_ago: u32 = rng.gen_range(1..=10);
            Profile::Employee {
                registration: rng.gen_range(100_000u32..=999_999).to_string(),
                sector: *Sector::ALL.choose(rng).unwrap_or(&Sector::Mod),
                role: ROLES.choose(rng).copied().unwrap_or(ROLES[0]).to_string(),
                shift: SHIFTS.choose(rng).copied().unwrap_or(SHIFTS[0]).to_string(),
                admission_date: months_before(now, 12 * years_ago),
            }
        }
        Variant::Clinical => {
            let (city, state) = CITIES.choose(rng).copied().unwrap_or(CITIES[0]);
            Profile::Patient {
                address: Address {
                    street: STREETS.choose(rng).copied().unwrap_or(STREETS[0]).to_string(),
                    number: rng.gen_range(1u32..2000).to_string(),
                    city: city.to_string(),
                    state: state.to_string(),
                    zip_code: format!(
                        "{:05}-{:03}",
                        rng.gen_range(1_000u32..100_000),
                        rng.gen_range(0u32..1_000)
                    ),
                },
            }
        }
    };

    let created_at = match &profile {
        Profile::Employee { admission_date, .. } => *admission_date,
        Profile::Patient { .. } => now - Duration::days(rng.gen_range(1..=365)),
    };

    Ok(Subject {
        id,
        name: name.to_string(),
        cpf: generate_cpf(rng),
        age,
        gender,
        email: generate_email(rng, name),
        phone: generate_phone(rng),
        profile,
        created_at,
        updated_at: now,
    })
}

/// Mandatory types first, then random distinct types up to `count`
fn pick_exam_types(rng: &mut StdRng, count: usize) -> Vec<ExamType> {
    let mut types: Vec<ExamType> = ExamType::MANDATORY.to_vec();
    let target = count.min(ExamType::ALL.len());
    while types.len() < target {
        if let Some(candidate) = ExamType::ALL.choose(rng) {
            if !types.contains(candidate) {
                types.push(*candidate);
            }
        }
    }
    types
}

fn draw_status(rng: &mut StdRng, variant: Variant) -> ExamStatus {
    let r: f64 = rng.gen();
    match variant {
        Variant::Occupational if r > 0.95 => ExamStatus::Pending,
        Variant::Occupational if r > 0.90 => ExamStatus::Scheduled,
        Variant::Occupational if r > 0.80 => ExamStatus::Expired,
        Variant::Occupational => ExamStatus::Completed,
        Variant::Clinical if r > 0.95 => ExamStatus::Pending,
        Variant::Clinical if r > 0.90 => ExamStatus::Scheduled,
        Variant::Clinical if r > 0.80 => ExamStatus::Cancelled,
        Variant::Clinical => ExamStatus::Completed,
    }
}

fn generate_exam(
    rng: &mut StdRng,
    variant: Variant,
    subject_id: &SubjectId,
    exam_type: ExamType,
    validity_months: u32,
    now: DateTime<Utc>,
) -> Result<Exam> {
    let status = draw_status(rng, variant);
    let one_year = Duration::days(365).num_seconds();

    let date = match status {
        ExamStatus::Completed => now - Duration::seconds(rng.gen_range(0..=one_year)),
        ExamStatus::Expired => {
            let back = validity_months.saturating_add(rng.gen_range(1..=6));
            months_before(now, back)
        }
        ExamStatus::Scheduled => now + Duration::days(rng.gen_range(1..=60)),
        ExamStatus::Pending | ExamStatus::Cancelled => now,
    };

    let expiration_date = if status.carries_expiration() {
        Some(compute_expiration_date(date, validity_months)?)
    } else {
        None
    };

    let created_at = now - Duration::seconds(rng.gen_range(0..=one_year));

    Ok(Exam {
        id: ExamId::new(format!("exam-{}", random_uuid(rng))).map_err(AsoError::Validation)?,
        subject_id: subject_id.clone(),
        exam_type,
        category: exam_type.category(),
        date,
        scheduled_date: (status == ExamStatus::Scheduled).then_some(date),
        expiration_date,
        validity_period: Some(validity_months),
        status,
        result: (status == ExamStatus::Completed).then(|| "Ok".to_string()),
        notes: (status == ExamStatus::Scheduled).then(|| "Exame agendado".to_string()),
        doctor: None,
        created_at: created_at.min(date),
        updated_at: now,
    })
}

fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

/// Random CPF with valid check digits
fn generate_cpf(rng: &mut StdRng) -> Cpf {
    loop {
        let mut base = [0u8; 9];
        for digit in base.iter_mut() {
            *digit = rng.gen_range(0..10);
        }
        let cpf = Cpf::from_base_digits(base);
        if cpf.has_valid_check_digits() {
            return cpf;
        }
    }
}

/// Area code 11-99, then 9, then eight digits
fn generate_phone(rng: &mut StdRng) -> String {
    format!(
        "{}9{:08}",
        rng.gen_range(11u32..=99),
        rng.gen_range(0..100_000_000u32)
    )
}

/// First two name words, lowercased and joined with a dot
fn generate_email(rng: &mut StdRng, name: &str) -> String {
    let local = name
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase();
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or(EMAIL_DOMAINS[0]);
    format!("{local}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewSubject;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_same_records() {
        let options = MockOptions::new(10, 7);
        let a = generate(Variant::Occupational, &options, now()).unwrap();
        let b = generate(Variant::Occupational, &options, now()).unwrap();
        assert_eq!(a.subjects, b.subjects);
        assert_eq!(a.exams, b.exams);

        let c = generate(Variant::Occupational, &MockOptions::new(10, 8), now()).unwrap();
        assert_ne!(a.subjects, c.subjects);
    }

    #[test]
    fn test_ids_come_from_the_seed() {
        let options = MockOptions::new(5, 11);
        let a = generate(Variant::Clinical, &options, now()).unwrap();
        let b = generate(Variant::Clinical, &options, now()).unwrap();

        let ids = |d: &MockData| -> Vec<String> {
            d.subjects
                .iter()
                .map(|s| s.id.to_string())
                .chain(d.exams.iter().map(|e| e.id.to_string()))
                .collect()
        };
        assert_eq!(ids(&a), ids(&b));
        assert!(a.subjects.iter().all(|s| s.id.as_str().starts_with("patient-")));
        assert!(a.exams.iter().all(|e| e.id.as_str().starts_with("exam-")));
    }

    #[test]
    fn test_every_subject_has_mandatory_types_and_four_to_eight_exams() {
        let data = generate(Variant::Occupational, &MockOptions::new(50, 1), now()).unwrap();
        assert_eq!(data.subjects.len(), 50);

        for subject in &data.subjects {
            let owned: Vec<&Exam> = data
                .exams
                .iter()
                .filter(|e| e.subject_id == subject.id)
                .collect();
            assert!((MIN_EXAMS..=MAX_EXAMS).contains(&owned.len()));
            for mandatory in ExamType::MANDATORY {
                assert!(owned.iter().any(|e| e.exam_type == mandatory));
            }
        }
    }

    #[test]
    fn test_generated_exams_respect_invariants() {
        let data = generate(Variant::Occupational, &MockOptions::new(50, 3), now()).unwrap();
        for exam in &data.exams {
            assert!(exam.expiration_consistent());
            assert_ne!(exam.status, ExamStatus::Cancelled);
            match exam.status {
                ExamStatus::Expired => assert!(exam.expiration_date.unwrap() < now()),
                ExamStatus::Scheduled => {
                    assert!(exam.date > now());
                    assert_eq!(exam.scheduled_date, Some(exam.date));
                }
                ExamStatus::Completed => assert!(exam.date <= now()),
                _ => {}
            }
        }
    }

    #[test]
    fn test_generated_subjects_pass_form_validation() {
        for variant in [Variant::Occupational, Variant::Clinical] {
            let data = generate(variant, &MockOptions::new(20, 11), now()).unwrap();
            for s in data.subjects {
                assert_eq!(s.profile.variant(), variant);
                let form = NewSubject {
                    name: s.name.clone(),
                    cpf: s.cpf.to_string(),
                    age: s.age,
                    gender: s.gender,
                    email: s.email.clone(),
                    phone: s.phone.clone(),
                    profile: s.profile.clone(),
                };
                assert!(form.validate().is_ok(), "{} failed validation", s.name);
            }
        }
    }

    #[test]
    fn test_clinical_never_generates_expired() {
        let data = generate(Variant::Clinical, &MockOptions::new(50, 5), now()).unwrap();
        assert!(data.exams.iter().all(|e| e.status != ExamStatus::Expired));
    }

    #[test]
    fn test_email_derives_from_name() {
        let mut rng = StdRng::seed_from_u64(0);
        let email = generate_email(&mut rng, "JOÃO SILVA SANTOS");
        assert!(email.starts_with("joão.silva@"));
    }
}
