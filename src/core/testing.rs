//! Shared fixtures for unit tests

use crate::domain::{
    Address, Cpf, Exam, ExamId, ExamStatus, ExamType, Gender, Profile, Sector, Subject, SubjectId,
};
use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub(crate) fn employee(id: &str, name: &str, sector: Sector) -> Subject {
    let now = at(2024, 1, 1);
    Subject {
        id: SubjectId::new(id).unwrap(),
        name: name.to_string(),
        cpf: Cpf::new("529.982.247-25").unwrap(),
        age: 41,
        gender: Gender::M,
        email: format!("{}@gmail.com", id),
        phone: "11987654321".to_string(),
        profile: Profile::Employee {
            registration: "482913".to_string(),
            sector,
            role: "Operador de Máquinas".to_string(),
            shift: "06:50 às 14:20 hrs".to_string(),
            admission_date: at(2019, 3, 1),
        },
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn patient(id: &str, name: &str) -> Subject {
    let mut subject = employee(id, name, Sector::Ti);
    subject.gender = Gender::F;
    subject.profile = Profile::Patient {
        address: Address {
            street: "Rua das Flores".to_string(),
            number: "120".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zip_code: "01310-100".to_string(),
        },
    };
    subject
}

pub(crate) fn exam(
    subject: &str,
    exam_type: ExamType,
    status: ExamStatus,
    date: DateTime<Utc>,
) -> Exam {
    let expiration_date = status
        .carries_expiration()
        .then(|| crate::core::lifecycle::compute_expiration_date(date, 12).unwrap());
    Exam {
        id: ExamId::generate(),
        subject_id: SubjectId::new(subject).unwrap(),
        exam_type,
        category: exam_type.category(),
        date,
        scheduled_date: (status == ExamStatus::Scheduled).then_some(date),
        expiration_date,
        validity_period: Some(12),
        status,
        result: None,
        notes: None,
        doctor: None,
        created_at: date,
        updated_at: date,
    }
}
