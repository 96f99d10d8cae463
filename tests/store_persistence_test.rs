//! Integration tests for the record store over the file backend

use aso_control::adapters::storage::{FileStore, KeyValueStore, StorageKeys};
use aso_control::core::exchange::{read_document, write_document};
use aso_control::core::lifecycle::parse_date;
use aso_control::core::mock::MockOptions;
use aso_control::core::store::{RecordStore, StoreSettings};
use aso_control::domain::{
    Address, AsoError, ExamStatus, ExamType, Gender, NewExam, NewSubject, Profile, Variant,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tempfile::TempDir;

fn date(s: &str) -> DateTime<Utc> {
    parse_date(s).unwrap()
}

fn open(dir: &TempDir, variant: Variant) -> RecordStore {
    let backend = Arc::new(FileStore::new(dir.path()).unwrap());
    RecordStore::open(backend, StoreSettings::new(variant)).unwrap()
}

fn patient_form() -> NewSubject {
    NewSubject {
        name: "BEATRIZ GOMES ROCHA".to_string(),
        cpf: "529.982.247-25".to_string(),
        age: 52,
        gender: Gender::F,
        email: "beatriz.gomes@yahoo.com.br".to_string(),
        phone: "81991234567".to_string(),
        profile: Profile::Patient {
            address: Address {
                street: "Avenida Boa Viagem".to_string(),
                number: "1500".to_string(),
                city: "Recife".to_string(),
                state: "PE".to_string(),
                zip_code: "51011-000".to_string(),
            },
        },
    }
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let now = date("2024-06-15");

    let mut store = open(&dir, Variant::Occupational);
    let report = store
        .initialize(now, Some(&MockOptions::new(8, 21)))
        .unwrap();
    assert_eq!(report.seeded_subjects, 8);

    let keys = StorageKeys::default();
    for key in keys.all() {
        assert!(dir.path().join(format!("{key}.json")).exists(), "{key}");
    }

    let reopened = open(&dir, Variant::Occupational);
    assert_eq!(reopened.subjects(), store.subjects());
    assert_eq!(reopened.exams(), store.exams());
    for subject in reopened.subjects() {
        assert_eq!(
            reopened.exams_for_subject(&subject.id),
            store.exams_for_subject(&subject.id)
        );
    }
}

#[test]
fn test_cascade_delete_is_persisted() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, Variant::Occupational);
    store
        .initialize(date("2024-06-15"), Some(&MockOptions::new(5, 3)))
        .unwrap();

    let victim = store.subjects()[0].id.clone();
    let removed = store.delete_subject(&victim).unwrap();
    assert!(removed >= 4);

    let reopened = open(&dir, Variant::Occupational);
    assert_eq!(reopened.subjects().len(), 4);
    assert!(reopened.exams().iter().all(|e| e.subject_id != victim));
}

#[test]
fn test_clinical_lifecycle_on_disk() {
    let dir = TempDir::new().unwrap();
    let now = date("2024-06-15");
    let mut store = open(&dir, Variant::Clinical);

    let patient = store.add_subject(patient_form(), now).unwrap();
    let exam = store
        .add_exam(
            NewExam::new(patient.id.clone(), ExamType::Glicemia, now, ExamStatus::Pending)
                .with_notes("Jejum de 8 horas"),
            now,
        )
        .unwrap();
    store
        .schedule_exam(&exam.id, date("2024-06-20"), now)
        .unwrap();
    store.cancel_exam(&exam.id, date("2024-06-18")).unwrap();

    let reopened = open(&dir, Variant::Clinical);
    let stored = reopened.exam(&exam.id).unwrap();
    assert_eq!(stored.status, ExamStatus::Cancelled);
    assert_eq!(stored.expiration_date, None);
    assert_eq!(stored.notes.as_deref(), Some("Jejum de 8 horas"));

    // A clinical data directory is not opened as occupational
    let backend = Arc::new(FileStore::new(dir.path()).unwrap());
    let err = RecordStore::open(backend, StoreSettings::new(Variant::Occupational)).unwrap_err();
    assert!(matches!(err, AsoError::Configuration(_)));
}

#[test]
fn test_export_import_round_trip() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let now = date("2024-06-15");

    let mut source = open(&source_dir, Variant::Occupational);
    source
        .initialize(now, Some(&MockOptions::new(10, 99)))
        .unwrap();

    let file = source_dir.path().join("export.json");
    write_document(&source.export_document(now), &file).unwrap();

    let mut target = open(&target_dir, Variant::Occupational);
    let summary = target.import_document(read_document(&file).unwrap()).unwrap();
    assert_eq!(summary.subjects, Some(10));
    assert_eq!(summary.exams, Some(source.exams().len()));

    let reopened = open(&target_dir, Variant::Occupational);
    assert_eq!(reopened.subjects(), source.subjects());
    assert_eq!(reopened.exams(), source.exams());
}

#[test]
fn test_corrupt_document_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let now = date("2024-06-15");
    let mut store = open(&dir, Variant::Occupational);
    store.initialize(now, Some(&MockOptions::new(3, 1))).unwrap();

    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{ \"subjects\": [ { \"id\": ").unwrap();
    assert!(matches!(
        read_document(&file),
        Err(AsoError::Serialization(_))
    ));

    let reopened = open(&dir, Variant::Occupational);
    assert_eq!(reopened.subjects().len(), 3);
}

#[test]
fn test_corrupt_blob_fails_open() {
    let dir = TempDir::new().unwrap();
    let backend = FileStore::new(dir.path()).unwrap();
    backend
        .set(&StorageKeys::default().exams, "not json")
        .unwrap();

    let err = RecordStore::open(
        Arc::new(backend),
        StoreSettings::new(Variant::Occupational),
    )
    .unwrap_err();
    assert!(matches!(err, AsoError::Serialization(_)));
}
