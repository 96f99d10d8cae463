//! The record store
//!
//! Owns subjects, exams and the subject→exam index. Every mutation goes
//! through one of the methods below and is followed by a wholesale write of
//! the affected list.

use super::filter::{matches_search, DashboardFilter, SubjectFilter};
use super::settings::StoreSettings;
use super::view::SubjectView;
use crate::adapters::storage::KeyValueStore;
use crate::core::adherence::{
    aggregate_by_exam_type, aggregate_monthly_adherence, compute_adherence_stats,
    compute_dashboard_stats, compute_indicators, AdherenceStats, DashboardStats, Indicators,
    MonthlyAdherence, TypeAdherence,
};
use crate::core::exchange::{check_consistency, ExportDocument};
use crate::core::lifecycle::{
    compute_expiration_date, is_expired, is_expiring_within_window, recompute_in_place,
};
use crate::core::mock::{self, MockOptions};
use crate::core::report::{build_control_sheet, ControlSheet};
use crate::domain::{
    AsoError, Exam, ExamId, ExamStatus, ExamType, NewExam, NewSubject, Result, Subject, SubjectId,
    SubjectPatch, Variant,
};
use crate::{log_error_with_context, log_refresh_complete, log_store_mutation};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Free-text exam fields; `Some("")` clears a field, `None` leaves it
#[derive(Debug, Clone, Default)]
pub struct ExamDetails {
    pub result: Option<String>,
    pub notes: Option<String>,
    pub doctor: Option<String>,
}

/// What [`RecordStore::initialize`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    pub seeded_subjects: usize,
    pub seeded_exams: usize,
    pub expired: usize,
}

/// Lists replaced by [`RecordStore::import_document`]; `None` = untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub subjects: Option<usize>,
    pub exams: Option<usize>,
}

/// Filtered dashboard data
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub by_exam_type: BTreeMap<ExamType, TypeAdherence>,
    pub exams: Vec<Exam>,
}

/// Explicit state container for subjects and exams
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore + Send + Sync>,
    settings: StoreSettings,
    subjects: Vec<Subject>,
    exams: Vec<Exam>,
    /// Positions in `exams`, ascending, per owning subject
    by_subject: HashMap<SubjectId, Vec<usize>>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("backend", &self.backend.backend_name())
            .field("settings", &self.settings)
            .field("subjects", &self.subjects.len())
            .field("exams", &self.exams.len())
            .finish()
    }
}

impl RecordStore {
    /// Reads both persisted lists fully into memory
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read, a serialization
    /// error if a blob is corrupt, and a configuration error if the stored
    /// settings belong to another variant.
    pub fn open(
        backend: Arc<dyn KeyValueStore + Send + Sync>,
        settings: StoreSettings,
    ) -> Result<Self> {
        let subjects: Vec<Subject> = load_list(backend.as_ref(), &settings.keys.subjects)?;
        let exams: Vec<Exam> = load_list(backend.as_ref(), &settings.keys.exams)?;

        if let Some(raw) = backend.get(&settings.keys.settings)? {
            let persisted: StoreSettings = serde_json::from_str(&raw).map_err(|e| {
                AsoError::Serialization(format!("Corrupt {}: {}", settings.keys.settings, e))
            })?;
            if persisted.variant != settings.variant {
                return Err(AsoError::Configuration(format!(
                    "Stored records belong to the {} variant but {} is configured",
                    persisted.variant, settings.variant
                )));
            }
        }

        let mut store = Self {
            backend,
            settings,
            subjects,
            exams,
            by_subject: HashMap::new(),
        };
        store.rebuild_index();

        tracing::info!(
            backend = store.backend.backend_name(),
            variant = %store.settings.variant,
            subjects = store.subjects.len(),
            exams = store.exams.len(),
            "Record store opened"
        );
        Ok(store)
    }

    /// Seeds sample data into an empty store, then refreshes expirations
    ///
    /// `mock` of `None` skips seeding.
    pub fn initialize(
        &mut self,
        now: DateTime<Utc>,
        mock: Option<&MockOptions>,
    ) -> Result<InitReport> {
        let mut report = InitReport::default();

        if let Some(options) = mock {
            if self.subjects.is_empty() && self.exams.is_empty() {
                let (subjects, exams) = self.seed(options, now)?;
                report.seeded_subjects = subjects;
                report.seeded_exams = exams;
            }
        }

        self.persist_settings()?;
        report.expired = self.refresh_expirations(now)?;
        Ok(report)
    }

    /// Replaces an empty store's contents with generated sample records
    ///
    /// # Errors
    ///
    /// Returns a validation error if the store already holds records.
    pub fn seed(&mut self, options: &MockOptions, now: DateTime<Utc>) -> Result<(usize, usize)> {
        if !self.subjects.is_empty() || !self.exams.is_empty() {
            return Err(AsoError::Validation(
                "Refusing to seed a store that already holds records".to_string(),
            ));
        }

        let data = mock::generate(self.settings.variant, options, now)?;
        self.subjects = data.subjects;
        self.exams = data.exams;
        self.rebuild_index();
        self.persist_subjects()?;
        self.persist_exams()?;

        tracing::info!(
            subjects = self.subjects.len(),
            exams = self.exams.len(),
            seed = options.seed,
            "Seeded sample records"
        );
        Ok((self.subjects.len(), self.exams.len()))
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn variant(&self) -> Variant {
        self.settings.variant
    }

    /// Validates and registers a subject
    ///
    /// Nothing is stored when validation fails.
    pub fn add_subject(&mut self, form: NewSubject, now: DateTime<Utc>) -> Result<Subject> {
        let cpf = form.validate()?;
        self.ensure_profile_variant(&form)?;

        let subject = Subject {
            id: SubjectId::generate(self.settings.variant.id_prefix()),
            name: form.name.trim().to_string(),
            cpf,
            age: form.age,
            gender: form.gender,
            email: form.email.trim().to_string(),
            phone: form.phone,
            profile: form.profile,
            created_at: now,
            updated_at: now,
        };

        self.subjects.push(subject.clone());
        self.persist_subjects()?;
        log_store_mutation!("add_subject", subject.id);
        Ok(subject)
    }

    /// Applies `patch` and re-validates the merged subject
    pub fn update_subject(
        &mut self,
        id: &SubjectId,
        patch: SubjectPatch,
        now: DateTime<Utc>,
    ) -> Result<Subject> {
        let idx = self.subject_position(id)?;
        let form = patch.merge(&self.subjects[idx]);
        let cpf = form.validate()?;
        self.ensure_profile_variant(&form)?;

        let subject = &mut self.subjects[idx];
        subject.name = form.name.trim().to_string();
        subject.cpf = cpf;
        subject.age = form.age;
        subject.gender = form.gender;
        subject.email = form.email.trim().to_string();
        subject.phone = form.phone;
        subject.profile = form.profile;
        subject.updated_at = now;
        let updated = subject.clone();

        self.persist_subjects()?;
        log_store_mutation!("update_subject", id);
        Ok(updated)
    }

    /// Removes a subject and every exam it owns
    ///
    /// Returns the number of exams removed with it.
    pub fn delete_subject(&mut self, id: &SubjectId) -> Result<usize> {
        let idx = self.subject_position(id)?;
        self.subjects.remove(idx);

        let before = self.exams.len();
        self.exams.retain(|e| &e.subject_id != id);
        let removed = before - self.exams.len();
        self.rebuild_index();

        self.persist_subjects()?;
        self.persist_exams()?;
        tracing::info!(subject_id = %id, exams_removed = removed, "Subject deleted");
        Ok(removed)
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Registers an exam for an existing subject
    ///
    /// The expiration date is derived when the status is completed or
    /// expired. In the occupational variant a completed exam that is already
    /// past its expiration is stored as expired.
    pub fn add_exam(&mut self, form: NewExam, now: DateTime<Utc>) -> Result<Exam> {
        self.subject_position(&form.subject_id)?;

        if !self.settings.variant.allows(form.status) {
            return Err(AsoError::Validation(format!(
                "Status {} is not available in the {} variant",
                form.status, self.settings.variant
            )));
        }
        if form.status == ExamStatus::Cancelled {
            return Err(AsoError::Validation(
                "New exams cannot start out cancelled".to_string(),
            ));
        }

        let validity = form
            .validity_period
            .unwrap_or(self.settings.default_validity_months);
        if validity == 0 {
            return Err(AsoError::field("validityPeriod", "must be at least 1 month"));
        }

        let expiration_date = if form.status.carries_expiration() {
            Some(compute_expiration_date(form.date, validity)?)
        } else {
            None
        };
        if let (ExamStatus::Expired, Some(exp)) = (form.status, expiration_date) {
            if !is_expired(exp, now) {
                return Err(AsoError::Validation(format!(
                    "Exam cannot be logged as expired: it is valid until {}",
                    exp.format("%Y-%m-%d")
                )));
            }
        }

        let mut exam = Exam {
            id: ExamId::generate(),
            subject_id: form.subject_id,
            exam_type: form.exam_type,
            category: form.exam_type.category(),
            date: form.date,
            scheduled_date: (form.status == ExamStatus::Scheduled).then_some(form.date),
            expiration_date,
            validity_period: Some(validity),
            status: form.status,
            result: non_blank(form.result),
            notes: non_blank(form.notes),
            doctor: non_blank(form.doctor),
            created_at: now,
            updated_at: now,
        };
        self.expire_if_due(&mut exam, now);

        let position = self.exams.len();
        self.by_subject
            .entry(exam.subject_id.clone())
            .or_default()
            .push(position);
        self.exams.push(exam.clone());

        self.persist_exams()?;
        log_store_mutation!("add_exam", exam.id);
        Ok(exam)
    }

    /// Schedules (or reschedules) a pending or scheduled exam for `date`
    pub fn schedule_exam(
        &mut self,
        id: &ExamId,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Exam> {
        let idx = self.exam_position(id)?;
        let exam = &mut self.exams[idx];
        exam.status.ensure_transition(ExamStatus::Scheduled)?;

        exam.status = ExamStatus::Scheduled;
        exam.date = date;
        exam.scheduled_date = Some(date);
        exam.expiration_date = None;
        exam.updated_at = now;
        let updated = exam.clone();

        self.persist_exams()?;
        log_store_mutation!("schedule_exam", id);
        Ok(updated)
    }

    /// Marks a pending or scheduled exam as done on `date` (default `now`)
    pub fn complete_exam(
        &mut self,
        id: &ExamId,
        date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Exam> {
        let idx = self.exam_position(id)?;
        let default_validity = self.settings.default_validity_months;
        let exam = &self.exams[idx];
        exam.status.ensure_transition(ExamStatus::Completed)?;

        let done_on = date.unwrap_or(now);
        let validity = exam.validity_period.unwrap_or(default_validity);
        let expiration = compute_expiration_date(done_on, validity)?;

        let mut exam = exam.clone();
        exam.status = ExamStatus::Completed;
        exam.date = done_on;
        exam.validity_period = Some(validity);
        exam.expiration_date = Some(expiration);
        exam.updated_at = now;
        self.expire_if_due(&mut exam, now);
        self.exams[idx] = exam.clone();

        self.persist_exams()?;
        log_store_mutation!("complete_exam", id);
        Ok(exam)
    }

    /// Cancels a non-terminal exam; clinical variant only
    pub fn cancel_exam(&mut self, id: &ExamId, now: DateTime<Utc>) -> Result<Exam> {
        let idx = self.exam_position(id)?;
        let variant = self.settings.variant;
        let exam = &mut self.exams[idx];

        if !variant.allows(ExamStatus::Cancelled) {
            return Err(AsoError::InvalidTransition {
                from: exam.status.to_string(),
                to: ExamStatus::Cancelled.to_string(),
            });
        }
        exam.status.ensure_transition(ExamStatus::Cancelled)?;

        exam.status = ExamStatus::Cancelled;
        exam.expiration_date = None;
        exam.updated_at = now;
        let updated = exam.clone();

        self.persist_exams()?;
        log_store_mutation!("cancel_exam", id);
        Ok(updated)
    }

    /// Updates result, notes or doctor without touching the lifecycle
    pub fn update_exam_details(
        &mut self,
        id: &ExamId,
        details: ExamDetails,
        now: DateTime<Utc>,
    ) -> Result<Exam> {
        let idx = self.exam_position(id)?;
        let exam = &mut self.exams[idx];

        if let Some(result) = details.result {
            exam.result = non_blank(Some(result));
        }
        if let Some(notes) = details.notes {
            exam.notes = non_blank(Some(notes));
        }
        if let Some(doctor) = details.doctor {
            exam.doctor = non_blank(Some(doctor));
        }
        exam.updated_at = now;
        let updated = exam.clone();

        self.persist_exams()?;
        log_store_mutation!("update_exam_details", id);
        Ok(updated)
    }

    /// Removes one exam
    pub fn delete_exam(&mut self, id: &ExamId) -> Result<Exam> {
        let idx = self.exam_position(id)?;
        let removed = self.exams.remove(idx);
        self.rebuild_index();

        self.persist_exams()?;
        log_store_mutation!("delete_exam", id);
        Ok(removed)
    }

    pub fn exam(&self, id: &ExamId) -> Option<&Exam> {
        self.exams.iter().find(|e| &e.id == id)
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// Exams owned by `id`, in insertion order
    pub fn exams_for_subject(&self, id: &SubjectId) -> Vec<&Exam> {
        self.by_subject
            .get(id)
            .map(|positions| positions.iter().map(|&p| &self.exams[p]).collect())
            .unwrap_or_default()
    }

    /// Subject with its exams, pending types and last exam date
    pub fn subject_view(&self, id: &SubjectId) -> Result<SubjectView> {
        let subject = self
            .subject(id)
            .ok_or_else(|| AsoError::NotFound(format!("Subject {}", id)))?;
        let exams = self.exams_for_subject(id).into_iter().cloned().collect();
        Ok(SubjectView::build(subject, exams))
    }

    /// Moves completed exams past their expiration to expired
    ///
    /// Occupational variant only; a clinical store has no expired state and
    /// always reports zero. Returns the number of transitions.
    pub fn refresh_expirations(&mut self, as_of: DateTime<Utc>) -> Result<usize> {
        if self.settings.variant != Variant::Occupational {
            return Ok(0);
        }

        let transitioned = recompute_in_place(&mut self.exams, as_of);
        if transitioned > 0 {
            self.persist_exams()?;
        }
        log_refresh_complete!(transitioned, self.exams.len());
        Ok(transitioned)
    }

    /// Completed exams expiring within the configured warning window
    pub fn expiring_exams(&self, as_of: DateTime<Utc>) -> Vec<&Exam> {
        let window = self.settings.warning_window_days;
        self.exams
            .iter()
            .filter(|e| e.status == ExamStatus::Completed)
            .filter(|e| {
                e.expiration_date
                    .is_some_and(|exp| is_expiring_within_window(exp, window, as_of))
            })
            .collect()
    }

    pub fn search(&self, term: &str) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|s| matches_search(s, term))
            .collect()
    }

    pub fn filter(&self, filter: &SubjectFilter) -> Vec<&Subject> {
        self.subjects.iter().filter(|s| filter.matches(s)).collect()
    }

    /// Counters and per-type tallies over the filtered subjects' matching exams
    pub fn dashboard(&self, filter: &DashboardFilter) -> Dashboard {
        let subjects = self.filter(&filter.subjects);
        let exams: Vec<Exam> = subjects
            .iter()
            .flat_map(|s| self.exams_for_subject(&s.id))
            .filter(|e| filter.matches_exam(e))
            .cloned()
            .collect();

        Dashboard {
            stats: compute_dashboard_stats(subjects.len(), &exams),
            by_exam_type: aggregate_by_exam_type(&exams),
            exams,
        }
    }

    pub fn indicators(&self) -> Indicators {
        compute_indicators(self.subjects.len(), &self.exams)
    }

    pub fn adherence_stats(&self, year: i32) -> AdherenceStats {
        compute_adherence_stats(
            &self.subjects,
            &self.exams,
            year,
            self.settings.adherence_goal,
        )
    }

    pub fn monthly_adherence(&self, year: i32) -> Vec<MonthlyAdherence> {
        aggregate_monthly_adherence(
            &self.subjects,
            &self.exams,
            year,
            self.settings.adherence_goal,
        )
    }

    pub fn adherence_by_type(&self) -> BTreeMap<ExamType, TypeAdherence> {
        aggregate_by_exam_type(&self.exams)
    }

    /// Control sheet for the subjects matching `filter`
    pub fn control_sheet(&self, filter: &SubjectFilter) -> ControlSheet {
        build_control_sheet(&self.filter(filter), &self.exams)
    }

    pub fn export_document(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::new(self.subjects.clone(), self.exams.clone(), now)
    }

    /// Replaces each list present in `document`
    ///
    /// The combined result is checked before anything changes; on error the
    /// store is left as it was.
    pub fn import_document(&mut self, document: ExportDocument) -> Result<ImportSummary> {
        let subjects = document.subjects.as_deref().unwrap_or(&self.subjects);
        let exams = document.exams.as_deref().unwrap_or(&self.exams);

        if let Some(s) = subjects
            .iter()
            .find(|s| s.profile.variant() != self.settings.variant)
        {
            return Err(AsoError::Validation(format!(
                "Subject {} is not a {} record",
                s.id, self.settings.variant
            )));
        }
        if let Some(e) = exams.iter().find(|e| !self.settings.variant.allows(e.status)) {
            return Err(AsoError::Validation(format!(
                "Exam {} has status {}, which the {} variant does not use",
                e.id, e.status, self.settings.variant
            )));
        }
        check_consistency(subjects, exams)?;

        let mut summary = ImportSummary::default();
        if let Some(subjects) = document.subjects {
            summary.subjects = Some(subjects.len());
            self.subjects = subjects;
        }
        if let Some(exams) = document.exams {
            summary.exams = Some(exams.len());
            self.exams = exams;
        }
        self.rebuild_index();

        if summary.subjects.is_some() {
            self.persist_subjects()?;
        }
        if summary.exams.is_some() {
            self.persist_exams()?;
        }
        self.persist_settings()?;

        tracing::info!(
            subjects = ?summary.subjects,
            exams = ?summary.exams,
            "Import applied"
        );
        Ok(summary)
    }

    /// Removes every persisted key and empties the store
    pub fn clear(&mut self) -> Result<()> {
        for key in self.settings.keys.all() {
            self.backend.remove(key).map_err(|e| storage_failure(e, key))?;
        }
        self.subjects.clear();
        self.exams.clear();
        self.by_subject.clear();
        tracing::warn!("Record store cleared");
        Ok(())
    }

    fn expire_if_due(&self, exam: &mut Exam, now: DateTime<Utc>) {
        if self.settings.variant == Variant::Occupational {
            recompute_in_place(std::slice::from_mut(exam), now);
        }
    }

    fn ensure_profile_variant(&self, form: &NewSubject) -> Result<()> {
        if form.profile.variant() != self.settings.variant {
            return Err(AsoError::field(
                "profile",
                format!("expected a {} record", self.settings.variant),
            ));
        }
        Ok(())
    }

    fn subject_position(&self, id: &SubjectId) -> Result<usize> {
        self.subjects
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| AsoError::NotFound(format!("Subject {}", id)))
    }

    fn exam_position(&self, id: &ExamId) -> Result<usize> {
        self.exams
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| AsoError::NotFound(format!("Exam {}", id)))
    }

    fn rebuild_index(&mut self) {
        self.by_subject.clear();
        for (position, exam) in self.exams.iter().enumerate() {
            self.by_subject
                .entry(exam.subject_id.clone())
                .or_default()
                .push(position);
        }
    }

    fn persist_subjects(&self) -> Result<()> {
        self.write_key(&self.settings.keys.subjects, &self.subjects)
    }

    fn persist_exams(&self) -> Result<()> {
        self.write_key(&self.settings.keys.exams, &self.exams)
    }

    fn persist_settings(&self) -> Result<()> {
        self.write_key(&self.settings.keys.settings, &self.settings)
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend
            .set(key, &json)
            .map_err(|e| storage_failure(e, key))
    }
}

fn storage_failure(error: AsoError, key: &str) -> AsoError {
    log_error_with_context!(&error, key);
    match error {
        AsoError::Storage(_) => error,
        other => AsoError::Storage(other.to_string()),
    }
}

fn load_list<T: DeserializeOwned>(backend: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    match backend.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| AsoError::Serialization(format!("Corrupt {}: {}", key, e))),
        None => Ok(Vec::new()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
