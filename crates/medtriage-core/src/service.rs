//! Triage service: registration, login, catalog, triage intake and recommendations.
//!
//! Every operation is synchronous and borrows its repository; callers decide how
//! storage access is serialized.

use crate::credentials::{PasswordHasher, TokenIssuer};
use crate::db::DbError;
use crate::matcher::{MedicationMatcher, Recommendations};
use crate::models::{Medication, NewMedication, NewPatient, NewTriage, Patient, Triage};
use crate::repository::{MedicationRepository, PatientRepository, TriageRepository};
use crate::{TriageError, TriageResult};

/// Registration input; the password is still plaintext here.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub allergies: String,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub patient: Patient,
    pub access_token: String,
}

/// Coordinates repositories, credentials and the matcher.
pub struct TriageService<'a, R> {
    repo: &'a R,
    hasher: PasswordHasher,
    tokens: &'a TokenIssuer,
}

impl<'a, R> TriageService<'a, R>
where
    R: PatientRepository + MedicationRepository + TriageRepository,
{
    pub fn new(repo: &'a R, hasher: PasswordHasher, tokens: &'a TokenIssuer) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    /// Register a new patient. A taken username is a validation error.
    pub fn register_patient(&self, registration: Registration) -> TriageResult<Patient> {
        let username = registration.username.trim();
        if username.is_empty() {
            return Err(TriageError::Validation("username is required".into()));
        }
        if registration.password.is_empty() {
            return Err(TriageError::Validation("password is required".into()));
        }
        if self.repo.find_patient_by_username(username)?.is_some() {
            return Err(TriageError::Validation("user exists".into()));
        }

        let new_patient = NewPatient::new(
            username.to_string(),
            self.hasher.hash(&registration.password),
            registration.full_name,
            registration.allergies,
        );

        let patient = match self.repo.insert_patient(new_patient) {
            Ok(patient) => patient,
            Err(DbError::Constraint(_)) => return Err(TriageError::Validation("user exists".into())),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(patient_id = patient.id, "patient registered");
        Ok(patient)
    }

    /// Check credentials and issue an access token.
    pub fn authenticate(&self, username: &str, password: &str) -> TriageResult<Session> {
        let rejected = || TriageError::Authentication("incorrect username or password".into());

        let Some(patient) = self.repo.find_patient_by_username(username.trim())? else {
            self.hasher.verify_absent(password);
            return Err(rejected());
        };

        if !self.hasher.verify(password, &patient.password_hash)? {
            tracing::debug!(patient_id = patient.id, "password mismatch");
            return Err(rejected());
        }

        let access_token = self.tokens.issue(&patient.username)?;
        tracing::info!(patient_id = patient.id, "patient authenticated");
        Ok(Session {
            patient,
            access_token,
        })
    }

    /// Resolve a bearer token to the patient it was issued for.
    pub fn identify(&self, token: &str) -> TriageResult<Patient> {
        let username = self.tokens.verify(token)?;
        self.repo
            .find_patient_by_username(&username)?
            .ok_or_else(|| TriageError::Authentication("invalid token".into()))
    }

    pub fn patient_by_username(&self, username: &str) -> TriageResult<Patient> {
        self.repo
            .find_patient_by_username(username)?
            .ok_or_else(|| TriageError::NotFound(format!("patient {}", username)))
    }

    /// Add a catalog entry.
    pub fn add_medication(&self, medication: NewMedication) -> TriageResult<Medication> {
        if medication.name.trim().is_empty() {
            return Err(TriageError::Validation("medication name is required".into()));
        }
        let medication = self.repo.insert_medication(medication)?;
        tracing::info!(medication_id = medication.id, "medication added");
        Ok(medication)
    }

    /// Whole catalog, ascending ID.
    pub fn list_medications(&self) -> TriageResult<Vec<Medication>> {
        Ok(self.repo.list_medications()?)
    }

    /// Record a triage for `username`. Blank symptoms are rejected.
    pub fn record_triage(&self, username: &str, symptoms: &str) -> TriageResult<Triage> {
        if symptoms.trim().is_empty() {
            return Err(TriageError::Validation("symptoms must not be empty".into()));
        }
        let patient = self.patient_by_username(username)?;

        let triage = self
            .repo
            .insert_triage(NewTriage::new(patient.id, symptoms.to_string()))
            .map_err(|e| match e {
                DbError::Constraint(msg) => TriageError::NotFound(msg),
                other => other.into(),
            })?;

        tracing::info!(triage_id = triage.id, patient_id = patient.id, "triage recorded");
        Ok(triage)
    }

    /// Rank medications for a triage owned by `username`.
    pub fn recommendations_for(&self, triage_id: i64, username: &str) -> TriageResult<Recommendations> {
        let triage = self
            .repo
            .find_triage_by_id(triage_id)?
            .ok_or_else(|| TriageError::NotFound(format!("triage {}", triage_id)))?;
        let patient = self.patient_by_username(username)?;

        if triage.patient_id != patient.id {
            tracing::warn!(triage_id, patient_id = patient.id, "triage access denied");
            return Err(TriageError::Authorization("not allowed".into()));
        }

        let catalog = self.repo.list_medications()?;
        let recommendations = MedicationMatcher::new(&catalog).recommend_for(&triage, &patient);

        tracing::debug!(
            triage_id,
            count = recommendations.len(),
            "recommendations computed"
        );
        Ok(recommendations)
    }
}
