//! Storage capabilities the service layer depends on.
//!
//! [`Database`](crate::db::Database) implements all three traits; the matcher itself
//! never touches storage and only sees the values these return.

use crate::db::DbResult;
use crate::models::{Medication, NewMedication, NewPatient, NewTriage, Patient, Triage};

/// Patient lookups and registration.
pub trait PatientRepository {
    fn find_patient_by_username(&self, username: &str) -> DbResult<Option<Patient>>;

    fn find_patient_by_id(&self, id: i64) -> DbResult<Option<Patient>>;

    /// Insert a patient; a taken username is a [`DbError::Constraint`](crate::db::DbError).
    fn insert_patient(&self, patient: NewPatient) -> DbResult<Patient>;
}

/// Medication catalog access.
pub trait MedicationRepository {
    fn find_medication_by_id(&self, id: i64) -> DbResult<Option<Medication>>;

    fn insert_medication(&self, medication: NewMedication) -> DbResult<Medication>;

    /// The whole catalog, ordered by ascending ID.
    fn list_medications(&self) -> DbResult<Vec<Medication>>;
}

/// Triage persistence.
pub trait TriageRepository {
    fn find_triage_by_id(&self, id: i64) -> DbResult<Option<Triage>>;

    fn insert_triage(&self, triage: NewTriage) -> DbResult<Triage>;
}
