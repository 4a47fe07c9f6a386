//! Cloneable database handle for multi-threaded callers.
//!
//! The connection is locked for one query at a time, never across a whole service call,
//! so password hashing and matching run without holding it.

use std::sync::{Arc, Mutex};

use super::{Database, DbError, DbResult};
use crate::models::{Medication, NewMedication, NewPatient, NewTriage, Patient, Triage};
use crate::repository::{MedicationRepository, PatientRepository, TriageRepository};

/// A [`Database`] behind `Arc<Mutex<_>>`, implementing the repository traits.
#[derive(Clone)]
pub struct SharedDatabase {
    inner: Arc<Mutex<Database>>,
}

impl SharedDatabase {
    pub fn new(db: Database) -> Self {
        Self {
            inner: Arc::new(Mutex::new(db)),
        }
    }

    /// Run `f` with the connection locked.
    pub fn with<T>(&self, f: impl FnOnce(&Database) -> DbResult<T>) -> DbResult<T> {
        let guard = self.inner.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&guard)
    }
}

impl PatientRepository for SharedDatabase {
    fn find_patient_by_username(&self, username: &str) -> DbResult<Option<Patient>> {
        self.with(|db| db.find_patient_by_username(username))
    }

    fn find_patient_by_id(&self, id: i64) -> DbResult<Option<Patient>> {
        self.with(|db| db.find_patient_by_id(id))
    }

    fn insert_patient(&self, patient: NewPatient) -> DbResult<Patient> {
        self.with(|db| db.insert_patient(patient))
    }
}

impl MedicationRepository for SharedDatabase {
    fn find_medication_by_id(&self, id: i64) -> DbResult<Option<Medication>> {
        self.with(|db| db.find_medication_by_id(id))
    }

    fn insert_medication(&self, medication: NewMedication) -> DbResult<Medication> {
        self.with(|db| db.insert_medication(medication))
    }

    fn list_medications(&self) -> DbResult<Vec<Medication>> {
        self.with(|db| db.list_medications())
    }
}

impl TriageRepository for SharedDatabase {
    fn find_triage_by_id(&self, id: i64) -> DbResult<Option<Triage>> {
        self.with(|db| db.find_triage_by_id(id))
    }

    fn insert_triage(&self, triage: NewTriage) -> DbResult<Triage> {
        self.with(|db| db.insert_triage(triage))
    }
}
