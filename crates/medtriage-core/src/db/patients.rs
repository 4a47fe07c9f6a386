//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{constraint_error, Database, DbResult};
use crate::models::{NewPatient, Patient};
use crate::repository::PatientRepository;

const PATIENT_COLUMNS: &str = "id, username, password_hash, full_name, allergies, created_at";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        full_name: row.get(3)?,
        allergies: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl PatientRepository for Database {
    fn find_patient_by_username(&self, username: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE username = ?", PATIENT_COLUMNS),
                [username],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    fn find_patient_by_id(&self, id: i64) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS),
                [id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_patient(&self, patient: NewPatient) -> DbResult<Patient> {
        self.conn
            .execute(
                r#"
                INSERT INTO patients (username, password_hash, full_name, allergies, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    patient.username,
                    patient.password_hash,
                    patient.full_name,
                    patient.allergies,
                    patient.created_at,
                ],
            )
            .map_err(|e| constraint_error(e, "patient"))?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(patient_id = id, username = %patient.username, "patient inserted");
        Ok(patient.into_patient(id))
    }
}
