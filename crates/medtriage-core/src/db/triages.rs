//! Triage database operations.

use rusqlite::{params, OptionalExtension};

use super::{constraint_error, Database, DbError, DbResult};
use crate::models::{NewTriage, Triage, TriageStatus};
use crate::repository::TriageRepository;

impl TriageRepository for Database {
    fn find_triage_by_id(&self, id: i64) -> DbResult<Option<Triage>> {
        self.conn
            .query_row(
                r#"
                SELECT id, patient_id, symptoms, status, created_at
                FROM triages
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(TriageRow {
                        id: row.get(0)?,
                        patient_id: row.get(1)?,
                        symptoms: row.get(2)?,
                        status: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    fn insert_triage(&self, triage: NewTriage) -> DbResult<Triage> {
        self.conn
            .execute(
                r#"
                INSERT INTO triages (patient_id, symptoms, status, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    triage.patient_id,
                    triage.symptoms,
                    triage.status.as_str(),
                    triage.created_at,
                ],
            )
            .map_err(|e| constraint_error(e, "triage"))?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(triage_id = id, patient_id = triage.patient_id, "triage inserted");
        Ok(triage.into_triage(id))
    }
}

/// Intermediate row struct for database mapping.
struct TriageRow {
    id: i64,
    patient_id: i64,
    symptoms: String,
    status: String,
    created_at: String,
}

impl TryFrom<TriageRow> for Triage {
    type Error = DbError;

    fn try_from(row: TriageRow) -> Result<Self, Self::Error> {
        let status = TriageStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown triage status: {}", row.status)))?;

        Ok(Triage {
            id: row.id,
            patient_id: row.patient_id,
            symptoms: row.symptoms,
            status,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPatient;
    use crate::repository::PatientRepository;

    fn setup_db() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let patient = db
            .insert_patient(NewPatient::new(
                "maria".into(),
                "hash".into(),
                "Maria".into(),
                String::new(),
            ))
            .unwrap();
        (db, patient.id)
    }

    #[test]
    fn test_insert_and_get_triage() {
        let (db, patient_id) = setup_db();

        let inserted = db
            .insert_triage(NewTriage::new(patient_id, "febre e dor de cabeca".into()))
            .unwrap();
        let retrieved = db.find_triage_by_id(inserted.id).unwrap().unwrap();

        assert_eq!(retrieved, inserted);
        assert_eq!(retrieved.status, TriageStatus::Pending);
        assert_eq!(retrieved.patient_id, patient_id);
    }

    #[test]
    fn test_unknown_patient_is_constraint() {
        let (db, patient_id) = setup_db();
        let result = db.insert_triage(NewTriage::new(patient_id + 100, "tosse".into()));
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let (db, patient_id) = setup_db();
        let triage = db
            .insert_triage(NewTriage::new(patient_id, "tosse".into()))
            .unwrap();

        db.conn()
            .execute("UPDATE triages SET status = 'archived' WHERE id = ?", [triage.id])
            .unwrap();

        assert!(matches!(
            db.find_triage_by_id(triage.id),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_missing_triage() {
        let (db, _) = setup_db();
        assert!(db.find_triage_by_id(999).unwrap().is_none());
    }
}
