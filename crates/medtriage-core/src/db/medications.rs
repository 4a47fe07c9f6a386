//! Medication catalog database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{constraint_error, Database, DbResult};
use crate::models::{Medication, NewMedication};
use crate::repository::MedicationRepository;

const MEDICATION_COLUMNS: &str =
    "id, name, indications, contraindications, allergy_tags, notes";

fn medication_from_row(row: &Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        name: row.get(1)?,
        indications: row.get(2)?,
        contraindications: row.get(3)?,
        allergy_tags: row.get(4)?,
        notes: row.get(5)?,
    })
}

impl MedicationRepository for Database {
    fn find_medication_by_id(&self, id: i64) -> DbResult<Option<Medication>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM medications WHERE id = ?", MEDICATION_COLUMNS),
                [id],
                medication_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_medication(&self, medication: NewMedication) -> DbResult<Medication> {
        self.conn
            .execute(
                r#"
                INSERT INTO medications (name, indications, contraindications, allergy_tags, notes)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    medication.name,
                    medication.indications,
                    medication.contraindications,
                    medication.allergy_tags,
                    medication.notes,
                ],
            )
            .map_err(|e| constraint_error(e, "medication"))?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(medication_id = id, name = %medication.name, "medication inserted");
        Ok(medication.into_medication(id))
    }

    fn list_medications(&self) -> DbResult<Vec<Medication>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM medications ORDER BY id",
            MEDICATION_COLUMNS
        ))?;

        let rows = stmt.query_map([], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

impl Database {
    /// Number of medications in the catalog.
    pub fn count_medications(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM medications", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
