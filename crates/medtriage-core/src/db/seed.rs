//! Catalog seeding from a JSON file.

use std::path::Path;

use super::{Database, DbResult};
use crate::models::NewMedication;

impl Database {
    /// Insert every medication from `items` when the catalog is still empty.
    ///
    /// Returns the number of rows inserted (0 if the catalog already had entries).
    pub fn seed_catalog(&mut self, items: Vec<NewMedication>) -> DbResult<usize> {
        if self.count_medications()? > 0 {
            tracing::info!("catalog already populated, skipping seed");
            return Ok(0);
        }

        let tx = self.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO medications (name, indications, contraindications, allergy_tags, notes)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for item in &items {
                stmt.execute(rusqlite::params![
                    item.name,
                    item.indications,
                    item.contraindications,
                    item.allergy_tags,
                    item.notes,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(count = items.len(), "catalog seeded");
        Ok(items.len())
    }

    /// Read a JSON array of medications from `path` and [`seed_catalog`](Self::seed_catalog) it.
    pub fn seed_catalog_from_json<P: AsRef<Path>>(&mut self, path: P) -> DbResult<usize> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let items: Vec<NewMedication> = serde_json::from_str(&raw)?;
        self.seed_catalog(items)
    }
}
