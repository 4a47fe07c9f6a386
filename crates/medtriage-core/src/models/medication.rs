//! Medication catalog models.

use serde::{Deserialize, Serialize};

/// A single medication in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Server-assigned row ID, also the tie-break key when ranking
    pub id: i64,
    /// Product or generic name
    pub name: String,
    /// Free-text conditions/symptoms this medication treats (e.g., "febre dor")
    pub indications: String,
    /// Free-text contraindications, shown alongside recommendations
    pub contraindications: String,
    /// Free-text substances/classes cross-checked against patient allergies
    pub allergy_tags: String,
    /// Additional notes
    pub notes: String,
}

/// A catalog entry about to be inserted.
///
/// Every text field except `name` may be omitted in JSON and defaults to "".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewMedication {
    pub name: String,
    #[serde(default)]
    pub indications: String,
    #[serde(default)]
    pub contraindications: String,
    #[serde(default)]
    pub allergy_tags: String,
    #[serde(default)]
    pub notes: String,
}

impl NewMedication {
    /// Create a catalog entry with a name and indications.
    pub fn new(name: impl Into<String>, indications: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indications: indications.into(),
            ..Default::default()
        }
    }

    /// Set the allergy tags.
    pub fn with_allergy_tags(mut self, allergy_tags: impl Into<String>) -> Self {
        self.allergy_tags = allergy_tags.into();
        self
    }

    /// Attach the row ID assigned on insert.
    pub fn into_medication(self, id: i64) -> Medication {
        Medication {
            id,
            name: self.name,
            indications: self.indications,
            contraindications: self.contraindications,
            allergy_tags: self.allergy_tags,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let med = NewMedication::new("Dipirona 500mg", "febre dor")
            .with_allergy_tags("dipirona pirazolona")
            .into_medication(3);

        assert_eq!(med.id, 3);
        assert_eq!(med.indications, "febre dor");
        assert_eq!(med.allergy_tags, "dipirona pirazolona");
        assert!(med.notes.is_empty());
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let med: NewMedication = serde_json::from_str(r#"{"name": "Loratadina"}"#).unwrap();
        assert_eq!(med.name, "Loratadina");
        assert_eq!(med.indications, "");
        assert_eq!(med.allergy_tags, "");
    }
}
