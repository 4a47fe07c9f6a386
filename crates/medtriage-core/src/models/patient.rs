//! Patient models.

use serde::{Deserialize, Serialize};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Server-assigned row ID
    pub id: i64,
    /// Login name, unique across patients
    pub username: String,
    /// Encoded PBKDF2 hash (see [`crate::credentials::PasswordHasher`])
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Display name
    pub full_name: String,
    /// Free-text allergy list (comma or keyword separated)
    pub allergies: String,
    /// Registration timestamp
    pub created_at: String,
}

/// A patient about to be registered; the password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub allergies: String,
    pub created_at: String,
}

impl NewPatient {
    /// Create a registration record stamped with the current time.
    pub fn new(username: String, password_hash: String, full_name: String, allergies: String) -> Self {
        Self {
            username,
            password_hash,
            full_name,
            allergies,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Attach the row ID assigned on insert.
    pub fn into_patient(self, id: i64) -> Patient {
        Patient {
            id,
            username: self.username,
            password_hash: self.password_hash,
            full_name: self.full_name,
            allergies: self.allergies,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_into_patient() {
        let new = NewPatient::new(
            "maria".into(),
            "hash".into(),
            "Maria Silva".into(),
            "dipirona".into(),
        );
        let created_at = new.created_at.clone();
        let patient = new.into_patient(7);

        assert_eq!(patient.id, 7);
        assert_eq!(patient.username, "maria");
        assert_eq!(patient.created_at, created_at);
        assert_eq!(patient.allergies, "dipirona");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let patient = NewPatient::new("joao".into(), "secret-hash".into(), String::new(), "  ".into())
            .into_patient(1);
        let json = serde_json::to_string(&patient).unwrap();

        assert!(!json.contains("secret-hash"));
    }
}
