//! Request and response bodies.

use medtriage_core::{Medication, NewMedication, Patient, Recommendation, Registration, Triage};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            password: req.password,
            full_name: req.full_name.unwrap_or_default(),
            allergies: req.allergies.unwrap_or_default(),
        }
    }
}

/// OAuth2 password-grant style login form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenOut {
    pub access_token: String,
    pub token_type: String,
}

impl TokenOut {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".into(),
        }
    }
}

/// Public view of a patient. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientOut {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub allergies: String,
}

impl From<Patient> for PatientOut {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            username: p.username,
            full_name: p.full_name,
            allergies: p.allergies,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MedicationIn {
    pub name: String,
    #[serde(default)]
    pub indications: Option<String>,
    #[serde(default)]
    pub contraindications: Option<String>,
    #[serde(default)]
    pub allergy_tags: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<MedicationIn> for NewMedication {
    fn from(m: MedicationIn) -> Self {
        NewMedication {
            name: m.name,
            indications: m.indications.unwrap_or_default(),
            contraindications: m.contraindications.unwrap_or_default(),
            allergy_tags: m.allergy_tags.unwrap_or_default(),
            notes: m.notes.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicationOut {
    pub id: i64,
    pub name: String,
    pub indications: String,
    pub contraindications: String,
    pub allergy_tags: String,
    pub notes: String,
}

impl From<Medication> for MedicationOut {
    fn from(m: Medication) -> Self {
        Self {
            id: m.id,
            name: m.name,
            indications: m.indications,
            contraindications: m.contraindications,
            allergy_tags: m.allergy_tags,
            notes: m.notes,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TriageIn {
    pub symptoms: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TriageOut {
    pub id: i64,
    pub patient_id: i64,
    pub symptoms: String,
    /// `pending` or `reviewed`
    pub status: String,
    pub created_at: String,
}

impl From<Triage> for TriageOut {
    fn from(t: Triage) -> Self {
        Self {
            id: t.id,
            patient_id: t.patient_id,
            symptoms: t.symptoms,
            status: t.status.as_str().to_string(),
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendationOut {
    pub medication_id: i64,
    pub name: String,
    pub score: u32,
    pub matched_terms: Vec<String>,
    pub contraindications: String,
    pub notes: String,
}

impl From<Recommendation> for RecommendationOut {
    fn from(r: Recommendation) -> Self {
        Self {
            medication_id: r.medication_id,
            name: r.name,
            score: r.score,
            matched_terms: r.matched_terms,
            contraindications: r.contraindications,
            notes: r.notes,
        }
    }
}
