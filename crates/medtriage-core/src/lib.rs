//! Medtriage Core Library
//!
//! Patient registration, symptom triage and allergy-aware medication recommendations.
//!
//! # Architecture
//!
//! ```text
//! Register → Login (PBKDF2 verify) → Bearer token (HS256)
//!                                          │
//!                                   Submit symptoms
//!                                          │
//!                               [STORAGE: triages table]
//!                                          │
//!                            Request recommendations (owner only)
//!                                          │
//!                     ┌────────────────────▼────────────────────┐
//!                     │            Medication Matcher           │
//!                     │  tokenize → exclude allergies → score   │
//!                     │  rank: score desc, id asc               │
//!                     └────────────────────┬────────────────────┘
//!                                          │
//!                                  Ranked medications
//! ```
//!
//! # Core Principle
//!
//! **Allergy exclusion always wins.** A medication whose allergy tags overlap the patient's
//! allergies is never recommended, whatever its score.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer
//! - [`models`]: Domain types (Patient, Medication, Triage, Recommendation)
//! - [`repository`]: Storage traits the service depends on
//! - [`matcher`]: Tokenizer and medication matcher
//! - [`credentials`]: Password hashing and bearer tokens
//! - [`service`]: Operations exposed to the HTTP layer

pub mod credentials;
pub mod db;
pub mod matcher;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use credentials::{CredentialError, PasswordHasher, TokenIssuer};
pub use db::{Database, DbError, SharedDatabase};
pub use matcher::{tokenize, MedicationMatcher, Recommendations, TokenSet, Tokenizer};
pub use models::{
    Medication, NewMedication, NewPatient, NewTriage, Patient, Recommendation, Triage,
    TriageStatus,
};
pub use repository::{MedicationRepository, PatientRepository, TriageRepository};
pub use service::{Registration, Session, TriageService};

use thiserror::Error;

/// Errors surfaced by [`TriageService`].
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Credential error: {0}")]
    Credential(String),
}

pub type TriageResult<T> = Result<T, TriageError>;

impl From<CredentialError> for TriageError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidToken(reason) => {
                tracing::debug!(%reason, "token rejected");
                TriageError::Authentication("invalid token".into())
            }
            other => TriageError::Credential(other.to_string()),
        }
    }
}
