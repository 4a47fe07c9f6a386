//! Recommendation models produced by the matcher.

use serde::{Deserialize, Serialize};

/// A ranked association between a triage and a medication. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    /// The catalog medication ID
    pub medication_id: i64,
    /// The catalog medication name
    pub name: String,
    /// Number of symptom tokens found in the medication's indications
    pub score: u32,
    /// The overlapping tokens, in sorted order
    pub matched_terms: Vec<String>,
    /// Copied from the catalog for display
    pub contraindications: String,
    /// Copied from the catalog for display
    pub notes: String,
}
