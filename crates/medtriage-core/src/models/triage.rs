//! Triage records.

use serde::{Deserialize, Serialize};

/// Triage status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriageStatus {
    /// Recorded, recommendations computed on demand
    Pending,
    /// Looked at by a clinician
    Reviewed,
}

impl TriageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageStatus::Pending => "pending",
            TriageStatus::Reviewed => "reviewed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TriageStatus::Pending),
            "reviewed" => Some(TriageStatus::Reviewed),
            _ => None,
        }
    }
}

/// A recorded symptom report. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Triage {
    /// Server-assigned row ID
    pub id: i64,
    /// Owning patient ID
    pub patient_id: i64,
    /// Free-text symptom description
    pub symptoms: String,
    /// Triage status
    pub status: TriageStatus,
    /// Creation timestamp
    pub created_at: String,
}

/// A triage about to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTriage {
    pub patient_id: i64,
    pub symptoms: String,
    pub status: TriageStatus,
    pub created_at: String,
}

impl NewTriage {
    /// Create a pending triage stamped with the current time.
    pub fn new(patient_id: i64, symptoms: String) -> Self {
        Self {
            patient_id,
            symptoms,
            status: TriageStatus::Pending,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Attach the row ID assigned on insert.
    pub fn into_triage(self, id: i64) -> Triage {
        Triage {
            id,
            patient_id: self.patient_id,
            symptoms: self.symptoms,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
