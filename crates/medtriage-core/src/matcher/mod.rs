//! Allergy-aware medication matcher.
//!
//! Pipeline: Tokenize symptoms → Exclude allergy conflicts → Score indications → Rank
//!
//! The matcher is a pure function of (symptoms, patient allergies, catalog snapshot).
//! It performs no I/O and holds no state beyond the borrowed catalog.

mod tokenizer;

pub use tokenizer::*;

use crate::models::{Medication, Patient, Recommendation, Triage};

/// Ranks catalog medications against a symptom description.
pub struct MedicationMatcher<'a> {
    catalog: &'a [Medication],
    tokenizer: Tokenizer,
    allergy_tokenizer: Tokenizer,
}

impl<'a> MedicationMatcher<'a> {
    /// Create a matcher over a catalog snapshot.
    pub fn new(catalog: &'a [Medication]) -> Self {
        Self::with_tokenizer(catalog, Tokenizer::new())
    }

    /// Create a matcher with a custom symptom tokenizer. Allergy text always uses
    /// [`Tokenizer::for_allergies`].
    pub fn with_tokenizer(catalog: &'a [Medication], tokenizer: Tokenizer) -> Self {
        Self {
            catalog,
            tokenizer,
            allergy_tokenizer: Tokenizer::for_allergies(),
        }
    }

    /// Recommend medications for a recorded triage, using its owner's allergies.
    pub fn recommend_for(&self, triage: &Triage, patient: &Patient) -> Recommendations {
        self.recommend(&triage.symptoms, &patient.allergies)
    }

    /// Rank medications whose indications overlap `symptoms`.
    ///
    /// Medications whose allergy tags share a token with `patient_allergies` are never
    /// returned. Results are ordered by score descending, then medication ID ascending.
    pub fn recommend(&self, symptoms: &str, patient_allergies: &str) -> Recommendations {
        let symptom_tokens = self.tokenizer.tokenize(symptoms);
        if symptom_tokens.is_empty() || self.catalog.is_empty() {
            return Recommendations::default();
        }

        let allergy_tokens = self.allergy_tokenizer.tokenize(patient_allergies);

        let mut ranked: Vec<Recommendation> = self
            .catalog
            .iter()
            .filter(|med| !self.conflicts_with_allergies(med, &allergy_tokens))
            .filter_map(|med| self.score(med, &symptom_tokens))
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.medication_id.cmp(&b.medication_id))
        });

        tracing::debug!(
            catalog_size = self.catalog.len(),
            matches = ranked.len(),
            "medication matching complete"
        );

        Recommendations(ranked)
    }

    /// Whether any allergy tag of `med` appears in the patient's allergy tokens.
    fn conflicts_with_allergies(&self, med: &Medication, allergy_tokens: &TokenSet) -> bool {
        if allergy_tokens.is_empty() {
            return false;
        }
        let conflict = self
            .allergy_tokenizer
            .tokenize(&med.allergy_tags)
            .iter()
            .any(|tag| allergy_tokens.contains(tag));
        if conflict {
            tracing::debug!(medication_id = med.id, "excluded by allergy match");
        }
        conflict
    }

    /// Score one medication; `None` when no indication matches.
    fn score(&self, med: &Medication, symptom_tokens: &TokenSet) -> Option<Recommendation> {
        let matched_terms: Vec<String> = self
            .tokenizer
            .tokenize(&med.indications)
            .intersection(symptom_tokens)
            .cloned()
            .collect();

        if matched_terms.is_empty() {
            return None;
        }

        Some(Recommendation {
            medication_id: med.id,
            name: med.name.clone(),
            score: matched_terms.len() as u32,
            matched_terms,
            contraindications: med.contraindications.clone(),
            notes: med.notes.clone(),
        })
    }
}

/// Ranked recommendations. Iterate as many times as needed via [`iter`](Self::iter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendations(Vec<Recommendation>);

impl Recommendations {
    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Medication IDs in rank order.
    pub fn medication_ids(&self) -> Vec<i64> {
        self.0.iter().map(|r| r.medication_id).collect()
    }

    pub fn into_vec(self) -> Vec<Recommendation> {
        self.0
    }
}

impl IntoIterator for Recommendations {
    type Item = Recommendation;
    type IntoIter = std::vec::IntoIter<Recommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'r> IntoIterator for &'r Recommendations {
    type Item = &'r Recommendation;
    type IntoIter = std::slice::Iter<'r, Recommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
