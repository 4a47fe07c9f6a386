//! Free-text tokenizer for symptoms, indications and allergy lists.
//!
//! Handles:
//! - Splitting on anything that is not an alphabetic character
//! - Lowercasing
//! - Dropping short connectives ("de", "e", "a") and a few longer function words
//!
//! No stemming, synonyms or accent folding: "cabeça" and "cabeca" are different tokens.
//!
//! Allergy lists and allergy tags use [`Tokenizer::for_allergies`] instead: two-letter
//! names survive and only connectives are dropped, so a short allergen or one that looks
//! like a symptom stopword still triggers exclusion.

use std::collections::{BTreeSet, HashSet};

/// Ordered set of normalized tokens.
pub type TokenSet = BTreeSet<String>;

/// Tokens shorter than this are discarded.
pub const MIN_TOKEN_LEN: usize = 3;

/// Function words that survive the length cut but carry no clinical meaning.
const DEFAULT_STOPWORDS: &[&str] = &[
    // Portuguese
    "com", "sem", "para", "por", "uma", "uns", "umas", "que", "das", "dos", "nas", "nos",
    "pelo", "pela", "muito", "muita", "estou", "tenho",
    // English
    "the", "and", "with", "for", "from", "have",
];

/// Shortest allergy token kept.
pub const MIN_ALLERGEN_LEN: usize = 2;

/// Connectives dropped from allergy text.
const ALLERGY_STOPWORDS: &[&str] = &[
    "de", "da", "do", "das", "dos", "em", "no", "na", "ou", "um",
    "of", "to", "in", "or", "and",
];

/// Tokenize with the default configuration.
pub fn tokenize(text: &str) -> TokenSet {
    Tokenizer::default().tokenize(text)
}

/// Tokenizer for free-text clinical fields.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_len: usize,
    stopwords: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the default length cut and stopwords.
    pub fn new() -> Self {
        Self {
            min_len: MIN_TOKEN_LEN,
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Tokenizer for allergy lists and medication allergy tags.
    pub fn for_allergies() -> Self {
        Self {
            min_len: MIN_ALLERGEN_LEN,
            stopwords: ALLERGY_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Split `text` into a set of lowercase alphabetic tokens.
    pub fn tokenize(&self, text: &str) -> TokenSet {
        text.split(|c: char| !c.is_alphabetic())
            .filter(|raw| !raw.is_empty())
            .map(str::to_lowercase)
            .filter(|token| token.chars().count() >= self.min_len)
            .filter(|token| !self.stopwords.contains(token))
            .collect()
    }

    /// Add a custom stopword.
    pub fn add_stopword(&mut self, word: &str) {
        self.stopwords.insert(word.to_lowercase());
    }

    /// Override the minimum token length.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}
