//! SQLite schema definition.

/// Complete database schema for medtriage.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL DEFAULT '',
    allergies TEXT NOT NULL DEFAULT '',          -- free text, tokenized at match time
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Medication Catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS medications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    indications TEXT NOT NULL DEFAULT '',
    contraindications TEXT NOT NULL DEFAULT '',
    allergy_tags TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medications_name ON medications(name);

-- ============================================================================
-- Triages (Immutable after creation)
-- ============================================================================

CREATE TABLE IF NOT EXISTS triages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    symptoms TEXT NOT NULL CHECK (length(trim(symptoms)) > 0),
    status TEXT NOT NULL DEFAULT 'pending',      -- pending, reviewed
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_triages_patient ON triages(patient_id);

CREATE TRIGGER IF NOT EXISTS triages_immutable BEFORE UPDATE OF patient_id, symptoms, created_at ON triages
BEGIN
    SELECT RAISE(ABORT, 'Triage records are immutable');
END;
"#;
