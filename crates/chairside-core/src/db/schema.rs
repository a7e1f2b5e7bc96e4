//! SQLite schema definition.

/// Complete database schema for chairside.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients (the aggregate: nested billing arrays stored as JSON text and
-- replaced wholesale inside a transaction)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT,
    email TEXT,
    address TEXT,
    date_of_birth TEXT,
    medical_notes TEXT,
    allergies TEXT,
    assigned_treatments TEXT NOT NULL DEFAULT '[]', -- JSON array of AssignedTreatment
    discounts TEXT NOT NULL DEFAULT '[]',           -- JSON array of Discount
    payments TEXT NOT NULL DEFAULT '[]',            -- JSON array of Payment
    files TEXT NOT NULL DEFAULT '[]',               -- JSON array of PatientFile
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- FTS5 virtual table for patient lookup at the front desk
CREATE VIRTUAL TABLE IF NOT EXISTS patients_fts USING fts5(
    name,
    phone,
    content='patients',
    content_rowid='rowid'
);

-- Triggers to keep FTS5 in sync with main table
CREATE TRIGGER IF NOT EXISTS patients_ai AFTER INSERT ON patients BEGIN
    INSERT INTO patients_fts(rowid, name, phone)
    VALUES (new.rowid, new.name, new.phone);
END;

CREATE TRIGGER IF NOT EXISTS patients_ad AFTER DELETE ON patients BEGIN
    INSERT INTO patients_fts(patients_fts, rowid, name, phone)
    VALUES ('delete', old.rowid, old.name, old.phone);
END;

CREATE TRIGGER IF NOT EXISTS patients_au AFTER UPDATE ON patients BEGIN
    INSERT INTO patients_fts(patients_fts, rowid, name, phone)
    VALUES ('delete', old.rowid, old.name, old.phone);
    INSERT INTO patients_fts(rowid, name, phone)
    VALUES (new.rowid, new.name, new.phone);
END;

-- ============================================================================
-- Treatment Catalog (clinic price list)
-- ============================================================================

CREATE TABLE IF NOT EXISTS treatment_catalog (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    cost REAL NOT NULL CHECK (cost >= 0),
    multiply_by_tooth INTEGER NOT NULL DEFAULT 0,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_catalog_name ON treatment_catalog(name);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id),
    dentist_id TEXT NOT NULL,
    scheduled_at TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL DEFAULT 30,
    status TEXT NOT NULL DEFAULT 'scheduled',  -- scheduled, confirmed, completed, cancelled, no_show
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
CREATE INDEX IF NOT EXISTS idx_appointments_scheduled ON appointments(scheduled_at);
CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status);

-- ============================================================================
-- Staff Roster
-- ============================================================================

CREATE TABLE IF NOT EXISTS staff (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL,  -- dentist, hygienist, assistant, receptionist, admin
    specialty TEXT,
    phone TEXT,
    email TEXT,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_staff_role ON staff(role);

-- ============================================================================
-- Inventory
-- ============================================================================

CREATE TABLE IF NOT EXISTS inventory (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0,
    unit TEXT NOT NULL,
    reorder_level INTEGER NOT NULL DEFAULT 0,
    unit_cost REAL NOT NULL DEFAULT 0,
    supplier TEXT,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_inventory_name ON inventory(name);

-- ============================================================================
-- Clinic Settings (single row, updated atomically)
-- ============================================================================

CREATE TABLE IF NOT EXISTS clinic_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    clinic_name TEXT NOT NULL DEFAULT '',
    opd_charge REAL NOT NULL DEFAULT 0 CHECK (opd_charge >= 0),
    currency TEXT NOT NULL DEFAULT 'Rs',
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Initialize with default settings
INSERT OR IGNORE INTO clinic_settings (id, clinic_name, opd_charge, currency)
VALUES (1, '', 0, 'Rs');
"#;
