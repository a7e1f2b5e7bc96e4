//! Patient CRUD and search operations.

use super::{Database, DbError, DbResult};
use crate::models::{AssignedTreatment, Discount, Patient, PatientFile, Payment};
use crate::session::{self, PatientPatch};
use rusqlite::params;

/// Intermediate struct for deserializing patient rows.
struct PatientRow {
    id: String,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    date_of_birth: Option<String>,
    medical_notes: Option<String>,
    allergies: Option<String>,
    assigned_treatments_json: String,
    discounts_json: String,
    payments_json: String,
    files_json: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let assigned_treatments: Vec<AssignedTreatment> =
            serde_json::from_str(&row.assigned_treatments_json)?;
        let discounts: Vec<Discount> = serde_json::from_str(&row.discounts_json)?;
        let payments: Vec<Payment> = serde_json::from_str(&row.payments_json)?;
        let files: Vec<PatientFile> = serde_json::from_str(&row.files_json)?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            date_of_birth: row.date_of_birth,
            medical_notes: row.medical_notes,
            allergies: row.allergies,
            assigned_treatments,
            discounts,
            payments,
            files,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PATIENT_COLUMNS: &str = "id, name, phone, email, address, date_of_birth, medical_notes, \
     allergies, assigned_treatments, discounts, payments, files, created_at, updated_at";

fn row_to_patient(row: &rusqlite::Row) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        address: row.get(4)?,
        date_of_birth: row.get(5)?,
        medical_notes: row.get(6)?,
        allergies: row.get(7)?,
        assigned_treatments_json: row.get(8)?,
        discounts_json: row.get(9)?,
        payments_json: row.get(10)?,
        files_json: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

/// Escape special FTS5 characters in a query string.
fn escape_fts_query(query: &str) -> String {
    let cleaned: String = query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| format!("{}*", word))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO patients (id, name, phone, email, address, date_of_birth, \
             medical_notes, allergies, assigned_treatments, discounts, payments, files, \
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                patient.id,
                patient.name,
                patient.phone,
                patient.email,
                patient.address,
                patient.date_of_birth,
                patient.medical_notes,
                patient.allergies,
                serde_json::to_string(&patient.assigned_treatments)?,
                serde_json::to_string(&patient.discounts)?,
                serde_json::to_string(&patient.payments)?,
                serde_json::to_string(&patient.files)?,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> DbResult<Patient> {
        let row = self
            .conn()
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?1", PATIENT_COLUMNS),
                params![id],
                row_to_patient,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("patient {}", id))
                }
                other => DbError::Sqlite(other),
            })?;
        Patient::try_from(row)
    }

    /// List all patients, most recently updated first.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM patients ORDER BY updated_at DESC",
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map([], row_to_patient)?;
        let mut patients = Vec::new();
        for row in rows {
            patients.push(Patient::try_from(row?)?);
        }
        Ok(patients)
    }

    /// Full-text search over patient name and phone.
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let escaped = escape_fts_query(query);
        if escaped.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn().prepare(&format!(
            "SELECT {}, bm25(patients_fts) as rank
             FROM patients p
             JOIN patients_fts ON p.rowid = patients_fts.rowid
             WHERE patients_fts MATCH ?1
             ORDER BY rank
             LIMIT ?2",
            PATIENT_COLUMNS
                .split(", ")
                .map(|c| format!("p.{}", c))
                .collect::<Vec<_>>()
                .join(", ")
        ))?;

        let rows = stmt.query_map(params![escaped, limit as i64], row_to_patient)?;
        let mut patients = Vec::new();
        for row in rows {
            patients.push(Patient::try_from(row?)?);
        }
        Ok(patients)
    }

    /// Update a patient's demographic fields. Nested arrays go through
    /// [`Database::apply_patient_patch`] instead.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<()> {
        let updated = self.conn().execute(
            "UPDATE patients
             SET name = ?2, phone = ?3, email = ?4, address = ?5, date_of_birth = ?6,
                 medical_notes = ?7, allergies = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                patient.id,
                patient.name,
                patient.phone,
                patient.email,
                patient.address,
                patient.date_of_birth,
                patient.medical_notes,
                patient.allergies,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("patient {}", patient.id)));
        }
        Ok(())
    }

    /// Apply a committed patch to the patient's nested arrays, atomically.
    /// Returns the updated patient.
    pub fn apply_patient_patch(
        &mut self,
        patient_id: &str,
        patch: PatientPatch,
    ) -> DbResult<Patient> {
        let tx = self.transaction()?;

        let row = tx
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?1", PATIENT_COLUMNS),
                params![patient_id],
                row_to_patient,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("patient {}", patient_id))
                }
                other => DbError::Sqlite(other),
            })?;
        let current = Patient::try_from(row)?;

        let mut next = session::apply(&current, patch);
        next.touch();

        tx.execute(
            "UPDATE patients
             SET assigned_treatments = ?2, discounts = ?3, payments = ?4, files = ?5,
                 updated_at = ?6
             WHERE id = ?1",
            params![
                next.id,
                serde_json::to_string(&next.assigned_treatments)?,
                serde_json::to_string(&next.discounts)?,
                serde_json::to_string(&next.payments)?,
                serde_json::to_string(&next.files)?,
                next.updated_at,
            ],
        )?;

        tx.commit()?;
        Ok(next)
    }

    /// Delete a patient and their appointments.
    pub fn delete_patient(&mut self, id: &str) -> DbResult<()> {
        let tx = self.transaction()?;
        tx.execute("DELETE FROM appointments WHERE patient_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DbError::NotFound(format!("patient {}", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, TreatmentCatalogItem};
    use crate::session::{PaymentDraft, TreatmentDraft};

    fn db_with_patient(name: &str) -> (Database, Patient) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new(name.into());
        db.insert_patient(&patient).unwrap();
        (db, patient)
    }

    #[test]
    fn test_insert_and_get_roundtrip() {
        let (db, patient) = db_with_patient("Amara Perera");
        let loaded = db.get_patient(&patient.id).unwrap();
        assert_eq!(loaded, patient);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let err = db.get_patient("nope").unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_search_prefix_match() {
        let (db, patient) = db_with_patient("Amara Perera");
        let other = Patient::new("Bimal Silva".into());
        db.insert_patient(&other).unwrap();

        let results = db.search_patients("ama", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, patient.id);
    }

    #[test]
    fn test_search_by_phone() {
        let db = Database::open_in_memory().unwrap();
        let mut patient = Patient::new("Amara Perera".into());
        patient.phone = Some("0771234567".into());
        db.insert_patient(&patient).unwrap();

        let results = db.search_patients("0771", 10).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_symbols_stripped() {
        let (db, _) = db_with_patient("Amara Perera");
        // FTS operators in raw input must not break the query
        let results = db.search_patients("amara AND \"per", 10).unwrap();
        assert_eq!(results.len(), 1);

        let empty = db.search_patients("!!!", 10).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_apply_patch_persists_arrays() {
        let (mut db, patient) = db_with_patient("Amara Perera");

        let item = TreatmentCatalogItem::new("Filling".into(), 1000.0);
        let line = TreatmentDraft::from_catalog(&item).commit().unwrap();
        let patch = PatientPatch::add_treatment(&patient, line.clone());

        let updated = db.apply_patient_patch(&patient.id, patch).unwrap();
        assert_eq!(updated.assigned_treatments.len(), 1);

        let reloaded = db.get_patient(&patient.id).unwrap();
        assert_eq!(reloaded.assigned_treatments, updated.assigned_treatments);
        assert!(reloaded.updated_at >= patient.updated_at);
    }

    #[test]
    fn test_apply_patch_missing_patient() {
        let mut db = Database::open_in_memory().unwrap();
        let err = db
            .apply_patient_patch("missing", PatientPatch::default())
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_payments_survive_reload() {
        let (mut db, patient) = db_with_patient("Amara Perera");

        let payment = PaymentDraft::new(500.0, PaymentMethod::Cash, "2024-01-15".into())
            .commit()
            .unwrap();
        db.apply_patient_patch(&patient.id, PatientPatch::add_payment(&patient, payment.clone()))
            .unwrap();

        let reloaded = db.get_patient(&patient.id).unwrap();
        assert_eq!(reloaded.payments.len(), 1);
        assert_eq!(reloaded.payments[0].id, payment.id);
        assert_eq!(reloaded.payments[0].method, PaymentMethod::Cash);
    }

    #[test]
    fn test_delete_patient_removes_appointments() {
        let (mut db, patient) = db_with_patient("Amara Perera");
        let appt = crate::models::Appointment::new(
            patient.id.clone(),
            "d1".into(),
            "2024-06-01T09:00:00Z".into(),
        );
        db.insert_appointment(&appt).unwrap();

        db.delete_patient(&patient.id).unwrap();
        assert!(matches!(
            db.get_patient(&patient.id).unwrap_err(),
            DbError::NotFound(_)
        ));
        assert!(db.list_appointments_for_patient(&patient.id).unwrap().is_empty());
    }
}
