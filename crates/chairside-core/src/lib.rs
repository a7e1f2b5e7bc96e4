//! Chairside Core Library
//!
//! Local-first dental clinic administration: patient records, appointment
//! book, staff roster, inventory, and the billing ledger.
//!
//! # Architecture
//!
//! ```text
//! UI form input
//!      │
//!      ▼
//! [SESSION: draft → validate → commit]
//!      │
//!      ▼
//! PatientPatch (whole-array replacement)
//!      │
//!      ▼
//! ┌────────────────────────────────┐
//! │  SQLite patient aggregate      │
//! │  (nested arrays as JSON text)  │
//! └───────────────┬────────────────┘
//!                 │ fetch snapshot
//!                 ▼
//!         Ledger Calculator
//!   (pure: totals + payment replay)
//!                 │
//!         ┌───────┴───────┐
//!         ▼               ▼
//!      Invoice       Income Report
//! ```
//!
//! # Core Principle
//!
//! **The ledger is derived, never stored.** Totals and running balances are
//! recomputed from the patient snapshot on every read; only the inputs
//! (lines, discounts, payments) persist.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer with FTS5 patient search
//! - [`models`]: Domain types (Patient, AssignedTreatment, Appointment, etc.)
//! - [`ledger`]: Billing ledger calculator (costing + payment replay)
//! - [`session`]: Draft/commit edit sessions and the patient patch reducer
//! - [`export`]: Invoice and income report export

pub mod db;
pub mod export;
pub mod ledger;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use db::Database;
pub use ledger::{LedgerEntry, LedgerSummary, PatientLedger};
pub use models::{
    Appointment, AppointmentStatus, AssignedTreatment, ClinicSettings, Discount, DiscountKind,
    FileKind, InventoryItem, Patient, PatientFile, Payment, PaymentMethod, StaffMember, StaffRole,
    TreatmentCatalogItem,
};
pub use session::{DiscountDraft, PatientPatch, PaymentDraft, TreatmentDraft};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ChairsideError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for ChairsideError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => ChairsideError::NotFound(what),
            other => ChairsideError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ChairsideError {
    fn from(e: serde_json::Error) -> Self {
        ChairsideError::SerializationError(e.to_string())
    }
}

impl From<session::DraftError> for ChairsideError {
    fn from(e: session::DraftError) -> Self {
        ChairsideError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ChairsideError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ChairsideError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_discount_kind(s: &str) -> Result<DiscountKind, ChairsideError> {
    DiscountKind::parse(s)
        .ok_or_else(|| ChairsideError::InvalidInput(format!("Unknown discount kind: {}", s)))
}

fn parse_payment_method(s: &str) -> Result<PaymentMethod, ChairsideError> {
    PaymentMethod::parse(s)
        .ok_or_else(|| ChairsideError::InvalidInput(format!("Unknown payment method: {}", s)))
}

fn parse_appointment_status(s: &str) -> Result<AppointmentStatus, ChairsideError> {
    AppointmentStatus::parse(s)
        .ok_or_else(|| ChairsideError::InvalidInput(format!("Unknown appointment status: {}", s)))
}

fn parse_staff_role(s: &str) -> Result<StaffRole, ChairsideError> {
    StaffRole::parse(s)
        .ok_or_else(|| ChairsideError::InvalidInput(format!("Unknown staff role: {}", s)))
}

fn parse_file_kind(s: &str) -> Result<FileKind, ChairsideError> {
    FileKind::parse(s)
        .ok_or_else(|| ChairsideError::InvalidInput(format!("Unknown file kind: {}", s)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<ClinicCore>, ChairsideError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(ClinicCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<ClinicCore>, ChairsideError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(ClinicCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient.
    pub fn create_patient(&self, name: String) -> Result<FfiPatient, ChairsideError> {
        let db = self.db.lock()?;
        let patient = Patient::new(name);
        db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, patient_id: String) -> Result<FfiPatient, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(&patient_id)?.into())
    }

    /// List all patients, most recently updated first.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?.into_iter().map(|p| p.into()).collect())
    }

    /// Search patients by name or phone.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, ChairsideError> {
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Update a patient's demographic details. Billing arrays are managed
    /// through the dedicated operations below, not here.
    pub fn update_patient_details(
        &self,
        details: FfiPatientDetails,
    ) -> Result<FfiPatient, ChairsideError> {
        let db = self.db.lock()?;
        let mut patient = db.get_patient(&details.patient_id)?;
        patient.name = details.name;
        patient.phone = details.phone;
        patient.email = details.email;
        patient.address = details.address;
        patient.date_of_birth = details.date_of_birth;
        patient.medical_notes = details.medical_notes;
        patient.allergies = details.allergies;
        db.update_patient(&patient)?;
        Ok(db.get_patient(&patient.id)?.into())
    }

    /// Delete a patient and their appointments.
    pub fn delete_patient(&self, patient_id: String) -> Result<(), ChairsideError> {
        let mut db = self.db.lock()?;
        db.delete_patient(&patient_id)?;
        Ok(())
    }

    // =========================================================================
    // Treatment Line Operations
    // =========================================================================

    /// Assign a treatment from the catalog to a patient.
    pub fn assign_treatment(
        &self,
        patient_id: String,
        input: FfiTreatmentInput,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let item = db.get_catalog_item(&input.catalog_id)?;
        let line = apply_treatment_input(TreatmentDraft::from_catalog(&item), input)?.commit()?;
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::add_treatment(&patient, line);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    /// Edit an assigned treatment line. Its id and date stay fixed; the
    /// discount amount is re-resolved against the new values.
    pub fn edit_treatment(
        &self,
        patient_id: String,
        line_id: String,
        input: FfiTreatmentInput,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let existing = patient
            .assigned_treatments
            .iter()
            .find(|t| t.id == line_id)
            .ok_or_else(|| ChairsideError::NotFound(format!("treatment line {}", line_id)))?;

        let line = apply_treatment_input(TreatmentDraft::edit(existing), input)?.commit()?;
        let patch = PatientPatch::replace_treatment(&patient, line);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    /// Remove an assigned treatment line.
    pub fn remove_treatment(
        &self,
        patient_id: String,
        line_id: String,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::remove_treatment(&patient, &line_id);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    // =========================================================================
    // Discount and Payment Operations
    // =========================================================================

    /// Record an overall discount. Percentage discounts resolve against the
    /// sum of raw (unmultiplied) line costs at this moment.
    pub fn add_discount(
        &self,
        patient_id: String,
        reason: String,
        kind: String,
        value: f64,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let discount = DiscountDraft::new(reason, parse_discount_kind(&kind)?, value)
            .commit(&patient.assigned_treatments)?;
        let patch = PatientPatch::add_discount(&patient, discount);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    /// Remove an overall discount.
    pub fn remove_discount(
        &self,
        patient_id: String,
        discount_id: String,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::remove_discount(&patient, &discount_id);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    /// Record a payment against the patient's balance.
    pub fn record_payment(
        &self,
        patient_id: String,
        amount: f64,
        method: String,
        date: String,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let payment = PaymentDraft::new(amount, parse_payment_method(&method)?, date).commit()?;
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::add_payment(&patient, payment);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    /// Remove a payment by id.
    pub fn remove_payment(
        &self,
        patient_id: String,
        payment_id: String,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::remove_payment(&patient, &payment_id);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    // =========================================================================
    // Patient File Operations
    // =========================================================================

    /// Attach a file (X-ray, photo, document) to a patient.
    pub fn add_patient_file(
        &self,
        patient_id: String,
        label: String,
        path: String,
        kind: String,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let file = PatientFile::new(label, path, parse_file_kind(&kind)?);
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::add_file(&patient, file);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    /// Remove a file attachment.
    pub fn remove_patient_file(
        &self,
        patient_id: String,
        file_id: String,
    ) -> Result<FfiPatient, ChairsideError> {
        let mut db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let patch = PatientPatch::remove_file(&patient, &file_id);
        Ok(db.apply_patient_patch(&patient_id, patch)?.into())
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Compute the patient's ledger: totals plus payment history with
    /// running balances, newest first.
    pub fn get_patient_ledger(
        &self,
        patient_id: String,
    ) -> Result<FfiPatientLedger, ChairsideError> {
        let db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let opd_charge = db.opd_charge()?;
        Ok(ledger::for_patient(&patient, opd_charge).into())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Book an appointment.
    pub fn book_appointment(
        &self,
        patient_id: String,
        dentist_id: String,
        scheduled_at: String,
        duration_minutes: Option<u32>,
        notes: Option<String>,
    ) -> Result<FfiAppointment, ChairsideError> {
        let db = self.db.lock()?;
        let mut appointment = Appointment::new(patient_id, dentist_id, scheduled_at);
        if let Some(minutes) = duration_minutes {
            appointment.duration_minutes = minutes;
        }
        appointment.notes = notes;
        db.insert_appointment(&appointment)?;
        Ok(appointment.into())
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, appointment_id: String) -> Result<FfiAppointment, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.get_appointment(&appointment_id)?.into())
    }

    /// List a patient's appointments, soonest first.
    pub fn list_appointments_for_patient(
        &self,
        patient_id: String,
    ) -> Result<Vec<FfiAppointment>, ChairsideError> {
        let db = self.db.lock()?;
        let appointments = db.list_appointments_for_patient(&patient_id)?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// List appointments in a time window (inclusive RFC 3339 bounds).
    pub fn list_appointments_between(
        &self,
        from: String,
        to: String,
    ) -> Result<Vec<FfiAppointment>, ChairsideError> {
        let db = self.db.lock()?;
        let appointments = db.list_appointments_between(&from, &to)?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Move an appointment through its lifecycle.
    pub fn set_appointment_status(
        &self,
        appointment_id: String,
        status: String,
    ) -> Result<FfiAppointment, ChairsideError> {
        let db = self.db.lock()?;
        db.update_appointment_status(&appointment_id, parse_appointment_status(&status)?)?;
        Ok(db.get_appointment(&appointment_id)?.into())
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, appointment_id: String) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        db.delete_appointment(&appointment_id)?;
        Ok(())
    }

    // =========================================================================
    // Treatment Catalog Operations
    // =========================================================================

    /// Add or update a price-list entry.
    pub fn upsert_catalog_item(&self, item: FfiCatalogItem) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        db.upsert_catalog_item(&item.into())?;
        Ok(())
    }

    /// Get a price-list entry by id.
    pub fn get_catalog_item(&self, item_id: String) -> Result<FfiCatalogItem, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.get_catalog_item(&item_id)?.into())
    }

    /// List the price list. `active_only` hides retired treatments.
    pub fn list_catalog(&self, active_only: bool) -> Result<Vec<FfiCatalogItem>, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.list_catalog(active_only)?.into_iter().map(|i| i.into()).collect())
    }

    /// Retire a treatment without deleting it.
    pub fn deactivate_catalog_item(&self, item_id: String) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        db.deactivate_catalog_item(&item_id)?;
        Ok(())
    }

    // =========================================================================
    // Staff Roster Operations
    // =========================================================================

    /// Add a staff member.
    pub fn add_staff(&self, name: String, role: String) -> Result<FfiStaffMember, ChairsideError> {
        let db = self.db.lock()?;
        let member = StaffMember::new(name, parse_staff_role(&role)?);
        db.insert_staff(&member)?;
        Ok(member.into())
    }

    /// Get a staff member by id.
    pub fn get_staff(&self, staff_id: String) -> Result<FfiStaffMember, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.get_staff(&staff_id)?.into())
    }

    /// List staff members.
    pub fn list_staff(&self, active_only: bool) -> Result<Vec<FfiStaffMember>, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.list_staff(active_only)?.into_iter().map(|m| m.into()).collect())
    }

    /// Update a staff member's details.
    pub fn update_staff(&self, member: FfiStaffMember) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        let member = StaffMember {
            id: member.id,
            name: member.name,
            role: parse_staff_role(&member.role)?,
            specialty: member.specialty,
            phone: member.phone,
            email: member.email,
            active: member.active,
            created_at: member.created_at,
        };
        db.update_staff(&member)?;
        Ok(())
    }

    /// Deactivate a staff member.
    pub fn deactivate_staff(&self, staff_id: String) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        db.deactivate_staff(&staff_id)?;
        Ok(())
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    /// Add or update an inventory item.
    pub fn upsert_inventory_item(&self, item: FfiInventoryItem) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        db.upsert_inventory_item(&item.into())?;
        Ok(())
    }

    /// Get an inventory item by id.
    pub fn get_inventory_item(&self, item_id: String) -> Result<FfiInventoryItem, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.get_inventory_item(&item_id)?.into())
    }

    /// List all inventory items.
    pub fn list_inventory(&self) -> Result<Vec<FfiInventoryItem>, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.list_inventory()?.into_iter().map(|i| i.into()).collect())
    }

    /// List items at or below their reorder level.
    pub fn list_low_stock(&self) -> Result<Vec<FfiInventoryItem>, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.list_low_stock()?.into_iter().map(|i| i.into()).collect())
    }

    /// Adjust stock by a delta (negative = consumption).
    pub fn adjust_inventory_quantity(
        &self,
        item_id: String,
        delta: i64,
    ) -> Result<FfiInventoryItem, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.adjust_inventory_quantity(&item_id, delta)?.into())
    }

    /// Delete an inventory item.
    pub fn delete_inventory_item(&self, item_id: String) -> Result<(), ChairsideError> {
        let db = self.db.lock()?;
        db.delete_inventory_item(&item_id)?;
        Ok(())
    }

    // =========================================================================
    // Settings Operations
    // =========================================================================

    /// Read the clinic settings.
    pub fn get_settings(&self) -> Result<FfiClinicSettings, ChairsideError> {
        let db = self.db.lock()?;
        Ok(db.get_settings()?.into())
    }

    /// Replace the clinic settings. The OPD charge must be non-negative.
    pub fn update_settings(
        &self,
        clinic_name: String,
        opd_charge: f64,
        currency: String,
    ) -> Result<FfiClinicSettings, ChairsideError> {
        if !(opd_charge >= 0.0 && opd_charge.is_finite()) {
            return Err(ChairsideError::InvalidInput(
                "OPD charge must be a non-negative number".to_string(),
            ));
        }
        let db = self.db.lock()?;
        let mut settings = db.get_settings()?;
        settings.clinic_name = clinic_name;
        settings.opd_charge = opd_charge;
        settings.currency = currency;
        db.update_settings(&settings)?;
        Ok(db.get_settings()?.into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export a patient's invoice as JSON.
    pub fn export_invoice_json(&self, patient_id: String) -> Result<String, ChairsideError> {
        let db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let settings = db.get_settings()?;
        Ok(export::Invoice::for_patient(&patient, &settings).to_json()?)
    }

    /// Export a patient's invoice as CSV.
    pub fn export_invoice_csv(&self, patient_id: String) -> Result<String, ChairsideError> {
        let db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let settings = db.get_settings()?;
        Ok(export::Invoice::for_patient(&patient, &settings).to_csv())
    }

    /// Income report for an inclusive "YYYY-MM-DD" date window, as JSON.
    pub fn income_report_json(&self, from: String, to: String) -> Result<String, ChairsideError> {
        let db = self.db.lock()?;
        let report = export::IncomeReporter::new(&db).report_between(&from, &to)?;
        Ok(report.to_json()?)
    }

    /// Income report for an inclusive "YYYY-MM-DD" date window, as CSV.
    pub fn income_report_csv(&self, from: String, to: String) -> Result<String, ChairsideError> {
        let db = self.db.lock()?;
        let report = export::IncomeReporter::new(&db).report_between(&from, &to)?;
        Ok(report.to_csv())
    }
}

fn apply_treatment_input(
    mut draft: TreatmentDraft,
    input: FfiTreatmentInput,
) -> Result<TreatmentDraft, ChairsideError> {
    if let Some(tooth) = input.tooth {
        draft = draft.tooth(&tooth);
    }
    if let Some(multiply) = input.multiply_cost {
        draft = draft.multiply_cost(multiply);
    }
    if let Some(cost) = input.cost {
        draft.cost = cost;
    }
    if let (Some(kind), Some(value)) = (input.discount_kind.as_deref(), input.discount_value) {
        draft = draft.discount(parse_discount_kind(kind)?, value);
    }
    Ok(draft)
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient aggregate.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub medical_notes: Option<String>,
    pub allergies: Option<String>,
    pub assigned_treatments: Vec<FfiAssignedTreatment>,
    pub discounts: Vec<FfiDiscount>,
    pub payments: Vec<FfiPayment>,
    pub files: Vec<FfiPatientFile>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            phone: patient.phone,
            email: patient.email,
            address: patient.address,
            date_of_birth: patient.date_of_birth,
            medical_notes: patient.medical_notes,
            allergies: patient.allergies,
            assigned_treatments: patient
                .assigned_treatments
                .into_iter()
                .map(|t| t.into())
                .collect(),
            discounts: patient.discounts.into_iter().map(|d| d.into()).collect(),
            payments: patient.payments.into_iter().map(|p| p.into()).collect(),
            files: patient.files.into_iter().map(|f| f.into()).collect(),
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

/// Demographic fields for [`ClinicCore::update_patient_details`].
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientDetails {
    pub patient_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub medical_notes: Option<String>,
    pub allergies: Option<String>,
}

/// FFI-safe assigned treatment line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssignedTreatment {
    pub id: String,
    pub treatment_id: String,
    pub name: String,
    pub tooth: Option<String>,
    pub cost: f64,
    pub effective_cost: f64,
    pub multiply_cost: bool,
    pub discount_kind: Option<String>,
    pub discount_value: Option<f64>,
    pub discount_amount: f64,
    pub date_added: String,
}

impl From<AssignedTreatment> for FfiAssignedTreatment {
    fn from(line: AssignedTreatment) -> Self {
        let effective_cost = line.effective_cost();
        Self {
            id: line.id,
            treatment_id: line.treatment_id,
            name: line.name,
            tooth: line.tooth,
            cost: line.cost,
            effective_cost,
            multiply_cost: line.multiply_cost,
            discount_kind: line.discount_kind.map(|k| k.as_str().to_string()),
            discount_value: line.discount_value,
            discount_amount: line.discount_amount,
            date_added: line.date_added,
        }
    }
}

/// Form input for assigning or editing a treatment line. Absent fields keep
/// the catalog/current values.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatmentInput {
    pub catalog_id: String,
    pub tooth: Option<String>,
    pub cost: Option<f64>,
    pub multiply_cost: Option<bool>,
    pub discount_kind: Option<String>,
    pub discount_value: Option<f64>,
}

/// FFI-safe overall discount.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiscount {
    pub id: String,
    pub reason: String,
    pub kind: String,
    pub value: f64,
    pub amount: f64,
}

impl From<Discount> for FfiDiscount {
    fn from(discount: Discount) -> Self {
        Self {
            id: discount.id,
            reason: discount.reason,
            kind: discount.kind.as_str().to_string(),
            value: discount.value,
            amount: discount.amount,
        }
    }
}

/// FFI-safe payment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPayment {
    pub id: String,
    pub amount: f64,
    pub method: String,
    pub date: String,
    pub date_added: String,
}

impl From<Payment> for FfiPayment {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            amount: payment.amount,
            method: payment.method.as_str().to_string(),
            date: payment.date,
            date_added: payment.date_added,
        }
    }
}

/// FFI-safe patient file attachment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientFile {
    pub id: String,
    pub label: String,
    pub path: String,
    pub kind: String,
    pub date_added: String,
}

impl From<PatientFile> for FfiPatientFile {
    fn from(file: PatientFile) -> Self {
        Self {
            id: file.id,
            label: file.label,
            path: file.path,
            kind: file.kind.as_str().to_string(),
            date_added: file.date_added,
        }
    }
}

/// FFI-safe ledger summary with the display status resolved.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLedgerSummary {
    pub treatments_cost: f64,
    pub gross_total: f64,
    pub per_treatment_discount: f64,
    pub overall_discount: f64,
    pub total_discount: f64,
    pub total_paid: f64,
    pub balance_due: f64,
    /// "Fully Paid" or "Due"; presentation only, the balance stays unclamped
    pub display_status: String,
}

impl From<LedgerSummary> for FfiLedgerSummary {
    fn from(summary: LedgerSummary) -> Self {
        let display_status = if summary.gross_total > 0.0 && summary.balance_due <= 0.0 {
            "Fully Paid".to_string()
        } else {
            "Due".to_string()
        };
        Self {
            treatments_cost: summary.treatments_cost,
            gross_total: summary.gross_total,
            per_treatment_discount: summary.per_treatment_discount,
            overall_discount: summary.overall_discount,
            total_discount: summary.total_discount,
            total_paid: summary.total_paid,
            balance_due: summary.balance_due,
            display_status,
        }
    }
}

/// FFI-safe annotated payment history entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLedgerEntry {
    pub payment: FfiPayment,
    pub balance_after: f64,
}

impl From<LedgerEntry> for FfiLedgerEntry {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            payment: entry.payment.into(),
            balance_after: entry.balance_after,
        }
    }
}

/// FFI-safe full patient ledger.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientLedger {
    pub summary: FfiLedgerSummary,
    pub entries: Vec<FfiLedgerEntry>,
}

impl From<PatientLedger> for FfiPatientLedger {
    fn from(ledger: PatientLedger) -> Self {
        Self {
            summary: ledger.summary.into(),
            entries: ledger.entries.into_iter().map(|e| e.into()).collect(),
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_id: String,
    pub dentist_id: String,
    pub scheduled_at: String,
    pub duration_minutes: u32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            dentist_id: appointment.dentist_id,
            scheduled_at: appointment.scheduled_at,
            duration_minutes: appointment.duration_minutes,
            status: appointment.status.as_str().to_string(),
            notes: appointment.notes,
            created_at: appointment.created_at,
        }
    }
}

/// FFI-safe treatment catalog entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCatalogItem {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub multiply_by_tooth: bool,
    pub active: bool,
}

impl From<TreatmentCatalogItem> for FfiCatalogItem {
    fn from(item: TreatmentCatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            cost: item.cost,
            multiply_by_tooth: item.multiply_by_tooth,
            active: item.active,
        }
    }
}

impl From<FfiCatalogItem> for TreatmentCatalogItem {
    fn from(item: FfiCatalogItem) -> Self {
        TreatmentCatalogItem {
            id: item.id,
            name: item.name,
            cost: item.cost,
            multiply_by_tooth: item.multiply_by_tooth,
            active: item.active,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// FFI-safe staff member.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: String,
}

impl From<StaffMember> for FfiStaffMember {
    fn from(member: StaffMember) -> Self {
        Self {
            id: member.id,
            name: member.name,
            role: member.role.as_str().to_string(),
            specialty: member.specialty,
            phone: member.phone,
            email: member.email,
            active: member.active,
            created_at: member.created_at,
        }
    }
}

/// FFI-safe inventory item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub reorder_level: i64,
    pub unit_cost: f64,
    pub supplier: Option<String>,
    pub low_stock: bool,
}

impl From<InventoryItem> for FfiInventoryItem {
    fn from(item: InventoryItem) -> Self {
        let low_stock = item.is_low_stock();
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
            reorder_level: item.reorder_level,
            unit_cost: item.unit_cost,
            supplier: item.supplier,
            low_stock,
        }
    }
}

impl From<FfiInventoryItem> for InventoryItem {
    fn from(item: FfiInventoryItem) -> Self {
        InventoryItem {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
            reorder_level: item.reorder_level,
            unit_cost: item.unit_cost,
            supplier: item.supplier,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// FFI-safe clinic settings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicSettings {
    pub clinic_name: String,
    pub opd_charge: f64,
    pub currency: String,
    pub updated_at: String,
}

impl From<ClinicSettings> for FfiClinicSettings {
    fn from(settings: ClinicSettings) -> Self {
        Self {
            clinic_name: settings.clinic_name,
            opd_charge: settings.opd_charge,
            currency: settings.currency,
            updated_at: settings.updated_at,
        }
    }
}
