//! Patient aggregate: demographics plus the nested billing arrays.

use serde::{Deserialize, Serialize};

use super::billing::{Discount, Payment};
use super::treatment::AssignedTreatment;

/// Kind of uploaded patient file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileKind {
    Xray,
    Photo,
    Document,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Xray => "Xray",
            FileKind::Photo => "Photo",
            FileKind::Document => "Document",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Xray" => Some(FileKind::Xray),
            "Photo" => Some(FileKind::Photo),
            "Document" => Some(FileKind::Document),
            _ => None,
        }
    }
}

/// An uploaded exam/X-ray attachment (metadata only; the blob lives in
/// external storage).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientFile {
    /// Unique file id
    pub id: String,
    /// Display label
    pub label: String,
    /// Storage path or URL
    pub path: String,
    /// File kind
    pub kind: FileKind,
    /// Upload timestamp (display lists are sorted descending on this)
    pub date_added: String,
}

impl PatientFile {
    pub fn new(label: String, path: String, kind: FileKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            label,
            path,
            kind,
            date_added: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A patient record. The aggregate is the unit of storage and transactional
/// update: the nested arrays are only ever replaced wholesale, never mutated
/// element-wise in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique patient id
    pub id: String,
    /// Patient name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Date of birth (ISO date)
    pub date_of_birth: Option<String>,
    /// Relevant medical history
    pub medical_notes: Option<String>,
    /// Known allergies
    pub allergies: Option<String>,
    /// Billable procedure lines, sorted descending by `date_added`
    pub assigned_treatments: Vec<AssignedTreatment>,
    /// Overall discounts
    pub discounts: Vec<Discount>,
    /// Payments received
    pub payments: Vec<Payment>,
    /// Uploaded exams/X-rays, sorted descending by `date_added`
    pub files: Vec<PatientFile>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone: None,
            email: None,
            address: None,
            date_of_birth: None,
            medical_notes: None,
            allergies: None,
            assigned_treatments: Vec::new(),
            discounts: Vec::new(),
            payments: Vec::new(),
            files: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Restore the ordering invariant: treatments and files descending by
    /// `date_added`. Runs after every array mutation.
    pub fn sort_clinical_lists(&mut self) {
        self.assigned_treatments
            .sort_by(|a, b| b.date_added.cmp(&a.date_added));
        self.files.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    }

    /// Whether the patient has any billable activity at all.
    pub fn has_billing_activity(&self) -> bool {
        !self.assigned_treatments.is_empty()
            || !self.discounts.is_empty()
            || !self.payments.is_empty()
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
