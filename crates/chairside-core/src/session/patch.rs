//! Explicit patch type and pure reducer for the patient aggregate.
//!
//! Add = append + re-sort descending; remove = filter by id. Arrays are
//! replaced wholesale; an absent field leaves that array untouched.

use crate::models::{AssignedTreatment, Discount, Patient, PatientFile, Payment};

/// A whole-array replacement for one or more of the patient's nested lists.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub assigned_treatments: Option<Vec<AssignedTreatment>>,
    pub discounts: Option<Vec<Discount>>,
    pub payments: Option<Vec<Payment>>,
    pub files: Option<Vec<PatientFile>>,
}

impl PatientPatch {
    pub fn is_empty(&self) -> bool {
        self.assigned_treatments.is_none()
            && self.discounts.is_none()
            && self.payments.is_none()
            && self.files.is_none()
    }

    pub fn add_treatment(patient: &Patient, line: AssignedTreatment) -> Self {
        let mut lines = patient.assigned_treatments.clone();
        lines.push(line);
        Self {
            assigned_treatments: Some(lines),
            ..Default::default()
        }
    }

    /// Replace an edited line, matched by id.
    pub fn replace_treatment(patient: &Patient, line: AssignedTreatment) -> Self {
        let lines = patient
            .assigned_treatments
            .iter()
            .map(|t| if t.id == line.id { line.clone() } else { t.clone() })
            .collect();
        Self {
            assigned_treatments: Some(lines),
            ..Default::default()
        }
    }

    pub fn remove_treatment(patient: &Patient, line_id: &str) -> Self {
        let lines = patient
            .assigned_treatments
            .iter()
            .filter(|t| t.id != line_id)
            .cloned()
            .collect();
        Self {
            assigned_treatments: Some(lines),
            ..Default::default()
        }
    }

    pub fn add_discount(patient: &Patient, discount: Discount) -> Self {
        let mut discounts = patient.discounts.clone();
        discounts.push(discount);
        Self {
            discounts: Some(discounts),
            ..Default::default()
        }
    }

    pub fn remove_discount(patient: &Patient, discount_id: &str) -> Self {
        let discounts = patient
            .discounts
            .iter()
            .filter(|d| d.id != discount_id)
            .cloned()
            .collect();
        Self {
            discounts: Some(discounts),
            ..Default::default()
        }
    }

    pub fn add_payment(patient: &Patient, payment: Payment) -> Self {
        let mut payments = patient.payments.clone();
        payments.push(payment);
        Self {
            payments: Some(payments),
            ..Default::default()
        }
    }

    pub fn remove_payment(patient: &Patient, payment_id: &str) -> Self {
        let payments = patient
            .payments
            .iter()
            .filter(|p| p.id != payment_id)
            .cloned()
            .collect();
        Self {
            payments: Some(payments),
            ..Default::default()
        }
    }

    pub fn add_file(patient: &Patient, file: PatientFile) -> Self {
        let mut files = patient.files.clone();
        files.push(file);
        Self {
            files: Some(files),
            ..Default::default()
        }
    }

    pub fn remove_file(patient: &Patient, file_id: &str) -> Self {
        let files = patient
            .files
            .iter()
            .filter(|f| f.id != file_id)
            .cloned()
            .collect();
        Self {
            files: Some(files),
            ..Default::default()
        }
    }
}

/// Pure reducer: apply the patch to a snapshot and restore the ordering
/// invariant. Timestamps are the storage layer's concern, not the reducer's.
pub fn apply(patient: &Patient, patch: PatientPatch) -> Patient {
    let mut next = patient.clone();
    if let Some(lines) = patch.assigned_treatments {
        next.assigned_treatments = lines;
    }
    if let Some(discounts) = patch.discounts {
        next.discounts = discounts;
    }
    if let Some(payments) = patch.payments {
        next.payments = payments;
    }
    if let Some(files) = patch.files {
        next.files = files;
    }
    next.sort_clinical_lists();
    next
}
