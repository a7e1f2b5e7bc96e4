//! Billing Ledger Calculator.
//!
//! Pure, stateless computation over an in-memory patient snapshot and the
//! clinic-wide OPD charge. Invoked after the record is fetched and before
//! it is rendered or totaled for an invoice; it performs no I/O and never
//! fails (upstream validation is the form layer's job, see `session`).

pub mod costing;
mod replay;

pub use replay::{build_entries, LedgerEntry};

use serde::{Deserialize, Serialize};

use crate::models::{AssignedTreatment, Discount, Patient, Payment};

/// Grand totals for a patient's account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    /// Sum of effective line costs
    pub treatments_cost: f64,
    /// OPD charge plus treatments cost
    pub gross_total: f64,
    /// Sum of resolved per-line discount amounts
    pub per_treatment_discount: f64,
    /// Sum of resolved overall discount amounts
    pub overall_discount: f64,
    /// Per-line plus overall
    pub total_discount: f64,
    /// Sum of payments received
    pub total_paid: f64,
    /// Gross minus paid minus discounts. Negative means overpayment; never
    /// clamped here — "Fully Paid" wording belongs to the display layer.
    pub balance_due: f64,
}

/// Summary plus the annotated payment history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientLedger {
    pub summary: LedgerSummary,
    pub entries: Vec<LedgerEntry>,
}

/// Compute the grand totals for one patient snapshot.
pub fn summarize(
    treatments: &[AssignedTreatment],
    discounts: &[Discount],
    payments: &[Payment],
    opd_charge: f64,
) -> LedgerSummary {
    let treatments_cost = costing::treatments_cost(treatments);
    let gross_total = opd_charge + treatments_cost;

    let per_treatment_discount: f64 = treatments.iter().map(|t| t.discount_amount).sum();
    let overall_discount: f64 = discounts.iter().map(|d| d.amount).sum();
    let total_discount = per_treatment_discount + overall_discount;

    let total_paid: f64 = payments.iter().map(|p| p.amount).sum();

    LedgerSummary {
        treatments_cost,
        gross_total,
        per_treatment_discount,
        overall_discount,
        total_discount,
        total_paid,
        balance_due: gross_total - total_paid - total_discount,
    }
}

/// Compute the full ledger view for a patient: summary plus the running
/// balance history. The replay opens at gross total minus total discount.
pub fn for_patient(patient: &Patient, opd_charge: f64) -> PatientLedger {
    let summary = summarize(
        &patient.assigned_treatments,
        &patient.discounts,
        &patient.payments,
        opd_charge,
    );
    let opening = summary.gross_total - summary.total_discount;
    let entries = build_entries(&patient.payments, opening);

    PatientLedger { summary, entries }
}
