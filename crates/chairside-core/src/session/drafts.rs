//! Per-entity drafts with a commit/cancel contract.
//!
//! A draft is the form-layer stand-in: it validates input and resolves the
//! derived fields (line discount amounts, overall discount amounts, payment
//! ids) at commit time. Cancel is dropping the draft. Data that never went
//! through a commit never reaches the calculator.

use thiserror::Error;

use crate::ledger::costing;
use crate::models::{
    AssignedTreatment, Discount, DiscountKind, Payment, PaymentMethod, TreatmentCatalogItem,
};

/// Validation errors surfaced to the form layer.
#[derive(Error, Debug, PartialEq)]
pub enum DraftError {
    #[error("Cost must be a non-negative number")]
    InvalidCost,

    #[error("Discount value must be a non-negative number")]
    InvalidDiscountValue,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type DraftResult<T> = Result<T, DraftError>;

/// Draft for assigning or editing a treatment line.
#[derive(Debug, Clone)]
pub struct TreatmentDraft {
    pub treatment_id: String,
    pub name: String,
    pub tooth: Option<String>,
    pub cost: f64,
    pub multiply_cost: bool,
    pub discount_kind: Option<DiscountKind>,
    pub discount_value: Option<f64>,
    /// Set when editing an existing line; id and date_added are preserved
    original: Option<AssignedTreatment>,
}

impl TreatmentDraft {
    /// Start a new line from a catalog entry.
    pub fn from_catalog(item: &TreatmentCatalogItem) -> Self {
        Self {
            treatment_id: item.id.clone(),
            name: item.name.clone(),
            tooth: None,
            cost: item.cost,
            multiply_cost: item.multiply_by_tooth,
            discount_kind: None,
            discount_value: None,
            original: None,
        }
    }

    /// Start an edit session over an existing line.
    pub fn edit(line: &AssignedTreatment) -> Self {
        Self {
            treatment_id: line.treatment_id.clone(),
            name: line.name.clone(),
            tooth: line.tooth.clone(),
            cost: line.cost,
            multiply_cost: line.multiply_cost,
            discount_kind: line.discount_kind,
            discount_value: line.discount_value,
            original: Some(line.clone()),
        }
    }

    pub fn tooth(mut self, tooth: &str) -> Self {
        self.tooth = Some(tooth.to_string());
        self
    }

    pub fn multiply_cost(mut self, multiply: bool) -> Self {
        self.multiply_cost = multiply;
        self
    }

    pub fn discount(mut self, kind: DiscountKind, value: f64) -> Self {
        self.discount_kind = Some(kind);
        self.discount_value = Some(value);
        self
    }

    /// Validate and produce the committed line. The derived
    /// `discount_amount` is resolved here against the effective line cost,
    /// so it can never go stale relative to cost/tooth/kind/value.
    pub fn commit(self) -> DraftResult<AssignedTreatment> {
        if !(self.cost >= 0.0 && self.cost.is_finite()) {
            return Err(DraftError::InvalidCost);
        }
        if let Some(v) = self.discount_value {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(DraftError::InvalidDiscountValue);
            }
        }

        let (id, date_added) = match &self.original {
            Some(line) => (line.id.clone(), line.date_added.clone()),
            None => (
                uuid::Uuid::new_v4().to_string(),
                chrono::Utc::now().to_rfc3339(),
            ),
        };

        let mut line = AssignedTreatment {
            id,
            treatment_id: self.treatment_id,
            name: self.name,
            tooth: self.tooth,
            cost: self.cost,
            multiply_cost: self.multiply_cost,
            discount_kind: self.discount_kind,
            discount_value: self.discount_value,
            discount_amount: 0.0,
            date_added,
        };
        line.resolve_discount();
        Ok(line)
    }
}

/// Draft for an overall (patient-level) discount.
#[derive(Debug, Clone)]
pub struct DiscountDraft {
    pub reason: String,
    pub kind: DiscountKind,
    pub value: f64,
}

impl DiscountDraft {
    pub fn new(reason: String, kind: DiscountKind, value: f64) -> Self {
        Self {
            reason,
            kind,
            value,
        }
    }

    /// Validate and resolve the discount amount against the patient's
    /// current treatment lines. Percentage discounts resolve against the
    /// raw per-line cost sum (see `ledger::costing::overall_discount`).
    pub fn commit(self, treatments: &[AssignedTreatment]) -> DraftResult<Discount> {
        if !(self.value >= 0.0 && self.value.is_finite()) {
            return Err(DraftError::InvalidDiscountValue);
        }
        let amount =
            costing::overall_discount(self.kind, self.value, costing::raw_cost_total(treatments));
        Ok(Discount {
            id: uuid::Uuid::new_v4().to_string(),
            reason: self.reason,
            kind: self.kind,
            value: self.value,
            amount,
        })
    }
}

/// Draft for recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentDraft {
    pub amount: f64,
    pub method: PaymentMethod,
    /// Calendar date, ISO "YYYY-MM-DD"
    pub date: String,
}

impl PaymentDraft {
    pub fn new(amount: f64, method: PaymentMethod, date: String) -> Self {
        Self {
            amount,
            method,
            date,
        }
    }

    /// Validate and produce the payment. Ids are generated here, so two
    /// same-amount same-date payments stay distinguishable.
    pub fn commit(self) -> DraftResult<Payment> {
        if !(self.amount > 0.0 && self.amount.is_finite()) {
            return Err(DraftError::InvalidAmount);
        }
        if chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(DraftError::InvalidDate(self.date));
        }
        Ok(Payment::new(self.amount, self.method, self.date))
    }
}
