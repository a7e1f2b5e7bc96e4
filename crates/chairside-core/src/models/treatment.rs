//! Treatment models: the clinic price list and per-patient assigned lines.

use serde::{Deserialize, Serialize};

use crate::ledger::costing;

/// How a discount value is interpreted.
///
/// Wire names match the stored document format ("Amount" / "Percentage").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountKind {
    /// Flat currency amount, taken as-is.
    Amount,
    /// Percentage of the base the resolver applies it to.
    Percentage,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Amount => "Amount",
            DiscountKind::Percentage => "Percentage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Amount" => Some(DiscountKind::Amount),
            "Percentage" => Some(DiscountKind::Percentage),
            _ => None,
        }
    }
}

/// An entry in the clinic's treatment price list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentCatalogItem {
    /// Unique catalog id
    pub id: String,
    /// Procedure name (e.g., "Root Canal", "Scaling")
    pub name: String,
    /// List price per procedure (or per tooth when multiplied)
    pub cost: f64,
    /// Whether assigned lines default to per-tooth multiplication
    pub multiply_by_tooth: bool,
    /// Whether this procedure is currently offered
    pub active: bool,
    /// Creation timestamp
    pub created_at: String,
}

impl TreatmentCatalogItem {
    /// Create a new catalog entry with required fields.
    pub fn new(name: String, cost: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            cost,
            multiply_by_tooth: false,
            active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One billable procedure recorded against a patient, possibly scoped to
/// one or more teeth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignedTreatment {
    /// Unique line id
    pub id: String,
    /// Catalog entry this line was created from
    pub treatment_id: String,
    /// Procedure name at assignment time
    pub name: String,
    /// Comma-separated tooth identifiers (e.g., "7,8,9"); None when the
    /// procedure is not tooth-scoped
    pub tooth: Option<String>,
    /// Base cost for the line
    pub cost: f64,
    /// Multiply cost by the number of teeth in `tooth`
    pub multiply_cost: bool,
    /// Optional per-line discount mode
    pub discount_kind: Option<DiscountKind>,
    /// Optional per-line discount value
    pub discount_value: Option<f64>,
    /// Resolved discount amount. Derived, never authoritative input: it is
    /// recomputed whenever cost, tooth, kind, or value changes.
    pub discount_amount: f64,
    /// Assignment timestamp (display lists are sorted descending on this)
    pub date_added: String,
}

impl AssignedTreatment {
    /// Create a new line from a catalog entry.
    pub fn from_catalog(item: &TreatmentCatalogItem) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            treatment_id: item.id.clone(),
            name: item.name.clone(),
            tooth: None,
            cost: item.cost,
            multiply_cost: item.multiply_by_tooth,
            discount_kind: None,
            discount_value: None,
            discount_amount: 0.0,
            date_added: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Number of teeth referenced by this line.
    pub fn tooth_count(&self) -> u32 {
        self.tooth
            .as_deref()
            .map(costing::tooth_count)
            .unwrap_or(0)
    }

    /// Effective line cost: `cost × tooth count` when `multiply_cost` is
    /// set and the tooth list is non-empty, plain `cost` otherwise.
    pub fn effective_cost(&self) -> f64 {
        costing::effective_line_cost(self.cost, self.multiply_cost, self.tooth.as_deref())
    }

    /// Recompute the derived `discount_amount` from the current line state.
    /// Must run after any edit to cost, tooth, kind, or value.
    pub fn resolve_discount(&mut self) {
        self.discount_amount = costing::line_discount(
            self.discount_kind,
            self.discount_value,
            self.effective_cost(),
        );
    }
}
