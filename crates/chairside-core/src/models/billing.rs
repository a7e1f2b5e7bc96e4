//! Billing models: patient-level discounts, payments, clinic settings.

use serde::{Deserialize, Serialize};

use super::treatment::DiscountKind;

/// A patient-level (overall) discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    /// Unique discount id
    pub id: String,
    /// Why the discount was granted
    pub reason: String,
    /// Flat amount or percentage
    pub kind: DiscountKind,
    /// Value as entered
    pub value: f64,
    /// Resolved currency amount. Derived at add time; for percentage
    /// discounts the base is the raw per-line cost sum (see ledger::costing).
    pub amount: f64,
}

/// How a payment was made.
///
/// Wire names match the stored document format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(PaymentMethod::Cash),
            "Card" => Some(PaymentMethod::Card),
            "Bank Transfer" => Some(PaymentMethod::BankTransfer),
            "Other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

/// A payment received against a patient's balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    /// Unique payment id, generated at creation
    pub id: String,
    /// Amount received
    pub amount: f64,
    /// Payment method
    pub method: PaymentMethod,
    /// Calendar date the payment applies to (ISO "YYYY-MM-DD"; lexicographic
    /// order is chronological order)
    pub date: String,
    /// Creation timestamp; the secondary ledger sort key for same-date
    /// payments
    pub date_added: String,
}

impl Payment {
    /// Record a new payment dated today.
    pub fn new(amount: f64, method: PaymentMethod, date: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            method,
            date,
            date_added: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Clinic-wide settings, stored as a single row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicSettings {
    /// Clinic display name
    pub clinic_name: String,
    /// Flat outpatient consultation fee, applied once per patient
    /// regardless of treatment count
    pub opd_charge: f64,
    /// Currency symbol for exports
    pub currency: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            clinic_name: String::new(),
            opd_charge: 0.0,
            currency: "Rs".into(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
