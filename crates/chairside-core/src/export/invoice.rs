//! Patient invoice export.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::ledger::{self, LedgerEntry, LedgerSummary};
use crate::models::{ClinicSettings, Patient};

/// A printable invoice for a patient's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice metadata
    pub metadata: InvoiceMetadata,
    /// Charge lines (OPD first, then treatments)
    pub lines: Vec<InvoiceLine>,
    /// Overall discounts applied to the account
    pub discounts: Vec<InvoiceDiscount>,
    /// Account totals
    pub summary: LedgerSummary,
    /// Payment history, newest first, with running balances
    pub payments: Vec<LedgerEntry>,
}

/// Invoice metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceMetadata {
    /// Clinic name from settings
    pub clinic_name: String,
    /// Display currency
    pub currency: String,
    /// Patient id
    pub patient_id: String,
    /// Patient name
    pub patient_name: String,
    /// Generation timestamp
    pub generated_at: String,
}

/// Single charge line on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Line description
    pub description: String,
    /// Teeth the line applies to, if any
    pub tooth: Option<String>,
    /// Effective line cost (tooth multiplier already applied)
    pub cost: f64,
    /// Resolved per-line discount
    pub discount: f64,
    /// Cost minus discount
    pub net: f64,
}

/// Overall discount shown on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDiscount {
    /// Reason recorded with the discount
    pub reason: String,
    /// Resolved amount
    pub amount: f64,
}

impl Invoice {
    /// Build an invoice from a patient snapshot and the clinic settings.
    pub fn for_patient(patient: &Patient, settings: &ClinicSettings) -> Self {
        let ledger = ledger::for_patient(patient, settings.opd_charge);

        let mut lines = Vec::with_capacity(patient.assigned_treatments.len() + 1);
        if settings.opd_charge > 0.0 {
            lines.push(InvoiceLine {
                description: "OPD Consultation".to_string(),
                tooth: None,
                cost: settings.opd_charge,
                discount: 0.0,
                net: settings.opd_charge,
            });
        }
        for treatment in &patient.assigned_treatments {
            let cost = treatment.effective_cost();
            lines.push(InvoiceLine {
                description: treatment.name.clone(),
                tooth: treatment.tooth.clone(),
                cost,
                discount: treatment.discount_amount,
                net: cost - treatment.discount_amount,
            });
        }

        let discounts = patient
            .discounts
            .iter()
            .map(|d| InvoiceDiscount {
                reason: d.reason.clone(),
                amount: d.amount,
            })
            .collect();

        Self {
            metadata: InvoiceMetadata {
                clinic_name: settings.clinic_name.clone(),
                currency: settings.currency.clone(),
                patient_id: patient.id.clone(),
                patient_name: patient.name.clone(),
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
            lines,
            discounts,
            summary: ledger.summary,
            payments: ledger.entries,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format (one row per charge line).
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("patient_id,patient_name,description,tooth,cost,discount,net\n");
        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&self.metadata.patient_id),
                escape_csv(&self.metadata.patient_name),
                escape_csv(&line.description),
                escape_csv(line.tooth.as_deref().unwrap_or("")),
                line.cost,
                line.discount,
                line.net,
            ));
        }

        csv
    }
}
