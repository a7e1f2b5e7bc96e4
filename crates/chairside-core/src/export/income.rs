//! Clinic income reporting.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::db::{Database, DbResult};
use crate::ledger;

/// Income summary over a date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeReport {
    /// Window start date (inclusive, "YYYY-MM-DD")
    pub from: String,
    /// Window end date (inclusive, "YYYY-MM-DD")
    pub to: String,
    /// Generation timestamp
    pub generated_at: String,
    /// Sum of payments dated inside the window
    pub total_collected: f64,
    /// Number of payments inside the window
    pub payment_count: usize,
    /// Collected amounts broken down by payment method
    pub by_method: Vec<MethodTotal>,
    /// Gross billed across all patients with billing activity (all time)
    pub gross_billed: f64,
    /// Total discounts given across those patients (all time)
    pub total_discounts: f64,
    /// Outstanding balance across those patients (all time, may be negative)
    pub outstanding_balance: f64,
}

/// Per-method collection total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodTotal {
    /// Payment method wire name
    pub method: String,
    /// Amount collected
    pub amount: f64,
    /// Payment count
    pub count: usize,
}

/// Income reporter over the clinic database.
pub struct IncomeReporter<'a> {
    db: &'a Database,
}

impl<'a> IncomeReporter<'a> {
    /// Create a new income reporter.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Build the income report for an inclusive date window. Payment dates
    /// are ISO "YYYY-MM-DD" strings, so the window compares lexicographically.
    pub fn report_between(&self, from: &str, to: &str) -> DbResult<IncomeReport> {
        let opd_charge = self.db.opd_charge()?;
        let patients = self.db.list_patients()?;

        let mut total_collected = 0.0;
        let mut payment_count = 0;
        let mut by_method: Vec<MethodTotal> = Vec::new();

        let mut gross_billed = 0.0;
        let mut total_discounts = 0.0;
        let mut outstanding_balance = 0.0;

        for patient in &patients {
            for payment in &patient.payments {
                if payment.date.as_str() < from || payment.date.as_str() > to {
                    continue;
                }
                total_collected += payment.amount;
                payment_count += 1;

                let method = payment.method.as_str();
                match by_method.iter_mut().find(|m| m.method == method) {
                    Some(entry) => {
                        entry.amount += payment.amount;
                        entry.count += 1;
                    }
                    None => by_method.push(MethodTotal {
                        method: method.to_string(),
                        amount: payment.amount,
                        count: 1,
                    }),
                }
            }

            // Account totals only count patients who were actually billed;
            // the OPD charge applies per active account.
            if patient.has_billing_activity() {
                let summary = ledger::summarize(
                    &patient.assigned_treatments,
                    &patient.discounts,
                    &patient.payments,
                    opd_charge,
                );
                gross_billed += summary.gross_total;
                total_discounts += summary.total_discount;
                outstanding_balance += summary.balance_due;
            }
        }

        by_method.sort_by(|a, b| a.method.cmp(&b.method));

        Ok(IncomeReport {
            from: from.to_string(),
            to: to.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_collected,
            payment_count,
            by_method,
            gross_billed,
            total_discounts,
            outstanding_balance,
        })
    }
}

impl IncomeReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format (one row per payment method).
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("from,to,method,amount,count\n");
        for entry in &self.by_method {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                escape_csv(&self.from),
                escape_csv(&self.to),
                escape_csv(&entry.method),
                entry.amount,
                entry.count,
            ));
        }
        csv.push_str(&format!(
            "{},{},TOTAL,{},{}\n",
            escape_csv(&self.from),
            escape_csv(&self.to),
            self.total_collected,
            self.payment_count,
        ));

        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, PaymentMethod, TreatmentCatalogItem};
    use crate::session::{PatientPatch, PaymentDraft, TreatmentDraft};

    fn pay(db: &mut Database, patient: &Patient, amount: f64, method: PaymentMethod, date: &str) {
        let payment = PaymentDraft::new(amount, method, date.into()).commit().unwrap();
        let current = db.get_patient(&patient.id).unwrap();
        db.apply_patient_patch(&patient.id, PatientPatch::add_payment(&current, payment))
            .unwrap();
    }

    fn seeded() -> (Database, Patient) {
        let mut db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Amara Perera".into());
        db.insert_patient(&patient).unwrap();

        let item = TreatmentCatalogItem::new("Filling".into(), 1000.0);
        let line = TreatmentDraft::from_catalog(&item).commit().unwrap();
        db.apply_patient_patch(&patient.id, PatientPatch::add_treatment(&patient, line))
            .unwrap();
        (db, patient)
    }

    #[test]
    fn test_window_is_inclusive() {
        let (mut db, patient) = seeded();
        pay(&mut db, &patient, 100.0, PaymentMethod::Cash, "2024-01-01");
        pay(&mut db, &patient, 200.0, PaymentMethod::Cash, "2024-01-31");
        pay(&mut db, &patient, 400.0, PaymentMethod::Cash, "2024-02-01");

        let report = IncomeReporter::new(&db)
            .report_between("2024-01-01", "2024-01-31")
            .unwrap();
        assert_eq!(report.total_collected, 300.0);
        assert_eq!(report.payment_count, 2);
    }

    #[test]
    fn test_method_breakdown() {
        let (mut db, patient) = seeded();
        pay(&mut db, &patient, 100.0, PaymentMethod::Cash, "2024-01-05");
        pay(&mut db, &patient, 200.0, PaymentMethod::Card, "2024-01-06");
        pay(&mut db, &patient, 50.0, PaymentMethod::Cash, "2024-01-07");

        let report = IncomeReporter::new(&db)
            .report_between("2024-01-01", "2024-01-31")
            .unwrap();

        let cash = report.by_method.iter().find(|m| m.method == "Cash").unwrap();
        assert_eq!(cash.amount, 150.0);
        assert_eq!(cash.count, 2);
        let card = report.by_method.iter().find(|m| m.method == "Card").unwrap();
        assert_eq!(card.amount, 200.0);
    }

    #[test]
    fn test_account_totals_skip_inactive_patients() {
        let (mut db, patient) = seeded();
        // A registered patient with no billing activity contributes nothing
        let idle = Patient::new("Bimal Silva".into());
        db.insert_patient(&idle).unwrap();

        let settings = {
            let mut s = db.get_settings().unwrap();
            s.opd_charge = 500.0;
            s
        };
        db.update_settings(&settings).unwrap();

        pay(&mut db, &patient, 600.0, PaymentMethod::Cash, "2024-01-05");

        let report = IncomeReporter::new(&db)
            .report_between("2024-01-01", "2024-01-31")
            .unwrap();
        // One billed patient: 500 OPD + 1000 treatment
        assert_eq!(report.gross_billed, 1500.0);
        assert_eq!(report.outstanding_balance, 900.0);
    }

    #[test]
    fn test_csv_has_total_row() {
        let (mut db, patient) = seeded();
        pay(&mut db, &patient, 100.0, PaymentMethod::Cash, "2024-01-05");

        let report = IncomeReporter::new(&db)
            .report_between("2024-01-01", "2024-01-31")
            .unwrap();
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3); // Header + Cash + TOTAL
        assert!(lines[2].contains("TOTAL"));
    }
}
