//! End-to-end billing flow tests: registration through invoice export.

use chairside_core::db::Database;
use chairside_core::export::{IncomeReporter, Invoice};
use chairside_core::models::{Patient, PaymentMethod, TreatmentCatalogItem};
use chairside_core::session::{DiscountDraft, PatientPatch, PaymentDraft, TreatmentDraft};
use chairside_core::{ledger, models::DiscountKind};
use chairside_core::{open_database, open_database_in_memory, FfiTreatmentInput};

fn treatment_input(catalog_id: &str) -> FfiTreatmentInput {
    FfiTreatmentInput {
        catalog_id: catalog_id.to_string(),
        tooth: None,
        cost: None,
        multiply_cost: None,
        discount_kind: None,
        discount_value: None,
    }
}

#[test]
fn test_full_billing_flow() {
    let mut db = Database::open_in_memory().unwrap();

    // Clinic setup
    let mut settings = db.get_settings().unwrap();
    settings.clinic_name = "Smile Dental".into();
    settings.opd_charge = 500.0;
    db.update_settings(&settings).unwrap();

    let item = TreatmentCatalogItem::new("Filling".into(), 1000.0);
    db.upsert_catalog_item(&item).unwrap();

    // Registration
    let patient = Patient::new("Amara Perera".into());
    db.insert_patient(&patient).unwrap();

    // Assign a multi-tooth filling
    let line = TreatmentDraft::from_catalog(&item)
        .tooth("36,37")
        .multiply_cost(true)
        .commit()
        .unwrap();
    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::add_treatment(&patient, line))
        .unwrap();

    // Overall 10% discount, resolved against the raw 1000
    let discount = DiscountDraft::new("Family".into(), DiscountKind::Percentage, 10.0)
        .commit(&patient.assigned_treatments)
        .unwrap();
    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::add_discount(&patient, discount))
        .unwrap();

    // Two payments across months; each patch starts from the fresh snapshot
    for (amount, date) in [(1000.0, "2024-01-10"), (500.0, "2024-02-15")] {
        let payment = PaymentDraft::new(amount, PaymentMethod::Cash, date.into())
            .commit()
            .unwrap();
        let current = db.get_patient(&patient.id).unwrap();
        db.apply_patient_patch(&patient.id, PatientPatch::add_payment(&current, payment))
            .unwrap();
    }

    // Ledger: 500 OPD + 2000 treatment - 100 discount - 1500 paid
    let patient = db.get_patient(&patient.id).unwrap();
    let ledger = ledger::for_patient(&patient, db.opd_charge().unwrap());
    assert_eq!(ledger.summary.gross_total, 2500.0);
    assert_eq!(ledger.summary.total_discount, 100.0);
    assert_eq!(ledger.summary.balance_due, 900.0);

    // History newest first with running balances
    assert_eq!(ledger.entries[0].payment.date, "2024-02-15");
    assert_eq!(ledger.entries[0].balance_after, 900.0);
    assert_eq!(ledger.entries[1].balance_after, 1400.0);

    // Invoice carries the same totals
    let settings = db.get_settings().unwrap();
    let invoice = Invoice::for_patient(&patient, &settings);
    assert_eq!(invoice.summary, ledger.summary);
    assert_eq!(invoice.lines.len(), 2); // OPD + filling
    assert!(invoice.to_json().unwrap().contains("Smile Dental"));

    // January income report sees only the January payment
    let report = IncomeReporter::new(&db)
        .report_between("2024-01-01", "2024-01-31")
        .unwrap();
    assert_eq!(report.total_collected, 1000.0);
    assert_eq!(report.outstanding_balance, 900.0);
}

#[test]
fn test_edit_treatment_rebuilds_discount() {
    let mut db = Database::open_in_memory().unwrap();
    let item = TreatmentCatalogItem::new("Crown".into(), 10000.0);
    db.upsert_catalog_item(&item).unwrap();

    let patient = Patient::new("Test".into());
    db.insert_patient(&patient).unwrap();

    let line = TreatmentDraft::from_catalog(&item)
        .discount(DiscountKind::Percentage, 10.0)
        .commit()
        .unwrap();
    assert_eq!(line.discount_amount, 1000.0);

    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::add_treatment(&patient, line.clone()))
        .unwrap();

    // Spread the crown over two teeth: the percentage now applies to 20000
    let edited = TreatmentDraft::edit(&patient.assigned_treatments[0])
        .tooth("11,21")
        .multiply_cost(true)
        .commit()
        .unwrap();
    assert_eq!(edited.id, line.id);
    assert_eq!(edited.discount_amount, 2000.0);

    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::replace_treatment(&patient, edited))
        .unwrap();
    let summary = ledger::summarize(&patient.assigned_treatments, &[], &[], 0.0);
    assert_eq!(summary.treatments_cost, 20000.0);
    assert_eq!(summary.per_treatment_discount, 2000.0);
}

#[test]
fn test_removing_payment_restores_balance() {
    let mut db = Database::open_in_memory().unwrap();
    let item = TreatmentCatalogItem::new("Scaling".into(), 800.0);
    db.upsert_catalog_item(&item).unwrap();

    let patient = Patient::new("Test".into());
    db.insert_patient(&patient).unwrap();
    let line = TreatmentDraft::from_catalog(&item).commit().unwrap();
    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::add_treatment(&patient, line))
        .unwrap();

    let payment = PaymentDraft::new(800.0, PaymentMethod::Card, "2024-01-01".into())
        .commit()
        .unwrap();
    let payment_id = payment.id.clone();
    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::add_payment(&patient, payment))
        .unwrap();
    assert_eq!(
        ledger::for_patient(&patient, 0.0).summary.balance_due,
        0.0
    );

    let patient = db
        .apply_patient_patch(&patient.id, PatientPatch::remove_payment(&patient, &payment_id))
        .unwrap();
    assert_eq!(
        ledger::for_patient(&patient, 0.0).summary.balance_due,
        800.0
    );
}

#[test]
fn test_ffi_facade_flow() {
    let core = open_database_in_memory().unwrap();

    core.update_settings("Smile Dental".into(), 500.0, "Rs".into())
        .unwrap();

    let item = chairside_core::FfiCatalogItem {
        id: "cat-1".into(),
        name: "Filling".into(),
        cost: 1000.0,
        multiply_by_tooth: true,
        active: true,
    };
    core.upsert_catalog_item(item).unwrap();

    let patient = core.create_patient("Amara Perera".into()).unwrap();

    let mut input = treatment_input("cat-1");
    input.tooth = Some("36,37".into());
    input.multiply_cost = Some(true);
    let patient = core.assign_treatment(patient.id.clone(), input).unwrap();
    assert_eq!(patient.assigned_treatments.len(), 1);
    assert_eq!(patient.assigned_treatments[0].effective_cost, 2000.0);

    core.record_payment(patient.id.clone(), 2500.0, "Cash".into(), "2024-01-10".into())
        .unwrap();

    let ledger = core.get_patient_ledger(patient.id.clone()).unwrap();
    assert_eq!(ledger.summary.gross_total, 2500.0);
    assert_eq!(ledger.summary.balance_due, 0.0);
    assert_eq!(ledger.summary.display_status, "Fully Paid");

    // Bad inputs surface as InvalidInput, not panics
    let err = core
        .record_payment(patient.id.clone(), -5.0, "Cash".into(), "2024-01-10".into())
        .unwrap_err();
    assert!(matches!(err, chairside_core::ChairsideError::InvalidInput(_)));
    let err = core
        .record_payment(patient.id.clone(), 5.0, "Cheque".into(), "2024-01-10".into())
        .unwrap_err();
    assert!(matches!(err, chairside_core::ChairsideError::InvalidInput(_)));

    let invoice_csv = core.export_invoice_csv(patient.id.clone()).unwrap();
    assert!(invoice_csv.contains("OPD Consultation"));
}

#[test]
fn test_ledger_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    let patient_id = {
        let core = open_database(path.to_string_lossy().into_owned()).unwrap();
        core.update_settings("Smile Dental".into(), 500.0, "Rs".into())
            .unwrap();
        core.upsert_catalog_item(chairside_core::FfiCatalogItem {
            id: "cat-1".into(),
            name: "Scaling".into(),
            cost: 800.0,
            multiply_by_tooth: false,
            active: true,
        })
        .unwrap();
        let patient = core.create_patient("Test".into()).unwrap();
        core.assign_treatment(patient.id.clone(), treatment_input("cat-1"))
            .unwrap();
        core.record_payment(patient.id.clone(), 300.0, "Card".into(), "2024-03-01".into())
            .unwrap();
        patient.id
    };

    let core = open_database(path.to_string_lossy().into_owned()).unwrap();
    let ledger = core.get_patient_ledger(patient_id).unwrap();
    assert_eq!(ledger.summary.gross_total, 1300.0);
    assert_eq!(ledger.summary.balance_due, 1000.0);
    assert_eq!(ledger.entries.len(), 1);
}
