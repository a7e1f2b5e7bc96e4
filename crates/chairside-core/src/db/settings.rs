//! Clinic settings (single-row table).

use super::{Database, DbResult};
use crate::models::ClinicSettings;
use rusqlite::params;

impl Database {
    /// Read the clinic settings. The row is seeded by the schema, so this
    /// always succeeds on an initialized database.
    pub fn get_settings(&self) -> DbResult<ClinicSettings> {
        let settings = self.conn().query_row(
            "SELECT clinic_name, opd_charge, currency, updated_at
             FROM clinic_settings WHERE id = 1",
            [],
            |row| {
                Ok(ClinicSettings {
                    clinic_name: row.get(0)?,
                    opd_charge: row.get(1)?,
                    currency: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            },
        )?;
        Ok(settings)
    }

    /// Replace the clinic settings.
    pub fn update_settings(&self, settings: &ClinicSettings) -> DbResult<()> {
        self.conn().execute(
            "UPDATE clinic_settings
             SET clinic_name = ?1, opd_charge = ?2, currency = ?3, updated_at = ?4
             WHERE id = 1",
            params![
                settings.clinic_name,
                settings.opd_charge,
                settings.currency,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Current OPD consultation charge.
    pub fn opd_charge(&self) -> DbResult<f64> {
        Ok(self.get_settings()?.opd_charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_present() {
        let db = Database::open_in_memory().unwrap();
        let settings = db.get_settings().unwrap();
        assert_eq!(settings.opd_charge, 0.0);
        assert_eq!(settings.currency, "Rs");
    }

    #[test]
    fn test_update_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let mut settings = db.get_settings().unwrap();
        settings.clinic_name = "Smile Dental".into();
        settings.opd_charge = 500.0;
        db.update_settings(&settings).unwrap();

        let loaded = db.get_settings().unwrap();
        assert_eq!(loaded.clinic_name, "Smile Dental");
        assert_eq!(loaded.opd_charge, 500.0);
        assert_eq!(db.opd_charge().unwrap(), 500.0);
    }
}
