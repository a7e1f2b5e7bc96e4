//! Appointment book operations.

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus};
use rusqlite::params;

fn row_to_appointment(row: &rusqlite::Row) -> rusqlite::Result<Appointment> {
    let status_str: String = row.get(5)?;
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        dentist_id: row.get(2)?,
        scheduled_at: row.get(3)?,
        duration_minutes: row.get(4)?,
        status: AppointmentStatus::parse(&status_str).unwrap_or(AppointmentStatus::Scheduled),
        notes: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, dentist_id, scheduled_at, duration_minutes, status, notes, created_at";

impl Database {
    /// Insert a new appointment.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO appointments (id, patient_id, dentist_id, scheduled_at, \
             duration_minutes, status, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                appointment.id,
                appointment.patient_id,
                appointment.dentist_id,
                appointment.scheduled_at,
                appointment.duration_minutes,
                appointment.status.as_str(),
                appointment.notes,
                appointment.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: &str) -> DbResult<Appointment> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {} FROM appointments WHERE id = ?1",
                    APPOINTMENT_COLUMNS
                ),
                params![id],
                row_to_appointment,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("appointment {}", id))
                }
                other => DbError::Sqlite(other),
            })
    }

    /// List a patient's appointments, soonest first.
    pub fn list_appointments_for_patient(&self, patient_id: &str) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM appointments WHERE patient_id = ?1 ORDER BY scheduled_at",
            APPOINTMENT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![patient_id], row_to_appointment)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// List appointments in a time window (inclusive bounds, RFC 3339
    /// timestamps compare lexicographically).
    pub fn list_appointments_between(&self, from: &str, to: &str) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM appointments
             WHERE scheduled_at >= ?1 AND scheduled_at <= ?2
             ORDER BY scheduled_at",
            APPOINTMENT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![from, to], row_to_appointment)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Update an appointment's status.
    pub fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> DbResult<()> {
        let updated = self.conn().execute(
            "UPDATE appointments SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("appointment {}", id)));
        }
        Ok(())
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: &str) -> DbResult<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DbError::NotFound(format!("appointment {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;

    fn seeded() -> (Database, Patient) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Test".into());
        db.insert_patient(&patient).unwrap();
        (db, patient)
    }

    #[test]
    fn test_insert_and_get() {
        let (db, patient) = seeded();
        let appt = Appointment::new(patient.id.clone(), "d1".into(), "2024-06-01T09:00:00Z".into());
        db.insert_appointment(&appt).unwrap();

        let loaded = db.get_appointment(&appt.id).unwrap();
        assert_eq!(loaded.status, AppointmentStatus::Scheduled);
        assert_eq!(loaded.duration_minutes, 30);
    }

    #[test]
    fn test_list_between_window() {
        let (db, patient) = seeded();
        for ts in ["2024-06-01T09:00:00Z", "2024-06-15T09:00:00Z", "2024-07-01T09:00:00Z"] {
            let appt = Appointment::new(patient.id.clone(), "d1".into(), ts.into());
            db.insert_appointment(&appt).unwrap();
        }

        let june = db
            .list_appointments_between("2024-06-01T00:00:00Z", "2024-06-30T23:59:59Z")
            .unwrap();
        assert_eq!(june.len(), 2);
        assert!(june[0].scheduled_at < june[1].scheduled_at);
    }

    #[test]
    fn test_status_transition() {
        let (db, patient) = seeded();
        let appt = Appointment::new(patient.id.clone(), "d1".into(), "2024-06-01T09:00:00Z".into());
        db.insert_appointment(&appt).unwrap();

        db.update_appointment_status(&appt.id, AppointmentStatus::Completed)
            .unwrap();
        let loaded = db.get_appointment(&appt.id).unwrap();
        assert_eq!(loaded.status, AppointmentStatus::Completed);
        assert!(!loaded.is_active());
    }

    #[test]
    fn test_missing_appointment() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.get_appointment("nope").unwrap_err(),
            DbError::NotFound(_)
        ));
        assert!(matches!(
            db.update_appointment_status("nope", AppointmentStatus::Cancelled)
                .unwrap_err(),
            DbError::NotFound(_)
        ));
    }
}
