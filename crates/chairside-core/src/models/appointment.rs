//! Appointment scheduling models.

use serde::{Deserialize, Serialize};

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            "no_show" => Some(AppointmentStatus::NoShow),
            _ => None,
        }
    }
}

/// A booked chair slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique appointment id
    pub id: String,
    /// Patient being seen
    pub patient_id: String,
    /// Dentist on the roster
    pub dentist_id: String,
    /// Scheduled start (RFC 3339)
    pub scheduled_at: String,
    /// Slot length in minutes
    pub duration_minutes: u32,
    /// Lifecycle status
    pub status: AppointmentStatus,
    /// Front-desk notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl Appointment {
    /// Book a new appointment in `Scheduled` state.
    pub fn new(patient_id: String, dentist_id: String, scheduled_at: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            dentist_id,
            scheduled_at,
            duration_minutes: 30,
            status: AppointmentStatus::Scheduled,
            notes: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether the slot still occupies chair time.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appointment_is_scheduled() {
        let appt = Appointment::new("p1".into(), "d1".into(), "2024-06-01T09:00:00Z".into());
        assert!(matches!(appt.status, AppointmentStatus::Scheduled));
        assert!(appt.is_active());
        assert_eq!(appt.duration_minutes, 30);
    }

    #[test]
    fn test_cancelled_is_not_active() {
        let mut appt = Appointment::new("p1".into(), "d1".into(), "2024-06-01T09:00:00Z".into());
        appt.status = AppointmentStatus::Cancelled;
        assert!(!appt.is_active());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("rescheduled"), None);
    }
}
