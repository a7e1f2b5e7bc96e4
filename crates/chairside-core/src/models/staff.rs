//! Staff roster models.

use serde::{Deserialize, Serialize};

/// Role on the clinic roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StaffRole {
    Dentist,
    Hygienist,
    Assistant,
    Receptionist,
    Admin,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Dentist => "dentist",
            StaffRole::Hygienist => "hygienist",
            StaffRole::Assistant => "assistant",
            StaffRole::Receptionist => "receptionist",
            StaffRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dentist" => Some(StaffRole::Dentist),
            "hygienist" => Some(StaffRole::Hygienist),
            "assistant" => Some(StaffRole::Assistant),
            "receptionist" => Some(StaffRole::Receptionist),
            "admin" => Some(StaffRole::Admin),
            _ => None,
        }
    }
}

/// A clinic staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffMember {
    /// Unique staff id
    pub id: String,
    /// Full name
    pub name: String,
    /// Roster role
    pub role: StaffRole,
    /// Clinical specialty, if any (e.g., "Orthodontics")
    pub specialty: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Whether currently on the roster
    pub active: bool,
    /// Creation timestamp
    pub created_at: String,
}

impl StaffMember {
    /// Add a member to the roster.
    pub fn new(name: String, role: StaffRole) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            role,
            specialty: None,
            phone: None,
            email: None,
            active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_is_active() {
        let member = StaffMember::new("Dr. Silva".into(), StaffRole::Dentist);
        assert!(member.active);
        assert!(matches!(member.role, StaffRole::Dentist));
    }

    #[test]
    fn test_role_string_roundtrip() {
        for role in [
            StaffRole::Dentist,
            StaffRole::Hygienist,
            StaffRole::Assistant,
            StaffRole::Receptionist,
            StaffRole::Admin,
        ] {
            assert_eq!(StaffRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(StaffRole::parse("surgeon"), None);
    }
}
