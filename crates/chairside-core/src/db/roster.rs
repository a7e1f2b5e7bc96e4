//! Staff roster operations.

use super::{Database, DbError, DbResult};
use crate::models::{StaffMember, StaffRole};
use rusqlite::params;

fn row_to_staff(row: &rusqlite::Row) -> rusqlite::Result<StaffMember> {
    let role_str: String = row.get(2)?;
    Ok(StaffMember {
        id: row.get(0)?,
        name: row.get(1)?,
        role: StaffRole::parse(&role_str).unwrap_or(StaffRole::Assistant),
        specialty: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        active: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const STAFF_COLUMNS: &str = "id, name, role, specialty, phone, email, active, created_at";

impl Database {
    /// Add a staff member.
    pub fn insert_staff(&self, member: &StaffMember) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO staff (id, name, role, specialty, phone, email, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                member.id,
                member.name,
                member.role.as_str(),
                member.specialty,
                member.phone,
                member.email,
                member.active,
                member.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a staff member by id.
    pub fn get_staff(&self, id: &str) -> DbResult<StaffMember> {
        self.conn()
            .query_row(
                &format!("SELECT {} FROM staff WHERE id = ?1", STAFF_COLUMNS),
                params![id],
                row_to_staff,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("staff member {}", id))
                }
                other => DbError::Sqlite(other),
            })
    }

    /// List staff, optionally only active members.
    pub fn list_staff(&self, active_only: bool) -> DbResult<Vec<StaffMember>> {
        let sql = if active_only {
            format!("SELECT {} FROM staff WHERE active = 1 ORDER BY name", STAFF_COLUMNS)
        } else {
            format!("SELECT {} FROM staff ORDER BY name", STAFF_COLUMNS)
        };
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map([], row_to_staff)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Update a staff member's details.
    pub fn update_staff(&self, member: &StaffMember) -> DbResult<()> {
        let updated = self.conn().execute(
            "UPDATE staff
             SET name = ?2, role = ?3, specialty = ?4, phone = ?5, email = ?6, active = ?7
             WHERE id = ?1",
            params![
                member.id,
                member.name,
                member.role.as_str(),
                member.specialty,
                member.phone,
                member.email,
                member.active,
            ],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("staff member {}", member.id)));
        }
        Ok(())
    }

    /// Deactivate a staff member. History referencing them stays intact.
    pub fn deactivate_staff(&self, id: &str) -> DbResult<()> {
        let updated = self
            .conn()
            .execute("UPDATE staff SET active = 0 WHERE id = ?1", params![id])?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("staff member {}", id)));
        }
        Ok(())
    }
}
