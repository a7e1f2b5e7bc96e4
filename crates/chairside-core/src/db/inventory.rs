//! Inventory and stock level operations.

use super::{Database, DbError, DbResult};
use crate::models::InventoryItem;
use rusqlite::params;

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        reorder_level: row.get(4)?,
        unit_cost: row.get(5)?,
        supplier: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const INVENTORY_COLUMNS: &str =
    "id, name, quantity, unit, reorder_level, unit_cost, supplier, updated_at";

impl Database {
    /// Insert or update an inventory item.
    pub fn upsert_inventory_item(&self, item: &InventoryItem) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO inventory (id, name, quantity, unit, reorder_level, unit_cost, \
             supplier, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 quantity = excluded.quantity,
                 unit = excluded.unit,
                 reorder_level = excluded.reorder_level,
                 unit_cost = excluded.unit_cost,
                 supplier = excluded.supplier,
                 updated_at = excluded.updated_at",
            params![
                item.id,
                item.name,
                item.quantity,
                item.unit,
                item.reorder_level,
                item.unit_cost,
                item.supplier,
                item.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get an inventory item by id.
    pub fn get_inventory_item(&self, id: &str) -> DbResult<InventoryItem> {
        self.conn()
            .query_row(
                &format!("SELECT {} FROM inventory WHERE id = ?1", INVENTORY_COLUMNS),
                params![id],
                row_to_item,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("inventory item {}", id))
                }
                other => DbError::Sqlite(other),
            })
    }

    /// List all inventory items by name.
    pub fn list_inventory(&self) -> DbResult<Vec<InventoryItem>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM inventory ORDER BY name",
            INVENTORY_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_item)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// List items at or below their reorder level.
    pub fn list_low_stock(&self) -> DbResult<Vec<InventoryItem>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM inventory WHERE quantity <= reorder_level ORDER BY name",
            INVENTORY_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_item)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Adjust stock by a delta (negative = consumption). Quantity never
    /// drops below zero.
    pub fn adjust_inventory_quantity(&self, id: &str, delta: i64) -> DbResult<InventoryItem> {
        let updated = self.conn().execute(
            "UPDATE inventory
             SET quantity = MAX(0, quantity + ?2), updated_at = ?3
             WHERE id = ?1",
            params![id, delta, chrono::Utc::now().to_rfc3339()],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("inventory item {}", id)));
        }
        self.get_inventory_item(id)
    }

    /// Delete an inventory item.
    pub fn delete_inventory_item(&self, id: &str) -> DbResult<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM inventory WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DbError::NotFound(format!("inventory item {}", id)));
        }
        Ok(())
    }
}
