//! Treatment catalog (price list) operations.

use super::{Database, DbError, DbResult};
use crate::models::TreatmentCatalogItem;
use rusqlite::params;

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<TreatmentCatalogItem> {
    Ok(TreatmentCatalogItem {
        id: row.get(0)?,
        name: row.get(1)?,
        cost: row.get(2)?,
        multiply_by_tooth: row.get(3)?,
        active: row.get(4)?,
        created_at: row.get(5)?,
    })
}

const CATALOG_COLUMNS: &str = "id, name, cost, multiply_by_tooth, active, created_at";

impl Database {
    /// Insert or update a catalog entry.
    pub fn upsert_catalog_item(&self, item: &TreatmentCatalogItem) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO treatment_catalog (id, name, cost, multiply_by_tooth, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 cost = excluded.cost,
                 multiply_by_tooth = excluded.multiply_by_tooth,
                 active = excluded.active",
            params![
                item.id,
                item.name,
                item.cost,
                item.multiply_by_tooth,
                item.active,
                item.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a catalog entry by id.
    pub fn get_catalog_item(&self, id: &str) -> DbResult<TreatmentCatalogItem> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {} FROM treatment_catalog WHERE id = ?1",
                    CATALOG_COLUMNS
                ),
                params![id],
                row_to_item,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("catalog item {}", id))
                }
                other => DbError::Sqlite(other),
            })
    }

    /// List catalog entries by name. `active_only` hides retired treatments.
    pub fn list_catalog(&self, active_only: bool) -> DbResult<Vec<TreatmentCatalogItem>> {
        let sql = if active_only {
            format!(
                "SELECT {} FROM treatment_catalog WHERE active = 1 ORDER BY name",
                CATALOG_COLUMNS
            )
        } else {
            format!("SELECT {} FROM treatment_catalog ORDER BY name", CATALOG_COLUMNS)
        };
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map([], row_to_item)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Retire a treatment without deleting it. Lines already assigned to
    /// patients keep their snapshot of name and cost.
    pub fn deactivate_catalog_item(&self, id: &str) -> DbResult<()> {
        let updated = self.conn().execute(
            "UPDATE treatment_catalog SET active = 0 WHERE id = ?1",
            params![id],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("catalog item {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let item = TreatmentCatalogItem::new("Root Canal".into(), 15000.0);
        db.upsert_catalog_item(&item).unwrap();

        let loaded = db.get_catalog_item(&item.id).unwrap();
        assert_eq!(loaded.cost, 15000.0);
        assert!(loaded.active);
    }

    #[test]
    fn test_upsert_updates_existing() {
        let db = Database::open_in_memory().unwrap();
        let mut item = TreatmentCatalogItem::new("Filling".into(), 1000.0);
        db.upsert_catalog_item(&item).unwrap();

        item.cost = 1200.0;
        db.upsert_catalog_item(&item).unwrap();

        let loaded = db.get_catalog_item(&item.id).unwrap();
        assert_eq!(loaded.cost, 1200.0);
        assert_eq!(db.list_catalog(false).unwrap().len(), 1);
    }

    #[test]
    fn test_list_active_only_hides_retired() {
        let db = Database::open_in_memory().unwrap();
        let keep = TreatmentCatalogItem::new("Filling".into(), 1000.0);
        let retire = TreatmentCatalogItem::new("Extraction".into(), 2000.0);
        db.upsert_catalog_item(&keep).unwrap();
        db.upsert_catalog_item(&retire).unwrap();
        db.deactivate_catalog_item(&retire.id).unwrap();

        let active = db.list_catalog(true).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, keep.id);

        let all = db.list_catalog(false).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_missing_item() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.get_catalog_item("nope").unwrap_err(),
            DbError::NotFound(_)
        ));
    }
}
