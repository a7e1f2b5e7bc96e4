//! Clinic inventory models.

use serde::{Deserialize, Serialize};

/// A stocked consumable or instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Unique item id
    pub id: String,
    /// Item name
    pub name: String,
    /// Quantity on hand
    pub quantity: i64,
    /// Stocking unit (e.g., "box", "pcs")
    pub unit: String,
    /// Reorder threshold
    pub reorder_level: i64,
    /// Cost per unit
    pub unit_cost: f64,
    /// Supplier name
    pub supplier: Option<String>,
    /// Last update timestamp
    pub updated_at: String,
}

impl InventoryItem {
    /// Create a new inventory item.
    pub fn new(name: String, quantity: i64, unit: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            quantity,
            unit,
            reorder_level: 0,
            unit_cost: 0.0,
            supplier: None,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether stock has fallen to or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}
