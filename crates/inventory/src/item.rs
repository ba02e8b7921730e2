use serde::{Deserialize, Serialize};

use periodcost_core::InventoryItemId;

use crate::unit::UnitMultiplier;

/// Catalog lifecycle of an inventory item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Archived,
}

/// Catalog record of a stock-keeping inventory item.
///
/// Owned by the external inventory catalog; the costing engine only reads it
/// when a period opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    /// Stock-keeping unit label (e.g. "kg", "bottle").
    pub base_unit: String,
    /// Recipe-unit to stock-unit conversion.
    #[serde(default)]
    pub unit_multiplier: UnitMultiplier,
    #[serde(default)]
    pub status: ItemStatus,
}

impl InventoryItem {
    pub fn new(
        id: InventoryItemId,
        name: impl Into<String>,
        base_unit: impl Into<String>,
        unit_multiplier: UnitMultiplier,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            base_unit: base_unit.into(),
            unit_multiplier,
            status: ItemStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }
}

/// Read-only view over the inventory item catalog.
pub trait InventoryCatalog {
    /// Items in catalog order; ledger entries are created in this order.
    fn items(&self) -> Vec<&InventoryItem>;
}

impl InventoryCatalog for [InventoryItem] {
    fn items(&self) -> Vec<&InventoryItem> {
        self.iter().collect()
    }
}

impl InventoryCatalog for Vec<InventoryItem> {
    fn items(&self) -> Vec<&InventoryItem> {
        self.iter().collect()
    }
}
