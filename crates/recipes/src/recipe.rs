use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{InventoryItemId, MenuItemId, PortionId};
use periodcost_inventory::{InventoryItem, ItemStatus};

/// Sellable portion of a menu item (e.g. "Pizza Margherita / Large").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portion {
    pub id: PortionId,
    pub name: String,
    pub menu_item_id: MenuItemId,
}

/// Reference from a recipe line to the inventory catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemRef {
    pub id: InventoryItemId,
    #[serde(default)]
    pub status: ItemStatus,
}

impl From<&InventoryItem> for InventoryItemRef {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id,
            status: item.status,
        }
    }
}

/// One recipe line: quantity of an inventory item, in recipe units, consumed
/// per portion sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeItem {
    /// `None` when the referenced item was deleted from the catalog.
    pub inventory_item: Option<InventoryItemRef>,
    pub quantity: Decimal,
}

/// Recipe line that the costing engine should account for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValidRecipeItem {
    pub inventory_item_id: InventoryItemId,
    pub quantity: Decimal,
}

/// Recipe of one portion plus the fixed overhead charged per portion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub portion: Portion,
    #[serde(default)]
    pub fixed_cost: Decimal,
    #[serde(default)]
    pub items: Vec<RecipeItem>,
}

impl Recipe {
    pub fn portion_id(&self) -> PortionId {
        self.portion.id
    }

    /// Lines referencing an existing, active inventory item with a positive
    /// quantity. The engine treats this enumeration as authoritative.
    pub fn valid_items(&self) -> impl Iterator<Item = ValidRecipeItem> + '_ {
        self.items.iter().filter_map(|line| {
            let item = line.inventory_item?;
            if item.status != ItemStatus::Active || line.quantity <= Decimal::ZERO {
                return None;
            }
            Some(ValidRecipeItem {
                inventory_item_id: item.id,
                quantity: line.quantity,
            })
        })
    }
}

/// Read-only view over the recipe catalog.
pub trait RecipeCatalog {
    fn recipes(&self) -> Vec<&Recipe>;

    /// Recipe producing `portion`, if any.
    fn recipe_for_portion(&self, portion: PortionId) -> Option<&Recipe> {
        self.recipes().into_iter().find(|r| r.portion.id == portion)
    }
}

impl RecipeCatalog for [Recipe] {
    fn recipes(&self) -> Vec<&Recipe> {
        self.iter().collect()
    }
}

impl RecipeCatalog for Vec<Recipe> {
    fn recipes(&self) -> Vec<&Recipe> {
        self.iter().collect()
    }
}
