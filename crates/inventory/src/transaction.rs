use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{InventoryItemId, WarehouseId};

/// Immutable fact of inventory movement within a period: a purchase into a
/// warehouse, or a transfer between two warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransactionData {
    pub inventory_item_id: InventoryItemId,
    /// Warehouse the stock left (`None` for supplier purchases).
    #[serde(default)]
    pub source_warehouse_id: Option<WarehouseId>,
    /// Warehouse the stock entered (`None` for write-offs to outside).
    #[serde(default)]
    pub target_warehouse_id: Option<WarehouseId>,
    /// Quantity in the transaction's own unit.
    pub quantity: Decimal,
    /// Transaction unit to inventory recipe-unit factor.
    pub multiplier: Decimal,
    /// Price per transaction unit.
    pub price: Decimal,
}

impl InventoryTransactionData {
    /// Quantity expressed in recipe units (`quantity × multiplier`).
    pub fn converted_quantity(&self) -> Decimal {
        self.quantity * self.multiplier
    }

    /// Monetary value of the transaction (`price × quantity`).
    pub fn total_price(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// Aggregated movement of one inventory item relative to one warehouse.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NetMovement {
    /// Converted quantity received by the warehouse.
    pub inbound: Decimal,
    /// Converted quantity sent out of the warehouse.
    pub outbound: Decimal,
    /// Sum of `price × quantity` over every transaction for the item.
    pub total_price: Decimal,
}

impl NetMovement {
    /// Fold the transactions that reference `item` into inbound/outbound
    /// totals for `warehouse`. Transactions for other items are ignored.
    pub fn for_item<'a>(
        item: InventoryItemId,
        warehouse: WarehouseId,
        transactions: impl IntoIterator<Item = &'a InventoryTransactionData>,
    ) -> Self {
        transactions
            .into_iter()
            .filter(|t| t.inventory_item_id == item)
            .fold(Self::default(), |mut acc, t| {
                if t.target_warehouse_id == Some(warehouse) {
                    acc.inbound += t.converted_quantity();
                }
                if t.source_warehouse_id == Some(warehouse) {
                    acc.outbound += t.converted_quantity();
                }
                acc.total_price += t.total_price();
                acc
            })
    }
}
