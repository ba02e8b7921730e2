//! Per-period, per-item consumption ledger entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{DomainError, DomainResult, Entity, InventoryItemId};

use crate::item::InventoryItem;
use crate::unit::UnitMultiplier;

/// Stock, purchases, consumption and unit cost of one inventory item for one
/// period in one warehouse.
///
/// Quantities are in stock units. `in_stock`, `purchase` and `cost` are fixed
/// when the period opens; the two consumption accumulators only grow while
/// sales are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionLedgerEntry {
    inventory_item_id: InventoryItemId,
    inventory_item_name: String,
    base_unit: String,
    unit_multiplier: UnitMultiplier,
    in_stock: Decimal,
    purchase: Decimal,
    predicted_consumption: Decimal,
    actual_consumption: Decimal,
    cost: Decimal,
    physical_count: Option<Decimal>,
}

impl ConsumptionLedgerEntry {
    /// Empty entry for `item`: no stock, no purchase, zero cost.
    pub fn create(item: &InventoryItem) -> Self {
        Self {
            inventory_item_id: item.id,
            inventory_item_name: item.name.clone(),
            base_unit: item.base_unit.clone(),
            unit_multiplier: item.unit_multiplier,
            in_stock: Decimal::ZERO,
            purchase: Decimal::ZERO,
            predicted_consumption: Decimal::ZERO,
            actual_consumption: Decimal::ZERO,
            cost: Decimal::ZERO,
            physical_count: None,
        }
    }

    /// Entry with its opening values set.
    pub fn opened(item: &InventoryItem, in_stock: Decimal, purchase: Decimal, cost: Decimal) -> Self {
        Self {
            in_stock,
            purchase,
            cost,
            ..Self::create(item)
        }
    }

    pub fn inventory_item_id(&self) -> InventoryItemId {
        self.inventory_item_id
    }

    pub fn inventory_item_name(&self) -> &str {
        &self.inventory_item_name
    }

    pub fn base_unit(&self) -> &str {
        &self.base_unit
    }

    pub fn unit_multiplier(&self) -> UnitMultiplier {
        self.unit_multiplier
    }

    pub fn in_stock(&self) -> Decimal {
        self.in_stock
    }

    pub fn purchase(&self) -> Decimal {
        self.purchase
    }

    /// Weighted-average unit cost per stock unit.
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn physical_count(&self) -> Option<Decimal> {
        self.physical_count
    }

    /// Unit cost per recipe unit (`cost / unit_multiplier`), zero when the
    /// quotient leaves `Decimal` range.
    pub fn recipe_unit_cost(&self) -> Decimal {
        self.cost
            .checked_div(self.unit_multiplier.value())
            .unwrap_or(Decimal::ZERO)
    }

    /// Opening stock + net purchase − predicted consumption.
    pub fn predicted_ending_stock(&self) -> Decimal {
        self.in_stock + self.purchase - self.predicted_consumption
    }

    /// Consumption implied by the physical count when one was recorded,
    /// otherwise the accumulated actual consumption.
    pub fn actual_consumption(&self) -> Decimal {
        match self.physical_count {
            Some(count) => self.in_stock + self.purchase - count,
            None => self.actual_consumption,
        }
    }

    /// Consumption implied by recorded sales and recipes.
    pub fn predicted_consumption(&self) -> Decimal {
        self.predicted_consumption
    }

    /// Valuation of the predicted ending stock at this period's unit cost.
    pub fn stock_value(&self) -> Decimal {
        self.predicted_ending_stock() * self.cost
    }

    /// Add sold quantity (already in stock units) to both consumption
    /// accumulators.
    pub fn record_consumption(&mut self, quantity: Decimal) -> DomainResult<()> {
        if quantity < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "consumption of {} cannot decrease (got {quantity})",
                self.inventory_item_name
            )));
        }
        self.predicted_consumption += quantity;
        self.actual_consumption += quantity;
        Ok(())
    }

    /// Set (or clear) the physical-count override reported by stock taking.
    pub fn record_physical_count(&mut self, count: Option<Decimal>) -> DomainResult<()> {
        if let Some(value) = count {
            if value < Decimal::ZERO {
                return Err(DomainError::validation(format!(
                    "physical count of {} cannot be negative (got {value})",
                    self.inventory_item_name
                )));
            }
        }
        self.physical_count = count;
        Ok(())
    }
}

impl Entity for ConsumptionLedgerEntry {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.inventory_item_id
    }
}
