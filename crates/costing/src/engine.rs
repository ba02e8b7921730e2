//! Costing engine: period open, sale recording and period-close settlement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{DomainError, DomainResult, PortionId, WarehouseId, round_cost};
use periodcost_inventory::{
    ConsumptionLedgerEntry, InventoryCatalog, InventoryItem, InventoryTransactionData, NetMovement,
};
use periodcost_recipes::{Recipe, RecipeCatalog};

use crate::allocation::CostAllocationEntry;
use crate::config::CostingConfig;
use crate::period::PeriodRecord;

/// Aggregated sale of one portion, as reported by the point of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortionSale {
    pub portion_id: PortionId,
    pub menu_item_name: String,
    pub quantity: Decimal,
}

/// Stateless orchestration over a [`PeriodRecord`].
///
/// Every operation either applies completely or returns an error and leaves
/// the record as it was. Zero denominators never fault: the affected cost
/// term is zero. Neither does a quotient outside `Decimal` range, which can
/// happen when residual stock is vanishingly small; it is logged and the
/// term is zero as well.
#[derive(Debug, Clone, Default)]
pub struct CostingEngine {
    config: CostingConfig,
}

impl CostingEngine {
    pub fn new(config: CostingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CostingConfig {
        &self.config
    }

    /// Build the ledger entry for `item` in `warehouse_id`.
    ///
    /// Opening stock carries over from the previous period (its physical count
    /// when recorded, else its predicted ending stock). The unit cost is the
    /// weighted average of the carried stock value and this period's
    /// transaction value.
    pub fn open_entry(
        &self,
        warehouse_id: WarehouseId,
        item: &InventoryItem,
        previous: Option<&PeriodRecord>,
        transactions: &[InventoryTransactionData],
    ) -> ConsumptionLedgerEntry {
        let previous_entry = previous.and_then(|p| p.entry(item.id));

        let in_stock = previous_entry
            .map(|p| p.physical_count().unwrap_or_else(|| p.predicted_ending_stock()))
            .unwrap_or(Decimal::ZERO);

        let movement = NetMovement::for_item(item.id, warehouse_id, transactions);
        let multiplier = item.unit_multiplier.value();
        let purchase = movement
            .inbound
            .checked_div(multiplier)
            .zip(movement.outbound.checked_div(multiplier))
            .and_then(|(inbound, outbound)| inbound.checked_sub(outbound))
            .unwrap_or_else(|| {
                tracing::warn!(
                    inventory_item = %item.id,
                    inbound = %movement.inbound,
                    outbound = %movement.outbound,
                    %multiplier,
                    "purchase quantity out of range; treated as zero"
                );
                Decimal::ZERO
            });

        let available = in_stock + purchase;
        let cost = if available > Decimal::ZERO {
            let average = previous_entry
                .map_or(Some(Decimal::ZERO), |p| p.cost().checked_mul(in_stock))
                .and_then(|previous_value| previous_value.checked_add(movement.total_price))
                .and_then(|value| value.checked_div(available));
            let cost = match average {
                Some(average) => round_cost(average, self.config.cost_scale),
                None => {
                    tracing::warn!(
                        inventory_item = %item.id,
                        %available,
                        total_price = %movement.total_price,
                        "unit cost out of range; left at zero"
                    );
                    Decimal::ZERO
                }
            };
            if cost < Decimal::ZERO {
                tracing::warn!(
                    inventory_item = %item.id,
                    computed = %cost,
                    "negative unit cost clamped to zero"
                );
                Decimal::ZERO
            } else {
                cost
            }
        } else {
            Decimal::ZERO
        };

        tracing::debug!(
            inventory_item = %item.id,
            %in_stock,
            %purchase,
            %cost,
            "opened consumption ledger entry"
        );

        ConsumptionLedgerEntry::opened(item, in_stock, purchase, cost)
    }

    /// Open a single item into `record`.
    pub fn open_item(
        &self,
        record: &mut PeriodRecord,
        item: &InventoryItem,
        previous: Option<&PeriodRecord>,
        transactions: &[InventoryTransactionData],
    ) -> DomainResult<()> {
        let entry = self.open_entry(record.warehouse_id(), item, previous, transactions);
        record.insert_entry(entry)?;
        record.bump_version();
        Ok(())
    }

    /// Open every catalog item into `record`, in catalog order. Returns the
    /// number of entries created.
    pub fn open_period<C>(
        &self,
        record: &mut PeriodRecord,
        catalog: &C,
        previous: Option<&PeriodRecord>,
        transactions: &[InventoryTransactionData],
    ) -> DomainResult<usize>
    where
        C: InventoryCatalog + ?Sized,
    {
        let mut staged = record.clone();
        let items = catalog.items();
        for item in &items {
            let entry = self.open_entry(staged.warehouse_id(), item, previous, transactions);
            staged.insert_entry(entry)?;
        }
        staged.bump_version();
        *record = staged;

        tracing::info!(
            period = %record.name(),
            warehouse = %record.warehouse_id(),
            entries = items.len(),
            carried_over = previous.is_some(),
            "period opened"
        );
        Ok(items.len())
    }

    /// Add the consumption implied by selling `sale_total` portions of
    /// `recipe` to the matching ledger entries.
    pub fn record_sale(
        &self,
        record: &mut PeriodRecord,
        recipe: &Recipe,
        sale_total: Decimal,
    ) -> DomainResult<()> {
        ensure_sale_total(sale_total)?;

        let mut consumed = Vec::new();
        for line in recipe.valid_items() {
            let entry = record.require_entry(line.inventory_item_id)?;
            let quantity = line
                .quantity
                .checked_mul(sale_total)
                .and_then(|total| total.checked_div(entry.unit_multiplier().value()))
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "consumption of {} × {sale_total} is out of range",
                        line.quantity
                    ))
                })?;
            consumed.push((line.inventory_item_id, quantity));
        }

        for (item, quantity) in consumed {
            record.entry_mut(item)?.record_consumption(quantity)?;
        }
        record.bump_version();
        Ok(())
    }

    /// Append a cost allocation carrying the per-portion cost predicted from
    /// this period's unit costs. Does nothing without a recipe.
    pub fn record_cost_allocation(
        &self,
        record: &mut PeriodRecord,
        recipe: Option<&Recipe>,
        menu_item_name: &str,
        sale_total: Decimal,
    ) -> DomainResult<()> {
        let Some(recipe) = recipe else {
            return Ok(());
        };
        ensure_sale_total(sale_total)?;

        let mut predicted = Decimal::ZERO;
        for line in recipe.valid_items() {
            let entry = record.require_entry(line.inventory_item_id)?;
            predicted = line
                .quantity
                .checked_mul(entry.recipe_unit_cost())
                .and_then(|cost| predicted.checked_add(cost))
                .ok_or_else(|| DomainError::validation("predicted portion cost is out of range"))?;
        }

        record.push_cost_allocation(CostAllocationEntry::predicted(
            recipe,
            menu_item_name,
            predicted,
            sale_total,
        ));
        record.bump_version();
        Ok(())
    }

    /// Record a batch of portion sales: consumption plus a cost allocation per
    /// sale. Portions without a recipe are skipped. Returns the number of
    /// sales applied; on error nothing is applied.
    pub fn record_portion_sales<C>(
        &self,
        record: &mut PeriodRecord,
        recipes: &C,
        sales: &[PortionSale],
    ) -> DomainResult<usize>
    where
        C: RecipeCatalog + ?Sized,
    {
        let mut staged = record.clone();
        let mut applied = 0;
        for sale in sales {
            let Some(recipe) = recipes.recipe_for_portion(sale.portion_id) else {
                tracing::warn!(
                    portion = %sale.portion_id,
                    menu_item = %sale.menu_item_name,
                    "no recipe for sold portion; skipping"
                );
                continue;
            };
            self.record_sale(&mut staged, recipe, sale.quantity)?;
            self.record_cost_allocation(
                &mut staged,
                Some(recipe),
                &sale.menu_item_name,
                sale.quantity,
            )?;
            applied += 1;
        }
        *record = staged;
        Ok(applied)
    }

    /// Settle the cost of every allocation whose portion has a recipe in
    /// `recipes`.
    ///
    /// Settled cost = fixed cost + Σ predicted item cost × (actual / predicted
    /// consumption of that item), rounded. Items with no predicted consumption
    /// contribute nothing. Allocations already settled keep their cost.
    /// Returns the number of allocations settled.
    pub fn settle_final_costs<C>(&self, record: &mut PeriodRecord, recipes: &C) -> DomainResult<usize>
    where
        C: RecipeCatalog + ?Sized,
    {
        let mut settlements = Vec::new();
        for recipe in recipes.recipes() {
            if record.cost_allocations_for(recipe.portion_id()).next().is_none() {
                continue;
            }
            let mut total = recipe.fixed_cost;
            for line in recipe.valid_items() {
                let entry = record.require_entry(line.inventory_item_id)?;
                total += corrected_item_cost(entry, line.quantity);
            }
            settlements.push((recipe.portion_id(), round_cost(total, self.config.cost_scale)));
        }

        let mut settled = 0;
        for allocation in record.cost_allocations_mut() {
            if allocation.is_settled() {
                continue;
            }
            if let Some((_, cost)) = settlements
                .iter()
                .find(|(portion, _)| *portion == allocation.portion_id())
            {
                allocation.settle(*cost);
                settled += 1;
            }
        }
        if settled > 0 {
            record.bump_version();
        }

        tracing::info!(
            period = %record.name(),
            warehouse = %record.warehouse_id(),
            settled,
            "final costs settled"
        );
        Ok(settled)
    }
}

/// Predicted cost of `quantity` recipe units scaled by the item's
/// actual/predicted consumption ratio; zero when nothing was predicted or
/// the ratio leaves `Decimal` range.
fn corrected_item_cost(entry: &ConsumptionLedgerEntry, quantity: Decimal) -> Decimal {
    let predicted = entry.predicted_consumption();
    if predicted <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    quantity
        .checked_mul(entry.recipe_unit_cost())
        .and_then(|cost| entry.actual_consumption().checked_mul(cost))
        .and_then(|scaled| scaled.checked_div(predicted))
        .unwrap_or_else(|| {
            tracing::warn!(
                inventory_item = %entry.inventory_item_id(),
                %predicted,
                actual = %entry.actual_consumption(),
                "corrected item cost out of range; contributes zero"
            );
            Decimal::ZERO
        })
}

fn ensure_sale_total(sale_total: Decimal) -> DomainResult<()> {
    if sale_total < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "sale total cannot be negative (got {sale_total})"
        )));
    }
    Ok(())
}
