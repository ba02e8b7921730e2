//! JSON scenario replay: catalogs plus a sequence of work periods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{DomainResult, InventoryItemId, WarehouseId};
use periodcost_costing::{CostingEngine, PeriodRecord, PortionSale, WorkPeriod};
use periodcost_inventory::{InventoryItem, InventoryTransactionData};
use periodcost_recipes::Recipe;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub warehouse_id: WarehouseId,
    pub inventory_items: Vec<InventoryItem>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Last closed period before the first replayed one, if any.
    #[serde(default)]
    pub previous_period: Option<PeriodRecord>,
    pub periods: Vec<ScenarioPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioPeriod {
    pub work_period: WorkPeriod,
    #[serde(default)]
    pub transactions: Vec<InventoryTransactionData>,
    #[serde(default)]
    pub sales: Vec<PortionSale>,
    #[serde(default)]
    pub physical_counts: Vec<PhysicalCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicalCount {
    pub inventory_item_id: InventoryItemId,
    pub count: Decimal,
}

/// Open, sell, count and settle each period in order, carrying every period
/// into the next.
pub fn replay(engine: &CostingEngine, scenario: &Scenario) -> DomainResult<Vec<PeriodRecord>> {
    let mut records: Vec<PeriodRecord> = Vec::with_capacity(scenario.periods.len());

    for period in &scenario.periods {
        let previous = records.last().or(scenario.previous_period.as_ref());
        let mut record = PeriodRecord::create(
            &period.work_period,
            scenario.warehouse_id,
            period.work_period.start_date,
        );

        engine.open_period(
            &mut record,
            &scenario.inventory_items,
            previous,
            &period.transactions,
        )?;
        engine.record_portion_sales(&mut record, &scenario.recipes, &period.sales)?;
        for count in &period.physical_counts {
            record.record_physical_count(count.inventory_item_id, Some(count.count))?;
        }
        engine.settle_final_costs(&mut record, &scenario.recipes)?;
        record.touch(period.work_period.end_date);

        tracing::info!(
            period = %record.name(),
            predicted = %record.total_predicted_cost(),
            settled = %record.total_settled_cost(),
            "period replayed"
        );
        records.push(record);
    }

    Ok(records)
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub periods: Vec<PeriodSummary>,
}

#[derive(Debug, Serialize)]
pub struct PeriodSummary {
    pub name: String,
    pub total_predicted_cost: Decimal,
    pub total_settled_cost: Decimal,
    pub inventory_value: Decimal,
    pub record: PeriodRecord,
}

impl ReplayReport {
    pub fn new(records: Vec<PeriodRecord>) -> Self {
        let periods = records
            .into_iter()
            .map(|record| PeriodSummary {
                name: record.name().to_string(),
                total_predicted_cost: record.total_predicted_cost(),
                total_settled_cost: record.total_settled_cost(),
                inventory_value: record.inventory_value(),
                record,
            })
            .collect();
        Self { periods }
    }
}
