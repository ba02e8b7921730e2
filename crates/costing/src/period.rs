use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{
    AggregateRoot, DomainError, DomainResult, Entity, InventoryItemId, PortionId, WarehouseId,
    WorkPeriodId,
};
use periodcost_inventory::ConsumptionLedgerEntry;

use crate::allocation::CostAllocationEntry;
use crate::work_period::WorkPeriod;

/// Identity of a period record: one per (work period, warehouse).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub work_period_id: WorkPeriodId,
    pub warehouse_id: WarehouseId,
}

/// Aggregate root: consumption and cost state of one warehouse over one work
/// period.
///
/// Owns its ledger entries (one per inventory item, in catalog order) and its
/// cost allocations (in sale order). Once the next period opens the record is
/// treated as read-only history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecordData")]
pub struct PeriodRecord {
    id: PeriodKey,
    name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    last_update_time: DateTime<Utc>,
    version: u64,
    entries: Vec<ConsumptionLedgerEntry>,
    cost_allocations: Vec<CostAllocationEntry>,
    #[serde(skip)]
    index: HashMap<InventoryItemId, usize>,
}

/// Serialized shape of [`PeriodRecord`]; the item index is rebuilt on load.
#[derive(Deserialize)]
struct PeriodRecordData {
    id: PeriodKey,
    name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    last_update_time: DateTime<Utc>,
    version: u64,
    entries: Vec<ConsumptionLedgerEntry>,
    cost_allocations: Vec<CostAllocationEntry>,
}

impl TryFrom<PeriodRecordData> for PeriodRecord {
    type Error = DomainError;

    fn try_from(data: PeriodRecordData) -> Result<Self, Self::Error> {
        let mut record = Self {
            id: data.id,
            name: data.name,
            start_date: data.start_date,
            end_date: data.end_date,
            last_update_time: data.last_update_time,
            version: data.version,
            entries: Vec::with_capacity(data.entries.len()),
            cost_allocations: data.cost_allocations,
            index: HashMap::new(),
        };
        for entry in data.entries {
            record.insert_entry(entry)?;
        }
        Ok(record)
    }
}

impl PeriodRecord {
    /// Fresh record for `warehouse_id` bound to the work period's date range.
    pub fn create(
        work_period: &WorkPeriod,
        warehouse_id: WarehouseId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PeriodKey {
                work_period_id: work_period.id,
                warehouse_id,
            },
            name: work_period.display_name(),
            start_date: work_period.start_date,
            end_date: work_period.end_date,
            last_update_time: created_at,
            version: 0,
            entries: Vec::new(),
            cost_allocations: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn work_period_id(&self) -> WorkPeriodId {
        self.id.work_period_id
    }

    pub fn warehouse_id(&self) -> WarehouseId {
        self.id.warehouse_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn last_update_time(&self) -> DateTime<Utc> {
        self.last_update_time
    }

    /// Record that the caller persisted or refreshed the record at `at`.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_update_time = at;
    }

    pub fn entries(&self) -> &[ConsumptionLedgerEntry] {
        &self.entries
    }

    pub fn entry(&self, item: InventoryItemId) -> Option<&ConsumptionLedgerEntry> {
        self.index.get(&item).map(|&i| &self.entries[i])
    }

    /// Like [`entry`](Self::entry) but a missing entry is a lookup failure.
    pub fn require_entry(&self, item: InventoryItemId) -> DomainResult<&ConsumptionLedgerEntry> {
        self.entry(item)
            .ok_or_else(|| DomainError::ledger_entry_not_found(item))
    }

    pub(crate) fn entry_mut(
        &mut self,
        item: InventoryItemId,
    ) -> DomainResult<&mut ConsumptionLedgerEntry> {
        match self.index.get(&item) {
            Some(&i) => Ok(&mut self.entries[i]),
            None => Err(DomainError::ledger_entry_not_found(item)),
        }
    }

    /// Append a ledger entry; an item may only appear once per period.
    pub(crate) fn insert_entry(&mut self, entry: ConsumptionLedgerEntry) -> DomainResult<()> {
        let item = *entry.id();
        if self.index.contains_key(&item) {
            return Err(DomainError::invariant(format!(
                "period {} already has a ledger entry for inventory item {item}",
                self.name
            )));
        }
        self.index.insert(item, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn cost_allocations(&self) -> &[CostAllocationEntry] {
        &self.cost_allocations
    }

    pub fn cost_allocations_for(
        &self,
        portion: PortionId,
    ) -> impl Iterator<Item = &CostAllocationEntry> {
        self.cost_allocations
            .iter()
            .filter(move |c| c.portion_id() == portion)
    }

    pub(crate) fn push_cost_allocation(&mut self, allocation: CostAllocationEntry) {
        self.cost_allocations.push(allocation);
    }

    pub(crate) fn cost_allocations_mut(&mut self) -> &mut [CostAllocationEntry] {
        &mut self.cost_allocations
    }

    /// Store the physical count reported by stock taking for `item`.
    pub fn record_physical_count(
        &mut self,
        item: InventoryItemId,
        count: Option<Decimal>,
    ) -> DomainResult<()> {
        self.entry_mut(item)?.record_physical_count(count)?;
        self.bump_version();
        Ok(())
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Sum of per-portion predicted cost × quantity over all allocations.
    pub fn total_predicted_cost(&self) -> Decimal {
        self.cost_allocations
            .iter()
            .map(CostAllocationEntry::total_predicted_cost)
            .sum()
    }

    /// Sum of per-portion settled cost × quantity over all allocations.
    pub fn total_settled_cost(&self) -> Decimal {
        self.cost_allocations
            .iter()
            .map(CostAllocationEntry::total_settled_cost)
            .sum()
    }

    /// Valuation of predicted ending stock across all items.
    pub fn inventory_value(&self) -> Decimal {
        self.entries
            .iter()
            .map(ConsumptionLedgerEntry::stock_value)
            .sum()
    }
}

impl AggregateRoot for PeriodRecord {
    type Id = PeriodKey;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
