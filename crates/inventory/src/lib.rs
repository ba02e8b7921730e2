//! Inventory domain module for periodic costing.
//!
//! Catalog records, stock-movement facts and the per-period consumption
//! ledger entry, implemented purely as deterministic domain logic (no IO, no
//! storage).

pub mod consumption;
pub mod item;
pub mod transaction;
pub mod unit;

pub use consumption::ConsumptionLedgerEntry;
pub use item::{InventoryCatalog, InventoryItem, ItemStatus};
pub use transaction::{InventoryTransactionData, NetMovement};
pub use unit::UnitMultiplier;
