//! Periodic consumption and costing engine.
//!
//! For one work period and one warehouse, a [`PeriodRecord`] owns a
//! consumption ledger entry per inventory item and a cost allocation entry per
//! sold portion. The [`CostingEngine`] opens the record from the previous
//! period and this period's stock movements, accumulates recipe-driven
//! consumption as sales arrive, and settles wastage-corrected portion costs
//! when the period closes.
//!
//! Everything here is synchronous and free of IO: catalogs, transactions and
//! the previous period are passed in, and the mutated record is handed back
//! to the caller to persist.

pub mod allocation;
pub mod config;
pub mod engine;
pub mod period;
pub mod work_period;

pub use allocation::CostAllocationEntry;
pub use config::CostingConfig;
pub use engine::{CostingEngine, PortionSale};
pub use period::{PeriodKey, PeriodRecord};
pub use work_period::WorkPeriod;
