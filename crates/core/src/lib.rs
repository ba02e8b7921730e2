//! `periodcost-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory,
//! recipe and costing crates (no infrastructure concerns, no IO).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod rounding;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventoryItemId, MenuItemId, PortionId, WarehouseId, WorkPeriodId};
pub use rounding::{DEFAULT_COST_SCALE, round_cost};
