//! Domain error model.

use thiserror::Error;

use crate::id::InventoryItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Arithmetic edge cases (empty stock, zero predicted consumption) are not
/// errors: they resolve to a zero cost term where they occur and never reach
/// this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a non-positive unit multiplier).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A recipe item references an inventory item that has no ledger entry in
    /// the current period (catalog and period are out of sync).
    #[error("no consumption ledger entry for inventory item {inventory_item_id}")]
    LedgerEntryNotFound { inventory_item_id: InventoryItemId },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn ledger_entry_not_found(inventory_item_id: InventoryItemId) -> Self {
        Self::LedgerEntryNotFound { inventory_item_id }
    }

    /// True for catalog/period desynchronization failures.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::LedgerEntryNotFound { .. })
    }
}
