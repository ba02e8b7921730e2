//! Aggregate root trait for the costing domain models.

/// Aggregate root marker + minimal interface.
///
/// An aggregate owns its child records by value; callers persist the whole
/// aggregate as one unit after each mutating operation.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Incremented once per successful mutating operation, so a persistence
    /// layer can detect stale writes.
    fn version(&self) -> u64;
}
