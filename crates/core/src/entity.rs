//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities owned by an aggregate are looked up by this identifier; it must be
/// unique within the owning aggregate.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
