//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// List stores use the identifier to patch or drop a cached record after the
/// backend confirms a mutation.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
