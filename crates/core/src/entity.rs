//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Invoice lines are entities: editing every field of a line still leaves the
/// same line, addressed by its id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
