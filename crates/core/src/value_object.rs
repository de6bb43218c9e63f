//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A classification entry or a computed set of totals has no identity of its
/// own: two instances holding the same values are interchangeable. Value
/// objects are never mutated in place; a changed value is a new instance.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
