//! Value objects: no identity, equal when their contents are equal.

/// Marker for value objects.
///
/// A value cell and an attribute mapping are value objects; products and
/// product models are entities (see [`crate::Entity`]).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
