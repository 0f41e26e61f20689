//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog nodes are addressed by identity (a product by its id, a product model
/// by its code); hierarchy links between them are stored as identifiers, never as
/// owning pointers.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
