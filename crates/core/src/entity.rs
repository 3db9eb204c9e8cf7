//! Entity traits: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Catalog entity addressed by a unique business code (products, raw materials).
///
/// Uniqueness of `code` is enforced by the catalog service, not the entity itself:
/// a single entity cannot see its siblings.
pub trait CatalogEntity: Entity {
    fn code(&self) -> &str;
}
