//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records that have not been persisted yet carry no identifier, so the id is
/// optional.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the entity has been assigned an identifier by the store.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
