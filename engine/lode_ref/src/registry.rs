//! Reference registry: mints and retains reference handles.

use dashmap::DashMap;

use crate::{AssetSpecifier, OriginContext, Reference, ReferenceId, SpecifierError};

/// Creates and stores [`Reference`] handles.
///
/// Creation is pure construction: the specifier is validated structurally,
/// the origin is captured, and a fresh identity is minted. No resolution, no
/// I/O, no failure beyond [`SpecifierError`]. The registry retains a handle
/// to every reference it mints so hosts can enumerate or look up declaration
/// sites later; retained handles share the reference's inner allocation.
///
/// Thread-safe; hosts typically keep one registry per loading environment.
#[derive(Default)]
pub struct ReferenceRegistry {
    references: DashMap<ReferenceId, Reference>,
}

impl ReferenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a reference binding `origin` to `specifier`.
    ///
    /// Fails only on structurally invalid specifier text.
    pub fn create(
        &self,
        origin: OriginContext,
        specifier: &str,
    ) -> Result<Reference, SpecifierError> {
        let specifier = AssetSpecifier::new(specifier)?;
        let reference = Reference::mint(origin, specifier);
        self.references.insert(reference.id(), reference.clone());
        Ok(reference)
    }

    /// Look up a previously minted reference by identity.
    pub fn get(&self, id: ReferenceId) -> Option<Reference> {
        self.references.get(&id).map(|r| r.value().clone())
    }

    /// Number of references minted so far.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Whether no references have been minted.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
