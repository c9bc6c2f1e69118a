//! The dynamic resolution API: references in, shared load futures out.

use std::sync::Arc;

use lode_canon::{Canonicalize, CanonicalKey, ResolveError};
use lode_ref::{AssetSpecifier, OriginContext, Reference};

use crate::{LoadCoordinator, LoadHandle, LoadState, LoaderBackend};

/// Front door of the engine: canonicalize, then coordinate the load.
///
/// The one semantic rule that matters here: resolution reads the origin and
/// specifier *from the reference*, never from the requesting call site. Code
/// in module `C` importing a reference declared in module `A` resolves it
/// exactly as `A` would — that is what lets a third module initiate a load
/// it never declared.
pub struct AssetEngine<C, B: LoaderBackend> {
    canon: C,
    coordinator: LoadCoordinator<B>,
}

impl<C: Canonicalize, B: LoaderBackend> AssetEngine<C, B> {
    pub fn new(canon: C, backend: Arc<B>) -> Self {
        AssetEngine {
            canon,
            coordinator: LoadCoordinator::new(backend),
        }
    }

    /// Resolve and load the asset a reference points at.
    ///
    /// Canonicalization failures surface immediately as [`ResolveError`];
    /// pipeline failures settle the returned handle as `Rejected`. First
    /// use of a pair may probe the environment — this is the deferred cost
    /// that reference creation avoided.
    pub fn import_from_reference(
        &self,
        reference: &Reference,
    ) -> Result<LoadHandle<B::Record>, ResolveError> {
        self.import(reference.origin(), reference.specifier())
    }

    /// Raw-pair variant of [`AssetEngine::import_from_reference`].
    pub fn import(
        &self,
        origin: &OriginContext,
        specifier: &AssetSpecifier,
    ) -> Result<LoadHandle<B::Record>, ResolveError> {
        let key = self.canon.canonicalize(origin, specifier)?;
        tracing::debug!(%origin, %specifier, %key, "importing asset");
        Ok(self.coordinator.request(&key))
    }

    /// Canonicalize without requesting a load.
    pub fn canonicalize(
        &self,
        origin: &OriginContext,
        specifier: &AssetSpecifier,
    ) -> Result<CanonicalKey, ResolveError> {
        self.canon.canonicalize(origin, specifier)
    }

    /// Non-blocking cache state for `key`.
    pub fn probe(&self, key: &CanonicalKey) -> LoadState {
        self.coordinator.probe(key)
    }

    /// Clear `key`'s cache entry (test isolation, hot reload). In-flight
    /// waiters keep their original outcome; the next import starts fresh.
    pub fn evict(&self, key: &CanonicalKey) -> bool {
        self.coordinator.evict(key)
    }

    /// The coordinator, for direct key-level requests.
    pub fn coordinator(&self) -> &LoadCoordinator<B> {
        &self.coordinator
    }
}

#[cfg(test)]
mod tests;
