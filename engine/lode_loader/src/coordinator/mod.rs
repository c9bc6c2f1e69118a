//! The load coordinator: one pipeline execution per key, shared by all.

use std::sync::Arc;

use lode_canon::CanonicalKey;

use crate::{Begin, LoadHandle, LoadState, LoaderBackend, RecordCache};

/// Orchestrates backend pipelines over the record cache.
///
/// `request` deduplicates concurrent loads: per key generation the backend
/// runs at most once, driven inline on the thread that won admission, and
/// every requester — before or after settlement — observes the same shared
/// outcome. There is no built-in retry: a rejected key stays rejected until
/// the host evicts it, so repeated requests cannot turn into retry storms.
pub struct LoadCoordinator<B: LoaderBackend> {
    backend: Arc<B>,
    cache: RecordCache<B::Record>,
}

impl<B: LoaderBackend> LoadCoordinator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        LoadCoordinator {
            backend,
            cache: RecordCache::new(),
        }
    }

    /// Request the record for `key`, loading it if this is the first ask.
    ///
    /// Cache hits return an already-settled handle; a pending entry returns
    /// the in-flight generation's shared handle; a miss makes this caller
    /// the driver. Drivers settle even on panic (ticket drop rejects), so
    /// waiters never hang.
    pub fn request(&self, key: &CanonicalKey) -> LoadHandle<B::Record> {
        match self.cache.begin(key) {
            Begin::Settled(outcome) => {
                tracing::debug!(%key, "record cache hit");
                LoadHandle::settled(outcome)
            }
            Begin::Joined(handle) => {
                tracing::debug!(%key, "joined in-flight load");
                handle
            }
            Begin::Winner(ticket) => {
                let handle = ticket.handle();
                let outcome = match self.run_pipeline(key) {
                    Ok(record) => {
                        tracing::debug!(%key, "load fulfilled");
                        Ok(Arc::new(record))
                    }
                    Err(e) => {
                        tracing::debug!(%key, error = %e, "load rejected");
                        Err(Arc::new(e))
                    }
                };
                self.cache.settle(ticket, outcome);
                handle
            }
        }
    }

    /// Non-blocking cache state for `key`.
    pub fn probe(&self, key: &CanonicalKey) -> LoadState {
        self.cache.probe(key)
    }

    /// Clear `key`'s entry; see [`RecordCache::evict`].
    pub fn evict(&self, key: &CanonicalKey) -> bool {
        self.cache.evict(key)
    }

    /// The underlying cache, for introspection.
    pub fn cache(&self) -> &RecordCache<B::Record> {
        &self.cache
    }

    fn run_pipeline(&self, key: &CanonicalKey) -> Result<B::Record, crate::LoadError> {
        tracing::debug!(%key, "load pipeline: fetch");
        let raw = self.backend.fetch(key)?;
        tracing::trace!(%key, "load pipeline: parse");
        let unit = self.backend.parse(key, raw)?;
        tracing::trace!(%key, "load pipeline: link");
        let record = self.backend.link(key, unit)?;
        tracing::trace!(%key, "load pipeline: evaluate");
        self.backend.evaluate(key, record)
    }
}
