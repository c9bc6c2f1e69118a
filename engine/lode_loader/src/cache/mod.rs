//! The record cache: keyed load results with single-winner admission.
//!
//! The only shared mutable state in the engine. All mutation goes through
//! [`RecordCache::begin`] and [`RecordCache::settle`]; the DashMap entry API
//! makes `begin` the atomic compare-and-insert point, so exactly one caller
//! per key generation wins the right to drive the pipeline.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use lode_canon::CanonicalKey;

use crate::handle::EntrySlot;
use crate::{LoadError, LoadHandle, LoadState, Outcome};

/// Result of [`RecordCache::begin`].
pub enum Begin<R> {
    /// This caller transitioned the key `Absent → Pending` and must drive
    /// the pipeline, then settle the ticket.
    Winner(LoadTicket<R>),
    /// Another caller is driving; this handle shares its outcome.
    Joined(LoadHandle<R>),
    /// The key already settled; the terminal outcome, shared.
    Settled(Outcome<R>),
}

/// Capability to settle one key generation, held by the pipeline driver.
///
/// Consumed by value on settle, so a generation transitions out of `Pending`
/// at most once by construction. Dropping an unsettled ticket (a panicking
/// backend unwinds through the driver) rejects the generation with
/// [`LoadError::Abandoned`] so waiters are woken rather than stranded.
pub struct LoadTicket<R> {
    key: CanonicalKey,
    slot: Arc<EntrySlot<R>>,
    settled: bool,
}

impl<R> LoadTicket<R> {
    fn new(key: CanonicalKey, slot: Arc<EntrySlot<R>>) -> Self {
        LoadTicket {
            key,
            slot,
            settled: false,
        }
    }

    /// The key this ticket settles.
    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// A waiter handle for this generation, for the driver to hand out or
    /// return once the pipeline completes.
    pub fn handle(&self) -> LoadHandle<R> {
        LoadHandle::new(Arc::clone(&self.slot))
    }

    fn complete(&mut self, outcome: Outcome<R>) {
        if self.settled {
            return;
        }
        self.settled = true;
        let fresh = self.slot.settle(outcome);
        debug_assert!(fresh, "ticket settled an already-settled slot");
    }
}

impl<R> Drop for LoadTicket<R> {
    fn drop(&mut self) {
        if !self.settled {
            let abandoned = LoadError::Abandoned {
                key: self.key.clone(),
            };
            tracing::debug!(key = %self.key, "load ticket dropped unsettled");
            self.complete(Err(Arc::new(abandoned)));
        }
    }
}

/// Keyed store of load results: `Absent → Pending → {Fulfilled, Rejected}`.
///
/// Keyed by [`CanonicalKey`], never by reference identity — many references
/// mapping to one key share one entry, which is what lets a third module
/// initiate or join a load someone else declared.
pub struct RecordCache<R> {
    entries: DashMap<CanonicalKey, Arc<EntrySlot<R>>>,
}

impl<R> Default for RecordCache<R> {
    fn default() -> Self {
        RecordCache {
            entries: DashMap::new(),
        }
    }
}

impl<R> RecordCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking state check.
    pub fn probe(&self, key: &CanonicalKey) -> LoadState {
        match self.entries.get(key) {
            None => LoadState::Absent,
            Some(slot) => match slot.snapshot() {
                None => LoadState::Pending,
                Some(Ok(_)) => LoadState::Fulfilled,
                Some(Err(_)) => LoadState::Rejected,
            },
        }
    }

    /// Atomically admit a load for `key`.
    ///
    /// Exactly one concurrent caller per absent key receives
    /// [`Begin::Winner`]; the rest share the winner's slot. A settled entry
    /// short-circuits to [`Begin::Settled`] without any locking beyond the
    /// map shard.
    pub fn begin(&self, key: &CanonicalKey) -> Begin<R> {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(entry) => {
                let slot = Arc::clone(entry.get());
                // Release the shard before inspecting slot state.
                drop(entry);
                match slot.snapshot() {
                    None => Begin::Joined(LoadHandle::new(slot)),
                    Some(outcome) => Begin::Settled(outcome),
                }
            }
            Entry::Vacant(entry) => {
                let slot = Arc::new(EntrySlot::pending());
                entry.insert(Arc::clone(&slot));
                Begin::Winner(LoadTicket::new(key.clone(), slot))
            }
        }
    }

    /// Settle the ticket's generation; all waiters observe `outcome`.
    pub fn settle(&self, mut ticket: LoadTicket<R>, outcome: Outcome<R>) {
        ticket.complete(outcome);
    }

    /// Remove `key`'s entry, settled or pending.
    ///
    /// In-flight waiters hold the slot directly and still receive the
    /// original outcome when the detached pipeline settles; the next
    /// [`RecordCache::begin`] for the key starts a fresh generation.
    pub fn evict(&self, key: &CanonicalKey) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            tracing::debug!(%key, "evicted record cache entry");
        }
        removed
    }

    /// Number of cached entries (pending and settled).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
