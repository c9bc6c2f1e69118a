//! Shared load futures.
//!
//! An entry slot is the synchronization point between the one caller driving
//! a pipeline and everyone waiting on it. Handles are cheap clones over the
//! slot; dropping a handle detaches only that waiter and never disturbs the
//! shared pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::Outcome;

pub(crate) enum SlotState<R> {
    Pending,
    Settled(Outcome<R>),
}

/// One generation of a cache entry: a settle-once cell plus its waiters.
pub(crate) struct EntrySlot<R> {
    state: Mutex<SlotState<R>>,
    cond: Condvar,
}

impl<R> EntrySlot<R> {
    pub(crate) fn pending() -> Self {
        EntrySlot {
            state: Mutex::new(SlotState::Pending),
            cond: Condvar::new(),
        }
    }

    /// Settle the slot and wake all waiters.
    ///
    /// Returns `false` without overwriting if the slot was already settled;
    /// the slot transitions out of `Pending` at most once.
    pub(crate) fn settle(&self, outcome: Outcome<R>) -> bool {
        let mut state = self.state.lock();
        if matches!(*state, SlotState::Settled(_)) {
            return false;
        }
        *state = SlotState::Settled(outcome);
        drop(state);
        self.cond.notify_all();
        true
    }

    /// Non-blocking view of the current state.
    pub(crate) fn snapshot(&self) -> Option<Outcome<R>> {
        match &*self.state.lock() {
            SlotState::Pending => None,
            SlotState::Settled(outcome) => Some(outcome.clone()),
        }
    }
}

/// A shared future for one key's load.
///
/// Every concurrent requester of a key holds a handle to the same slot and
/// observes the same settled [`Outcome`] — the same `Arc`, not an equal
/// copy. Waiting (with or without timeout) only parks the local caller;
/// timing out or dropping the handle cannot cancel or corrupt the pipeline
/// for other waiters.
pub struct LoadHandle<R> {
    slot: Arc<EntrySlot<R>>,
}

impl<R> std::fmt::Debug for LoadHandle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHandle").finish_non_exhaustive()
    }
}

impl<R> LoadHandle<R> {
    pub(crate) fn new(slot: Arc<EntrySlot<R>>) -> Self {
        LoadHandle { slot }
    }

    /// A handle that is already settled with `outcome`.
    pub(crate) fn settled(outcome: Outcome<R>) -> Self {
        let slot = EntrySlot::pending();
        slot.settle(outcome);
        LoadHandle {
            slot: Arc::new(slot),
        }
    }

    /// Non-blocking check: the outcome if the load has settled.
    pub fn poll(&self) -> Option<Outcome<R>> {
        self.slot.snapshot()
    }

    /// Block until the load settles.
    pub fn wait(&self) -> Outcome<R> {
        let mut state = self.slot.state.lock();
        loop {
            if let SlotState::Settled(outcome) = &*state {
                return outcome.clone();
            }
            self.slot.cond.wait(&mut state);
        }
    }

    /// Block until the load settles or `timeout` elapses.
    ///
    /// `None` on timeout detaches only this waiter; the pipeline and every
    /// other waiter are unaffected.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Outcome<R>> {
        let deadline = Instant::now() + timeout;
        let mut state = self.slot.state.lock();
        loop {
            if let SlotState::Settled(outcome) = &*state {
                return Some(outcome.clone());
            }
            if self.slot.cond.wait_until(&mut state, deadline).timed_out() {
                return match &*state {
                    SlotState::Settled(outcome) => Some(outcome.clone()),
                    SlotState::Pending => None,
                };
            }
        }
    }
}

impl<R> Clone for LoadHandle<R> {
    fn clone(&self) -> Self {
        LoadHandle {
            slot: Arc::clone(&self.slot),
        }
    }
}
