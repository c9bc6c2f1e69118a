//! Per-key load states and settled outcomes.

use std::fmt;
use std::sync::Arc;

use crate::LoadError;

/// The terminal result of a load, shared by every waiter.
///
/// Success and failure are both behind `Arc`s: all current and future
/// requesters of a key observe the *same* record or the *same* error, which
/// is what makes pointer-identity assertions in dedup tests meaningful.
pub type Outcome<R> = Result<Arc<R>, Arc<LoadError>>;

/// Observable state of a canonical key in the record cache.
///
/// Monotonic per cache entry: `Absent → Pending → {Fulfilled, Rejected}`,
/// with at most one transition out of `Pending`. Eviction removes the entry
/// (back to `Absent` for new requesters) without touching in-flight waiters.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LoadState {
    /// Never requested (or evicted since).
    Absent,
    /// A pipeline is in flight.
    Pending,
    /// Settled with a record.
    Fulfilled,
    /// Settled with an error; terminal until evicted.
    Rejected,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Absent => write!(f, "absent"),
            LoadState::Pending => write!(f, "pending"),
            LoadState::Fulfilled => write!(f, "fulfilled"),
            LoadState::Rejected => write!(f, "rejected"),
        }
    }
}
