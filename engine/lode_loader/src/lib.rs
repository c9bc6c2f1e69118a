//! Record cache, load coordinator, and dynamic resolution API.
//!
//! This crate turns canonical keys into loaded records, exactly once per key
//! no matter how many callers race:
//!
//! ```text
//! Reference ──► AssetEngine::import_from_reference
//!                   │ canonicalize (lode_canon)
//!                   ▼
//!               LoadCoordinator::request(key)
//!                   │
//!                   ▼
//!               RecordCache::begin(key) ── one winner per key
//!                   │
//!         winner    │    everyone else
//!   fetch→parse→link→evaluate   LoadHandle (shared future)
//!                   │                │
//!                   ▼                ▼
//!               settle ───────► same Outcome for all waiters
//! ```
//!
//! Per key the state machine is `Absent → Pending → {Fulfilled, Rejected}`,
//! monotonic, settled at most once. Rejections are terminal too: a failed key
//! stays failed — without silently re-running the pipeline — until the host
//! explicitly evicts it. Retry, fallback, and UI policy belong to calling
//! code, not this engine.

mod backend;
mod cache;
mod coordinator;
mod engine;
mod error;
mod handle;
mod record;

pub use backend::LoaderBackend;
pub use cache::{Begin, LoadTicket, RecordCache};
pub use coordinator::LoadCoordinator;
pub use engine::AssetEngine;
pub use error::{LoadError, LoadStage};
pub use handle::LoadHandle;
pub use record::{LoadState, Outcome};

// The loader's public surface speaks these types.
pub use lode_canon::{Canonicalize, CanonicalKey, ResolveError};
pub use lode_ref::{AssetSpecifier, OriginContext, Reference, ReferenceRegistry};
