//! Specifier canonicalization for the lode asset engine.
//!
//! Maps an `(OriginContext, AssetSpecifier)` pair to a [`CanonicalKey`]: the
//! stable, environment-defined identity the record cache is keyed by.
//!
//! ```text
//! (origin, specifier) ──► Canonicalize::canonicalize ──► CanonicalKey
//!                              │
//!                              ├── FsCanonicalizer    (filesystem probing)
//!                              └── MemoCanonicalizer  (per-pair result cache)
//! ```
//!
//! Canonicalization is deliberately *not* performed when a reference is
//! created — it may probe the filesystem and is deferred until the first
//! resolution request. Repeated canonicalization of the same pair must yield
//! an equal key for the lifetime of the process; wrapping any canonicalizer
//! in [`MemoCanonicalizer`] makes that hold even if the environment shifts
//! underneath.

mod fs;
mod key;
mod memo;
mod resolve;

pub use fs::{FsCanonConfig, FsCanonicalizer};
pub use key::CanonicalKey;
pub use memo::MemoCanonicalizer;
pub use resolve::{Canonicalize, ResolveError};
