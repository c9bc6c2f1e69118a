//! The canonicalization contract.

use lode_ref::{AssetSpecifier, OriginContext};
use thiserror::Error;

use crate::CanonicalKey;

/// Canonicalization failure.
///
/// Surfaced to the caller of the resolution API; never retried internally.
/// `Clone` so memoized canonicalizers can cache failures alongside successes
/// — I/O detail is carried as a message for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The specifier cannot be interpreted by this canonicalizer at all.
    #[error("malformed specifier `{specifier}`: {reason}")]
    Malformed { specifier: String, reason: String },
    /// No candidate exists for the specifier in this origin.
    #[error("cannot resolve `{specifier}` from `{origin}` ({probed} candidates probed)")]
    NotFound {
        specifier: String,
        origin: String,
        probed: usize,
    },
    /// The environment failed while probing a candidate.
    #[error("i/o error while probing `{path}`: {message}")]
    Io { path: String, message: String },
}

/// Maps an `(origin, specifier)` pair to its canonical identity.
///
/// # Contract
///
/// - Deterministic for given inputs within a process lifetime.
/// - May consult external state (filesystem probing); callers must treat a
///   call as a suspend point.
/// - Never triggers loading; the record cache is downstream of this.
///
/// Implementations may cache their own results keyed by the input pair —
/// see [`MemoCanonicalizer`](crate::MemoCanonicalizer) — separately from the
/// record cache.
pub trait Canonicalize: Send + Sync {
    /// Resolve `specifier`, as declared in `origin`, to a canonical key.
    fn canonicalize(
        &self,
        origin: &OriginContext,
        specifier: &AssetSpecifier,
    ) -> Result<CanonicalKey, ResolveError>;
}
