//! Opaque reference handles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{AssetSpecifier, OriginContext};

static NEXT_REFERENCE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a [`Reference`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ReferenceId(u64);

impl ReferenceId {
    /// Mint a fresh id. Never reused within a process.
    pub(crate) fn next() -> Self {
        ReferenceId(NEXT_REFERENCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value, for diagnostics.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceId({})", self.0)
    }
}

struct ReferenceInner {
    id: ReferenceId,
    origin: OriginContext,
    specifier: AssetSpecifier,
}

/// A lightweight, non-loading handle to a relatively-specified asset.
///
/// Binds the [`OriginContext`] it was declared in to the specifier text as
/// written. Creating a reference performs no I/O and no resolution; the
/// origin travels with the handle, so a third party holding the reference
/// resolves it against the *declaring* context, never its own.
///
/// Equality and hashing are by identity ([`ReferenceId`]), not by content:
/// two references minted from the same origin and specifier are distinct
/// objects. They still canonicalize to the same key and therefore share one
/// cache entry downstream. Clones of a single reference share its identity —
/// a clone is the same handle, not a new declaration.
#[derive(Clone)]
pub struct Reference {
    inner: Arc<ReferenceInner>,
}

impl Reference {
    pub(crate) fn mint(origin: OriginContext, specifier: AssetSpecifier) -> Self {
        Reference {
            inner: Arc::new(ReferenceInner {
                id: ReferenceId::next(),
                origin,
                specifier,
            }),
        }
    }

    /// Identity of this reference.
    pub fn id(&self) -> ReferenceId {
        self.inner.id
    }

    /// The context this reference was declared in.
    pub fn origin(&self) -> &OriginContext {
        &self.inner.origin
    }

    /// The specifier text, exactly as written at the declaration site.
    pub fn specifier(&self) -> &AssetSpecifier {
        &self.inner.specifier
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Reference {}

impl std::hash::Hash for Reference {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("id", &self.inner.id)
            .field("origin", &self.inner.origin)
            .field("specifier", &self.inner.specifier)
            .finish()
    }
}
