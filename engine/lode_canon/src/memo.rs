//! Memoizing canonicalizer wrapper.

use lode_ref::{AssetSpecifier, OriginContext};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Canonicalize, CanonicalKey, ResolveError};

type MemoKey = (OriginContext, AssetSpecifier);
type MemoResult = Result<CanonicalKey, ResolveError>;

/// Caches canonicalization results per `(origin, specifier)` pair.
///
/// Both successes and failures are cached: canonicalization must be stable
/// for the process lifetime, so the first answer for a pair is the answer,
/// even if the environment shifts underneath. This cache is separate from
/// the record cache — evicting a record does not forget its key.
pub struct MemoCanonicalizer<C> {
    inner: C,
    memo: RwLock<FxHashMap<MemoKey, MemoResult>>,
}

impl<C> MemoCanonicalizer<C> {
    pub fn new(inner: C) -> Self {
        MemoCanonicalizer {
            inner,
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of memoized pairs.
    pub fn len(&self) -> usize {
        self.memo.read().len()
    }

    /// Whether nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.memo.read().is_empty()
    }

    /// The wrapped canonicalizer.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Canonicalize> Canonicalize for MemoCanonicalizer<C> {
    fn canonicalize(
        &self,
        origin: &OriginContext,
        specifier: &AssetSpecifier,
    ) -> Result<CanonicalKey, ResolveError> {
        let memo_key = (origin.clone(), specifier.clone());
        if let Some(hit) = self.memo.read().get(&memo_key) {
            tracing::trace!(origin = %origin, specifier = %specifier, "canonicalization memo hit");
            return hit.clone();
        }

        let result = self.inner.canonicalize(origin, specifier);
        // Two racing callers may both miss and resolve; determinism of the
        // inner canonicalizer makes either insert equivalent.
        self.memo.write().insert(memo_key, result.clone());
        result
    }
}
