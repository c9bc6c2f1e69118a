//! Canonical keys: resolved asset identities.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// The resolved, stable identity of an asset.
///
/// A path, URL, or generated id — whatever the canonicalizer's environment
/// defines. Cheap to clone and usable directly as a cache key. Stability is
/// the canonicalizer's contract: the same `(origin, specifier)` pair yields
/// an equal key for the lifetime of the process.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    id: Arc<str>,
}

impl CanonicalKey {
    /// Create a key from its string identity.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        CanonicalKey { id: id.into() }
    }

    /// Create a key from a resolved path.
    pub fn from_path(path: &Path) -> Self {
        CanonicalKey {
            id: Arc::from(path.to_string_lossy().as_ref()),
        }
    }

    /// The key's string identity.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalKey({})", self.id)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_identities_compare_equal() {
        let a = CanonicalKey::new("/proj/src/b.mod");
        let b = CanonicalKey::from_path(Path::new("/proj/src/b.mod"));
        assert_eq!(a, b);
    }

    #[test]
    fn keys_order_by_identity() {
        let a = CanonicalKey::new("a");
        let b = CanonicalKey::new("b");
        assert!(a < b);
    }
}
