//! Origin contexts: the identity of a declaring unit.

use std::fmt;
use std::sync::Arc;

/// Identity of the unit a reference was declared in.
///
/// Typically the declaring module's own canonical path, but the engine only
/// ever relies on equality and hashing — what the label means is up to the
/// host's canonicalizer. Immutable once created and cheap to clone; every
/// [`Reference`](crate::Reference) created within a context shares the same
/// inner allocation.
///
/// Equality is by label value, so re-creating a context for the same unit
/// yields an equal context and hits the same canonicalization memo entries.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OriginContext {
    label: Arc<str>,
}

impl OriginContext {
    /// Create a context from its label (e.g. the declaring module's path).
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        OriginContext {
            label: label.into(),
        }
    }

    /// The label this context was created with.
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for OriginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OriginContext({})", self.label)
    }
}

impl fmt::Display for OriginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_labels_compare_equal() {
        let a = OriginContext::new("src/app.mod");
        let b = OriginContext::new(String::from("src/app.mod"));
        assert_eq!(a, b);
    }

    #[test]
    fn clone_shares_label() {
        let a = OriginContext::new("src/app.mod");
        let b = a.clone();
        assert_eq!(a.as_str(), b.as_str());
    }
}
