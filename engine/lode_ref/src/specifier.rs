//! Asset specifiers: the declaration text, exactly as written.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Structural validation failure when constructing an [`AssetSpecifier`].
///
/// These are the only failures reference creation can produce — anything
/// that requires looking at the environment (missing file, bad scheme) is a
/// resolution concern and surfaces later, from the canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecifierError {
    /// The specifier was the empty string.
    #[error("specifier is empty")]
    Empty,
    /// The specifier contained only whitespace.
    #[error("specifier is all whitespace")]
    Whitespace,
    /// The specifier contained an embedded NUL byte.
    #[error("specifier contains an embedded NUL byte")]
    EmbeddedNul,
}

/// The specifier text of a declaration, owned and immutable.
///
/// Stored exactly as written at the declaration site; never normalized,
/// trimmed, or otherwise reinterpreted here. Only the canonicalizer assigns
/// it meaning.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssetSpecifier {
    text: Arc<str>,
}

impl AssetSpecifier {
    /// Validate and construct a specifier.
    ///
    /// Validation is purely structural: non-empty, not all whitespace, no
    /// embedded NUL. Whether the specifier can actually be resolved is not
    /// checked here.
    pub fn new(text: impl Into<Arc<str>>) -> Result<Self, SpecifierError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SpecifierError::Empty);
        }
        if text.chars().all(char::is_whitespace) {
            return Err(SpecifierError::Whitespace);
        }
        if text.contains('\0') {
            return Err(SpecifierError::EmbeddedNul);
        }
        Ok(AssetSpecifier { text })
    }

    /// The specifier text as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for AssetSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetSpecifier({:?})", &*self.text)
    }
}

impl fmt::Display for AssetSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
