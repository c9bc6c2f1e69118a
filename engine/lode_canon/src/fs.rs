//! Filesystem canonicalizer.
//!
//! Resolves relative specifiers (`./x`, `../x`) against the origin's own
//! directory and bare specifiers against configured search roots. Candidate
//! probing tries the literal path, then each configured extension, then the
//! directory-module form (`x/mod.<ext>`), in that order. The first existing
//! file wins and its canonicalized path becomes the key, so differently
//! spelled specifiers for one file collapse to one cache entry.

use std::io;
use std::path::{Component, Path, PathBuf};

use lode_ref::{AssetSpecifier, OriginContext};

use crate::{Canonicalize, CanonicalKey, ResolveError};

/// Configuration for [`FsCanonicalizer`].
#[derive(Debug, Clone, Default)]
pub struct FsCanonConfig {
    /// Search roots for bare specifiers, probed in order.
    pub roots: Vec<PathBuf>,
    /// File extensions probed after the literal path, in order, without the
    /// leading dot.
    pub extensions: Vec<String>,
}

impl FsCanonConfig {
    /// Empty configuration: relative specifiers only, literal paths only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search root for bare specifiers.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Add a probed file extension (without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }
}

/// Canonicalizer backed by filesystem probing.
///
/// The origin's label is interpreted as the path of the declaring module
/// file; relative specifiers resolve against its parent directory.
pub struct FsCanonicalizer {
    config: FsCanonConfig,
}

impl FsCanonicalizer {
    pub fn new(config: FsCanonConfig) -> Self {
        FsCanonicalizer { config }
    }

    /// Probe all candidate spellings of `base`, returning the first that is
    /// an existing file.
    ///
    /// `probed` counts every candidate examined, for error reporting.
    fn probe(&self, base: &Path, probed: &mut usize) -> Result<Option<PathBuf>, ResolveError> {
        let mut candidates = Vec::with_capacity(1 + 2 * self.config.extensions.len());
        candidates.push(base.to_path_buf());
        for ext in &self.config.extensions {
            candidates.push(append_extension(base, ext));
        }
        for ext in &self.config.extensions {
            candidates.push(base.join(format!("mod.{ext}")));
        }

        for candidate in candidates {
            *probed += 1;
            tracing::trace!(candidate = %candidate.display(), "probing");
            match std::fs::metadata(&candidate) {
                Ok(meta) if meta.is_file() => return Ok(Some(candidate)),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ResolveError::Io {
                        path: candidate.display().to_string(),
                        message: e.to_string(),
                    })
                }
            }
        }
        Ok(None)
    }

    fn finish(&self, found: &Path) -> Result<CanonicalKey, ResolveError> {
        // Canonicalize through the filesystem so symlinked or differently
        // spelled paths collapse to one key.
        let canonical = std::fs::canonicalize(found).map_err(|e| ResolveError::Io {
            path: found.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(resolved = %canonical.display(), "canonicalized specifier");
        Ok(CanonicalKey::from_path(&canonical))
    }
}

impl Canonicalize for FsCanonicalizer {
    fn canonicalize(
        &self,
        origin: &OriginContext,
        specifier: &AssetSpecifier,
    ) -> Result<CanonicalKey, ResolveError> {
        let text = specifier.as_str();
        if Path::new(text).is_absolute() {
            return Err(ResolveError::Malformed {
                specifier: text.to_owned(),
                reason: "absolute specifiers are not permitted".to_owned(),
            });
        }

        let mut probed = 0;
        if text.starts_with("./") || text.starts_with("../") {
            // Relative: resolve against the origin's own directory, never
            // the requester's.
            let origin_dir = Path::new(origin.as_str())
                .parent()
                .unwrap_or_else(|| Path::new("."));
            let base = normalize_lexically(&origin_dir.join(text));
            if let Some(found) = self.probe(&base, &mut probed)? {
                return self.finish(&found);
            }
        } else {
            // Bare: probe each search root in order.
            for root in &self.config.roots {
                let base = normalize_lexically(&root.join(text));
                if let Some(found) = self.probe(&base, &mut probed)? {
                    return self.finish(&found);
                }
            }
        }

        Err(ResolveError::NotFound {
            specifier: text.to_owned(),
            origin: origin.as_str().to_owned(),
            probed,
        })
    }
}

/// Resolve `.` and `..` components lexically.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            other => result.push(other),
        }
    }
    result
}

/// Append an extension rather than replacing an existing one.
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut os = base.as_os_str().to_owned();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}
