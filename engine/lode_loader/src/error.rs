//! Load pipeline errors.

use std::fmt;

use lode_canon::CanonicalKey;
use thiserror::Error;

/// Backend pipeline stage that produced a failure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LoadStage {
    Fetch,
    Parse,
    Link,
    Evaluate,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStage::Fetch => write!(f, "fetch"),
            LoadStage::Parse => write!(f, "parse"),
            LoadStage::Link => write!(f, "link"),
            LoadStage::Evaluate => write!(f, "evaluate"),
        }
    }
}

/// Terminal failure of a load pipeline.
///
/// Recorded as the key's `Rejected` outcome and shared (via `Arc`) with all
/// current and future waiters until the entry is evicted. The engine never
/// retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A backend stage failed.
    #[error("{stage} failed for `{key}`: {message}")]
    Stage {
        stage: LoadStage,
        key: CanonicalKey,
        message: String,
    },
    /// The driving caller dropped its ticket without settling — usually a
    /// panic inside the backend. Waiters receive this instead of hanging.
    #[error("load pipeline for `{key}` was abandoned before settling")]
    Abandoned { key: CanonicalKey },
}

impl LoadError {
    /// Construct a stage failure.
    pub fn stage(stage: LoadStage, key: &CanonicalKey, message: impl Into<String>) -> Self {
        LoadError::Stage {
            stage,
            key: key.clone(),
            message: message.into(),
        }
    }

    /// The failing stage, if this is a stage error.
    pub fn failed_stage(&self) -> Option<LoadStage> {
        match self {
            LoadError::Stage { stage, .. } => Some(*stage),
            LoadError::Abandoned { .. } => None,
        }
    }

    /// The key the failure belongs to.
    pub fn key(&self) -> &CanonicalKey {
        match self {
            LoadError::Stage { key, .. } | LoadError::Abandoned { key } => key,
        }
    }
}
