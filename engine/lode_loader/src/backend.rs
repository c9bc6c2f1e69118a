//! Pluggable backend pipeline hooks.

use lode_canon::CanonicalKey;

use crate::LoadError;

/// The fetch → parse → link → evaluate pipeline, supplied by the host.
///
/// The engine is agnostic to what these stages do: records are opaque to it
/// beyond ownership and sharing. Any linking environment (global scope,
/// registry of already-loaded modules, …) is backend-owned state behind
/// `&self`. Each stage may fail; failures propagate as the key's terminal
/// `Rejected` outcome.
///
/// Implementations must be `Send + Sync`: the coordinator invokes stages
/// from whichever caller thread wins the load.
pub trait LoaderBackend: Send + Sync {
    /// Raw content produced by `fetch` (bytes, source text, …).
    type Raw;
    /// Parsed but unlinked unit.
    type Unit;
    /// The linked, evaluated module record.
    type Record: Send + Sync + 'static;

    /// Retrieve the raw content behind a canonical key.
    fn fetch(&self, key: &CanonicalKey) -> Result<Self::Raw, LoadError>;

    /// Turn raw content into a linkable unit.
    fn parse(&self, key: &CanonicalKey, raw: Self::Raw) -> Result<Self::Unit, LoadError>;

    /// Link the unit into a record against backend-owned state.
    fn link(&self, key: &CanonicalKey, unit: Self::Unit) -> Result<Self::Record, LoadError>;

    /// Run the record's initialization. Defaults to a no-op pass-through for
    /// backends whose records need no evaluation step.
    fn evaluate(&self, key: &CanonicalKey, record: Self::Record) -> Result<Self::Record, LoadError> {
        let _ = key;
        Ok(record)
    }
}
