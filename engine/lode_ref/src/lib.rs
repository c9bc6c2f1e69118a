//! Reference registry and data model for the lode asset engine.
//!
//! This crate holds the leaf types everything else is built on:
//!
//! ```text
//! OriginContext ──┐
//!                 ├──► ReferenceRegistry::create ──► Reference
//! AssetSpecifier ─┘         (no I/O, no resolution)
//! ```
//!
//! A [`Reference`] is a lightweight handle binding the context it was
//! declared in to the specifier text exactly as written. Creating one never
//! touches the filesystem and never resolves anything — canonicalization is
//! deferred to the `lode_canon` crate, and loading to `lode_loader`.
//!
//! References are deliberately opaque: consumers get the [`Reference::origin`]
//! and [`Reference::specifier`] accessors and nothing else. Two references
//! minted from textually identical declarations are distinct objects, so
//! unrelated call sites never alias through a shared handle.

mod origin;
mod reference;
mod registry;
mod specifier;

pub use origin::OriginContext;
pub use reference::{Reference, ReferenceId};
pub use registry::ReferenceRegistry;
pub use specifier::{AssetSpecifier, SpecifierError};
