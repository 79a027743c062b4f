//! Version store for Tessera.
//!
//! Turns a mutable document into an append-only sequence of immutable,
//! content-hashed snapshots. Each snapshot gets the next per-document
//! version number (`"1.0"`, `"2.0"`, ...), a SHA-256 content hash, its own
//! file in the content store, and a metadata record in the ledger.
//!
//! # Key Types
//!
//! - [`VersionStore`] -- create, read, list, and verify versions
//! - [`NewVersion`] -- input to [`VersionStore::create_version`]
//! - [`DocumentLookup`] -- injected capability resolving document ids
//! - [`VerifyReport`] -- result of re-checking a stored snapshot
//!
//! Version numbers are assigned under a per-document lock and the ledger
//! rejects duplicate numbers, so concurrent writers to one document never
//! share a number.

pub mod error;
mod locks;
pub mod lookup;
pub mod request;
pub mod store;
pub mod verify;

pub use error::{VersionError, VersionResult};
pub use lookup::{DocumentLookup, InMemoryDocumentRegistry, LookupError};
pub use request::NewVersion;
pub use store::{VersionStore, VersionStoreConfig};
pub use verify::VerifyReport;
