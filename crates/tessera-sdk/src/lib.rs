//! High-level SDK for Tessera.
//!
//! Provides a single entry point, [`Tessera`], over the version store and
//! diff engine. This is what applications embedding Tessera use; the HTTP
//! server and the CLI are thin layers on top of it.

pub mod error;
pub mod repository;

pub use error::{SdkError, SdkResult};
pub use repository::{Tessera, CONTENT_DIR, LEDGER_FILE};

// Re-export key types
pub use tessera_diff::{DiffEntry, DiffKind, DiffResult};
pub use tessera_types::{AuthorId, ContentHash, Document, DocumentId, Version, VersionId, VersionNumber};
pub use tessera_versions::{
    DocumentLookup, InMemoryDocumentRegistry, NewVersion, VersionStoreConfig, VerifyReport,
};
