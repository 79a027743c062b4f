//! Path-addressed content storage for Tessera.
//!
//! The content store holds the raw bytes of every version snapshot under a
//! relative path such as `{document_id}/document_{document_id}_v3.0.html`.
//! It is not content-addressed: two versions with identical
//! bytes are two files, so a document's history can always be rebuilt one
//! file per version.
//!
//! # Storage Backends
//!
//! All backends implement the [`ContentStore`] trait:
//!
//! - [`FsContentStore`] -- files under a root directory
//! - [`InMemoryContentStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The store never interprets content; it is a pure path-to-bytes map.
//! 2. Paths are relative, non-empty, and free of `..` components.
//! 3. Writes create intermediate directories and replace existing files.
//! 4. Paths are namespaced by document, so writers of different documents
//!    never touch the same file.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod path;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsContentStore;
pub use memory::InMemoryContentStore;
pub use path::validate_relative_path;
pub use traits::ContentStore;
