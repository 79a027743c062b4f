//! Foundation types for Tessera.
//!
//! This crate provides the identifiers and records shared by every other
//! Tessera crate: the document a version belongs to, the version itself, its
//! monotonic number and the digest of its content.
//!
//! # Key Types
//!
//! - [`DocumentId`] -- Identifier of an externally owned document
//! - [`VersionId`] -- UUID v7 identifier assigned when a version is created
//! - [`AuthorId`] -- Identifier of the acting user, supplied by the caller
//! - [`VersionNumber`] -- Per-document sequence number rendered as `"<N>.0"`
//! - [`ContentHash`] -- Hex-encoded 256-bit digest of a snapshot's bytes
//! - [`Version`] -- Immutable metadata record of one snapshot
//! - [`Document`] -- Minimal view of a document resolved through a lookup

pub mod error;
pub mod hash;
pub mod ids;
pub mod version;

pub use error::TypeError;
pub use hash::ContentHash;
pub use ids::{AuthorId, DocumentId, VersionId};
pub use version::{Document, Version, VersionNumber};
