//! Content hashing for Tessera.
//!
//! Every stored snapshot carries the SHA-256 digest of its exact bytes. The
//! digest is used for integrity checks and identity comparisons, not for
//! addressing storage.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
