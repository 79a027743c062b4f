//! Append-only version metadata ledger for Tessera.
//!
//! The ledger records one immutable [`Version`](tessera_types::Version) per
//! stored snapshot. It provides:
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger` for tests and embedding
//! - `FileLedger`, a CRC-framed append-only log replayed into memory on open
//! - A uniqueness check on `(document, version number)` that backs up the
//!   per-document numbering lock held by the version store

pub mod error;
pub mod file;
mod index;
pub mod memory;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use file::{FileLedger, SyncMode};
pub use memory::InMemoryLedger;
pub use traits::{LedgerReader, LedgerWriter, VersionLedger};

#[cfg(test)]
mod test_support;
