use std::io::{Cursor, Read};

use crate::error::StoreResult;

/// Byte-oriented snapshot storage keyed by relative path.
///
/// All implementations must satisfy these invariants:
/// - `write` followed by `read` of the same path returns the exact bytes.
/// - `write` creates any intermediate containers the path needs.
/// - Concurrent reads are always safe.
/// - The store never interprets content.
/// - All I/O errors are propagated, never silently ignored.
pub trait ContentStore: Send + Sync {
    /// Store `data` at `path`, replacing anything already there.
    fn write(&self, path: &str, data: &[u8]) -> StoreResult<()>;

    /// Store `data` at `path` only if nothing is stored there yet.
    ///
    /// Returns `Err(StoreError::AlreadyExists)` and leaves the existing
    /// bytes untouched otherwise. Snapshots are written with this.
    fn create(&self, path: &str, data: &[u8]) -> StoreResult<()>;

    /// Read the bytes stored at `path`.
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing is stored there.
    fn read(&self, path: &str) -> StoreResult<Vec<u8>>;

    /// Stream the bytes stored at `path`.
    ///
    /// Backends that hold content in memory hand out a cursor over a copy.
    fn open_reader(&self, path: &str) -> StoreResult<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.read(path)?)))
    }

    /// Check whether anything is stored at `path`.
    fn exists(&self, path: &str) -> StoreResult<bool>;

    /// Remove the bytes at `path`. Returns `true` if something was removed.
    ///
    /// Only used to compensate a write whose metadata could not be
    /// recorded. Deleting a referenced snapshot corrupts history.
    fn delete(&self, path: &str) -> StoreResult<bool>;
}
