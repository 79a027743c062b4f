use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::path::validate_relative_path;
use crate::traits::ContentStore;

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. Content is held in memory behind a
/// `RwLock` for safe concurrent access and cloned on read/write.
pub struct InMemoryContentStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
    read_only: bool,
}

impl InMemoryContentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_only: false,
        }
    }

    /// Create a store that rejects every write and delete.
    pub fn read_only() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_only: true,
        }
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        validate_relative_path(path)?;
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let mut map = self.files.write().expect("lock poisoned");
        map.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn create(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        validate_relative_path(path)?;
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let mut map = self.files.write().expect("lock poisoned");
        if map.contains_key(path) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        map.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn read(&self, path: &str) -> StoreResult<Vec<u8>> {
        validate_relative_path(path)?;
        let map = self.files.read().expect("lock poisoned");
        map.get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> StoreResult<bool> {
        validate_relative_path(path)?;
        let map = self.files.read().expect("lock poisoned");
        Ok(map.contains_key(path))
    }

    fn delete(&self, path: &str) -> StoreResult<bool> {
        validate_relative_path(path)?;
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let mut map = self.files.write().expect("lock poisoned");
        Ok(map.remove(path).is_some())
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("file_count", &self.len())
            .field("read_only", &self.read_only)
            .finish()
    }
}
