use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::path::validate_relative_path;
use crate::traits::ContentStore;

/// Filesystem content store rooted at a directory.
///
/// Each path maps to one file under the root. Writes go to a temporary file
/// in the target directory which is then renamed into place, so a reader
/// never observes a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root.display().to_string(), e))?;
        Ok(Self { root })
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> StoreResult<PathBuf> {
        validate_relative_path(path)?;
        Ok(self.root.join(path))
    }

    /// Write `data` to a synced temporary file next to `full_path`.
    fn stage(&self, path: &str, full_path: &Path, data: &[u8]) -> StoreResult<tempfile::NamedTempFile> {
        let parent = full_path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|e| StoreError::io(path, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| StoreError::io(path, e))?;
        tmp.write_all(data).map_err(|e| StoreError::io(path, e))?;
        tmp.as_file().sync_all().map_err(|e| StoreError::io(path, e))?;
        Ok(tmp)
    }
}

impl ContentStore for FsContentStore {
    fn write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        let full_path = self.full_path(path)?;
        self.stage(path, &full_path, data)?
            .persist(&full_path)
            .map_err(|e| StoreError::io(path, e.error))?;

        debug!(path, bytes = data.len(), "content written");
        Ok(())
    }

    fn create(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        let full_path = self.full_path(path)?;
        if let Err(e) = self.stage(path, &full_path, data)?.persist_noclobber(&full_path) {
            return Err(if e.error.kind() == ErrorKind::AlreadyExists {
                StoreError::AlreadyExists(path.to_string())
            } else {
                StoreError::io(path, e.error)
            });
        }

        debug!(path, bytes = data.len(), "content created");
        Ok(())
    }

    fn read(&self, path: &str) -> StoreResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        fs::read(&full_path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(path.to_string())
            } else {
                StoreError::io(path, e)
            }
        })
    }

    fn open_reader(&self, path: &str) -> StoreResult<Box<dyn Read + Send>> {
        let full_path = self.full_path(path)?;
        match File::open(&full_path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(path.to_string())),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn exists(&self, path: &str) -> StoreResult<bool> {
        let full_path = self.full_path(path)?;
        match fs::metadata(&full_path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn delete(&self, path: &str) -> StoreResult<bool> {
        let full_path = self.full_path(path)?;
        match fs::remove_file(&full_path) {
            Ok(()) => {
                debug!(path, "content deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}
