/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Nothing is stored at the requested path.
    #[error("content not found: {0}")]
    NotFound(String),

    /// Something is already stored at the path and the write must not
    /// replace it.
    #[error("content already exists: {0}")]
    AlreadyExists(String),

    /// The path is not a safe relative path.
    #[error("invalid storage path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// I/O error from the underlying storage backend.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,
}

impl StoreError {
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Returns `true` if the error means the path holds nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
