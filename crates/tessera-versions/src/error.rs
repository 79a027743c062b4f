use tessera_crypto::HasherError;
use tessera_ledger::LedgerError;
use tessera_store::StoreError;
use tessera_types::{DocumentId, VersionId};

use crate::lookup::LookupError;

/// Errors from version store operations.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The owning document does not resolve through the document lookup.
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("version not found: {0}")]
    VersionNotFound(VersionId),

    /// Snapshot bytes could not be written; no metadata was recorded.
    #[error("failed to write content to {path}: {source}")]
    StorageWrite {
        path: String,
        #[source]
        source: StoreError,
    },

    /// Snapshot bytes of an existing version could not be read.
    #[error("failed to read content from {path}: {source}")]
    StorageRead {
        path: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to compute content hash: {0}")]
    HashComputation(#[from] HasherError),

    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Metadata could not be recorded or read.
    #[error("metadata error: {0}")]
    Metadata(#[from] LedgerError),

    #[error(transparent)]
    DocumentLookup(#[from] LookupError),
}

impl VersionError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DocumentNotFound(_) => "document_not_found",
            Self::VersionNotFound(_) => "version_not_found",
            Self::StorageWrite { .. } => "storage_write_error",
            Self::StorageRead { .. } => "storage_read_error",
            Self::HashComputation(_) => "hash_computation_error",
            Self::Validation(_) => "validation_error",
            Self::Metadata(_) => "metadata_error",
            Self::DocumentLookup(_) => "document_lookup_error",
        }
    }

    /// Returns `true` for the recoverable "nothing there" kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound(_) | Self::VersionNotFound(_))
    }
}

/// Result alias for version store operations.
pub type VersionResult<T> = Result<T, VersionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let id = VersionId::new();
        let err = VersionError::VersionNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
        assert!(err.is_not_found());
        assert_eq!(err.kind(), "version_not_found");
    }

    #[test]
    fn storage_errors_are_not_not_found() {
        let err = VersionError::StorageRead {
            path: "doc/v1.html".into(),
            source: StoreError::NotFound("doc/v1.html".into()),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.kind(), "storage_read_error");
    }
}
