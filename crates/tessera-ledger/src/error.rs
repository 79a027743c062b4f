use tessera_types::{DocumentId, VersionId, VersionNumber};

/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("version {0} is already recorded")]
    DuplicateVersionId(VersionId),

    #[error("document {document_id} already has a version {version_number}")]
    DuplicateVersionNumber {
        document_id: DocumentId,
        version_number: VersionNumber,
    },

    /// An entry header is damaged but intact entries follow it, so the log
    /// cannot be cut back without losing history.
    #[error("ledger is corrupt at byte offset {offset}")]
    Corrupt { offset: u64 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
