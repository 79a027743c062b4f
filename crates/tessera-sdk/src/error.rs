use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Version(#[from] tessera_versions::VersionError),

    #[error(transparent)]
    Diff(#[from] tessera_diff::DiffError),

    #[error("failed to open content store: {0}")]
    Store(#[from] tessera_store::StoreError),

    #[error("failed to open ledger: {0}")]
    Ledger(#[from] tessera_ledger::LedgerError),
}

impl SdkError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Version(e) => e.kind(),
            Self::Diff(e) => e.kind(),
            Self::Store(_) | Self::Ledger(_) => "storage_open_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Version(e) => e.is_not_found(),
            Self::Diff(e) => e.is_not_found(),
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Version(tessera_versions::VersionError::Validation(_)))
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
