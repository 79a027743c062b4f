//! Error types for the diff crate.

use tessera_versions::VersionError;

/// Errors that can occur while comparing versions.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Resolving a version or reading its content failed. Not-found ids are
    /// preserved as-is.
    #[error(transparent)]
    Version(#[from] VersionError),
}

impl DiffError {
    /// Stable, machine-readable name of the underlying error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Version(e) => e.kind(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Version(e) => e.is_not_found(),
        }
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, DiffError>;
