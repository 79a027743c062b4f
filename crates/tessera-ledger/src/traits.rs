use tessera_types::{DocumentId, Version, VersionId};

use crate::error::LedgerResult;

/// Write boundary for version metadata.
pub trait LedgerWriter: Send + Sync {
    /// Durably record a version.
    ///
    /// Fails with `DuplicateVersionId` or `DuplicateVersionNumber` if the
    /// record would clash with one already stored; nothing is written then.
    fn append(&self, version: &Version) -> LedgerResult<()>;
}

/// Read boundary for version metadata.
pub trait LedgerReader: Send + Sync {
    fn get(&self, id: &VersionId) -> LedgerResult<Option<Version>>;

    /// Number of versions recorded for a document.
    fn count(&self, document_id: &DocumentId) -> LedgerResult<u64>;

    /// All versions of a document, newest first by creation time (ties
    /// broken by version number, highest first).
    fn list(&self, document_id: &DocumentId) -> LedgerResult<Vec<Version>>;

    /// The most recently numbered version of a document.
    fn latest(&self, document_id: &DocumentId) -> LedgerResult<Option<Version>> {
        Ok(self
            .list(document_id)?
            .into_iter()
            .max_by_key(|v| v.version_number))
    }
}

/// A ledger that can be both read and appended to.
pub trait VersionLedger: LedgerReader + LedgerWriter {}

impl<T: LedgerReader + LedgerWriter> VersionLedger for T {}
