use std::sync::RwLock;

use tessera_types::{DocumentId, Version, VersionId};

use crate::error::{LedgerError, LedgerResult};
use crate::index::VersionIndex;
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory ledger for tests, local demos, and embedding.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<VersionIndex>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of versions across all documents.
    pub fn len(&self) -> usize {
        self.inner.read().map(|idx| idx.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&self, version: &Version) -> LedgerResult<()> {
        let mut index = self.inner.write().map_err(|_| LedgerError::LockPoisoned)?;
        index.check(version)?;
        index.insert(version.clone());
        Ok(())
    }
}

impl LedgerReader for InMemoryLedger {
    fn get(&self, id: &VersionId) -> LedgerResult<Option<Version>> {
        let index = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(index.get(id))
    }

    fn count(&self, document_id: &DocumentId) -> LedgerResult<u64> {
        let index = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(index.count(document_id))
    }

    fn list(&self, document_id: &DocumentId) -> LedgerResult<Vec<Version>> {
        let index = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(index.list(document_id))
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedger")
            .field("version_count", &self.len())
            .finish()
    }
}
