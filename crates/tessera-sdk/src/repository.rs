use std::path::Path;
use std::sync::Arc;

use tessera_diff::{DiffEngine, DiffResult};
use tessera_ledger::{FileLedger, InMemoryLedger};
use tessera_store::{FsContentStore, InMemoryContentStore};
use tessera_types::{DocumentId, Version, VersionId};
use tessera_versions::{DocumentLookup, NewVersion, VersionStore, VersionStoreConfig, VerifyReport};
use tracing::info;

use crate::error::SdkResult;

/// Directory under the storage root holding snapshot files.
pub const CONTENT_DIR: &str = "content";
/// Ledger log path relative to the storage root.
pub const LEDGER_FILE: &str = "ledger/versions.log";

/// High-level Tessera API.
#[derive(Clone, Debug)]
pub struct Tessera {
    store: Arc<VersionStore>,
    diff: DiffEngine,
}

impl Tessera {
    /// Open (or create) a durable store rooted at `root`.
    pub fn open(root: &Path, documents: Arc<dyn DocumentLookup>) -> SdkResult<Self> {
        Self::open_with(root, documents, VersionStoreConfig::default())
    }

    pub fn open_with(
        root: &Path,
        documents: Arc<dyn DocumentLookup>,
        config: VersionStoreConfig,
    ) -> SdkResult<Self> {
        let content = FsContentStore::open(root.join(CONTENT_DIR))?;
        let ledger = FileLedger::open(&root.join(LEDGER_FILE))?;
        info!(root = %root.display(), versions = ledger.len(), "opened tessera store");
        Ok(Self::from_store(VersionStore::with_config(
            Arc::new(content),
            Arc::new(ledger),
            documents,
            config,
        )))
    }

    /// A purely in-memory instance, for tests and embedding.
    pub fn in_memory(documents: Arc<dyn DocumentLookup>) -> Self {
        Self::from_store(VersionStore::new(
            Arc::new(InMemoryContentStore::new()),
            Arc::new(InMemoryLedger::new()),
            documents,
        ))
    }

    pub fn from_store(store: VersionStore) -> Self {
        let store = Arc::new(store);
        Self {
            diff: DiffEngine::new(Arc::clone(&store)),
            store,
        }
    }

    // ---- Version operations ----

    pub fn create_version(&self, request: NewVersion) -> SdkResult<Version> {
        Ok(self.store.create_version(request)?)
    }

    pub fn get_version(&self, id: &VersionId) -> SdkResult<Version> {
        Ok(self.store.get_version(id)?)
    }

    pub fn get_version_content(&self, id: &VersionId) -> SdkResult<Vec<u8>> {
        Ok(self.store.get_content(id)?)
    }

    /// All versions of a document, newest first.
    pub fn list_versions(&self, document_id: &DocumentId) -> SdkResult<Vec<Version>> {
        Ok(self.store.list_versions(document_id)?)
    }

    pub fn verify_version(&self, id: &VersionId) -> SdkResult<VerifyReport> {
        Ok(self.store.verify_version(id)?)
    }

    // ---- Diff operations ----

    pub fn compare_versions(&self, base: &VersionId, new: &VersionId) -> SdkResult<DiffResult> {
        Ok(self.diff.compare(base, new)?)
    }

    /// Compare with the two sides swapped: `new` becomes the base.
    pub fn compare_versions_reversed(
        &self,
        base: &VersionId,
        new: &VersionId,
    ) -> SdkResult<DiffResult> {
        Ok(self.diff.compare_reversed(base, new)?)
    }

    pub fn store(&self) -> &Arc<VersionStore> {
        &self.store
    }
}
