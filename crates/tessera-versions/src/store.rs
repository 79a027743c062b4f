use std::sync::Arc;

use chrono::Utc;
use tessera_crypto::ContentHasher;
use tessera_ledger::{LedgerError, LedgerReader, LedgerWriter, VersionLedger};
use tessera_store::{ContentStore, StoreError};
use tessera_types::{DocumentId, Version, VersionId, VersionNumber};
use tracing::{debug, error, info, warn};

use crate::error::{VersionError, VersionResult};
use crate::locks::DocumentLocks;
use crate::lookup::DocumentLookup;
use crate::request::NewVersion;
use crate::verify::{CountingReader, VerifyReport};

/// How many occupied snapshot paths a create steps over before giving up.
const MAX_OCCUPIED_SKIPS: u32 = 64;

/// Limits applied when creating versions.
#[derive(Clone, Debug, Default)]
pub struct VersionStoreConfig {
    /// Largest snapshot accepted, in bytes. `None` means unlimited.
    pub max_content_size: Option<u64>,
}

/// Owns the lifecycle of document versions.
///
/// Snapshot bytes go to the [`ContentStore`] under a path derived from the
/// document and version number; metadata goes to the [`VersionLedger`].
/// Versions are never updated or deleted once created.
pub struct VersionStore {
    content: Arc<dyn ContentStore>,
    ledger: Arc<dyn VersionLedger>,
    documents: Arc<dyn DocumentLookup>,
    locks: DocumentLocks,
    config: VersionStoreConfig,
}

impl VersionStore {
    pub fn new(
        content: Arc<dyn ContentStore>,
        ledger: Arc<dyn VersionLedger>,
        documents: Arc<dyn DocumentLookup>,
    ) -> Self {
        Self::with_config(content, ledger, documents, VersionStoreConfig::default())
    }

    pub fn with_config(
        content: Arc<dyn ContentStore>,
        ledger: Arc<dyn VersionLedger>,
        documents: Arc<dyn DocumentLookup>,
        config: VersionStoreConfig,
    ) -> Self {
        Self {
            content,
            ledger,
            documents,
            locks: DocumentLocks::default(),
            config,
        }
    }

    /// Create the next version of a document.
    ///
    /// The number follows both the recorded count and the highest recorded
    /// number, assigned while holding the document's lock. Content is
    /// written without replacing anything; a number whose snapshot path is
    /// already occupied is stepped over. If the metadata record then fails,
    /// the written bytes are removed again.
    pub fn create_version(&self, request: NewVersion) -> VersionResult<Version> {
        self.validate(&request)?;

        let document_id = request.document_id;
        if !self.documents.exists(&document_id)? {
            return Err(VersionError::DocumentNotFound(document_id));
        }

        let lock = self.locks.lock_for(&document_id);
        let _guard = lock.lock().unwrap_or_else(|p| p.into_inner());

        let content_hash = ContentHasher::hash(&request.content);
        let mut version_number = self.next_number(&document_id)?;
        let mut skipped = 0;
        let storage_path = loop {
            let path = Version::storage_path_for(&document_id, &version_number);
            match self.content.create(&path, &request.content) {
                Ok(()) => break path,
                Err(StoreError::AlreadyExists(_)) if skipped < MAX_OCCUPIED_SKIPS => {
                    warn!(
                        document = %document_id,
                        number = %version_number,
                        path = %path,
                        "snapshot path already occupied; skipping number"
                    );
                    skipped += 1;
                    version_number = version_number.next();
                }
                Err(source) => return Err(VersionError::StorageWrite { path, source }),
            }
        };
        let file_name = Version::file_name_for(&document_id, &version_number);

        let version = Version {
            id: VersionId::new(),
            document_id,
            version_number,
            content_hash,
            file_name,
            storage_path,
            size: request.content.len() as u64,
            tag: request.effective_tag(),
            author_id: request.author_id,
            commit_message: request.commit_message,
            created_at: Utc::now(),
        };

        if let Err(e) = self.ledger.append(&version) {
            self.discard_unrecorded(&version, &e);
            return Err(e.into());
        }

        info!(
            document = %document_id,
            version = %version.id,
            number = %version.version_number,
            hash = %version.content_hash.short_hex(),
            size = version.size,
            "version created"
        );
        Ok(version)
    }

    pub fn get_version(&self, id: &VersionId) -> VersionResult<Version> {
        self.ledger
            .get(id)?
            .ok_or(VersionError::VersionNotFound(*id))
    }

    /// Raw snapshot bytes of a version, exactly as they were stored.
    pub fn get_content(&self, id: &VersionId) -> VersionResult<Vec<u8>> {
        let version = self.get_version(id)?;
        self.read_content(&version)
    }

    /// Snapshot bytes for an already resolved version record.
    pub fn read_content(&self, version: &Version) -> VersionResult<Vec<u8>> {
        let data = self
            .content
            .read(&version.storage_path)
            .map_err(|source| VersionError::StorageRead {
                path: version.storage_path.clone(),
                source,
            })?;
        debug!(version = %version.id, bytes = data.len(), "content read");
        Ok(data)
    }

    /// All versions of a document, newest first.
    ///
    /// An existing document without versions yields an empty list.
    pub fn list_versions(&self, document_id: &DocumentId) -> VersionResult<Vec<Version>> {
        if !self.documents.exists(document_id)? {
            return Err(VersionError::DocumentNotFound(*document_id));
        }
        Ok(self.ledger.list(document_id)?)
    }

    /// Re-read a version's bytes and compare them with its record.
    ///
    /// The snapshot is streamed through the hasher rather than loaded whole.
    pub fn verify_version(&self, id: &VersionId) -> VersionResult<VerifyReport> {
        let version = self.get_version(id)?;
        let reader = self
            .content
            .open_reader(&version.storage_path)
            .map_err(|source| VersionError::StorageRead {
                path: version.storage_path.clone(),
                source,
            })?;
        let mut counted = CountingReader::new(reader);
        let actual_hash = ContentHasher::hash_reader(&mut counted)?;
        let report = VerifyReport {
            actual_hash,
            actual_size: counted.bytes_read(),
            version,
        };
        if !report.is_intact() {
            warn!(
                version = %report.version.id,
                expected = %report.version.content_hash,
                actual = %report.actual_hash,
                "stored content does not match its record"
            );
        }
        Ok(report)
    }

    pub fn config(&self) -> &VersionStoreConfig {
        &self.config
    }

    /// One past both the recorded count and the highest recorded number.
    ///
    /// The two differ when the ledger skipped damaged records on replay.
    fn next_number(&self, document_id: &DocumentId) -> VersionResult<VersionNumber> {
        let count = self.ledger.count(document_id)?;
        let highest = self
            .ledger
            .latest(document_id)?
            .map_or(0, |v| v.version_number.major());
        Ok(VersionNumber::after_count(count.max(highest)))
    }

    fn validate(&self, request: &NewVersion) -> VersionResult<()> {
        if is_blank(&request.content) {
            return Err(VersionError::Validation("content is required".into()));
        }
        if request.commit_message.trim().is_empty() {
            return Err(VersionError::Validation("commit message is required".into()));
        }
        if request.author_id.is_blank() {
            return Err(VersionError::Validation("author id is required".into()));
        }
        if let Some(max) = self.config.max_content_size {
            let size = request.content.len() as u64;
            if size > max {
                return Err(VersionError::Validation(format!(
                    "content is {size} bytes, limit is {max}"
                )));
            }
        }
        Ok(())
    }

    /// Remove bytes written for a version whose metadata was not recorded.
    ///
    /// The path was created by this call, so it never holds another
    /// version's snapshot.
    fn discard_unrecorded(&self, version: &Version, cause: &LedgerError) {
        match self.content.delete(&version.storage_path) {
            Ok(_) => warn!(
                path = %version.storage_path,
                error = %cause,
                "metadata not recorded; removed written content"
            ),
            Err(e) => error!(
                path = %version.storage_path,
                error = %e,
                "metadata not recorded and cleanup failed; content is orphaned"
            ),
        }
    }
}

/// Empty, or nothing but whitespace when read as UTF-8.
fn is_blank(content: &[u8]) -> bool {
    match std::str::from_utf8(content) {
        Ok(text) => text.trim().is_empty(),
        Err(_) => content.is_empty(),
    }
}

impl std::fmt::Debug for VersionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
