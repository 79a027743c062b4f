use std::collections::{HashMap, HashSet};

use tessera_types::{DocumentId, Version, VersionId, VersionNumber};

use crate::error::{LedgerError, LedgerResult};

/// In-memory lookup structure shared by every ledger backend.
#[derive(Default)]
pub(crate) struct VersionIndex {
    by_id: HashMap<VersionId, Version>,
    by_document: HashMap<DocumentId, Vec<VersionId>>,
    numbers: HashSet<(DocumentId, VersionNumber)>,
}

impl VersionIndex {
    /// Reject records that clash with what is already indexed.
    pub(crate) fn check(&self, version: &Version) -> LedgerResult<()> {
        if self.by_id.contains_key(&version.id) {
            return Err(LedgerError::DuplicateVersionId(version.id));
        }
        if self
            .numbers
            .contains(&(version.document_id, version.version_number))
        {
            return Err(LedgerError::DuplicateVersionNumber {
                document_id: version.document_id,
                version_number: version.version_number,
            });
        }
        Ok(())
    }

    /// Insert a record that already passed [`check`](Self::check).
    pub(crate) fn insert(&mut self, version: Version) {
        self.numbers
            .insert((version.document_id, version.version_number));
        self.by_document
            .entry(version.document_id)
            .or_default()
            .push(version.id);
        self.by_id.insert(version.id, version);
    }

    pub(crate) fn get(&self, id: &VersionId) -> Option<Version> {
        self.by_id.get(id).cloned()
    }

    pub(crate) fn count(&self, document_id: &DocumentId) -> u64 {
        self.by_document
            .get(document_id)
            .map(|ids| ids.len() as u64)
            .unwrap_or(0)
    }

    pub(crate) fn list(&self, document_id: &DocumentId) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .by_document
            .get(document_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect();
        versions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.version_number.cmp(&a.version_number))
        });
        versions
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}
