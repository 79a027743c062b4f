use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera_types::{Version, VersionId};
use tessera_versions::VersionStore;
use tracing::debug;

use crate::align::{align_lines, DiffEntry};
use crate::error::CompareResult;
use crate::lines::{decode_content, split_lines};
use crate::render::{render_html, render_text};

/// Outcome of comparing two versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub base: Version,
    pub new: Version,
    pub entries: Vec<DiffEntry>,
    /// HTML rendering of `entries`.
    pub html: String,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl DiffResult {
    /// Returns `true` if the two versions have identical lines.
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }

    /// Plain-text rendering of `entries`.
    pub fn to_text(&self) -> String {
        render_text(&self.entries)
    }
}

/// Compares versions held by a [`VersionStore`].
#[derive(Clone, Debug)]
pub struct DiffEngine {
    store: Arc<VersionStore>,
}

impl DiffEngine {
    pub fn new(store: Arc<VersionStore>) -> Self {
        Self { store }
    }

    /// Diff `base_id` against `new_id`.
    ///
    /// The base version is resolved first, so when both ids are unknown the
    /// error names the base. Nothing is read or computed if either lookup
    /// fails.
    pub fn compare(&self, base_id: &VersionId, new_id: &VersionId) -> CompareResult<DiffResult> {
        let base = self.store.get_version(base_id)?;
        let new = self.store.get_version(new_id)?;

        let base_bytes = self.store.read_content(&base)?;
        let new_bytes = self.store.read_content(&new)?;
        let base_text = decode_content(&base_bytes);
        let new_text = decode_content(&new_bytes);

        let alignment = align_lines(&split_lines(&base_text), &split_lines(&new_text));
        let html = render_html(&alignment.entries);

        debug!(
            base = %base.id,
            new = %new.id,
            added = alignment.added,
            removed = alignment.removed,
            modified = alignment.modified,
            "diff computed"
        );

        Ok(DiffResult {
            base,
            new,
            entries: alignment.entries,
            html,
            added: alignment.added,
            removed: alignment.removed,
            modified: alignment.modified,
        })
    }

    /// Same as [`compare`](Self::compare) with the two sides swapped.
    pub fn compare_reversed(
        &self,
        base_id: &VersionId,
        new_id: &VersionId,
    ) -> CompareResult<DiffResult> {
        self.compare(new_id, base_id)
    }

    pub fn store(&self) -> &Arc<VersionStore> {
        &self.store
    }
}
