use tessera_types::{AuthorId, DocumentId};

/// Input to [`VersionStore::create_version`](crate::VersionStore::create_version).
#[derive(Clone, Debug)]
pub struct NewVersion {
    pub document_id: DocumentId,
    pub content: Vec<u8>,
    pub commit_message: String,
    pub author_id: AuthorId,
    pub tag: Option<String>,
}

impl NewVersion {
    pub fn new(
        document_id: DocumentId,
        content: impl Into<Vec<u8>>,
        commit_message: impl Into<String>,
        author_id: impl Into<AuthorId>,
    ) -> Self {
        Self {
            document_id,
            content: content.into(),
            commit_message: commit_message.into(),
            author_id: author_id.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The tag with surrounding whitespace removed, or `None` if blank.
    pub fn effective_tag(&self) -> Option<String> {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}
