use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::hash::ContentHash;
use crate::ids::{AuthorId, DocumentId, VersionId};

/// Per-document version number, rendered as `"<N>.0"`.
///
/// Numbers start at 1 and are assigned one past the highest recorded number
/// under a per-document lock, so for a fixed document they are strictly
/// increasing with no reuse.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber(u64);

impl VersionNumber {
    /// The number given to a document's first version.
    pub const FIRST: Self = Self(1);

    /// Create from the major component. Zero is not a valid version number.
    pub fn new(major: u64) -> Result<Self, TypeError> {
        if major == 0 {
            return Err(TypeError::InvalidVersionNumber("0.0".into()));
        }
        Ok(Self(major))
    }

    /// The number that follows `count` existing versions.
    pub fn after_count(count: u64) -> Self {
        Self(count + 1)
    }

    /// The major component (`N` in `"N.0"`).
    pub fn major(&self) -> u64 {
        self.0
    }

    /// The next number in sequence.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionNumber({}.0)", self.0)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.0", self.0)
    }
}

impl FromStr for VersionNumber {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let major = s
            .strip_suffix(".0")
            .and_then(|m| m.parse::<u64>().ok())
            .ok_or_else(|| TypeError::InvalidVersionNumber(s.to_string()))?;
        Self::new(major).map_err(|_| TypeError::InvalidVersionNumber(s.to_string()))
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<VersionNumber> for String {
    fn from(n: VersionNumber) -> Self {
        n.to_string()
    }
}

/// Immutable metadata record of one stored snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub document_id: DocumentId,
    pub version_number: VersionNumber,
    pub content_hash: ContentHash,
    /// Leaf file name of the stored snapshot.
    pub file_name: String,
    /// Path of the snapshot relative to the content store root.
    pub storage_path: String,
    /// Byte length of the stored snapshot.
    pub size: u64,
    pub author_id: AuthorId,
    pub commit_message: String,
    pub tag: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Version {
    /// File name for a snapshot: `document_{document_id}_v{N}.0.html`.
    pub fn file_name_for(document_id: &DocumentId, number: &VersionNumber) -> String {
        format!("document_{document_id}_v{number}.html")
    }

    /// Storage path for a snapshot, namespaced by document id.
    ///
    /// Derived from the document and the version number only, never from
    /// the content hash.
    pub fn storage_path_for(document_id: &DocumentId, number: &VersionNumber) -> String {
        format!("{document_id}/{}", Self::file_name_for(document_id, number))
    }

    /// One-line label used in logs and terminal output, e.g. `v3.0 (0190c1a2)`.
    pub fn label(&self) -> String {
        format!("v{} ({})", self.version_number, self.id.short_id())
    }
}

/// Minimal view of an externally owned document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
}

impl Document {
    pub fn new(id: DocumentId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
