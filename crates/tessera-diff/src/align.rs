use serde::{Deserialize, Serialize};

/// Classification of one aligned line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present at the same position in both versions.
    Context,
    /// Only in the new version.
    Added,
    /// Only in the base version.
    Removed,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }

    /// Line prefix used by both renderings.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Context => "  ",
            Self::Added => "+ ",
            Self::Removed => "- ",
        }
    }
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub value: String,
}

impl DiffEntry {
    pub fn context(value: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Context,
            value: value.into(),
        }
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Added,
            value: value.into(),
        }
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Removed,
            value: value.into(),
        }
    }
}

/// Aligned entries plus change counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    pub entries: Vec<DiffEntry>,
    pub added: usize,
    pub removed: usize,
    /// Positions where both sides had a line and the lines differed.
    pub modified: usize,
}

impl Alignment {
    /// Returns `true` if every entry is context.
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Walk both line lists in lockstep.
///
/// Equal lines at the same cursor positions are context. A mismatch emits
/// the base line as removed and the new line as added, then advances both
/// cursors. Whatever is left of the longer side is emitted as removed or
/// added. There is no lookahead, so one inserted line shifts every later
/// line into a removed/added pair.
pub fn align_lines<S: AsRef<str>>(base: &[S], new: &[S]) -> Alignment {
    let mut out = Alignment {
        entries: Vec::with_capacity(base.len().max(new.len())),
        ..Alignment::default()
    };
    let (mut i, mut j) = (0, 0);

    while i < base.len() || j < new.len() {
        if i >= base.len() {
            out.entries.push(DiffEntry::added(new[j].as_ref()));
            out.added += 1;
            j += 1;
        } else if j >= new.len() {
            out.entries.push(DiffEntry::removed(base[i].as_ref()));
            out.removed += 1;
            i += 1;
        } else if base[i].as_ref() == new[j].as_ref() {
            out.entries.push(DiffEntry::context(base[i].as_ref()));
            i += 1;
            j += 1;
        } else {
            out.entries.push(DiffEntry::removed(base[i].as_ref()));
            out.removed += 1;
            out.modified += 1;
            i += 1;
            out.entries.push(DiffEntry::added(new[j].as_ref()));
            out.added += 1;
            j += 1;
        }
    }

    out
}
