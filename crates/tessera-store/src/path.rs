use std::path::{Component, Path};

use crate::error::{StoreError, StoreResult};

/// Check that `path` is a non-empty relative path that stays under the root.
pub fn validate_relative_path(path: &str) -> StoreResult<()> {
    let invalid = |reason| {
        Err(StoreError::InvalidPath {
            path: path.to_string(),
            reason,
        })
    };

    if path.is_empty() {
        return invalid("path is empty");
    }
    if path.contains('\0') {
        return invalid("path contains a NUL byte");
    }
    if path.ends_with('/') {
        return invalid("path names a directory");
    }

    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => return invalid("path contains a `.` component"),
            Component::ParentDir => return invalid("path contains a `..` component"),
            Component::RootDir | Component::Prefix(_) => return invalid("path is absolute"),
        }
    }
    Ok(())
}
