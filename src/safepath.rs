//! Path joining that cannot escape the project root.
//!
//! Relative paths from configuration (required files, external check
//! `source_dir`) are normalised lexically and refused if they climb out of
//! the root or are absolute.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, VettedError};

/// Join `relative` onto `root`, refusing absolute paths and `..` escapes.
pub fn safe_join(root: &Path, relative: &str) -> Result<PathBuf> {
    let unsafe_path = || VettedError::UnsafePath {
        path: relative.to_string(),
    };

    let mut normalized = PathBuf::new();
    let mut depth = 0usize;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                normalized.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(unsafe_path());
                }
                normalized.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(unsafe_path()),
        }
    }

    Ok(root.join(normalized))
}

/// Whether `relative` exists under `root`. Escaping paths never exist.
pub fn exists(root: &Path, relative: &str) -> bool {
    safe_join(root, relative).is_ok_and(|p| p.exists())
}

/// Whether `relative` is a directory under `root`.
pub fn is_dir(root: &Path, relative: &str) -> bool {
    safe_join(root, relative).is_ok_and(|p| p.is_dir())
}
