//! Lexical path resolution.

use std::path::{Component, Path, PathBuf};

use crate::error::FsError;

/// Resolves `path` against the current directory and normalizes it
/// lexically: `.` segments are dropped and `..` pops the previous segment.
/// Symlinks are not consulted.
///
/// # Errors
///
/// Returns [`FsError::Other`] for an empty path or when the current
/// directory cannot be determined.
pub fn resolve(op: &'static str, path: &Path) -> Result<PathBuf, FsError> {
    if path.as_os_str().is_empty() {
        return Err(FsError::invalid_input(op, path, "empty path"));
    }
    let absolute = std::path::absolute(path).map_err(|e| FsError::from_io(op, path, e))?;
    Ok(normalize(&absolute))
}

/// Lexically normalizes an absolute path.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
