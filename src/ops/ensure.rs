//! Recursive directory creation (`mkdir -p`).

use std::path::{Path, PathBuf};

use crate::error::FsError;
use crate::ops::path::resolve;
use crate::ports::filesystem::{DirMode, FileSystem};

/// Ensures `path` and every ancestor exist as directories.
///
/// The walk goes up from `path`, collecting segments whose parent is
/// missing, until a `create_dir` call succeeds or hits an existing entry.
/// It then creates the collected segments top-down. `mode` applies only to
/// directories this call creates.
///
/// An existing entry is re-checked with `metadata`, so a directory created
/// concurrently by someone else counts as success. Ancestors created before
/// a failure are left in place.
///
/// # Errors
///
/// - [`FsError::NotADirectory`] when a non-directory occupies `path` or an
///   ancestor.
/// - Any other error from the primitives, unchanged.
pub async fn ensure_dir(fs: &dyn FileSystem, path: &Path, mode: DirMode) -> Result<(), FsError> {
    let target = resolve("mkdir", path)?;
    tracing::debug!(path = %target.display(), %mode, "ensure_dir");

    let mut pending: Vec<PathBuf> = Vec::new();
    let mut cursor = target;
    loop {
        match fs.create_dir(&cursor, mode).await {
            Ok(()) => break,
            Err(FsError::NotFound { .. }) => {
                let Some(parent) = cursor.parent().map(Path::to_path_buf) else {
                    return Err(FsError::NotFound { op: "mkdir", path: cursor });
                };
                tracing::trace!(missing = %parent.display(), "ancestor missing");
                pending.push(cursor);
                cursor = parent;
            }
            Err(FsError::AlreadyExists { .. }) => {
                verify_directory(fs, &cursor).await?;
                break;
            }
            Err(err) => return Err(err),
        }
    }

    while let Some(dir) = pending.pop() {
        match fs.create_dir(&dir, mode).await {
            Ok(()) => tracing::trace!(path = %dir.display(), "created"),
            Err(FsError::AlreadyExists { .. }) => verify_directory(fs, &dir).await?,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Succeeds when `path` (following symlinks) is a directory.
///
/// Only called after `create_dir` saw an entry at `path`, so a `NotFound`
/// here means a dangling symlink occupies it.
async fn verify_directory(fs: &dyn FileSystem, path: &Path) -> Result<(), FsError> {
    match fs.metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) | Err(FsError::NotFound { .. }) => {
            Err(FsError::NotADirectory { path: path.to_path_buf() })
        }
        Err(err) => Err(err),
    }
}
