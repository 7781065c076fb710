//! Existence checking.

use std::path::Path;

use crate::error::FsError;
use crate::ports::filesystem::FileSystem;

/// Reports whether `path` denotes an existing entry of any kind.
///
/// Uses `symlink_metadata`, so a symlink whose target is missing still
/// exists.
///
/// # Errors
///
/// Only "not found" maps to `false`. Permission errors, I/O errors and a
/// regular file used as an ancestor segment are returned as errors.
pub async fn exists(fs: &dyn FileSystem, path: &Path) -> Result<bool, FsError> {
    match fs.symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(FsError::NotFound { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}
