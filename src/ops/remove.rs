//! Recursive deletion.

use std::path::Path;

use crate::error::FsError;
use crate::ops::path::resolve;
use crate::ports::filesystem::FileSystem;

/// Removes `path` and, if it is a directory, everything beneath it.
///
/// The path is made absolute and `..` segments are collapsed, as for
/// [`ensure_dir`](crate::ops::ensure_dir). The tree walk is the port's
/// `remove_all`. A path that is already absent counts as removed.
///
/// # Errors
///
/// [`FsError::Other`] with `InvalidInput` for an empty path, or any failure
/// reported by the port other than "not found".
pub async fn remove_recursive(fs: &dyn FileSystem, path: &Path) -> Result<(), FsError> {
    let target = resolve("rm", path)?;
    tracing::debug!(path = %target.display(), "remove_recursive");
    match fs.remove_all(&target).await {
        Ok(()) | Err(FsError::NotFound { .. }) => Ok(()),
        Err(err) => Err(err),
    }
}
