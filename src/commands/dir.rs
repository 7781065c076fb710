//! Directory commands: `mkdirp`, `rm`, `ls`.

use std::path::Path;

use crate::context::ServiceContext;
use crate::ops;
use crate::ports::filesystem::DirMode;

/// Ensure `path` exists as a directory.
///
/// # Errors
///
/// Returns the operation's error message.
pub async fn mkdirp(
    ctx: &ServiceContext,
    path: &Path,
    mode: Option<DirMode>,
) -> Result<String, String> {
    let mode = mode.unwrap_or(ctx.dir_mode);
    ops::ensure_dir(ctx.fs.as_ref(), path, mode).await.map_err(|e| e.to_string())?;
    Ok(String::new())
}

/// Remove `path` recursively.
///
/// # Errors
///
/// Returns the operation's error message.
pub async fn rm(ctx: &ServiceContext, path: &Path) -> Result<String, String> {
    ops::remove_recursive(ctx.fs.as_ref(), path).await.map_err(|e| e.to_string())?;
    Ok(String::new())
}

/// List the entries of a directory, one per line.
///
/// # Errors
///
/// Returns the operation's error message.
pub async fn ls(ctx: &ServiceContext, path: &Path) -> Result<String, String> {
    let entries = ctx.fs.read_dir(path).await.map_err(|e| e.to_string())?;
    Ok(entries.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mkdirp_then_ls_then_rm() {
        let dir = std::env::temp_dir().join(format!("fsawait_cmd_dir_{}", uuid::Uuid::new_v4()));
        let ctx = ServiceContext::live();

        mkdirp(&ctx, &dir.join("one"), None).await.unwrap();
        mkdirp(&ctx, &dir.join("two"), Some(DirMode(0o700))).await.unwrap();
        assert_eq!(ls(&ctx, &dir).await.unwrap(), "one\ntwo");

        rm(&ctx, &dir).await.unwrap();
        assert!(!dir.exists());
    }
}
