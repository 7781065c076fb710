//! Probe commands: `exists` and `stat`.

use std::path::Path;

use crate::context::ServiceContext;
use crate::ops;

/// Print `true` or `false`.
///
/// # Errors
///
/// Returns the probe's error message for anything but "not found".
pub async fn exists(ctx: &ServiceContext, path: &Path) -> Result<String, String> {
    let found = ops::exists(ctx.fs.as_ref(), path).await.map_err(|e| e.to_string())?;
    Ok(found.to_string())
}

/// Print entry metadata as pretty JSON.
///
/// # Errors
///
/// Returns the metadata query's error message.
pub async fn stat(ctx: &ServiceContext, path: &Path, no_follow: bool) -> Result<String, String> {
    let meta = if no_follow {
        ctx.fs.symlink_metadata(path).await
    } else {
        ctx.fs.metadata(path).await
    }
    .map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&meta).map_err(|e| format!("Failed to serialize metadata: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exists_prints_bool() {
        let ctx = ServiceContext::live();
        let missing = std::env::temp_dir().join(format!("fsawait_cmd_{}", uuid::Uuid::new_v4()));
        assert_eq!(exists(&ctx, &missing).await.unwrap(), "false");
        assert_eq!(exists(&ctx, &std::env::temp_dir()).await.unwrap(), "true");
    }

    #[tokio::test]
    async fn stat_reports_directory_kind() {
        let ctx = ServiceContext::live();
        let json = stat(&ctx, &std::env::temp_dir(), false).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "directory");
    }
}
