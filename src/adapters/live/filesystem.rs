//! Live filesystem adapter using `tokio::fs`.

use std::fs::Metadata;
use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::FsError;
use crate::open_mode::OpenMode;
use crate::ports::filesystem::{
    DirMode, EntryKind, EntryMetadata, FileOptions, FileSystem, FsFuture,
};

/// Live filesystem adapter backed by real disk I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveFileSystem;

fn to_entry(meta: &Metadata) -> EntryMetadata {
    let file_type = meta.file_type();
    let kind = if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };

    #[cfg(unix)]
    let permissions = {
        use std::os::unix::fs::PermissionsExt;
        Some(meta.permissions().mode() & 0o7777)
    };
    #[cfg(not(unix))]
    let permissions = None;

    EntryMetadata {
        kind,
        len: meta.len(),
        readonly: meta.permissions().readonly(),
        permissions,
        modified: meta.modified().ok().map(DateTime::<Utc>::from),
    }
}

/// Translates a symbolic open mode into tokio open options.
fn open_options(flag: OpenMode, mode: Option<u32>) -> OpenOptions {
    let mut options = OpenOptions::new();
    options
        .read(flag.is_readable())
        .write(flag.is_writable() && !flag.is_append())
        .append(flag.is_append())
        .truncate(flag.truncates());
    if flag.is_exclusive() {
        options.create_new(true);
    } else if flag.creates() {
        options.create(true);
    }
    #[cfg(unix)]
    {
        if let Some(mode) = mode {
            options.mode(mode);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;
    options
}

async fn write_with(
    op: &'static str,
    path: &Path,
    data: &[u8],
    flag: OpenMode,
    mode: Option<u32>,
) -> Result<(), FsError> {
    let err = |e: std::io::Error| FsError::from_io(op, path, e);
    let mut file = open_options(flag, mode).open(path).await.map_err(err)?;
    file.write_all(data).await.map_err(err)?;
    file.flush().await.map_err(err)
}

impl FileSystem for LiveFileSystem {
    fn create_dir<'a>(&'a self, path: &'a Path, mode: DirMode) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), mode = %mode, "mkdir");
            let mut builder = fs::DirBuilder::new();
            #[cfg(unix)]
            {
                builder.mode(mode.0);
            }
            builder.create(path).await.map_err(|e| FsError::from_io("mkdir", path, e))
        })
    }

    fn metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "stat");
            let meta = fs::metadata(path).await.map_err(|e| FsError::from_io("stat", path, e))?;
            Ok(to_entry(&meta))
        })
    }

    fn symlink_metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "lstat");
            let meta = fs::symlink_metadata(path)
                .await
                .map_err(|e| FsError::from_io("lstat", path, e))?;
            Ok(to_entry(&meta))
        })
    }

    fn read_file<'a>(&'a self, path: &'a Path, flag: OpenMode) -> FsFuture<'a, Vec<u8>> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), %flag, "read");
            let err = |e: std::io::Error| FsError::from_io("read", path, e);
            let mut file = open_options(flag, None).open(path).await.map_err(err)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).await.map_err(err)?;
            Ok(buf)
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
        options: FileOptions,
    ) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), flag = %options.flag, bytes = data.len(), "write");
            write_with("write", path, data, options.flag, options.mode).await
        })
    }

    fn append_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
        options: FileOptions,
    ) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), flag = %options.flag, bytes = data.len(), "append");
            let flag = if options.flag.is_append() { options.flag } else { OpenMode::Append };
            write_with("append", path, data, flag, options.mode).await
        })
    }

    fn remove_file<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "unlink");
            fs::remove_file(path).await.map_err(|e| FsError::from_io("unlink", path, e))
        })
    }

    fn remove_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "rmdir");
            fs::remove_dir(path).await.map_err(|e| FsError::from_io("rmdir", path, e))
        })
    }

    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(from = %from.display(), to = %to.display(), "rename");
            fs::rename(from, to).await.map_err(|e| FsError::from_io("rename", from, e))
        })
    }

    fn symlink<'a>(&'a self, target: &'a Path, link: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(target = %target.display(), link = %link.display(), "symlink");
            #[cfg(unix)]
            let result = fs::symlink(target, link).await;
            #[cfg(windows)]
            let result = fs::symlink_file(target, link).await;
            result.map_err(|e| FsError::from_io("symlink", link, e))
        })
    }

    fn read_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<String>> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "readdir");
            let err = |e: std::io::Error| FsError::from_io("readdir", path, e);
            let mut entries = Vec::new();
            let mut dir = fs::read_dir(path).await.map_err(err)?;
            while let Some(entry) = dir.next_entry().await.map_err(err)? {
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
            entries.sort();
            Ok(entries)
        })
    }

    fn remove_all<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            tracing::debug!(path = %path.display(), "rm -rf");
            let err = |e: std::io::Error| FsError::from_io("rm", path, e);
            let meta = fs::symlink_metadata(path).await.map_err(err)?;
            if meta.is_dir() {
                fs::remove_dir_all(path).await.map_err(err)
            } else {
                fs::remove_file(path).await.map_err(err)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("fsawait_live_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn create_dir_reports_missing_parent_and_existing_entry() {
        let dir = scratch_dir();
        let fs = LiveFileSystem;

        let missing = dir.join("a").join("b");
        let err = fs.create_dir(&missing, DirMode::default()).await.unwrap_err();
        assert!(matches!(err, FsError::NotFound { op: "mkdir", .. }));

        fs.create_dir(&dir.join("a"), DirMode::default()).await.unwrap();
        let err = fs.create_dir(&dir.join("a"), DirMode::default()).await.unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn exclusive_write_refuses_existing_file() {
        let dir = scratch_dir();
        let fs = LiveFileSystem;
        let file = dir.join("once.txt");
        let options = FileOptions { flag: OpenMode::WriteExclusive, mode: None };

        fs.write_file(&file, b"first", options).await.unwrap();
        let err = fs.write_file(&file, b"second", options).await.unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
        assert_eq!(fs.read_file(&file, OpenMode::Read).await.unwrap(), b"first");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn write_truncates_previous_content() {
        let dir = scratch_dir();
        let fs = LiveFileSystem;
        let file = dir.join("t.txt");

        let options = FileOptions { flag: OpenMode::Write, mode: None };

        fs.write_file(&file, b"longer content", options).await.unwrap();
        fs.write_file(&file, b"short", options).await.unwrap();
        assert_eq!(fs.read_file(&file, OpenMode::Read).await.unwrap(), b"short");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn read_dir_is_sorted() {
        let dir = scratch_dir();
        let fs = LiveFileSystem;
        for name in ["c", "a", "b"] {
            std::fs::write(dir.join(name), "").unwrap();
        }

        assert_eq!(fs.read_dir(&dir).await.unwrap(), vec!["a", "b", "c"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_metadata_does_not_follow() {
        let dir = scratch_dir();
        let fs = LiveFileSystem;
        let link = dir.join("dangling");
        fs.symlink(&dir.join("nowhere"), &link).await.unwrap();

        let meta = fs.symlink_metadata(&link).await.unwrap();
        assert_eq!(meta.kind, EntryKind::Symlink);
        let err = fs.metadata(&link).await.unwrap_err();
        assert!(matches!(err, FsError::NotFound { op: "stat", .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn create_dir_applies_mode() {
        let dir = scratch_dir();
        let fs = LiveFileSystem;
        let target = dir.join("private");
        fs.create_dir(&target, DirMode(0o700)).await.unwrap();

        let meta = fs.metadata(&target).await.unwrap();
        assert_eq!(meta.permissions, Some(0o700));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
