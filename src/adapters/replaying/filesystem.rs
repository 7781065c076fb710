//! Replaying adapter for the `FileSystem` port.

use std::future;
use std::path::Path;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::format::RecordedError;
use crate::cassette::replayer::CassetteReplayer;
use crate::encoding::Encoding;
use crate::error::{parse_io_kind, FsError};
use crate::open_mode::OpenMode;
use crate::ports::filesystem::{DirMode, EntryMetadata, FileOptions, FileSystem, FsFuture};

/// Replays recorded filesystem operations from a cassette.
///
/// Arguments are not checked against the recording; each call takes the
/// next recorded result for its method.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction(method).output.clone()
    }

    fn replay<'a, T>(&'a self, method: &str, op: &'static str, path: &Path) -> FsFuture<'a, T>
    where
        T: DeserializeOwned + Send + 'a,
    {
        let output = self.next_output(method);
        let result = extract_result(&output, op, path);
        Box::pin(future::ready(result))
    }
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": {"kind": .., "message": ..}}`.
fn extract_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    op: &'static str,
    path: &Path,
) -> Result<T, FsError> {
    if let Some(err) = output.get("err") {
        return Err(match serde_json::from_value::<RecordedError>(err.clone()) {
            Ok(recorded) => {
                let io_kind = recorded.io_kind.as_deref().map(parse_io_kind);
                FsError::from_kind(op, path, recorded.kind, io_kind, &recorded.message)
            }
            Err(e) => FsError::invalid_input(op, path, format!("malformed recorded error: {e}")),
        });
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| FsError::invalid_input(op, path, format!("failed to deserialize: {e}")))
}

impl FileSystem for ReplayingFileSystem {
    fn create_dir<'a>(&'a self, path: &'a Path, _mode: DirMode) -> FsFuture<'a, ()> {
        self.replay("create_dir", "mkdir", path)
    }

    fn metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata> {
        self.replay("metadata", "stat", path)
    }

    fn symlink_metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata> {
        self.replay("symlink_metadata", "lstat", path)
    }

    fn read_file<'a>(&'a self, path: &'a Path, _flag: OpenMode) -> FsFuture<'a, Vec<u8>> {
        let output = self.next_output("read_file");
        let result = extract_result::<String>(&output, "read", path).and_then(|hex| {
            Encoding::Hex
                .encode(&hex)
                .map_err(|e| FsError::invalid_input("read", path, e.to_string()))
        });
        Box::pin(future::ready(result))
    }

    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        _data: &'a [u8],
        _options: FileOptions,
    ) -> FsFuture<'a, ()> {
        self.replay("write_file", "write", path)
    }

    fn append_file<'a>(
        &'a self,
        path: &'a Path,
        _data: &'a [u8],
        _options: FileOptions,
    ) -> FsFuture<'a, ()> {
        self.replay("append_file", "append", path)
    }

    fn remove_file<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        self.replay("remove_file", "unlink", path)
    }

    fn remove_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        self.replay("remove_dir", "rmdir", path)
    }

    fn rename<'a>(&'a self, from: &'a Path, _to: &'a Path) -> FsFuture<'a, ()> {
        self.replay("rename", "rename", from)
    }

    fn symlink<'a>(&'a self, _target: &'a Path, link: &'a Path) -> FsFuture<'a, ()> {
        self.replay("symlink", "symlink", link)
    }

    fn read_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<String>> {
        self.replay("read_dir", "readdir", path)
    }

    fn remove_all<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        self.replay("remove_all", "rm", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::error::FsErrorKind;
    use crate::ports::filesystem::EntryKind;
    use chrono::Utc;
    use serde_json::json;
    use std::path::PathBuf;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            working_dir: PathBuf::from("/"),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    fn interaction(method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq: 0, method: method.into(), input: json!({}), output }
    }

    #[tokio::test]
    async fn replays_metadata() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![interaction(
            "metadata",
            json!({"ok": {
                "kind": "directory",
                "len": 4096,
                "readonly": false,
                "permissions": 493,
                "modified": null
            }}),
        )]));
        let meta = fs.metadata(Path::new("/srv")).await.unwrap();
        assert_eq!(meta.kind, EntryKind::Directory);
        assert_eq!(meta.permissions, Some(0o755));
    }

    #[tokio::test]
    async fn replayed_errors_keep_their_kind() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![interaction(
            "create_dir",
            json!({"err": {"kind": "already_exists", "message": "File exists (os error 17)"}}),
        )]));
        let err = fs.create_dir(Path::new("/srv"), DirMode::default()).await.unwrap_err();
        assert_eq!(err.kind(), FsErrorKind::AlreadyExists);
        assert_eq!(err.to_string(), "mkdir '/srv': file already exists");
    }

    #[tokio::test]
    async fn replays_other_error_message() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![interaction(
            "symlink_metadata",
            json!({"err": {"kind": "other", "message": "Permission denied (os error 13)"}}),
        )]));
        let err = fs.symlink_metadata(Path::new("/root/x")).await.unwrap_err();
        assert_eq!(err.to_string(), "lstat '/root/x': Permission denied (os error 13)");
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::Other));
    }

    #[tokio::test]
    async fn replays_platform_error_kind() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![interaction(
            "remove_file",
            json!({"err": {
                "kind": "other",
                "io_kind": "PermissionDenied",
                "message": "Permission denied (os error 13)"
            }}),
        )]));
        let err = fs.remove_file(Path::new("/ro/file")).await.unwrap_err();
        match err {
            FsError::Other { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn replays_file_bytes_from_hex() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![interaction(
            "read_file",
            json!({"ok": "68656c6c6f"}),
        )]));
        let bytes = fs.read_file(Path::new("/greeting"), OpenMode::Read).await.unwrap();
        assert_eq!(bytes, b"hello");
    }
}
