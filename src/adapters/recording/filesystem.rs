//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::encoding::Encoding;
use crate::error::FsError;
use crate::open_mode::OpenMode;
use crate::ports::filesystem::{DirMode, EntryMetadata, FileOptions, FileSystem, FsFuture};

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a Path,
}

#[derive(Serialize)]
struct CreateDirInput<'a> {
    path: &'a Path,
    mode: DirMode,
}

#[derive(Serialize)]
struct ReadInput<'a> {
    path: &'a Path,
    flag: OpenMode,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a Path,
    flag: OpenMode,
    mode: Option<u32>,
    /// Payload as lowercase hex.
    data: String,
}

#[derive(Serialize)]
struct RenameInput<'a> {
    from: &'a Path,
    to: &'a Path,
}

#[derive(Serialize)]
struct SymlinkInput<'a> {
    target: &'a Path,
    link: &'a Path,
}

impl RecordingFileSystem {
    fn record_path<T: Serialize>(
        &self,
        method: &str,
        path: &Path,
        result: Result<T, &FsError>,
    ) {
        record_result(&self.recorder, method, &PathInput { path }, result);
    }
}

impl FileSystem for RecordingFileSystem {
    fn create_dir<'a>(&'a self, path: &'a Path, mode: DirMode) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.create_dir(path, mode).await;
            let input = CreateDirInput { path, mode };
            record_result(&self.recorder, "create_dir", &input, result.as_ref());
            result
        })
    }

    fn metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata> {
        Box::pin(async move {
            let result = self.inner.metadata(path).await;
            self.record_path("metadata", path, result.as_ref());
            result
        })
    }

    fn symlink_metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata> {
        Box::pin(async move {
            let result = self.inner.symlink_metadata(path).await;
            self.record_path("symlink_metadata", path, result.as_ref());
            result
        })
    }

    fn read_file<'a>(&'a self, path: &'a Path, flag: OpenMode) -> FsFuture<'a, Vec<u8>> {
        Box::pin(async move {
            let result = self.inner.read_file(path, flag).await;
            let snapshot = result.as_ref().map(|bytes| Encoding::Hex.decode(bytes));
            record_result(&self.recorder, "read_file", &ReadInput { path, flag }, snapshot);
            result
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
        options: FileOptions,
    ) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.write_file(path, data, options).await;
            let input = WriteInput {
                path,
                flag: options.flag,
                mode: options.mode,
                data: Encoding::Hex.decode(data),
            };
            record_result(&self.recorder, "write_file", &input, result.as_ref());
            result
        })
    }

    fn append_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
        options: FileOptions,
    ) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.append_file(path, data, options).await;
            let input = WriteInput {
                path,
                flag: options.flag,
                mode: options.mode,
                data: Encoding::Hex.decode(data),
            };
            record_result(&self.recorder, "append_file", &input, result.as_ref());
            result
        })
    }

    fn remove_file<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.remove_file(path).await;
            self.record_path("remove_file", path, result.as_ref());
            result
        })
    }

    fn remove_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.remove_dir(path).await;
            self.record_path("remove_dir", path, result.as_ref());
            result
        })
    }

    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.rename(from, to).await;
            record_result(&self.recorder, "rename", &RenameInput { from, to }, result.as_ref());
            result
        })
    }

    fn symlink<'a>(&'a self, target: &'a Path, link: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.symlink(target, link).await;
            let input = SymlinkInput { target, link };
            record_result(&self.recorder, "symlink", &input, result.as_ref());
            result
        })
    }

    fn read_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<String>> {
        Box::pin(async move {
            let result = self.inner.read_dir(path).await;
            self.record_path("read_dir", path, result.as_ref());
            result
        })
    }

    fn remove_all<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.remove_all(path).await;
            self.record_path("remove_all", path, result.as_ref());
            result
        })
    }
}
