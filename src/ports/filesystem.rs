//! Filesystem port: the primitive filesystem-call layer.

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FsError;
use crate::open_mode::OpenMode;

/// Boxed future type alias used by [`FileSystem`] to keep the trait dyn-compatible.
pub type FsFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FsError>> + Send + 'a>>;

/// Permission bits applied to directories that are actually created.
///
/// The default is `0o777`; the process umask still applies on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirMode(pub u32);

impl Default for DirMode {
    fn default() -> Self {
        Self(0o777)
    }
}

impl fmt::Display for DirMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

impl FromStr for DirMode {
    type Err = std::num::ParseIntError;

    /// Parses octal digits, with or without a `0o` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0o").unwrap_or(s);
        u32::from_str_radix(digits, 8).map(Self)
    }
}

/// What kind of entry a path denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (only reported by [`FileSystem::symlink_metadata`]).
    Symlink,
    /// Sockets, FIFOs, devices.
    Other,
}

/// Metadata for a single filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes.
    pub len: u64,
    /// Whether the entry is read-only for everyone.
    pub readonly: bool,
    /// Unix permission bits, when the platform has them.
    pub permissions: Option<u32>,
    /// Last modification time, when the platform reports it.
    pub modified: Option<DateTime<Utc>>,
}

impl EntryMetadata {
    /// Returns `true` for directories.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// How to open a file for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileOptions {
    /// Symbolic open mode.
    pub flag: OpenMode,
    /// Permission bits for a newly created file.
    pub mode: Option<u32>,
}

/// Provides the primitive filesystem calls.
///
/// Every method is a pass-through: implementations report what the host
/// reports and classify failures with [`FsError::from_io`]. The higher
/// level operations in [`crate::ops`] are written against this trait only.
pub trait FileSystem: Send + Sync {
    /// Creates a single directory.
    ///
    /// # Errors
    ///
    /// `NotFound` when the parent is missing, `AlreadyExists` when any entry
    /// occupies `path`.
    fn create_dir<'a>(&'a self, path: &'a Path, mode: DirMode) -> FsFuture<'a, ()>;

    /// Queries metadata, following symlinks.
    ///
    /// # Errors
    ///
    /// `NotFound` when the entry (or a symlink's target) is missing.
    fn metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata>;

    /// Queries metadata of the entry itself without following symlinks.
    ///
    /// # Errors
    ///
    /// `NotFound` when no entry exists at `path`.
    fn symlink_metadata<'a>(&'a self, path: &'a Path) -> FsFuture<'a, EntryMetadata>;

    /// Opens `path` with `flag` and reads its entire contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_file<'a>(&'a self, path: &'a Path, flag: OpenMode) -> FsFuture<'a, Vec<u8>>;

    /// Opens `path` with `options.flag` and writes `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
        options: FileOptions,
    ) -> FsFuture<'a, ()>;

    /// Opens `path` with `options.flag` in append mode and appends `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    fn append_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
        options: FileOptions,
    ) -> FsFuture<'a, ()>;

    /// Deletes a file or symlink.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    fn remove_file<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()>;

    /// Removes an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, not empty, or not a directory.
    fn remove_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()>;

    /// Renames `from` to `to`, replacing `to` if the platform allows it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> FsFuture<'a, ()>;

    /// Creates a symlink at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when `link` is occupied.
    fn symlink<'a>(&'a self, target: &'a Path, link: &'a Path) -> FsFuture<'a, ()>;

    /// Lists entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn read_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<String>>;

    /// Removes `path` and, if it is a directory, everything beneath it.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing exists at `path`; any failure mid-walk.
    fn remove_all<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_mode_parses_octal() {
        assert_eq!("755".parse::<DirMode>().unwrap(), DirMode(0o755));
        assert_eq!("0o700".parse::<DirMode>().unwrap(), DirMode(0o700));
        assert!("9".parse::<DirMode>().is_err());
        assert_eq!(DirMode::default().to_string(), "777");
    }
}
