//! Error taxonomy shared by every filesystem operation.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a filesystem operation.
///
/// The first three variants are the conditions callers branch on. Everything
/// else (permission denied, I/O failures, invalid input) is carried opaquely
/// in [`FsError::Other`].
#[derive(Debug, Error)]
pub enum FsError {
    /// No entry exists at `path` (or one of its ancestors is missing).
    #[error("{op} '{}': no such file or directory", path.display())]
    NotFound {
        /// The primitive that failed.
        op: &'static str,
        /// Path the primitive was called with.
        path: PathBuf,
    },

    /// An entry already exists at `path`.
    #[error("{op} '{}': file already exists", path.display())]
    AlreadyExists {
        /// The primitive that failed.
        op: &'static str,
        /// Path the primitive was called with.
        path: PathBuf,
    },

    /// A non-directory occupies `path` (or one of its ancestors) where a
    /// directory was required.
    #[error("'{}' exists and is not a directory", path.display())]
    NotADirectory {
        /// The conflicting path.
        path: PathBuf,
    },

    /// Any other failure, passed through from the platform.
    #[error("{op} '{}': {source}", path.display())]
    Other {
        /// The primitive that failed.
        op: &'static str,
        /// Path the primitive was called with.
        path: PathBuf,
        /// The underlying platform error.
        #[source]
        source: io::Error,
    },
}

/// Serializable classification of an [`FsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsErrorKind {
    /// See [`FsError::NotFound`].
    NotFound,
    /// See [`FsError::AlreadyExists`].
    AlreadyExists,
    /// See [`FsError::NotADirectory`].
    NotADirectory,
    /// See [`FsError::Other`].
    Other,
}

impl FsError {
    /// Classifies a platform error raised by primitive `op` on `path`.
    pub fn from_io(op: &'static str, path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { op, path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { op, path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Other { op, path, source: err },
        }
    }

    /// Rebuilds an error from its recorded kind and message.
    ///
    /// `io_kind` restores the platform kind of an [`FsError::Other`]; when
    /// absent the source is [`io::ErrorKind::Other`].
    pub fn from_kind(
        op: &'static str,
        path: &Path,
        kind: FsErrorKind,
        io_kind: Option<io::ErrorKind>,
        message: &str,
    ) -> Self {
        let path = path.to_path_buf();
        match kind {
            FsErrorKind::NotFound => Self::NotFound { op, path },
            FsErrorKind::AlreadyExists => Self::AlreadyExists { op, path },
            FsErrorKind::NotADirectory => Self::NotADirectory { path },
            FsErrorKind::Other => {
                let io_kind = io_kind.unwrap_or(io::ErrorKind::Other);
                Self::Other { op, path, source: io::Error::new(io_kind, message.to_string()) }
            }
        }
    }

    /// Builds an [`FsError::Other`] for input rejected before reaching the platform.
    pub fn invalid_input(op: &'static str, path: &Path, message: impl Into<String>) -> Self {
        Self::Other {
            op,
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, message.into()),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> FsErrorKind {
        match self {
            Self::NotFound { .. } => FsErrorKind::NotFound,
            Self::AlreadyExists { .. } => FsErrorKind::AlreadyExists,
            Self::NotADirectory { .. } => FsErrorKind::NotADirectory,
            Self::Other { .. } => FsErrorKind::Other,
        }
    }

    /// Returns the path the failure refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::AlreadyExists { path, .. }
            | Self::NotADirectory { path }
            | Self::Other { path, .. } => path,
        }
    }

    /// Platform kind carried by an [`FsError::Other`].
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Other { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Message stored for the error when it is recorded.
    ///
    /// For [`FsError::Other`] this is the platform message alone, so a
    /// replayed error displays the same as the original.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Other { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Platform kinds that survive a record/replay round trip by name.
const NAMED_IO_KINDS: &[io::ErrorKind] = &[
    io::ErrorKind::NotFound,
    io::ErrorKind::PermissionDenied,
    io::ErrorKind::AlreadyExists,
    io::ErrorKind::WouldBlock,
    io::ErrorKind::NotADirectory,
    io::ErrorKind::IsADirectory,
    io::ErrorKind::DirectoryNotEmpty,
    io::ErrorKind::ReadOnlyFilesystem,
    io::ErrorKind::StorageFull,
    io::ErrorKind::FileTooLarge,
    io::ErrorKind::ResourceBusy,
    io::ErrorKind::CrossesDevices,
    io::ErrorKind::TooManyLinks,
    io::ErrorKind::InvalidInput,
    io::ErrorKind::InvalidData,
    io::ErrorKind::TimedOut,
    io::ErrorKind::WriteZero,
    io::ErrorKind::Interrupted,
    io::ErrorKind::Unsupported,
    io::ErrorKind::UnexpectedEof,
    io::ErrorKind::OutOfMemory,
    io::ErrorKind::Other,
];

/// Name an [`io::ErrorKind`] is recorded under (its variant name).
#[must_use]
pub fn io_kind_name(kind: io::ErrorKind) -> String {
    format!("{kind:?}")
}

/// Parses a name written by [`io_kind_name`]. Unknown names map to
/// [`io::ErrorKind::Other`].
#[must_use]
pub fn parse_io_kind(name: &str) -> io::ErrorKind {
    NAMED_IO_KINDS
        .iter()
        .copied()
        .find(|kind| io_kind_name(*kind) == name)
        .unwrap_or(io::ErrorKind::Other)
}
