//! Cassette data structures for recording and replaying interactions.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_kind_name, FsError, FsErrorKind};

/// A single recorded call on the filesystem port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port method invoked (e.g. "create_dir", "symlink_metadata").
    pub method: String,
    /// Arguments passed to the method.
    pub input: serde_json::Value,
    /// Result returned, as `{"ok": ..}` or `{"err": {"kind": .., "message": ..}}`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Working directory at recording time; relative paths resolved against it.
    pub working_dir: PathBuf,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Recorded form of an [`FsError`], stored under the `err` key of an output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedError {
    /// Error classification.
    pub kind: FsErrorKind,
    /// Platform error kind name for `other` errors (e.g. `PermissionDenied`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io_kind: Option<String>,
    /// Platform message.
    pub message: String,
}

impl From<&FsError> for RecordedError {
    fn from(err: &FsError) -> Self {
        Self {
            kind: err.kind(),
            io_kind: err.io_kind().map(io_kind_name),
            message: err.detail(),
        }
    }
}

impl Cassette {
    /// Reads and parses a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}
