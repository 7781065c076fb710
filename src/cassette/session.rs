//! Recording session owning the filesystem cassette recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// File name of the cassette inside a session directory.
pub const CASSETTE_FILE: &str = "fs.cassette.yaml";

/// Manages the recorder for one recording session.
///
/// The cassette is stored in a timestamped directory under the base
/// directory given to [`RecordingSession::new`].
pub struct RecordingSession {
    /// Recorder shared with the recording adapter.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing the cassette file.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session at `<base_dir>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session directory already exists
    /// - The directory cannot be created
    pub fn new(base_dir: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = base_dir.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let working_dir = std::env::current_dir().unwrap_or_default();
        let recorder = CassetteRecorder::new(
            output_dir.join(CASSETTE_FILE),
            format!("{timestamp}-fs"),
            working_dir,
        );
        tracing::debug!(dir = %output_dir.display(), "recording session started");

        Ok(Self { fs: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Output directory of this session.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish the recorder and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.fs)
            .map_err(|_| "Recording adapter for fs still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for fs poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write fs cassette: {e}"))?;
        Ok(self.output_dir)
    }
}
