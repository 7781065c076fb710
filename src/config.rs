//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::ports::filesystem::DirMode;

/// Directory to record sessions under.
pub const RECORD_VAR: &str = "FSAWAIT_RECORD";
/// Cassette file to replay.
pub const REPLAY_VAR: &str = "FSAWAIT_REPLAY";
/// Default permission bits (octal) for created directories.
pub const DIR_MODE_VAR: &str = "FSAWAIT_DIR_MODE";

/// Which filesystem adapter backs a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Real disk I/O.
    #[default]
    Live,
    /// Real disk I/O, recorded to a cassette under the given directory.
    Record(PathBuf),
    /// Results served from the given cassette file.
    Replay(PathBuf),
}

/// Settings for a CLI run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Adapter selection.
    pub session: SessionMode,
    /// Mode applied to directories created without an explicit `--mode`.
    pub dir_mode: DirMode,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_vars`].
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(std::env::vars())
    }

    /// Builds configuration from `(name, value)` pairs. Empty values are
    /// treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if both record and replay are requested, or the
    /// directory mode is not valid octal.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = None;
        let mut replay = None;
        let mut dir_mode = DirMode::default();

        for (key, value) in vars {
            let value: String = value.into();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                RECORD_VAR => record = Some(PathBuf::from(value)),
                REPLAY_VAR => replay = Some(PathBuf::from(value)),
                DIR_MODE_VAR => {
                    dir_mode = value
                        .parse()
                        .map_err(|e| format!("Invalid {DIR_MODE_VAR} '{value}': {e}"))?;
                }
                _ => {}
            }
        }

        let session = match (record, replay) {
            (Some(_), Some(_)) => {
                return Err(format!("{RECORD_VAR} and {REPLAY_VAR} cannot both be set"));
            }
            (Some(dir), None) => SessionMode::Record(dir),
            (None, Some(file)) => SessionMode::Replay(file),
            (None, None) => SessionMode::Live,
        };

        Ok(Self { session, dir_mode })
    }
}
