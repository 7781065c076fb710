//! Service context bundling the filesystem port with run settings.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::{Config, SessionMode};
use crate::ports::filesystem::{DirMode, FileSystem};

/// Bundles the filesystem port and the default directory mode.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Filesystem for all operations.
    pub fs: Box<dyn FileSystem>,
    /// Mode for directories created without an explicit one.
    pub dir_mode: DirMode,
}

impl ServiceContext {
    /// Creates a live context backed by the host filesystem.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem), dir_mode: DirMode::default() }
    }

    /// Creates a live context whose calls are recorded into `session`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    #[must_use]
    pub fn recording(session: &RecordingSession) -> Self {
        let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs));
        Self { fs: Box::new(fs), dir_mode: DirMode::default() }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        tracing::debug!(
            path = %path.display(),
            interactions = cassette.interactions.len(),
            "replaying cassette"
        );
        let fs = ReplayingFileSystem::new(CassetteReplayer::new(&cassette));
        Ok(Self { fs: Box::new(fs), dir_mode: DirMode::default() })
    }

    /// Builds the context described by `config`.
    ///
    /// When recording, the session is returned alongside the context and
    /// must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session cannot be started or the
    /// replay cassette cannot be loaded.
    pub fn from_config(config: &Config) -> Result<(Self, Option<RecordingSession>), String> {
        let (mut ctx, session) = match &config.session {
            SessionMode::Live => (Self::live(), None),
            SessionMode::Record(dir) => {
                let session = RecordingSession::new(dir)?;
                (Self::recording(&session), Some(session))
            }
            SessionMode::Replay(path) => (Self::replaying(path)?, None),
        };
        ctx.dir_mode = config.dir_mode;
        Ok((ctx, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use crate::cassette::session::CASSETTE_FILE;
    use crate::ops::exists;
    use chrono::Utc;
    use serde_json::json;

    fn scratch_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("fsawait_ctx_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn replaying_context_serves_cassette() {
        let dir = scratch_dir();
        let path = dir.join("probe.cassette.yaml");
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            working_dir: dir.clone(),
            interactions: vec![Interaction {
                seq: 0,
                method: "symlink_metadata".into(),
                input: json!({"path": "/anywhere"}),
                output: json!({"err": {"kind": "not_found", "message": "gone"}}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert!(!exists(ctx.fs.as_ref(), Path::new("/anywhere")).await.unwrap());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn recording_config_returns_session_to_finish() {
        let dir = scratch_dir();
        let config = Config {
            session: SessionMode::Record(dir.join("sessions")),
            dir_mode: DirMode(0o755),
        };

        let (ctx, session) = ServiceContext::from_config(&config).unwrap();
        assert_eq!(ctx.dir_mode, DirMode(0o755));
        assert!(exists(ctx.fs.as_ref(), &dir).await.unwrap());
        drop(ctx);

        let out = session.expect("recording session").finish().unwrap();
        let recorded = Cassette::load(&out.join(CASSETTE_FILE)).unwrap();
        assert_eq!(recorded.interactions.len(), 1);
        assert_eq!(recorded.interactions[0].method, "symlink_metadata");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_replay_cassette_is_an_error() {
        let config = Config {
            session: SessionMode::Replay("/no/such/cassette.yaml".into()),
            ..Config::default()
        };
        assert!(ServiceContext::from_config(&config).is_err());
    }
}
