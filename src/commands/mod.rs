//! Command dispatch and handlers.

pub mod dir;
pub mod probe;
pub mod text;

use std::io::{self, Write};

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `FSAWAIT_RECORD` is set to a directory path, all filesystem calls
/// are recorded to a cassette file in a new session directory beneath it.
/// When `FSAWAIT_REPLAY` names a cassette, calls are served from it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env()?;
    let (ctx, session) = ServiceContext::from_config(&config)?;

    let result = dispatch_with_context(command, &ctx).await;

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    let output = result?;
    if matches!(command, Command::Read { .. }) {
        // File contents are printed verbatim.
        print!("{output}");
        io::stdout().flush().map_err(|e| format!("Failed to write output: {e}"))?;
    } else if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Dispatch a command with the given service context, returning what it prints.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
) -> Result<String, String> {
    match command {
        Command::Mkdirp { path, mode } => dir::mkdirp(ctx, path, *mode).await,
        Command::Rm { path } => dir::rm(ctx, path).await,
        Command::Ls { path } => dir::ls(ctx, path).await,
        Command::Exists { path } => probe::exists(ctx, path).await,
        Command::Stat { path, no_follow } => probe::stat(ctx, path, *no_follow).await,
        Command::Read { path, encoding, flag } => text::read(ctx, path, *encoding, *flag).await,
        Command::Write { path, data, encoding, flag, mode } => {
            text::write(ctx, path, data, *encoding, *flag, mode.map(|m| m.0)).await
        }
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
