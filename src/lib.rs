//! Awaitable filesystem operations.
//!
//! The primitives live behind the [`FileSystem`] port; [`ops`] layers
//! `mkdir -p`, existence probing, recursive deletion and text read/write on
//! top of it. The `fsawait` binary exposes the same operations on the
//! command line.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod open_mode;
pub mod ops;
pub mod ports;

pub use adapters::live::LiveFileSystem;
pub use encoding::Encoding;
pub use error::{FsError, FsErrorKind};
pub use open_mode::OpenMode;
pub use ops::{
    ensure_dir, exists, read_text, remove_recursive, write_text, ReadTextOptions,
    WriteTextOptions,
};
pub use ports::{DirMode, EntryKind, EntryMetadata, FileOptions, FileSystem, FsFuture};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to start async runtime: {err}"))?;
    runtime.block_on(commands::dispatch(&cli.command))
}
