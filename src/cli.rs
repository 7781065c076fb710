//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::encoding::Encoding;
use crate::open_mode::OpenMode;
use crate::ports::filesystem::DirMode;

/// Top-level CLI parser for `fsawait`.
#[derive(Debug, Parser)]
#[command(name = "fsawait", version, about = "Awaitable filesystem operations")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a directory and any missing ancestors.
    Mkdirp {
        /// Directory to ensure.
        path: PathBuf,
        /// Permission bits (octal) for created directories.
        #[arg(long)]
        mode: Option<DirMode>,
    },
    /// Print whether an entry exists at the path.
    Exists {
        /// Path to probe.
        path: PathBuf,
    },
    /// Remove a file or a directory tree.
    Rm {
        /// Path to remove.
        path: PathBuf,
    },
    /// Print a file as text.
    Read {
        /// File to read.
        path: PathBuf,
        /// Text encoding.
        #[arg(long, default_value_t = Encoding::Utf8)]
        encoding: Encoding,
        /// Open mode.
        #[arg(long, default_value_t = OpenMode::Read)]
        flag: OpenMode,
    },
    /// Write text to a file.
    Write {
        /// File to write.
        path: PathBuf,
        /// Text to write.
        data: String,
        /// Text encoding.
        #[arg(long, default_value_t = Encoding::Utf8)]
        encoding: Encoding,
        /// Open mode; `a`, `ax`, `a+` and `ax+` append.
        #[arg(long, default_value_t = OpenMode::Write)]
        flag: OpenMode,
        /// Permission bits (octal) for a newly created file.
        #[arg(long)]
        mode: Option<DirMode>,
    },
    /// Print entry metadata as JSON.
    Stat {
        /// Path to inspect.
        path: PathBuf,
        /// Report on a symlink itself instead of its target.
        #[arg(long)]
        no_follow: bool,
    },
    /// List directory entries.
    Ls {
        /// Directory to list.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::encoding::Encoding;
    use crate::open_mode::OpenMode;
    use crate::ports::filesystem::DirMode;
    use clap::Parser;

    #[test]
    fn parses_mkdirp_with_mode() {
        let cli = Cli::parse_from(["fsawait", "mkdirp", "a/b", "--mode", "750"]);
        match cli.command {
            Command::Mkdirp { path, mode } => {
                assert_eq!(path.to_str(), Some("a/b"));
                assert_eq!(mode, Some(DirMode(0o750)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn write_defaults_to_utf8_truncate() {
        let cli = Cli::parse_from(["fsawait", "write", "f.txt", "hello"]);
        match cli.command {
            Command::Write { encoding, flag, mode, .. } => {
                assert_eq!(encoding, Encoding::Utf8);
                assert_eq!(flag, OpenMode::Write);
                assert_eq!(mode, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_append_flag() {
        let cli = Cli::parse_from(["fsawait", "write", "f.txt", "x", "--flag", "a+"]);
        assert!(matches!(cli.command, Command::Write { flag: OpenMode::AppendRead, .. }));
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["fsawait", "read", "f.txt", "--flag", "rw"]).is_err());
    }

    #[test]
    fn parses_stat_no_follow() {
        let cli = Cli::parse_from(["fsawait", "stat", "link", "--no-follow"]);
        assert!(matches!(cli.command, Command::Stat { no_follow: true, .. }));
    }
}
