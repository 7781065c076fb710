//! Symbolic open modes (`r`, `w+`, `ax`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read/write/append/exclusive-create intent passed when opening a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenMode {
    /// `r`: read; the file must exist.
    #[default]
    #[serde(rename = "r")]
    Read,
    /// `r+`: read and write; the file must exist.
    #[serde(rename = "r+")]
    ReadWrite,
    /// `w`: write, creating or truncating.
    #[serde(rename = "w")]
    Write,
    /// `wx`: write, failing if the file exists.
    #[serde(rename = "wx")]
    WriteExclusive,
    /// `w+`: read and write, creating or truncating.
    #[serde(rename = "w+")]
    WriteRead,
    /// `wx+`: read and write, failing if the file exists.
    #[serde(rename = "wx+")]
    WriteReadExclusive,
    /// `a`: append, creating if missing.
    #[serde(rename = "a")]
    Append,
    /// `ax`: append, failing if the file exists.
    #[serde(rename = "ax")]
    AppendExclusive,
    /// `a+`: read and append, creating if missing.
    #[serde(rename = "a+")]
    AppendRead,
    /// `ax+`: read and append, failing if the file exists.
    #[serde(rename = "ax+")]
    AppendReadExclusive,
}

/// Returned when a string does not name a known open mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown open mode '{0}'")]
pub struct ParseOpenModeError(String);

const ALL: [OpenMode; 10] = [
    OpenMode::Read,
    OpenMode::ReadWrite,
    OpenMode::Write,
    OpenMode::WriteExclusive,
    OpenMode::WriteRead,
    OpenMode::WriteReadExclusive,
    OpenMode::Append,
    OpenMode::AppendExclusive,
    OpenMode::AppendRead,
    OpenMode::AppendReadExclusive,
];

impl OpenMode {
    /// The symbolic flag string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "r+",
            Self::Write => "w",
            Self::WriteExclusive => "wx",
            Self::WriteRead => "w+",
            Self::WriteReadExclusive => "wx+",
            Self::Append => "a",
            Self::AppendExclusive => "ax",
            Self::AppendRead => "a+",
            Self::AppendReadExclusive => "ax+",
        }
    }

    /// Whether writes go to the end of the file.
    #[must_use]
    pub fn is_append(self) -> bool {
        matches!(
            self,
            Self::Append | Self::AppendExclusive | Self::AppendRead | Self::AppendReadExclusive
        )
    }

    /// Whether opening fails when the file already exists.
    #[must_use]
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            Self::WriteExclusive
                | Self::WriteReadExclusive
                | Self::AppendExclusive
                | Self::AppendReadExclusive
        )
    }

    /// Whether the handle can be read from.
    #[must_use]
    pub fn is_readable(self) -> bool {
        matches!(
            self,
            Self::Read
                | Self::ReadWrite
                | Self::WriteRead
                | Self::WriteReadExclusive
                | Self::AppendRead
                | Self::AppendReadExclusive
        )
    }

    /// Whether the handle can be written to.
    #[must_use]
    pub fn is_writable(self) -> bool {
        self != Self::Read
    }

    /// Whether a missing file is created.
    #[must_use]
    pub fn creates(self) -> bool {
        !matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Whether existing content is discarded on open.
    #[must_use]
    pub fn truncates(self) -> bool {
        matches!(self, Self::Write | Self::WriteRead)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenMode {
    type Err = ParseOpenModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseOpenModeError(s.to_string()))
    }
}
