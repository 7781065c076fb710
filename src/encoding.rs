//! Text encodings for the text file accessor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character encoding used to turn file bytes into text and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8. Invalid sequences decode to U+FFFD.
    #[default]
    Utf8,
    /// 7-bit ASCII. The high bit is cleared on decode.
    Ascii,
    /// ISO-8859-1: one byte per code point.
    Latin1,
    /// UTF-16, little endian.
    Utf16Le,
    /// Lowercase hexadecimal digits, two per byte.
    Hex,
}

/// Failure to encode or parse an encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The encoding name is not recognized.
    #[error("unknown encoding '{0}'")]
    Unknown(String),
    /// The text is not valid for the target encoding.
    #[error("invalid {encoding} input: {reason}")]
    Invalid {
        /// Target encoding.
        encoding: Encoding,
        /// What was wrong with the input.
        reason: &'static str,
    },
}

impl Encoding {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Utf16Le => "utf16le",
            Self::Hex => "hex",
        }
    }

    /// Decodes file bytes into text.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Ascii => bytes.iter().map(|b| char::from(b & 0x7f)).collect(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Self::Hex => {
                let mut out = String::with_capacity(bytes.len() * 2);
                for b in bytes {
                    out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
                    out.push(char::from(HEX_DIGITS[usize::from(b & 0x0f)]));
                }
                out
            }
        }
    }

    /// Encodes text into file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Invalid`] for hex input that has an odd
    /// length or contains a non-hex character.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            #[allow(clippy::cast_possible_truncation)]
            Self::Ascii | Self::Latin1 => Ok(text.chars().map(|c| u32::from(c) as u8).collect()),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Hex => decode_hex(text),
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn decode_hex(text: &str) -> Result<Vec<u8>, EncodingError> {
    let invalid = |reason| EncodingError::Invalid { encoding: Encoding::Hex, reason };
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(invalid("odd number of digits"));
    }
    digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = hex_value(pair[0]).ok_or_else(|| invalid("non-hex character"))?;
            let lo = hex_value(pair[1]).ok_or_else(|| invalid("non-hex character"))?;
            Ok((hi << 4) | lo)
        })
        .collect()
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" | "binary" => Ok(Self::Latin1),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "hex" => Ok(Self::Hex),
            _ => Err(EncodingError::Unknown(s.to_string())),
        }
    }
}
