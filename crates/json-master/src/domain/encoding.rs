//! Text encodings for configuration files.
//!
//! Rust strings are always UTF-8 in memory.  A [`TextEncoding`] decides which
//! bytes end up on disk when that text is written, and [`TextEncoding::decode`]
//! turns bytes read from disk back into a `String`.
//!
//! # What is a BOM? (for beginners)
//!
//! A *byte order mark* is a short, invisible prefix some tools put at the
//! start of a text file to announce its encoding:
//!
//! | Encoding   | BOM bytes       |
//! |------------|-----------------|
//! | UTF-8      | `EF BB BF`      |
//! | UTF-16 LE  | `FF FE`         |
//! | UTF-16 BE  | `FE FF`         |
//!
//! JSON parsers reject a BOM as stray input, so decoding strips it and uses
//! it to pick the right decoder.  Plain [`TextEncoding::Utf8`] writes no BOM,
//! which keeps saved files byte-identical to the serializer output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Returned when a string does not name a supported encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown text encoding: '{0}'")]
pub struct UnknownEncoding(pub String);

/// The encoding used to write JSON text to disk.
///
/// Serde goes through [`FromStr`] and [`TextEncoding::name`], so a config file
/// accepts exactly the names `"utf-8".parse()` accepts, in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TextEncoding {
    /// UTF-8 without a byte order mark.
    #[default]
    Utf8,
    /// UTF-8 preceded by the `EF BB BF` byte order mark.
    Utf8Bom,
    /// Little-endian UTF-16 with a byte order mark.
    Utf16Le,
    /// Big-endian UTF-16 with a byte order mark.
    Utf16Be,
    /// 7-bit ASCII.  Characters outside the range are written as `?`.
    Ascii,
}

impl TextEncoding {
    /// Canonical lower-case name, also used by `Display` and serde.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8-bom",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Bytes written before the text when a file is written from offset 0.
    pub fn preamble(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 | TextEncoding::Ascii => &[],
            TextEncoding::Utf8Bom => UTF8_BOM,
            TextEncoding::Utf16Le => UTF16_LE_BOM,
            TextEncoding::Utf16Be => UTF16_BE_BOM,
        }
    }

    /// Encodes `text` into bytes.  The preamble is **not** included.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 | TextEncoding::Utf8Bom => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            TextEncoding::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }

    /// Decodes file content, detecting the encoding from its byte order mark.
    ///
    /// Without a BOM the bytes are read as UTF-8.  Invalid sequences become
    /// `U+FFFD` instead of failing, so a damaged file still produces text
    /// (which the JSON parser will then reject).
    pub fn decode(bytes: &[u8]) -> String {
        if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
            String::from_utf8_lossy(rest).into_owned()
        } else if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
            decode_utf16(rest, u16::from_le_bytes)
        } else if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
            decode_utf16(rest, u16::from_be_bytes)
        } else {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| to_unit([pair[0], pair[1]]));

    let mut text: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = UnknownEncoding;

    /// Parses an encoding name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-8-bom" | "utf8-bom" => Ok(TextEncoding::Utf8Bom),
            "utf-16le" | "utf-16" | "utf16" => Ok(TextEncoding::Utf16Le),
            "utf-16be" => Ok(TextEncoding::Utf16Be),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = UnknownEncoding;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TextEncoding> for &'static str {
    fn from(encoding: TextEncoding) -> Self {
        encoding.name()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
