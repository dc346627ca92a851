//! JSON load/save for typed configuration values.
//!
//! # Read policy
//!
//! Loading is lenient.  A missing file, an empty file, and a file whose text
//! is not valid JSON for `T` all produce `Ok(None)`.  Callers therefore treat
//! "no usable configuration yet" as a single case, which is exactly what a
//! first run looks like.  Only a real I/O failure on an existing file (for
//! example permission denied) is returned as an error.
//!
//! # Write policy
//!
//! Saving is strict.  The path and the value are validated and the value is
//! serialized *before* the file is opened, so a rejected call never touches
//! the disk.  The output is the compact `serde_json::to_string` form: no
//! indentation and no trailing newline.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::encoding::TextEncoding;
use crate::domain::file_mode::FileMode;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// A required argument was empty or absent.  Raised before any I/O.
    #[error("invalid argument `{argument}`: {message}")]
    InvalidArgument {
        argument: &'static str,
        message: &'static str,
    },

    /// An exclusive create found a file already in place.
    #[error("file already exists at {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// A file system I/O error occurred.
    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The value could not be serialized to JSON.
    #[error("failed to serialize value to JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Reads the whole file at `path` as text.
///
/// Returns `Ok(None)` when no regular file exists at `path`, which keeps a
/// missing file distinguishable from an existing empty one (`Ok(Some(""))`).
/// The encoding is detected from a leading byte order mark; see
/// [`TextEncoding::decode`].
///
/// # Errors
///
/// Returns [`ConfigFileError::Io`] if an existing file cannot be read.
pub fn read_file_content(path: impl AsRef<Path>) -> Result<Option<String>, ConfigFileError> {
    let path = path.as_ref();

    if !path.is_file() {
        return Ok(None);
    }

    match fs::read(path) {
        Ok(bytes) => Ok(Some(TextEncoding::decode(&bytes))),
        // Removed between the existence check and the read.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads and deserializes the JSON file at `path`.
///
/// Returns `Ok(None)` if the file does not exist, is empty, or does not
/// contain JSON that deserializes into `T`.
///
/// # Errors
///
/// Returns [`ConfigFileError::Io`] only when an existing file cannot be read.
/// Parse failures are never returned.
pub fn load_json_config<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Option<T>, ConfigFileError> {
    let path = path.as_ref();

    let content = match read_file_content(path)? {
        Some(content) if !content.is_empty() => content,
        Some(_) => {
            debug!("config file {} is empty", path.display());
            return Ok(None);
        }
        None => {
            debug!("config file {} not found", path.display());
            return Ok(None);
        }
    };

    match serde_json::from_str::<T>(&content) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            // Corrupt and absent configuration are deliberately the same case.
            warn!("ignoring unreadable config file {}: {e}", path.display());
            Ok(None)
        }
    }
}

/// Like [`load_json_config`], falling back to `T::default()` for a missing,
/// empty, or corrupt file.
///
/// # Errors
///
/// Returns [`ConfigFileError::Io`] when an existing file cannot be read.
pub fn load_json_config_or_default<T: DeserializeOwned + Default>(
    path: impl AsRef<Path>,
) -> Result<T, ConfigFileError> {
    Ok(load_json_config(path)?.unwrap_or_default())
}

/// Serializes `value` and writes it to `path` as UTF-8 JSON.
///
/// Shorthand for [`save_json_config_with_encoding`] with
/// [`TextEncoding::Utf8`].
///
/// # Errors
///
/// See [`save_json_config_with_encoding`].
pub fn save_json_config<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    file_mode: FileMode,
) -> Result<(), ConfigFileError> {
    save_json_config_with_encoding(path, value, TextEncoding::Utf8, file_mode)
}

/// Serializes `value` and writes it to `path` in the given encoding.
///
/// A value whose JSON form is `null` (such as `Option::None`) counts as an
/// absent value and is rejected.  `serde_json` also writes non-finite floats
/// (`f64::NAN`, infinities) as `null`, so a bare non-finite float is rejected
/// the same way; inside a struct it is saved as `null` and will not load
/// back into an `f64` field.  When the write starts at offset 0 the
/// encoding's byte order mark, if any, is written first.  In
/// [`FileMode::Append`] mode a non-empty file gets no second BOM.
///
/// # Errors
///
/// - [`ConfigFileError::InvalidArgument`] for an empty path or a `null` value.
/// - [`ConfigFileError::Serialize`] if `value` cannot be represented as JSON.
/// - [`ConfigFileError::AlreadyExists`] for [`FileMode::CreateNew`] when the
///   file exists; the existing file is left untouched.
/// - [`ConfigFileError::Io`] for any file-system failure.
pub fn save_json_config_with_encoding<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    encoding: TextEncoding,
    file_mode: FileMode,
) -> Result<(), ConfigFileError> {
    let path = path.as_ref();

    if path.as_os_str().is_empty() {
        return Err(ConfigFileError::InvalidArgument {
            argument: "path",
            message: "path must not be empty",
        });
    }

    let text = serde_json::to_string(value)?;
    if text == "null" {
        return Err(ConfigFileError::InvalidArgument {
            argument: "value",
            message: "value must be initialized",
        });
    }

    if file_mode == FileMode::CreateNew && path.exists() {
        debug!("refusing to overwrite existing file {}", path.display());
        return Err(ConfigFileError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let file = file_mode
        .open_options()
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists if file_mode == FileMode::CreateNew => {
                ConfigFileError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            }
            _ => ConfigFileError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let at_start = if file_mode.appends() {
        file.metadata().map_err(io_error(path))?.len() == 0
    } else {
        true
    };

    // The writer owns the handle; dropping it on any early return closes the file.
    let mut writer = BufWriter::new(file);
    let written = write_encoded(&mut writer, &text, encoding, at_start).map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;

    debug!(
        "saved config to {} ({written} bytes, {encoding}, {file_mode:?})",
        path.display()
    );
    Ok(())
}

/// Writes `text` in `encoding`, preceded by its preamble when requested.
/// Returns the number of bytes handed to `writer`.
fn write_encoded<W: Write>(
    writer: &mut W,
    text: &str,
    encoding: TextEncoding,
    with_preamble: bool,
) -> io::Result<usize> {
    let preamble: &[u8] = if with_preamble {
        encoding.preamble()
    } else {
        &[]
    };
    let payload = encoding.encode(text);
    writer.write_all(preamble)?;
    writer.write_all(&payload)?;
    Ok(preamble.len() + payload.len())
}

fn io_error(path: &Path) -> impl Fn(io::Error) -> ConfigFileError + '_ {
    move |source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
