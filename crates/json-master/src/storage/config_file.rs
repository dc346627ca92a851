//! A typed handle that binds a configuration file path to its payload type.
//!
//! The free functions in [`crate::storage::codec`] take the path and options
//! on every call.  An application usually has one settings file with one
//! Rust type, so [`ConfigFile`] stores both once:
//!
//! ```rust
//! use json_master::{ConfigFile, TextEncoding};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Window {
//!     width: u32,
//!     height: u32,
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = ConfigFile::<Window>::new(dir.path().join("window.json"))
//!     .with_encoding(TextEncoding::Utf8Bom);
//!
//! // First run: nothing on disk yet.
//! assert_eq!(file.load_or_default().unwrap(), Window::default());
//!
//! file.save(&Window { width: 800, height: 600 }).unwrap();
//! assert_eq!(file.load().unwrap(), Some(Window { width: 800, height: 600 }));
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::encoding::TextEncoding;
use crate::domain::file_mode::FileMode;
use crate::storage::codec::{self, ConfigFileError};
use crate::storage::paths;

/// Encoding and creation policy applied by a save.
///
/// Every field has a serde default, so an embedding configuration can omit
/// the whole section or any part of it:
///
/// ```rust
/// use json_master::{FileMode, SaveOptions, TextEncoding};
///
/// let opts: SaveOptions = serde_json::from_str(r#"{"file_mode":"create-new"}"#).unwrap();
/// assert_eq!(opts.encoding, TextEncoding::Utf8);
/// assert_eq!(opts.file_mode, FileMode::CreateNew);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Text encoding of the written file.  Defaults to UTF-8 without BOM.
    pub encoding: TextEncoding,
    /// How the target file is opened.  Defaults to create-or-truncate.
    pub file_mode: FileMode,
}

/// A configuration file at a fixed path holding a value of type `T`.
pub struct ConfigFile<T> {
    path: PathBuf,
    options: SaveOptions,
    create_parent_dirs: bool,
    // `fn() -> T` keeps the handle Send + Sync whatever `T` is.
    _payload: PhantomData<fn() -> T>,
}

impl<T> ConfigFile<T> {
    /// Creates a handle for `path` with default [`SaveOptions`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: SaveOptions::default(),
            create_parent_dirs: false,
            _payload: PhantomData,
        }
    }

    /// Creates a handle for `file_name` inside the platform config directory
    /// of `app_dir`.  Missing directories are created on the first save.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::NoPlatformConfigDir`] when the platform base
    /// directory is unknown.
    pub fn in_platform_dir(app_dir: &str, file_name: &str) -> Result<Self, ConfigFileError> {
        let path = paths::config_file_path(app_dir, file_name)?;
        Ok(Self::new(path).create_parent_dirs(true))
    }

    /// Replaces all save options.
    pub fn with_options(mut self, options: SaveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.options.encoding = encoding;
        self
    }

    pub fn with_file_mode(mut self, file_mode: FileMode) -> Self {
        self.options.file_mode = file_mode;
        self
    }

    /// When enabled, a save into a missing directory creates it and retries.
    /// [`FileMode::Open`] and [`FileMode::Truncate`] never create directories,
    /// since they fail on a missing file anyway.
    pub fn create_parent_dirs(mut self, enabled: bool) -> Self {
        self.create_parent_dirs = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> SaveOptions {
        self.options
    }

    /// True when a regular file exists at the handle's path.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Raw text of the file, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`codec::read_file_content`].
    pub fn read_raw(&self) -> Result<Option<String>, ConfigFileError> {
        codec::read_file_content(&self.path)
    }
}

impl<T: DeserializeOwned> ConfigFile<T> {
    /// Loads the value; `None` for a missing, empty, or corrupt file.
    ///
    /// # Errors
    ///
    /// See [`codec::load_json_config`].
    pub fn load(&self) -> Result<Option<T>, ConfigFileError> {
        codec::load_json_config(&self.path)
    }

    /// Loads the value, falling back to `T::default()`.
    ///
    /// # Errors
    ///
    /// See [`codec::load_json_config_or_default`].
    pub fn load_or_default(&self) -> Result<T, ConfigFileError>
    where
        T: Default,
    {
        codec::load_json_config_or_default(&self.path)
    }
}

impl<T: Serialize> ConfigFile<T> {
    /// Saves `value` with the handle's options.
    ///
    /// # Errors
    ///
    /// See [`codec::save_json_config_with_encoding`].  Creating a missing
    /// parent directory can also fail with [`ConfigFileError::Io`].
    pub fn save(&self, value: &T) -> Result<(), ConfigFileError> {
        let SaveOptions {
            encoding,
            file_mode,
        } = self.options;

        let result = codec::save_json_config_with_encoding(&self.path, value, encoding, file_mode);

        // Directories are only created after the codec has accepted the value,
        // and only for modes that would then create the file itself.
        let missing_dir = match &result {
            Err(ConfigFileError::Io { source, .. })
                if self.create_parent_dirs
                    && file_mode.creates_file()
                    && source.kind() == io::ErrorKind::NotFound =>
            {
                self.missing_parent()
            }
            _ => None,
        };
        let Some(dir) = missing_dir else {
            return result;
        };

        debug!("creating config directory {}", dir.display());
        fs::create_dir_all(dir).map_err(|source| ConfigFileError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        codec::save_json_config_with_encoding(&self.path, value, encoding, file_mode)
    }

    fn missing_parent(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty() && !dir.exists())
    }
}

impl<T> Clone for ConfigFile<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            options: self.options,
            create_parent_dirs: self.create_parent_dirs,
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ConfigFile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("create_parent_dirs", &self.create_parent_dirs)
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
