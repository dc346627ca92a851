//! # json-master
//!
//! Loads and saves typed configuration objects as JSON files on disk.
//!
//! The crate is deliberately small.  Three operations make up the whole
//! public contract:
//!
//! - [`load_json_config`] reads a file and deserializes it into any
//!   `T: DeserializeOwned`.  A missing, empty, or corrupt file is **not** an
//!   error: it yields `Ok(None)`, which is what a first-run application wants.
//! - [`save_json_config`] / [`save_json_config_with_encoding`] serialize a
//!   value to compact JSON and write it with a chosen [`TextEncoding`] and
//!   [`FileMode`].  Bad arguments and an exclusive-create collision are
//!   reported before any byte is written.
//! - [`read_file_content`] returns the raw text of a file, or `None` when the
//!   file does not exist.
//!
//! # Layout (for beginners)
//!
//! - **`domain`** – Plain value types with no I/O: the text encodings and
//!   the file creation policies.
//! - **`storage`** – Everything that touches the file system: the codec
//!   functions, the typed [`ConfigFile`] handle, and platform path lookup.
//!
//! # Example
//!
//! ```rust
//! use json_master::{load_json_config, save_json_config, FileMode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Settings {
//!     name: String,
//!     count: u32,
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("cfg.json");
//!
//! let settings = Settings { name: "alpha".into(), count: 3 };
//! save_json_config(&path, &settings, FileMode::Create).unwrap();
//!
//! let loaded: Option<Settings> = load_json_config(&path).unwrap();
//! assert_eq!(loaded, Some(settings));
//! ```

pub mod domain;
pub mod storage;

// Re-export the most-used items at the crate root so callers can write
// `json_master::load_json_config` instead of the full module path.
pub use domain::encoding::{TextEncoding, UnknownEncoding};
pub use domain::file_mode::FileMode;
pub use storage::codec::{
    load_json_config, load_json_config_or_default, read_file_content, save_json_config,
    save_json_config_with_encoding, ConfigFileError,
};
pub use storage::config_file::{ConfigFile, SaveOptions};
pub use storage::paths::{config_file_path, platform_config_dir};
