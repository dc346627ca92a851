//! Storage layer: everything that touches the file system.
//!
//! - [`codec`] – the load / save / raw-read functions and [`ConfigFileError`].
//! - [`config_file`] – [`ConfigFile`], a typed handle over one file.
//! - [`paths`] – platform config directory lookup.
//!
//! Keeping file access here means the `domain` types stay plain values that
//! can be tested without a disk.

pub mod codec;
pub mod config_file;
pub mod paths;

pub use codec::ConfigFileError;
pub use config_file::{ConfigFile, SaveOptions};
