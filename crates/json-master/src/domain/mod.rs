//! Value types describing *how* a configuration file is written.
//!
//! Nothing in this module performs I/O.  The storage layer consumes these
//! types and turns them into bytes and `OpenOptions`.

/// Text encodings supported when writing and decoding configuration files.
pub mod encoding;

/// File creation policies for save operations.
pub mod file_mode;
