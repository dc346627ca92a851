//! How a save operation opens its target file.
//!
//! Only [`FileMode::CreateNew`] gets special treatment from the codec (an
//! existence check before anything is opened).  Every other mode is handed
//! straight to [`std::fs::OpenOptions`] through [`FileMode::open_options`].

use std::fs::OpenOptions;

use serde::{Deserialize, Serialize};

/// File creation policy for a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileMode {
    /// Create the file, or truncate it if it already exists.
    #[default]
    Create,
    /// Create the file; fail if it already exists.
    CreateNew,
    /// Open an existing file and write from the start without truncating.
    Open,
    /// Like [`FileMode::Open`], creating the file when it is missing.
    OpenOrCreate,
    /// Open an existing file and truncate it to zero length.
    Truncate,
    /// Open or create the file and write after its current content.
    Append,
}

impl FileMode {
    /// Builds write-only `OpenOptions` matching this mode.
    pub fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            FileMode::Create => options.write(true).create(true).truncate(true),
            FileMode::CreateNew => options.write(true).create_new(true),
            FileMode::Open => options.write(true),
            FileMode::OpenOrCreate => options.write(true).create(true).truncate(false),
            FileMode::Truncate => options.write(true).truncate(true),
            FileMode::Append => options.append(true).create(true),
        };
        options
    }

    /// True when this mode creates a missing file instead of failing.
    pub fn creates_file(self) -> bool {
        !matches!(self, FileMode::Open | FileMode::Truncate)
    }

    /// True when a write in this mode never starts at offset 0 of existing data.
    pub fn appends(self) -> bool {
        matches!(self, FileMode::Append)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
