//! Classified file records and the vocabulary shared by every pipeline stage.
//!
//! A [`FileRecord`] can only be built by the classifier, so a record that
//! reaches the executor always carries a final disposition and reason.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scanner::ScannedFile;

/// What a run does with removable files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Rename removable files into a sibling `moved` directory.
    #[default]
    Move,
    /// Remove removable files.
    Delete,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Disposition::from(*self).fmt(f)
    }
}

/// The action assigned to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Canonical copy, left in place.
    Keep,
    /// Renamed into the `moved` directory.
    Move,
    /// Removed from disk.
    Delete,
}

impl From<RunMode> for Disposition {
    fn from(mode: RunMode) -> Self {
        match mode {
            RunMode::Move => Self::Move,
            RunMode::Delete => Self::Delete,
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Keep => "keep",
            Self::Move => "move",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Why a file received a non-keep disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Kept files carry no reason.
    None,
    /// The file has no content.
    ZeroByte,
    /// Another file with the same content was seen first.
    Duplicate,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "None",
            Self::ZeroByte => "Zero Bytes",
            Self::Duplicate => "Duplicate",
        };
        f.write_str(s)
    }
}

/// A scanned file together with its classification.
#[derive(Debug, Clone)]
pub struct FileRecord {
    file: ScannedFile,
    content_hash: String,
    disposition: Disposition,
    reason: Reason,
    original_name: String,
    original_path: PathBuf,
}

impl FileRecord {
    /// Record for a file that is its own original (unique or empty).
    pub(crate) fn own_original(
        file: ScannedFile,
        content_hash: String,
        disposition: Disposition,
        reason: Reason,
    ) -> Self {
        let original_name = file.name.clone();
        let original_path = file.path.clone();
        Self {
            file,
            content_hash,
            disposition,
            reason,
            original_name,
            original_path,
        }
    }

    /// Record for a duplicate of an earlier canonical file.
    pub(crate) fn duplicate_of(
        file: ScannedFile,
        content_hash: String,
        disposition: Disposition,
        original_name: String,
        original_path: PathBuf,
    ) -> Self {
        Self {
            file,
            content_hash,
            disposition,
            reason: Reason::Duplicate,
            original_name,
            original_path,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.file.name
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.file.size
    }

    /// Lower-case hex BLAKE3 digest of the full content.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    #[must_use]
    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    #[must_use]
    pub fn reason(&self) -> Reason {
        self.reason
    }

    /// Name of the canonical file sharing this content (own name if unique).
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    #[must_use]
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Whether the executor will act on this file.
    #[must_use]
    pub fn is_removable(&self) -> bool {
        self.disposition != Disposition::Keep
    }
}
