//! Scanner module for directory listing and file hashing.
//!
//! This module provides functionality for:
//! - Non-recursive listing of a media directory
//! - Extension filtering against the supported media types
//! - Content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory listing, filtering and ordering
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use foldersweep::scanner::scan;
//! use std::path::Path;
//!
//! let outcome = scan(Path::new("/home/user/Pictures")).unwrap();
//! for file in &outcome.files {
//!     println!("{}: {} bytes", file.name, file.size);
//! }
//! println!("skipped {} directories", outcome.stats.skipped_directories);
//! ```

pub mod hasher;
pub mod walker;

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use walker::{is_supported, scan, SUPPORTED_EXTENSIONS};

/// A media file found by the scanner.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Path to the file (scanned directory joined with the entry name)
    pub path: PathBuf,
    /// Base name of the file
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Metadata captured at scan time
    pub metadata: Metadata,
}

impl ScannedFile {
    /// Build a descriptor from a path and its metadata.
    #[must_use]
    pub fn new(path: PathBuf, metadata: Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            size: metadata.len(),
            metadata,
        }
    }

    /// Read metadata for `path` and build a descriptor.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the metadata cannot be read.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self::new(path.to_path_buf(), metadata))
    }
}

/// Counters owned by the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Child directories that were skipped
    pub skipped_directories: usize,
    /// Files skipped because of an unsupported extension
    pub skipped_files: usize,
}

/// Ordered scan result plus the scanner's counters.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Supported files, shortest name first
    pub files: Vec<ScannedFile>,
    /// Skip counters
    pub stats: ScanStats,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing the directory or reading metadata.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
