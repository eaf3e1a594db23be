//! Non-recursive directory listing for the scan stage.
//!
//! # Overview
//!
//! [`scan`] lists the immediate children of a directory, skips child
//! directories and files with unsupported extensions, and orders the
//! remaining files by name length, shortest first. Files with shorter names
//! are usually the originals (`IMG_001.jpg` before `IMG_001 (1).jpg`), so
//! they become the canonical copy when content repeats.
//!
//! The whole listing is produced before any hashing starts. A failure on the
//! directory or on any entry aborts the scan with no partial result.

use std::fs;
use std::path::Path;

use super::{ScanError, ScanOutcome, ScannedFile};

/// File name suffixes accepted by the scanner (case-sensitive).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".dng", ".mpg", ".mp4"];

/// Whether `name` ends with one of [`SUPPORTED_EXTENSIONS`].
#[must_use]
pub fn is_supported(name: &str) -> bool {
    SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// List `dir` and return the supported files ordered by name length.
///
/// Symlinks are followed when classifying entries, so a link to a directory
/// is skipped as a directory.
///
/// # Errors
///
/// - `NotFound` / `PermissionDenied` / `NotADirectory` for an unusable `dir`
/// - `ScanError` for the first entry whose metadata cannot be read
pub fn scan(dir: &Path) -> Result<ScanOutcome, ScanError> {
    let dir_metadata = fs::metadata(dir).map_err(|e| ScanError::from_io(dir, e))?;
    if !dir_metadata.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| ScanError::from_io(dir, e))?;
    let mut outcome = ScanOutcome::default();

    for entry in entries {
        let entry = entry.map_err(|e| ScanError::from_io(dir, e))?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| ScanError::from_io(&path, e))?;

        if metadata.is_dir() {
            log::debug!("skip dir: {}", path.display());
            outcome.stats.skipped_directories += 1;
            continue;
        }

        let file = ScannedFile::new(path, metadata);
        if !is_supported(&file.name) {
            log::debug!("skip file: {}", file.name);
            outcome.stats.skipped_files += 1;
            continue;
        }

        outcome.files.push(file);
    }

    // Stable: equal lengths keep enumeration order.
    outcome.files.sort_by_key(|f| f.name.len());

    log::info!(
        "Scanned {}: {} candidate files, skipped {} directories and {} files",
        dir.display(),
        outcome.files.len(),
        outcome.stats.skipped_directories,
        outcome.stats.skipped_files
    );

    Ok(outcome)
}
