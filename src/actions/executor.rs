//! Applies a classified file's disposition to the filesystem.
//!
//! # Overview
//!
//! - `Keep`: nothing happens
//! - `Move`: the file is renamed into a `moved` directory next to it
//! - `Delete`: the file is removed permanently
//!
//! In dry-run mode the executor touches nothing on disk (not even the
//! `moved` directory) but counts every removable file exactly as a real run
//! would, so the summary of a dry run predicts the real one.
//!
//! # Example
//!
//! ```no_run
//! use foldersweep::actions::Executor;
//! use foldersweep::duplicates::Classifier;
//! use foldersweep::record::RunMode;
//! use foldersweep::scanner::ScannedFile;
//! use std::path::Path;
//!
//! let mut classifier = Classifier::new(RunMode::Move);
//! let mut executor = Executor::new(true);
//! let file = ScannedFile::from_path(Path::new("/photos/a.jpg")).unwrap();
//! let record = classifier.classify(file).unwrap();
//! executor.execute(&record).unwrap();
//! println!("{} bytes would be cleaned", executor.stats().processed_bytes);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::record::{Disposition, FileRecord};

/// Name of the directory that receives moved files.
pub const MOVED_DIR_NAME: &str = "moved";

/// Failure to move a file aside.
#[derive(Debug, Error)]
#[error("cannot move {path} to {destination}: {source}")]
pub struct MoveError {
    /// File being moved
    pub path: PathBuf,
    /// Intended destination (or the `moved` directory if it could not be created)
    pub destination: PathBuf,
    /// The underlying I/O error
    #[source]
    pub source: io::Error,
}

/// Failure to delete a file.
#[derive(Debug, Error)]
#[error("cannot delete {path}: {source}")]
pub struct DeleteError {
    /// File being deleted
    pub path: PathBuf,
    /// The underlying I/O error
    #[source]
    pub source: io::Error,
}

/// Error type for disposition execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Creating the `moved` directory or renaming into it failed.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// Removing the file failed.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

impl ExecutionError {
    /// Path of the file the action was applied to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Move(e) => &e.path,
            Self::Delete(e) => &e.path,
        }
    }
}

/// Counters owned by the executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecuteStats {
    /// Files moved or deleted (or that would have been, in dry-run)
    pub processed: usize,
    /// Bytes of those files
    pub processed_bytes: u64,
}

/// Directory that receives moved files for `path`.
#[must_use]
pub fn moved_dir_for(path: &Path) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(MOVED_DIR_NAME)
}

/// Applies dispositions and owns the processed counters.
#[derive(Debug, Default)]
pub struct Executor {
    dry_run: bool,
    stats: ExecuteStats,
}

impl Executor {
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            stats: ExecuteStats::default(),
        }
    }

    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply the record's disposition.
    ///
    /// # Errors
    ///
    /// - `Move` if the `moved` directory cannot be created, the destination
    ///   already exists, or the rename fails
    /// - `Delete` if the file cannot be removed
    pub fn execute(&mut self, record: &FileRecord) -> Result<(), ExecutionError> {
        match record.disposition() {
            Disposition::Keep => return Ok(()),
            Disposition::Move => {
                if self.dry_run {
                    log::debug!("Dry run: would move {}", record.path().display());
                } else {
                    let destination = move_aside(record.path())?;
                    log::info!(
                        "Moved {} -> {}",
                        record.path().display(),
                        destination.display()
                    );
                }
            }
            Disposition::Delete => {
                if self.dry_run {
                    log::debug!("Dry run: would delete {}", record.path().display());
                } else {
                    fs::remove_file(record.path()).map_err(|e| {
                        log::error!("Delete failed for {}: {}", record.path().display(), e);
                        DeleteError {
                            path: record.path().to_path_buf(),
                            source: e,
                        }
                    })?;
                    log::info!(
                        "Deleted {} ({} bytes)",
                        record.path().display(),
                        record.size()
                    );
                }
            }
        }

        self.stats.processed += 1;
        self.stats.processed_bytes += record.size();
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> &ExecuteStats {
        &self.stats
    }

    /// Finish the run and hand back the counters.
    #[must_use]
    pub fn into_stats(self) -> ExecuteStats {
        self.stats
    }
}

/// Rename `path` into its sibling `moved` directory, keeping its raw base name.
fn move_aside(path: &Path) -> Result<PathBuf, MoveError> {
    let target_dir = moved_dir_for(path);
    let Some(name) = path.file_name() else {
        return Err(MoveError {
            path: path.to_path_buf(),
            destination: target_dir,
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };
    fs::create_dir_all(&target_dir).map_err(|e| MoveError {
        path: path.to_path_buf(),
        destination: target_dir.clone(),
        source: e,
    })?;

    let destination = target_dir.join(name);
    // rename(2) replaces an existing file silently on Unix.
    if fs::symlink_metadata(&destination).is_ok() {
        return Err(MoveError {
            path: path.to_path_buf(),
            destination,
            source: io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
        });
    }

    fs::rename(path, &destination).map_err(|e| {
        log::error!("Move failed for {}: {}", path.display(), e);
        MoveError {
            path: path.to_path_buf(),
            destination: destination.clone(),
            source: e,
        }
    })?;
    Ok(destination)
}
