//! Per-file classification: empty, duplicate, or unique.
//!
//! # Overview
//!
//! The [`Classifier`] is the only writer of the [`DuplicateTable`] and of
//! its [`ClassifyStats`]. It processes files one at a time in scan order:
//!
//! 1. Hash the full content ([`Hasher::full_hash`])
//! 2. Zero-byte files get the run mode with reason `ZeroByte`. They never
//!    enter the table, so two empty files are never duplicates of each other.
//! 3. A hash already in the table gets the run mode with reason `Duplicate`
//!    and points at the canonical file.
//! 4. A new hash is kept and becomes canonical.
//!
//! # Example
//!
//! ```no_run
//! use foldersweep::duplicates::Classifier;
//! use foldersweep::record::RunMode;
//! use foldersweep::scanner::scan;
//! use std::path::Path;
//!
//! let outcome = scan(Path::new("/photos")).unwrap();
//! let mut classifier = Classifier::new(RunMode::Move);
//! for file in outcome.files {
//!     let record = classifier.classify(file).unwrap();
//!     println!("{} -> {}", record.name(), record.disposition());
//! }
//! println!("{} duplicates", classifier.stats().duplicates);
//! ```

use serde::Serialize;

use super::table::{CanonicalEntry, DuplicateTable};
use crate::record::{Disposition, FileRecord, Reason, RunMode};
use crate::scanner::{hash_to_hex, HashError, Hasher, ScannedFile};

/// Counters owned by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifyStats {
    /// Files classified
    pub evaluated: usize,
    /// Zero-byte files
    pub empty: usize,
    /// Non-empty files whose content was already seen
    pub duplicates: usize,
    /// Canonical files kept in place
    pub unique: usize,
    /// Sum of the sizes of every classified file
    pub total_bytes: u64,
}

/// Assigns a disposition and reason to each scanned file.
#[derive(Debug)]
pub struct Classifier {
    mode: RunMode,
    hasher: Hasher,
    table: DuplicateTable,
    stats: ClassifyStats,
}

impl Classifier {
    /// Create a classifier with an empty table for a fresh run.
    #[must_use]
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            hasher: Hasher::new(),
            table: DuplicateTable::new(),
            stats: ClassifyStats::default(),
        }
    }

    /// Use a custom hasher (e.g. a different buffer size).
    #[must_use]
    pub fn with_hasher(mut self, hasher: Hasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Hash and classify one file.
    ///
    /// # Errors
    ///
    /// Returns `HashError` if the file cannot be read. Counters and the
    /// table are left unchanged in that case.
    pub fn classify(&mut self, file: ScannedFile) -> Result<FileRecord, HashError> {
        let hash = self.hasher.full_hash(&file.path)?;
        Ok(self.classify_hashed(file, hash_to_hex(&hash)))
    }

    /// Classify one file whose content hash is already known.
    pub fn classify_hashed(&mut self, file: ScannedFile, content_hash: String) -> FileRecord {
        let size = file.size;
        let removal = Disposition::from(self.mode);

        let record = if size == 0 {
            self.stats.empty += 1;
            log::debug!("{}: zero bytes", file.name);
            FileRecord::own_original(file, content_hash, removal, Reason::ZeroByte)
        } else {
            let existing = self.table.check_and_insert(&content_hash, || CanonicalEntry {
                name: file.name.clone(),
                path: file.path.clone(),
                size,
            });
            match existing {
                Some(original) => {
                    self.stats.duplicates += 1;
                    log::debug!("{}: duplicate of {}", file.name, original.name);
                    FileRecord::duplicate_of(
                        file,
                        content_hash,
                        removal,
                        original.name,
                        original.path,
                    )
                }
                None => {
                    self.stats.unique += 1;
                    FileRecord::own_original(file, content_hash, Disposition::Keep, Reason::None)
                }
            }
        };

        self.stats.evaluated += 1;
        self.stats.total_bytes += size;
        record
    }

    #[must_use]
    pub fn stats(&self) -> &ClassifyStats {
        &self.stats
    }

    #[must_use]
    pub fn table(&self) -> &DuplicateTable {
        &self.table
    }

    /// Finish the run and hand back the counters.
    #[must_use]
    pub fn into_stats(self) -> ClassifyStats {
        self.stats
    }
}
