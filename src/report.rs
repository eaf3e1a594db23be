//! Run accounting and human-readable output.
//!
//! [`RunSummary`] merges the counters each stage owned during the run. It is
//! built only after every stage has closed, so it never reflects a
//! mid-run snapshot.

use std::fmt::Write;

use bytesize::ByteSize;
use serde::Serialize;

use crate::actions::ExecuteStats;
use crate::duplicates::ClassifyStats;
use crate::record::{Disposition, FileRecord, Reason};
use crate::scanner::ScanStats;

/// Final counters of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Child directories skipped by the scanner
    pub skipped_directories: usize,
    /// Files skipped for an unsupported extension
    pub skipped_files: usize,
    /// Files scanned and queued for classification
    pub scanned: usize,
    /// Files classified
    pub evaluated: usize,
    /// Zero-byte files
    pub empty: usize,
    /// Duplicate files
    pub duplicates: usize,
    /// Canonical files kept
    pub unique: usize,
    /// Bytes of every classified file
    pub total_bytes: u64,
    /// Files moved or deleted
    pub processed: usize,
    /// Bytes of moved or deleted files
    pub processed_bytes: u64,
    /// Records that reached the observer
    pub reported: usize,
    /// Whether the filesystem was left untouched
    pub dry_run: bool,
    /// Whether the run stopped on a cancellation request
    pub interrupted: bool,
}

impl RunSummary {
    /// Merge the per-stage counters.
    #[must_use]
    pub fn from_stages(
        scanned: usize,
        scan: ScanStats,
        classify: ClassifyStats,
        execute: ExecuteStats,
    ) -> Self {
        Self {
            skipped_directories: scan.skipped_directories,
            skipped_files: scan.skipped_files,
            scanned,
            evaluated: classify.evaluated,
            empty: classify.empty,
            duplicates: classify.duplicates,
            unique: classify.unique,
            total_bytes: classify.total_bytes,
            processed: execute.processed,
            processed_bytes: execute.processed_bytes,
            ..Self::default()
        }
    }

    /// Whether the run found anything to move or delete.
    #[must_use]
    pub fn found_removable(&self) -> bool {
        self.empty + self.duplicates > 0
    }
}

/// Describe one file's outcome, e.g.
///
/// ```text
/// [move] IMG_0001 (1).jpg [2.4 MiB]
///  - Duplicate of IMG_0001.jpg
/// ```
#[must_use]
pub fn describe_action(record: &FileRecord, dry_run: bool) -> String {
    let mut s = String::new();
    let tag = if dry_run && record.is_removable() {
        format!("{} (dry run)", record.disposition())
    } else {
        record.disposition().to_string()
    };
    let _ = write!(
        s,
        "[{}] {} [{}]",
        tag,
        record.name(),
        ByteSize::b(record.size())
    );
    if record.disposition() != Disposition::Keep {
        let _ = write!(s, "\n - {}", record.reason());
        if record.reason() == Reason::Duplicate {
            let _ = write!(s, " of {}", record.original_name());
        }
    }
    s.push('\n');
    s
}

/// Render the end-of-run summary.
#[must_use]
pub fn describe_summary(summary: &RunSummary) -> String {
    let mut s = String::from("\nSummary:\n---------------\n");
    let _ = writeln!(
        s,
        "skipped {} directories and {} files.",
        summary.skipped_directories, summary.skipped_files
    );
    let _ = writeln!(s, "{} files evaluated", summary.evaluated);
    let _ = writeln!(s, " - {} empty files", summary.empty);
    let _ = writeln!(s, " - {} duplicate files", summary.duplicates);
    let _ = writeln!(s, " - {} unique files to keep", summary.unique);
    let _ = writeln!(
        s,
        " - {} cleaned of {} total",
        ByteSize::b(summary.processed_bytes),
        ByteSize::b(summary.total_bytes)
    );
    if summary.dry_run {
        s.push_str(" - DRY RUN\n");
    }
    if summary.interrupted {
        let _ = writeln!(
            s,
            " - INTERRUPTED after {} of {} files",
            summary.reported, summary.scanned
        );
    }
    s
}
