//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Hash-based classification of scanned files (see [`classifier`])
//! - The per-run table of canonical files (see [`table`])

pub mod classifier;
pub mod table;

pub use classifier::{ClassifyStats, Classifier};
pub use table::{CanonicalEntry, DuplicateTable};
