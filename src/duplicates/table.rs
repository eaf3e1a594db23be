//! Per-run map from content hash to the canonical file.
//!
//! The first file inserted for a hash stays canonical for the whole run.
//! Entries are never replaced or removed, and empty files are never added
//! (the classifier handles them before it consults the table).

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;

/// The first-seen file for a content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEntry {
    /// Base name of the canonical file
    pub name: String,
    /// Path of the canonical file
    pub path: PathBuf,
    /// Size of the canonical file in bytes
    pub size: u64,
}

/// Content hash to canonical file, first writer wins.
#[derive(Debug, Default)]
pub struct DuplicateTable {
    entries: HashMap<String, CanonicalEntry>,
}

impl DuplicateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical entry for `hash`, if one was recorded.
    #[must_use]
    pub fn get(&self, hash: &str) -> Option<&CanonicalEntry> {
        self.entries.get(hash)
    }

    /// Look up `hash` and record `candidate` as canonical if the hash is new.
    ///
    /// Returns the existing canonical entry when `hash` was already present,
    /// in which case the table is left untouched. Returns `None` when
    /// `candidate` became the canonical entry.
    pub fn check_and_insert(
        &mut self,
        hash: &str,
        candidate: impl FnOnce() -> CanonicalEntry,
    ) -> Option<CanonicalEntry> {
        match self.entries.entry(hash.to_owned()) {
            Entry::Occupied(existing) => Some(existing.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(candidate());
                None
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
