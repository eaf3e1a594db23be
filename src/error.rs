//! Structured error handling and exit codes.

use serde::Serialize;

use crate::actions::ExecutionError;
use crate::report::RunSummary;
use crate::scanner::{HashError, ScanError};

/// Terminal error of a cleanup run.
///
/// Every variant is fatal: the run stops at the first one and nothing is
/// retried or rolled back.
#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
    /// The directory could not be listed; no file was touched.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A file could not be read for hashing.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// A move or delete failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// A pipeline thread could not be started.
    #[error("failed to start {stage} stage: {source}")]
    Spawn {
        /// Stage name
        stage: &'static str,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A pipeline thread panicked.
    #[error("{0} stage panicked")]
    StagePanicked(&'static str),
}

/// Exit codes for the foldersweep binary.
///
/// - 0: Success (removable files were found and handled)
/// - 1: General error (scan, hash or action failure)
/// - 2: Nothing to clean (completed normally, no empty or duplicate files)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: removable files were found and handled.
    Success = 0,
    /// General error: the run failed.
    GeneralError = 1,
    /// Nothing to clean: no empty or duplicate files were found.
    NothingToClean = 2,
    /// Interrupted: the run was cancelled (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Exit code for a run that completed without a fatal error.
    #[must_use]
    pub fn for_summary(summary: &RunSummary) -> Self {
        if summary.interrupted {
            Self::Interrupted
        } else if summary.found_removable() {
            Self::Success
        } else {
            Self::NothingToClean
        }
    }

    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FS000",
            Self::GeneralError => "FS001",
            Self::NothingToClean => "FS002",
            Self::Interrupted => "FS130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
        }
    }
}
