//! Command-line interface definitions for foldersweep.
//!
//! # Example
//!
//! ```bash
//! # Move empty and duplicate media files of the current directory aside
//! foldersweep
//!
//! # Preview what deleting would do
//! foldersweep ~/Pictures/phone --mode delete --dry-run
//!
//! # Machine-readable summary
//! foldersweep ~/Pictures/phone --json
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::record::RunMode;

/// Clean a media folder of empty and duplicate files.
///
/// Scans the immediate children of PATH for jpg, jpeg, dng, mpg and mp4
/// files, keeps the first copy of every distinct content and moves (or
/// deletes) empty files and later copies.
#[derive(Debug, Parser)]
#[command(name = "foldersweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to clean (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// What to do with empty and duplicate files
    #[arg(short, long, value_enum)]
    pub mode: Option<RunMode>,

    /// Report what would happen without moving or deleting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Capacity of the queues between pipeline stages
    #[arg(long, value_name = "N", value_parser = parse_capacity)]
    pub queue_capacity: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH", env = "FOLDERSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Print the summary as JSON instead of text (per-file lines are suppressed)
    #[arg(long)]
    pub json: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Parse a queue capacity: a positive integer.
///
/// # Errors
///
/// Returns an error for non-numbers and zero.
pub fn parse_capacity(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: '{s}'"))?;
    if n == 0 {
        return Err("Queue capacity must be at least 1".to_string());
    }
    Ok(n)
}
