//! foldersweep - Media Folder Cleanup
//!
//! Finds empty and content-duplicate media files in a directory by BLAKE3
//! hash, keeps the first copy of every distinct content, and moves the rest
//! into a `moved` folder or deletes them.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod report;
pub mod scanner;
pub mod signal;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::progress::ConsoleObserver;
use crate::report::describe_summary;

/// Run the application for parsed command-line arguments.
///
/// # Errors
///
/// Returns an error for invalid configuration, a missing working
/// directory, or any fatal pipeline error.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?.apply_cli(&cli);
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::Success);
    }
    let options = config.run_options();
    let dir = match &cli.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let chatty = !cli.quiet && !cli.json;
    if chatty {
        println!("Scanning files in: {}", dir.display());
        println!(" - dry_run: {}", options.dry_run);
        println!(" - mode: {}", options.mode);
    }

    let handler = signal::install_handler()?;
    let observer = ConsoleObserver::new(cli.quiet).with_actions(!cli.json);

    let summary = pipeline::run(&dir, options, handler.flag(), &observer)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        print!("{}", describe_summary(&summary));
    }

    Ok(ExitCode::for_summary(&summary))
}
