//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, else `config.toml` in the platform
//!    config directory)
//! 3. `FOLDERSWEEP_*` environment variables
//! 4. Command-line flags ([`Config::apply_cli`])

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::pipeline::{RunOptions, DEFAULT_QUEUE_CAPACITY};
use crate::record::RunMode;

/// Prefix of environment variables read into [`Config`].
pub const ENV_PREFIX: &str = "FOLDERSWEEP_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What happens to empty and duplicate files.
    pub mode: RunMode,
    /// Report what would happen without touching any file.
    pub dry_run: bool,
    /// Capacity of each inter-stage queue.
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: RunMode::Move,
            dry_run: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Build the layered figment (defaults, file, environment).
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file.map(Path::to_path_buf).or_else(Self::default_path) {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly given file does not exist, or if any layer
    /// holds an invalid value.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
        }
        let config: Self = Self::figment(file)
            .extract()
            .context("invalid configuration")?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Default platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "foldersweep", "foldersweep")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Override settings with flags given on the command line.
    #[must_use]
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if cli.dry_run {
            self.dry_run = true;
        }
        if let Some(capacity) = cli.queue_capacity {
            self.queue_capacity = capacity;
        }
        self
    }

    /// Render the configuration as a TOML document.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }

    /// Options for [`crate::pipeline::run`].
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions::default()
            .with_mode(self.mode)
            .with_dry_run(self.dry_run)
            .with_queue_capacity(self.queue_capacity)
    }
}
