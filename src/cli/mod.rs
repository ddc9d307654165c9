//! Command-line interface for Antoinette.
//!
//! The front end is deliberately thin: every command builds a
//! [`ProjectLayout`](crate::config::ProjectLayout) for the project root, runs
//! the library pipeline and prints or writes the result.
//!
//! # Available Commands
//!
//! - `config` - Scan the project, weave bundles and write `config/antoinette.json`
//! - `usage` - Print which templates use which components, as JSON
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Disable logging
//! - `--root` - Project root (defaults to the current directory)
//! - `--config` - Path of the stored configuration record
//!   (also read from `ANTOINETTE_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! antoinette config --custom-views app/content app/content/layouts
//! antoinette --root ../shop config --stdout
//! antoinette usage
//! ```

mod config;
mod usage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_FILE;

pub use config::ConfigCommand;
pub use usage::UsageCommand;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can check flag handling without
/// touching the global tracing subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging.
    pub log_level: Option<String>,

    /// Explicit configuration record path.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with logging disabled and the default record path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this
    /// twice is harmless; the second subscriber is ignored.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// The configuration record for a project rooted at `root`.
    #[must_use]
    pub fn record_path(&self, root: &Path) -> PathBuf {
        self.config_path.clone().unwrap_or_else(|| root.join(CONFIG_FILE))
    }
}

/// Top-level command-line interface.
#[derive(Parser)]
#[command(
    name = "antoinette",
    about = "Bundle Elm components per Rails template",
    version,
    long_about = "Antoinette finds which Elm applications every Rails view initialises, \
                  follows partials and layouts, and groups views into the smallest set of \
                  script bundles that gives each view exactly what it needs."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project root containing `app/views`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path of the stored configuration record
    /// (defaults to `<root>/config/antoinette.json`).
    #[arg(short, long, global = true, env = "ANTOINETTE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the bundle configuration.
    ///
    /// See [`ConfigCommand`] for options.
    Config(ConfigCommand),

    /// Report component usage per template.
    ///
    /// See [`UsageCommand`] for options.
    Usage(UsageCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns any failure of the selected command for display by the binary.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns any failure of the selected command.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        let record_path = config.record_path(&self.root);
        match self.command {
            Commands::Config(cmd) => cmd.execute(&self.root, &record_path),
            Commands::Usage(cmd) => cmd.execute(&self.root, &record_path),
        }
    }
}
