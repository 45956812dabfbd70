//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use commitlint_core::{load_config_or_default, Config};

use commands::{CheckCommand, HooksCommand, LintCommand};

/// Commitlint - Conventional commit message linter
#[derive(Debug, Parser)]
#[command(name = "commitlint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: search upward for commitlint.toml)
    #[arg(long, global = true, env = "COMMITLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Console log filter, e.g. `debug` or `commitlint_lint=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Console log format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Format of console log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint the commit messages in a repository's history
    Lint(LintCommand),

    /// Lint a single commit message from a file or stdin
    Check(CheckCommand),

    /// Manage the commit-msg git hook
    Hooks(HooksCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Lint(ref cmd) => cmd.execute(&self),
            Commands::Check(ref cmd) => cmd.execute(&self),
            Commands::Hooks(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the `--config` file, or search upward from `dir`
    pub fn load_config(&self, dir: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
        match &self.config {
            Some(path) => {
                let config = commitlint_core::config::load_config(path)?;
                Ok((config, Some(path.clone())))
            }
            None => Ok(load_config_or_default(dir)?),
        }
    }
}
