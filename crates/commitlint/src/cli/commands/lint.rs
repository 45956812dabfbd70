//! Lint command - Check every commit message reachable from a revision

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{info, warn};

use commitlint_core::config::validate_config;
use commitlint_core::Config;
use commitlint_git::GitRepo;
use commitlint_lint::{CancellationToken, Linter, NoopReporter, Reporter, TraversalReport, Traverser};

use crate::cli::output::{self, ConsoleReporter, JsonReport};
use crate::cli::{Cli, OutputFormat};

/// Lint commit messages in history
#[derive(Debug, Args)]
pub struct LintCommand {
    /// Path inside the repository (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Revision to start from (default: HEAD)
    #[arg(short, long)]
    pub rev: Option<String>,

    /// Stop at the merge base with this revision, e.g. `origin/main`
    #[arg(long)]
    pub other: Option<String>,

    /// Lint at most this many commits
    #[arg(short = 'n', long)]
    pub max_count: Option<usize>,

    /// Forgive a root commit whose message is "initial commit"
    #[arg(long)]
    pub allow_initial_commit: bool,

    /// Allowed commit types, replacing the configured list
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,
}

impl LintCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(rev = ?self.rev, other = ?self.other, "executing lint command");

        let path = if self.path.is_absolute() {
            self.path.clone()
        } else {
            std::env::current_dir()?.join(&self.path)
        };

        if !path.exists() {
            anyhow::bail!("Path not found: {}", path.display());
        }

        let repo = GitRepo::discover(&path)?;
        let (config, config_path) = cli.load_config(repo.path())?;
        let config = self.apply_overrides(config);
        validate_config(&config)?;

        if cli.verbose && cli.format == OutputFormat::Text {
            output::info(&format!(
                "Linting {} in {}",
                style(&config.revision.start).bold(),
                output::path_style().apply_to(repo.path().display())
            ));
            if let Some(path) = &config_path {
                println!("{}", output::key_value("config", &path.display().to_string()));
            }
            if let Some(other) = &config.revision.other {
                println!("{}", output::key_value("boundary", other));
            }
        }

        let reporter: Box<dyn Reporter> = match cli.format {
            OutputFormat::Text => Box::new(ConsoleReporter),
            OutputFormat::Json => Box::new(NoopReporter),
        };
        let report = run_with_interrupt(repo, config, reporter)?;

        match cli.format {
            OutputFormat::Json => output::print_json(&JsonReport {
                passed: report.is_clean(),
                cancelled: report.cancelled,
                visited: report.visited,
                violations: &report.violations,
            })?,
            OutputFormat::Text => match summary(&report, cli.verbose) {
                Some(Summary::Interrupted(visited)) => {
                    output::warning(&format!("Interrupted after {visited} commit(s)"))
                }
                Some(Summary::Clean(visited)) => {
                    output::success(&format!("{visited} commit(s) checked, no violations"))
                }
                None => {}
            },
        }

        report.outcome()?;
        Ok(())
    }

    /// Apply command-line flags on top of the loaded configuration
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(rev) = &self.rev {
            config.revision.start = rev.clone();
        }
        if self.other.is_some() {
            config.revision.other = self.other.clone();
        }
        if self.max_count.is_some() {
            config.revision.max_count = self.max_count;
        }
        if self.allow_initial_commit {
            config.lint.allow_initial_commit = true;
        }
        if !self.types.is_empty() {
            config.lint.types = self.types.clone();
        }
        config
    }
}

/// Closing line of text output
#[derive(Debug, PartialEq, Eq)]
enum Summary {
    Interrupted(usize),
    Clean(usize),
}

/// A clean run prints nothing unless verbose; violations are already reported.
fn summary(report: &TraversalReport, verbose: bool) -> Option<Summary> {
    if report.cancelled {
        Some(Summary::Interrupted(report.visited))
    } else if report.is_clean() && verbose {
        Some(Summary::Clean(report.visited))
    } else {
        None
    }
}

/// Run the traversal on a blocking thread while Ctrl-C cancels it
fn run_with_interrupt(
    repo: GitRepo,
    config: Config,
    reporter: Box<dyn Reporter>,
) -> anyhow::Result<TraversalReport> {
    let token = CancellationToken::new();
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let signal_token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping after the current commit");
                signal_token.cancel();
            }
        });

        let report = tokio::task::spawn_blocking(move || {
            let linter = Linter::from_config(&config.lint);
            Traverser::new()
                .graph(&repo)
                .linter(&linter)
                .reporter(reporter.as_ref())
                .revision(config.revision.start.clone())
                .other(config.revision.other.clone())
                .max_count(config.revision.max_count)
                .cancellation(token)
                .run()
        })
        .await??;

        Ok::<_, anyhow::Error>(report)
    })
}
