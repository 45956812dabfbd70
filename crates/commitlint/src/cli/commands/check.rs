//! Check command - Lint a single commit message
//!
//! Used by the commit-msg hook, which passes the path of the message file git
//! is about to commit.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use commitlint_core::config::validate_config;
use commitlint_git::CommitInfo;
use commitlint_lint::{Lint, Linter};

use crate::cli::output::{self, JsonReport};
use crate::cli::{Cli, OutputFormat};

/// Line below which git drops the rest of the message in `--verbose` commits
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Lint a single commit message
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// File holding the message, or `-` for stdin
    #[arg(default_value = "-")]
    pub file: String,

    /// Allowed commit types, replacing the configured list
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,
}

impl CheckCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(file = %self.file, "executing check command");

        let raw = read_message(&self.file)?;
        let message = strip_comments(&raw);
        debug!(bytes = message.len(), "message read");

        let cwd = std::env::current_dir()?;
        let (mut config, _) = cli.load_config(&cwd)?;
        if !self.types.is_empty() {
            config.lint.types = self.types.clone();
        }
        validate_config(&config)?;

        // A lone message has no parents to judge, so nothing counts as a root commit.
        config.lint.allow_initial_commit = false;
        let linter = Linter::from_config(&config.lint);
        let result = linter.lint(&CommitInfo::new("", message.as_str()));

        match cli.format {
            OutputFormat::Json => output::print_json(&JsonReport {
                passed: result.is_ok(),
                cancelled: false,
                visited: 1,
                violations: result
                    .as_ref()
                    .err()
                    .map(std::slice::from_ref)
                    .unwrap_or_default(),
            })?,
            OutputFormat::Text => match &result {
                Ok(()) if cli.verbose => output::success("Commit message is valid"),
                Ok(()) => {}
                Err(err) => {
                    eprintln!("{} {}", style("✗").red().bold(), err.cause);
                    if let Some(pos) = err.pos {
                        eprintln!("{}", output::pointer(&message, pos));
                    }
                }
            },
        }

        if result.is_err() {
            anyhow::bail!("commit message does not follow the conventional commit format");
        }
        Ok(())
    }
}

fn read_message(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    std::fs::read_to_string(Path::new(file))
        .with_context(|| format!("failed to read message file {file}"))
}

/// Drop `#` comment lines and anything below the scissors line, as git does
fn strip_comments(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .take_while(|line| *line != SCISSORS)
        .filter(|line| !line.starts_with('#'))
        .collect();

    lines.join("\n").trim_start_matches('\n').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments() {
        let raw = "feat: add flag\n\nBody text.\n# Please enter the commit message\n#\n";
        assert_eq!(strip_comments(raw), "feat: add flag\n\nBody text.");
    }

    #[test]
    fn test_strip_scissors() {
        let raw = format!("fix: x\n\n{SCISSORS}\ndiff --git a/x b/x\n+added\n");
        assert_eq!(strip_comments(&raw), "fix: x");
    }

    #[test]
    fn test_strip_keeps_hash_inside_lines() {
        let raw = "fix: x\n\nbody\n\nFixes #12\n";
        assert_eq!(strip_comments(raw), "fix: x\n\nbody\n\nFixes #12");
    }

    #[test]
    fn test_read_message_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "docs: readme\n").unwrap();

        let message = read_message(path.to_str().unwrap()).unwrap();
        assert_eq!(message, "docs: readme\n");
        assert!(read_message("/no/such/file").is_err());
    }
}
