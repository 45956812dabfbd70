//! Output formatting utilities

use console::{style, Style};
use serde::Serialize;

use commitlint_lint::{LintError, Reporter};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for commit hashes
pub fn hash_style() -> Style {
    Style::new().yellow()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// First seven characters of a hash
pub fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Machine-readable summary of a lint run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub passed: bool,
    pub cancelled: bool,
    pub visited: usize,
    pub violations: &'a [LintError],
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render the line of `message` containing byte offset `pos` with a caret
/// under the offending character
pub fn pointer(message: &str, pos: usize) -> String {
    let pos = pos.min(message.len());
    let line_start = message[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line_end = message[pos..]
        .find('\n')
        .map_or(message.len(), |i| pos + i);

    let line = &message[line_start..line_end];
    let column = message[line_start..pos].chars().count();
    format!("{line}\n{}{}", " ".repeat(column), style("^").red().bold())
}

/// Reporter that prints each violation to stderr as it is found
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, error: &LintError) {
        tracing::debug!(hash = %error.hash, pos = ?error.pos, "reporting violation");
        eprintln!(
            "{} {} {}",
            style("✗").red().bold(),
            hash_style().apply_to(short_hash(&error.hash)),
            error.cause
        );
    }
}
