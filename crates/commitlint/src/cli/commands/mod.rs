//! CLI commands

mod check;
mod hooks;
mod lint;

pub use check::CheckCommand;
pub use hooks::HooksCommand;
pub use lint::LintCommand;
