//! Commitlint Core - Shared foundations for commit message linting
//!
//! This crate provides the error taxonomy and the configuration system used by
//! the parser, git, lint and CLI crates.

pub mod config;
pub mod error;

pub use config::{load_config_or_default, Config, LintConfig, RevisionConfig};
pub use error::{CommitlintError, ConfigError, GitError, HookError, Result, TraversalError};
