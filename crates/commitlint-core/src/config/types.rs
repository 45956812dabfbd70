//! Configuration types

use serde::{Deserialize, Serialize};

use super::defaults::{default_commit_types, DEFAULT_REVISION};

/// Main configuration for commitlint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule and filter configuration
    pub lint: LintConfig,

    /// Which part of history to lint
    pub revision: RevisionConfig,
}

/// Rule and filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Allowed commit types
    pub types: Vec<String>,

    /// Forgive a root commit whose message is "initial commit"
    pub allow_initial_commit: bool,

    /// Check subject casing and leading whitespace
    pub subject_rules: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            types: default_commit_types(),
            allow_initial_commit: false,
            subject_rules: true,
        }
    }
}

/// Revision range configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevisionConfig {
    /// Revision to start linting at
    pub start: String,

    /// Revision whose merge base with `start` ends the run (exclusive)
    pub other: Option<String>,

    /// Maximum number of commits to lint
    pub max_count: Option<usize>,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_REVISION.to_string(),
            other: None,
            max_count: None,
        }
    }
}
