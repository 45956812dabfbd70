//! Error types for commitlint

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CommitlintError
pub type Result<T> = std::result::Result<T, CommitlintError>;

/// Main error type for commitlint operations
#[derive(Debug, Error)]
pub enum CommitlintError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Hook installation errors
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Traversal errors
    #[error(transparent)]
    Traversal(#[from] TraversalError),

}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Revision could not be resolved to a commit
    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    /// Commit does not exist
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    /// The two commits share no history
    #[error("No common ancestor between {0} and {1}")]
    NoMergeBase(String, String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Git hook management errors
#[derive(Debug, Error)]
pub enum HookError {
    /// Hook could not be written
    #[error("Failed to install {hook} hook: {reason}")]
    InstallFailed { hook: String, reason: String },

    /// Hook could not be removed or restored
    #[error("Failed to uninstall {hook} hook: {reason}")]
    UninstallFailed { hook: String, reason: String },
}

/// Errors that end a history traversal
#[derive(Debug, Error)]
pub enum TraversalError {
    /// No commit graph was supplied
    #[error("repository is required")]
    MissingRepository,

    /// No linter was supplied
    #[error("no linter has been specified")]
    MissingLinter,

    /// A start or boundary revision did not resolve
    #[error("bad revision {revision:?}: {source}")]
    InvalidRevision {
        revision: String,
        #[source]
        source: GitError,
    },

    /// The start and boundary revisions have no common ancestor
    #[error("revisions {revision:?} and {other:?} do not have a common ancestor")]
    NoMergeBase { revision: String, other: String },

    /// The commit graph failed while walking history
    #[error("linter failed: {0}")]
    Git(#[from] GitError),

    /// One or more commits failed linting
    #[error("{count} commits with violations")]
    ViolationsFound { count: usize },

    /// The run was cancelled before it finished
    #[error("linting cancelled after {violations} violations")]
    Cancelled { violations: usize },
}

impl TraversalError {
    /// Whether this error was raised before any commit was visited
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingRepository
                | Self::MissingLinter
                | Self::InvalidRevision { .. }
                | Self::NoMergeBase { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message_names_count() {
        let err = TraversalError::ViolationsFound { count: 3 };
        assert_eq!(err.to_string(), "3 commits with violations");
    }

    #[test]
    fn test_configuration_errors() {
        assert!(TraversalError::MissingLinter.is_configuration());
        assert!(TraversalError::NoMergeBase {
            revision: "HEAD".to_string(),
            other: "main".to_string(),
        }
        .is_configuration());
        assert!(!TraversalError::ViolationsFound { count: 1 }.is_configuration());
        assert!(!TraversalError::Cancelled { violations: 0 }.is_configuration());
    }

    #[test]
    fn test_wraps_into_commitlint_error() {
        let err: CommitlintError = GitError::UnknownRevision("nope".to_string()).into();
        assert!(matches!(err, CommitlintError::Git(_)));
        assert_eq!(err.to_string(), "Unknown revision: nope");
    }
}
