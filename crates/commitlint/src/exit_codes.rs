//! Exit codes for the CLI

use commitlint_core::{CommitlintError, ConfigError, GitError, HookError, TraversalError};

/// Success
pub const SUCCESS: u8 = 0;

/// Violations found, or any error without a more specific code
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// User cancelled
pub const CANCELLED: u8 = 130;

/// Pick the exit code for an error returned by a command
pub fn from_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<TraversalError>() {
            return from_traversal(err);
        }
        if let Some(err) = cause.downcast_ref::<CommitlintError>() {
            return match err {
                CommitlintError::Config(_) => CONFIG_ERROR,
                CommitlintError::Git(_) => GIT_ERROR,
                CommitlintError::Traversal(err) => from_traversal(err),
                CommitlintError::Hook(_) => ERROR,
            };
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<HookError>() {
            return ERROR;
        }
    }
    ERROR
}

fn from_traversal(err: &TraversalError) -> u8 {
    match err {
        TraversalError::Cancelled { .. } => CANCELLED,
        TraversalError::ViolationsFound { .. } => ERROR,
        TraversalError::Git(_) => GIT_ERROR,
        err if err.is_configuration() => CONFIG_ERROR,
        _ => ERROR,
    }
}
