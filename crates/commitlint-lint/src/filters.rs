//! Filters that forgive known exceptions

use tracing::debug;

use commitlint_git::CommitInfo;
use commitlint_parser::CommitMessage;

use crate::error::LintCause;

/// Message a root commit may carry without following the grammar
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Decides whether a failure should be overlooked
///
/// `message` holds whatever was parsed before a parse failure, so filters
/// should not rely on it being complete.
pub trait Filter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn forgive(&self, message: &CommitMessage, commit: &CommitInfo, cause: &LintCause) -> bool;
}

/// Ordered filter set
#[derive(Default)]
pub struct Filters {
    filters: Vec<Box<dyn Filter>>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter
    pub fn with<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.push(filter);
        self
    }

    pub fn push<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Return `Ok` if any filter forgives `cause`, otherwise the cause unchanged
    pub fn apply(
        &self,
        message: &CommitMessage,
        commit: &CommitInfo,
        cause: LintCause,
    ) -> Result<(), LintCause> {
        match self
            .filters
            .iter()
            .find(|filter| filter.forgive(message, commit, &cause))
        {
            Some(filter) => {
                debug!(hash = %commit.hash, filter = filter.name(), %cause, "failure forgiven");
                Ok(())
            }
            None => Err(cause),
        }
    }
}

/// Forgive a root commit whose whole message is "initial commit"
///
/// The comparison ignores case and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitialCommit;

impl Filter for InitialCommit {
    fn name(&self) -> &'static str {
        "initial-commit"
    }

    fn forgive(&self, _message: &CommitMessage, commit: &CommitInfo, _cause: &LintCause) -> bool {
        commit.is_root()
            && commit
                .message
                .trim()
                .eq_ignore_ascii_case(INITIAL_COMMIT_MESSAGE)
    }
}
