//! Commit graph provider

use crate::log::BreadthFirstLog;
use crate::repository::Result;
use crate::types::CommitInfo;

/// Lazy, finite sequence of commits
pub type CommitStream<'a> = Box<dyn Iterator<Item = Result<CommitInfo>> + 'a>;

/// Read access to a commit graph
///
/// [`GitRepo`](crate::GitRepo) is the production implementation. Anything
/// that can resolve names and look up commits by hash can be linted.
pub trait CommitGraph {
    /// Resolve a revision name (branch, tag, `HEAD~2`, hash) to a commit hash
    fn resolve_revision(&self, revision: &str) -> Result<String>;

    /// Look up a commit by its full hash
    fn commit(&self, hash: &str) -> Result<CommitInfo>;

    /// Best common ancestors of two commits
    ///
    /// Fails with [`GitError::NoMergeBase`](commitlint_core::GitError::NoMergeBase)
    /// when the histories are disconnected.
    fn merge_bases(&self, a: &str, b: &str) -> Result<Vec<String>>;

    /// Walk history breadth-first from `from`, each commit exactly once
    fn breadth_first_log<'a>(&'a self, from: &str) -> CommitStream<'a> {
        Box::new(BreadthFirstLog::new(self, from))
    }
}
