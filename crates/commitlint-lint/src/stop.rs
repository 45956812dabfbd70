//! Conditions that end a traversal early

use std::collections::HashSet;

use commitlint_git::CommitInfo;

/// Decides, before a commit is linted, whether the walk ends there
///
/// A commit for which this returns `true` is not linted and not counted as
/// visited.
pub trait StopPredicate: Send {
    fn should_stop(&mut self, commit: &CommitInfo) -> bool;
}

/// Walk the whole reachable history
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopPredicate for NeverStop {
    fn should_stop(&mut self, _commit: &CommitInfo) -> bool {
        false
    }
}

/// Stop once `limit` commits have been visited
#[derive(Debug, Clone, Copy)]
pub struct StopAfter {
    limit: usize,
    visited: usize,
}

impl StopAfter {
    pub fn new(limit: usize) -> Self {
        Self { limit, visited: 0 }
    }
}

impl StopPredicate for StopAfter {
    fn should_stop(&mut self, _commit: &CommitInfo) -> bool {
        if self.visited >= self.limit {
            return true;
        }
        self.visited += 1;
        false
    }
}

/// Stop on reaching any commit in a set, typically a merge base
#[derive(Debug, Clone, Default)]
pub struct StopAtCommits {
    hashes: HashSet<String>,
}

impl StopAtCommits {
    pub fn new(hashes: impl IntoIterator<Item = String>) -> Self {
        Self {
            hashes: hashes.into_iter().collect(),
        }
    }
}

impl StopPredicate for StopAtCommits {
    fn should_stop(&mut self, commit: &CommitInfo) -> bool {
        self.hashes.contains(&commit.hash)
    }
}

/// Stop as soon as any of the inner predicates does
///
/// Every predicate sees every commit so counting predicates stay in step.
#[derive(Default)]
pub struct AnyStop<'a> {
    predicates: Vec<Box<dyn StopPredicate + 'a>>,
}

impl<'a> AnyStop<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P: StopPredicate + 'a>(mut self, predicate: P) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }
}

impl<'a> From<Vec<Box<dyn StopPredicate + 'a>>> for AnyStop<'a> {
    fn from(predicates: Vec<Box<dyn StopPredicate + 'a>>) -> Self {
        Self { predicates }
    }
}

impl StopPredicate for AnyStop<'_> {
    fn should_stop(&mut self, commit: &CommitInfo) -> bool {
        self.predicates
            .iter_mut()
            .fold(false, |stop, predicate| predicate.should_stop(commit) || stop)
    }
}
