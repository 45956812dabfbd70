//! In-memory commit graph

use std::collections::{HashMap, HashSet, VecDeque};

use commitlint_core::error::GitError;

use crate::graph::CommitGraph;
use crate::repository::Result;
use crate::types::CommitInfo;

/// A commit graph held entirely in memory
///
/// Revisions resolve through named refs first, then as full commit hashes.
/// Useful for linting histories that do not live in a repository on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    commits: HashMap<String, CommitInfo>,
    refs: HashMap<String, String>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit
    pub fn with_commit(mut self, commit: CommitInfo) -> Self {
        self.insert(commit);
        self
    }

    /// Point a ref name at a commit hash
    pub fn with_ref(mut self, name: impl Into<String>, hash: impl Into<String>) -> Self {
        self.refs.insert(name.into(), hash.into());
        self
    }

    pub fn insert(&mut self, commit: CommitInfo) {
        self.commits.insert(commit.hash.clone(), commit);
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// `hash` and every commit reachable from it
    fn ancestors(&self, hash: &str) -> HashSet<&str> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([hash]);

        while let Some(current) = queue.pop_front() {
            let Some(commit) = self.commits.get(current) else {
                continue;
            };
            if seen.insert(commit.hash.as_str()) {
                queue.extend(commit.parents.iter().map(String::as_str));
            }
        }
        seen
    }
}

impl CommitGraph for MemoryGraph {
    fn resolve_revision(&self, revision: &str) -> Result<String> {
        let hash = self.refs.get(revision).map_or(revision, String::as_str);
        if self.commits.contains_key(hash) {
            Ok(hash.to_string())
        } else {
            Err(GitError::UnknownRevision(revision.to_string()))
        }
    }

    fn commit(&self, hash: &str) -> Result<CommitInfo> {
        self.commits
            .get(hash)
            .cloned()
            .ok_or_else(|| GitError::CommitNotFound(hash.to_string()))
    }

    fn merge_bases(&self, a: &str, b: &str) -> Result<Vec<String>> {
        for hash in [a, b] {
            if !self.commits.contains_key(hash) {
                return Err(GitError::CommitNotFound(hash.to_string()));
            }
        }

        let left = self.ancestors(a);
        let common: HashSet<&str> = self
            .ancestors(b)
            .into_iter()
            .filter(|hash| left.contains(hash))
            .collect();

        // A common ancestor is a best one when no other common ancestor
        // descends from it.
        let mut bases: Vec<String> = common
            .iter()
            .filter(|&&candidate| {
                !common.iter().any(|&other| {
                    other != candidate && self.ancestors(other).contains(candidate)
                })
            })
            .map(|hash| hash.to_string())
            .collect();
        bases.sort();

        if bases.is_empty() {
            return Err(GitError::NoMergeBase(a.to_string(), b.to_string()));
        }
        Ok(bases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str, parents: &[&str]) -> CommitInfo {
        CommitInfo::new(hash, format!("chore: {hash}")).with_parents(parents.iter().copied())
    }

    /// root - a - b - merge
    ///         \     /
    ///          side
    fn diamond() -> MemoryGraph {
        MemoryGraph::new()
            .with_commit(commit("root", &[]))
            .with_commit(commit("a", &["root"]))
            .with_commit(commit("b", &["a"]))
            .with_commit(commit("side", &["a"]))
            .with_commit(commit("merge", &["b", "side"]))
            .with_ref("HEAD", "merge")
    }

    #[test]
    fn test_resolve_revision() {
        let graph = diamond();
        assert_eq!(graph.resolve_revision("HEAD").unwrap(), "merge");
        assert_eq!(graph.resolve_revision("side").unwrap(), "side");
        assert!(matches!(
            graph.resolve_revision("main"),
            Err(GitError::UnknownRevision(_))
        ));
    }

    #[test]
    fn test_breadth_first_log_visits_each_once() {
        let graph = diamond();
        let hashes: Vec<_> = graph
            .breadth_first_log("merge")
            .map(|c| c.unwrap().hash)
            .collect();
        assert_eq!(hashes, vec!["merge", "b", "side", "a", "root"]);
    }

    #[test]
    fn test_breadth_first_log_stops_after_error() {
        let graph = MemoryGraph::new().with_commit(commit("tip", &["missing", "root"]));
        let mut log = graph.breadth_first_log("tip");
        assert!(log.next().unwrap().is_ok());
        assert!(matches!(
            log.next(),
            Some(Err(GitError::CommitNotFound(_)))
        ));
        assert!(log.next().is_none());
    }

    #[test]
    fn test_merge_bases() {
        let graph = diamond();
        assert_eq!(graph.merge_bases("b", "side").unwrap(), vec!["a"]);
        assert_eq!(graph.merge_bases("merge", "side").unwrap(), vec!["side"]);

        let graph = graph.with_commit(commit("orphan", &[]));
        assert!(matches!(
            graph.merge_bases("merge", "orphan"),
            Err(GitError::NoMergeBase(_, _))
        ));
    }
}
