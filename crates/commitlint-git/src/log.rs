//! Breadth-first history walk

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::graph::CommitGraph;
use crate::repository::Result;
use crate::types::CommitInfo;

/// Iterator over a commit and its ancestors in breadth-first order
///
/// Parents are queued in the order the commit lists them, so the first parent
/// line is always one step ahead of merged-in branches at the same depth. A
/// commit reachable along several paths is yielded once. Iteration ends after
/// the first lookup error.
pub struct BreadthFirstLog<'g, G: ?Sized> {
    graph: &'g G,
    queue: VecDeque<String>,
    seen: HashSet<String>,
    failed: bool,
}

impl<'g, G: CommitGraph + ?Sized> BreadthFirstLog<'g, G> {
    pub fn new(graph: &'g G, from: &str) -> Self {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(from.to_string());
        seen.insert(from.to_string());

        Self {
            graph,
            queue,
            seen,
            failed: false,
        }
    }
}

impl<G: CommitGraph + ?Sized> Iterator for BreadthFirstLog<'_, G> {
    type Item = Result<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let hash = self.queue.pop_front()?;
        let commit = match self.graph.commit(&hash) {
            Ok(commit) => commit,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };

        for parent in &commit.parents {
            if self.seen.insert(parent.clone()) {
                self.queue.push_back(parent.clone());
            }
        }
        trace!(hash = %commit.hash, queued = self.queue.len(), "visited commit");

        Some(Ok(commit))
    }
}
