//! Merge-base resolution for bounded runs

use std::collections::HashSet;

use tracing::{debug, instrument};

use commitlint_core::error::{GitError, TraversalError};

use crate::graph::CommitGraph;

/// Resolve two revisions and compute their common-ancestor set
///
/// A lint run from `revision` stops as soon as it reaches one of the returned
/// commits, which limits it to the commits `revision` has on top of `other`.
#[instrument(skip(graph))]
pub fn resolve_merge_base<G: CommitGraph + ?Sized>(
    graph: &G,
    revision: &str,
    other: &str,
) -> Result<HashSet<String>, TraversalError> {
    let resolve = |name: &str| {
        graph
            .resolve_revision(name)
            .map_err(|source| TraversalError::InvalidRevision {
                revision: name.to_string(),
                source,
            })
    };
    let one = resolve(revision)?;
    let two = resolve(other)?;

    let no_merge_base = || TraversalError::NoMergeBase {
        revision: revision.to_string(),
        other: other.to_string(),
    };

    let bases = match graph.merge_bases(&one, &two) {
        Ok(bases) => bases,
        Err(GitError::NoMergeBase(_, _)) => return Err(no_merge_base()),
        Err(err) => return Err(err.into()),
    };
    if bases.is_empty() {
        return Err(no_merge_base());
    }

    debug!(bases = ?bases, "resolved merge base");
    Ok(bases.into_iter().collect())
}
