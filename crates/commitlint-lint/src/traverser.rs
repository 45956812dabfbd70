//! History traversal
//!
//! The traverser resolves a start revision, walks history breadth-first and
//! lints each commit in turn. Per commit it first checks for cancellation,
//! then the stop predicate, then lints. Violations go to the reporter as they
//! are found and are collected into a [`TraversalReport`].

use serde::Serialize;
use tracing::{debug, info, instrument};

use commitlint_core::config::defaults::DEFAULT_REVISION;
use commitlint_core::error::TraversalError;
use commitlint_git::{resolve_merge_base, CommitGraph};

use crate::cancel::CancellationToken;
use crate::error::LintError;
use crate::linter::Lint;
use crate::reporter::{Reporter, TracingReporter};
use crate::stop::{AnyStop, NeverStop, StopAfter, StopAtCommits, StopPredicate};

/// Outcome of a traversal that ran to completion, hit a stop or was cancelled
#[derive(Debug, Clone, Default, Serialize)]
pub struct TraversalReport {
    /// Violations in visitation order
    pub violations: Vec<LintError>,
    /// Number of commits linted
    pub visited: usize,
    /// Whether cancellation ended the run
    pub cancelled: bool,
    /// Commit at which a stop predicate ended the run
    pub stopped_at: Option<String>,
}

impl TraversalReport {
    /// No violations and not cancelled
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && !self.cancelled
    }

    /// The aggregate error for this run, if any
    pub fn outcome(&self) -> Result<(), TraversalError> {
        if self.cancelled {
            Err(TraversalError::Cancelled {
                violations: self.violations.len(),
            })
        } else if !self.violations.is_empty() {
            Err(TraversalError::ViolationsFound {
                count: self.violations.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Builder and runner for a lint pass over history
///
/// The commit graph and the linter are required; everything else has a
/// default (start at `HEAD`, no boundary, no limit, log violations to
/// tracing).
pub struct Traverser<'a> {
    graph: Option<&'a dyn CommitGraph>,
    linter: Option<&'a dyn Lint>,
    reporter: &'a dyn Reporter,
    revision: String,
    other: Option<String>,
    max_count: Option<usize>,
    stop: Option<Box<dyn StopPredicate + 'a>>,
    cancel: CancellationToken,
}

impl Default for Traverser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Traverser<'a> {
    pub fn new() -> Self {
        Self {
            graph: None,
            linter: None,
            reporter: &TracingReporter,
            revision: DEFAULT_REVISION.to_string(),
            other: None,
            max_count: None,
            stop: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn graph(mut self, graph: &'a dyn CommitGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn linter(mut self, linter: &'a dyn Lint) -> Self {
        self.linter = Some(linter);
        self
    }

    pub fn reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Revision to start from
    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Stop at the merge base of the start revision and `other`
    pub fn other(mut self, other: Option<String>) -> Self {
        self.other = other;
        self
    }

    /// Lint at most this many commits
    pub fn max_count(mut self, max_count: Option<usize>) -> Self {
        self.max_count = max_count;
        self
    }

    /// An extra stop condition, checked alongside the boundary and limit
    pub fn stop_when<P: StopPredicate + 'a>(mut self, predicate: P) -> Self {
        self.stop = Some(Box::new(predicate));
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Walk and lint
    ///
    /// Fails before visiting any commit if the graph or linter is missing, or
    /// if a revision or merge base cannot be resolved. Failures of the graph
    /// during the walk also abort. Lint violations never abort; inspect the
    /// returned report.
    #[instrument(skip(self), fields(revision = %self.revision, other = ?self.other))]
    pub fn run(mut self) -> Result<TraversalReport, TraversalError> {
        let graph = self.graph.ok_or(TraversalError::MissingRepository)?;
        let linter = self.linter.ok_or(TraversalError::MissingLinter)?;

        let start = graph
            .resolve_revision(&self.revision)
            .map_err(|source| TraversalError::InvalidRevision {
                revision: self.revision.clone(),
                source,
            })?;
        debug!(start = %start, "resolved start revision");

        let mut stop = self.stop_predicate(graph)?;
        let mut report = TraversalReport::default();
        let mut log = graph.breadth_first_log(&start);

        loop {
            if self.cancel.is_cancelled() {
                debug!(visited = report.visited, "cancellation observed");
                report.cancelled = true;
                break;
            }

            let Some(commit) = log.next() else {
                break;
            };
            let commit = commit?;

            if stop.should_stop(&commit) {
                debug!(hash = %commit.hash, "stop condition reached");
                report.stopped_at = Some(commit.hash);
                break;
            }

            report.visited += 1;
            match linter.lint(&commit) {
                Ok(()) => debug!(
                    hash = %commit.hash,
                    author = %commit.author,
                    committer = %commit.committer,
                    "commit passed"
                ),
                Err(err) => {
                    self.reporter.report(&err);
                    report.violations.push(err);
                }
            }
        }

        info!(
            visited = report.visited,
            violations = report.violations.len(),
            cancelled = report.cancelled,
            "traversal finished"
        );
        Ok(report)
    }

    fn stop_predicate(
        &mut self,
        graph: &dyn CommitGraph,
    ) -> Result<Box<dyn StopPredicate + 'a>, TraversalError> {
        let mut predicates: Vec<Box<dyn StopPredicate + 'a>> = Vec::new();

        if let Some(other) = &self.other {
            let bases = resolve_merge_base(graph, &self.revision, other)?;
            predicates.push(Box::new(StopAtCommits::new(bases)));
        }
        if let Some(max_count) = self.max_count {
            predicates.push(Box::new(StopAfter::new(max_count)));
        }
        if let Some(stop) = self.stop.take() {
            predicates.push(stop);
        }

        Ok(match predicates.len() {
            0 => Box::new(NeverStop),
            1 => predicates.remove(0),
            _ => Box::new(AnyStop::from(predicates)),
        })
    }
}
