//! Commitlint Lint - Rules and history traversal
//!
//! A [`Linter`] parses one commit message, runs the [`Rules`] over it and lets
//! the [`Filters`] forgive known exceptions. The [`Traverser`] walks history
//! breadth-first from a start revision, lints every commit until a
//! [`StopPredicate`] fires, and hands each violation to a [`Reporter`].

pub mod cancel;
pub mod error;
pub mod filters;
pub mod linter;
pub mod reporter;
pub mod rules;
pub mod stop;
pub mod traverser;

pub use cancel::CancellationToken;
pub use error::{LintCause, LintError};
pub use filters::{Filter, Filters, InitialCommit};
pub use linter::{Lint, Linter};
pub use reporter::{CollectingReporter, NoopReporter, Reporter, TracingReporter};
pub use rules::{AllowedTypes, ConventionalSubject, Rule, RuleViolation, Rules};
pub use stop::{AnyStop, NeverStop, StopAfter, StopAtCommits, StopPredicate};
pub use traverser::{TraversalReport, Traverser};
