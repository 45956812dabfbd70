//! Per-commit linting

use tracing::debug;

use commitlint_core::LintConfig;
use commitlint_git::CommitInfo;
use commitlint_parser::parse_partial;

use crate::error::{LintCause, LintError};
use crate::filters::{Filters, InitialCommit};
use crate::rules::{AllowedTypes, ConventionalSubject, Rules};

/// Something that can judge a single commit
pub trait Lint: Send + Sync {
    fn lint(&self, commit: &CommitInfo) -> Result<(), LintError>;
}

/// Parses a message, runs the rules and lets the filters forgive failures
///
/// Revert and merge messages pass once they parse; no rule covers their shape.
#[derive(Default)]
pub struct Linter {
    rules: Rules,
    filters: Filters,
}

impl Linter {
    pub fn new(rules: Rules, filters: Filters) -> Self {
        Self { rules, filters }
    }

    /// Build the rule and filter sets described by `config`
    pub fn from_config(config: &LintConfig) -> Self {
        let mut rules = Rules::new().with(AllowedTypes::new(config.types.iter().cloned()));
        if config.subject_rules {
            rules.push(ConventionalSubject);
        }

        let mut filters = Filters::new();
        if config.allow_initial_commit {
            filters.push(InitialCommit);
        }

        debug!(
            rules = rules.len(),
            filters = filters.len(),
            "built linter from config"
        );
        Self { rules, filters }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }
}

impl Lint for Linter {
    fn lint(&self, commit: &CommitInfo) -> Result<(), LintError> {
        let (message, parse_error) = parse_partial(&commit.message);

        let cause = match parse_error {
            Some(err) => LintCause::Parse(err),
            None if message.is_special() => return Ok(()),
            None => match self.rules.validate(&message, commit) {
                Ok(()) => return Ok(()),
                Err(violation) => LintCause::Rule(violation),
            },
        };

        self.filters
            .apply(&message, commit, cause)
            .map_err(|cause| LintError::new(commit.hash.clone(), cause))
    }
}
