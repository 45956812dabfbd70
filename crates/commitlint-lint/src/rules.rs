//! Validation rules for parsed messages

use std::collections::HashSet;

use thiserror::Error;

use commitlint_git::CommitInfo;
use commitlint_parser::CommitMessage;

/// A semantic problem with a message that parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("unknown type {0:?}")]
    UnknownType(String),

    #[error("subject must not be empty")]
    EmptySubject,

    #[error("subject starts with an invalid character")]
    InvalidCharacter,

    #[error("subject starts with an upper case letter")]
    UpperCaseSubject,

    #[error("subject starts with whitespace")]
    LeadingWhitespace,
}

/// A single check on a parsed message
pub trait Rule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn validate(&self, message: &CommitMessage, commit: &CommitInfo) -> Result<(), RuleViolation>;
}

/// Ordered rule set, stopping at the first violation
#[derive(Default)]
pub struct Rules {
    rules: Vec<Box<dyn Rule>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The allowed-types rule followed by the subject rule
    pub fn standard<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new()
            .with(AllowedTypes::new(types))
            .with(ConventionalSubject)
    }

    /// Append a rule
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.push(rule);
        self
    }

    pub fn push<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order
    pub fn validate(&self, message: &CommitMessage, commit: &CommitInfo) -> Result<(), RuleViolation> {
        for rule in &self.rules {
            rule.validate(message, commit).inspect_err(|violation| {
                tracing::trace!(rule = rule.name(), %violation, "rule failed");
            })?;
        }
        Ok(())
    }
}

/// Reject types outside an allow-list
#[derive(Debug, Clone)]
pub struct AllowedTypes {
    types: HashSet<String>,
}

impl AllowedTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for AllowedTypes {
    fn name(&self) -> &'static str {
        "allowed-types"
    }

    fn validate(&self, message: &CommitMessage, _commit: &CommitInfo) -> Result<(), RuleViolation> {
        if self.types.contains(&message.commit_type) {
            Ok(())
        } else {
            Err(RuleViolation::UnknownType(message.commit_type.clone()))
        }
    }
}

/// Require a subject that starts with a lower case, non-space character
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalSubject;

impl Rule for ConventionalSubject {
    fn name(&self) -> &'static str {
        "conventional-subject"
    }

    fn validate(&self, message: &CommitMessage, _commit: &CommitInfo) -> Result<(), RuleViolation> {
        match message.subject.chars().next() {
            None => Err(RuleViolation::EmptySubject),
            Some(char::REPLACEMENT_CHARACTER) => Err(RuleViolation::InvalidCharacter),
            Some(c) if c.is_uppercase() => Err(RuleViolation::UpperCaseSubject),
            Some(c) if c.is_whitespace() => Err(RuleViolation::LeadingWhitespace),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(commit_type: &str, subject: &str) -> CommitMessage {
        CommitMessage {
            commit_type: commit_type.to_string(),
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    fn commit() -> CommitInfo {
        CommitInfo::new("abc1234", "")
    }

    #[test]
    fn test_allowed_types() {
        let rule = AllowedTypes::new(["feat", "fix"]);
        assert!(rule.validate(&message("feat", "x"), &commit()).is_ok());
        assert_eq!(
            rule.validate(&message("change", "x"), &commit()),
            Err(RuleViolation::UnknownType("change".to_string()))
        );
    }

    #[test]
    fn test_subject_rule() {
        let cases = [
            ("add thing", Ok(())),
            ("éclair support", Ok(())),
            ("42 tests", Ok(())),
            ("", Err(RuleViolation::EmptySubject)),
            ("\u{FFFD}bad", Err(RuleViolation::InvalidCharacter)),
            ("Add thing", Err(RuleViolation::UpperCaseSubject)),
            ("Ä thing", Err(RuleViolation::UpperCaseSubject)),
            (" add thing", Err(RuleViolation::LeadingWhitespace)),
            ("\tadd thing", Err(RuleViolation::LeadingWhitespace)),
        ];

        for (subject, expected) in cases {
            assert_eq!(
                ConventionalSubject.validate(&message("feat", subject), &commit()),
                expected,
                "subject {subject:?}"
            );
        }
    }

    #[test]
    fn test_rules_short_circuit() {
        let rules = Rules::standard(["feat"]);
        assert_eq!(rules.len(), 2);

        // Both rules would fail; the type rule runs first.
        assert_eq!(
            rules.validate(&message("change", "Bad"), &commit()),
            Err(RuleViolation::UnknownType("change".to_string()))
        );
        assert_eq!(
            rules.validate(&message("feat", "Bad"), &commit()),
            Err(RuleViolation::UpperCaseSubject)
        );
    }

    #[test]
    fn test_empty_rules_pass() {
        assert!(Rules::new().validate(&message("", ""), &commit()).is_ok());
    }
}
