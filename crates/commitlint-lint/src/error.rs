//! Per-commit lint failures

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use commitlint_parser::ParseError;

use crate::rules::RuleViolation;

/// Why a commit failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintCause {
    /// The message does not follow the grammar
    Parse(ParseError),
    /// The message parsed but broke a rule
    Rule(RuleViolation),
}

impl LintCause {
    /// Byte offset into the message, known only for parse failures
    pub fn pos(&self) -> Option<usize> {
        match self {
            Self::Parse(err) => Some(err.pos),
            Self::Rule(_) => None,
        }
    }
}

impl fmt::Display for LintCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            Self::Rule(violation) => violation.fmt(f),
        }
    }
}

impl std::error::Error for LintCause {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Rule(violation) => Some(violation),
        }
    }
}

impl From<ParseError> for LintCause {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<RuleViolation> for LintCause {
    fn from(violation: RuleViolation) -> Self {
        Self::Rule(violation)
    }
}

/// A lint failure tied to the commit it came from
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{hash}: {cause}")]
pub struct LintError {
    /// Full hash of the offending commit, empty for a standalone message
    pub hash: String,
    /// Byte offset into the message, when known
    pub pos: Option<usize>,
    /// Underlying failure
    #[source]
    pub cause: LintCause,
}

impl LintError {
    pub fn new(hash: impl Into<String>, cause: impl Into<LintCause>) -> Self {
        let cause = cause.into();
        Self {
            hash: hash.into(),
            pos: cause.pos(),
            cause,
        }
    }
}

impl Serialize for LintError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LintError", 3)?;
        state.serialize_field("hash", &self.hash)?;
        state.serialize_field("pos", &self.pos)?;
        state.serialize_field("cause", &self.cause.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitlint_parser::ParseErrorKind;

    #[test]
    fn test_parse_cause_carries_position() {
        let err = LintError::new("abc", ParseError::new(6, ParseErrorKind::InvalidType));
        assert_eq!(err.pos, Some(6));
        assert!(err.to_string().starts_with("abc: "));
    }

    #[test]
    fn test_rule_cause_has_no_position() {
        let err = LintError::new("abc", RuleViolation::EmptySubject);
        assert_eq!(err.pos, None);
    }

    #[test]
    fn test_serialize() {
        let err = LintError::new("abc", RuleViolation::UpperCaseSubject);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["hash"], "abc");
        assert!(json["pos"].is_null());
        assert_eq!(json["cause"], "subject starts with an upper case letter");
    }
}
