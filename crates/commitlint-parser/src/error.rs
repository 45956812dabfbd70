//! Parse error types

use std::fmt;

use thiserror::Error;

/// The underlying reason a message could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// The header has no usable type
    #[error("invalid commit type")]
    InvalidType,

    /// The scope is unterminated or empty
    #[error("invalid commit scope")]
    InvalidScope,

    /// The `: ` separator or the subject itself is malformed
    #[error("invalid commit subject")]
    InvalidSubject,

    /// The overall message structure is malformed
    #[error("invalid commit message")]
    InvalidMessage,

    /// A line in the trailer paragraph is not a trailer
    #[error("invalid trailer in commit message")]
    InvalidTrailer,

    /// A revert or merge message with a shape the parser does not understand
    #[error("unsupported special commit, please report this error if you think it should be supported")]
    UnsupportedSpecialCommit,
}

/// A positional parse failure
///
/// `pos` is a 0-based byte offset into the original message. It always lies on
/// a character boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset at which the failure was detected
    pub pos: usize,
    /// Underlying cause
    pub kind: ParseErrorKind,
    /// Short description of what the scanner expected
    pub detail: Option<&'static str>,
}

impl ParseError {
    /// Create a new parse error at `pos`
    pub fn new(pos: usize, kind: ParseErrorKind) -> Self {
        Self {
            pos,
            kind,
            detail: None,
        }
    }

    /// Attach a description of what was expected
    pub fn with_detail(mut self, detail: &'static str) -> Self {
        self.detail = Some(detail);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail {
            Some(detail) => write!(
                f,
                "unexpected character at {}: {}: {}",
                self.pos, detail, self.kind
            ),
            None => write!(f, "unexpected character at {}: {}", self.pos, self.kind),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
