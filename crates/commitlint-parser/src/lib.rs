//! Commitlint Parser - Conventional commit message parsing
//!
//! This crate turns a raw commit message into a [`CommitMessage`] using a
//! hand-written positional scanner. Failures are reported as a [`ParseError`]
//! carrying the byte offset where the scanner gave up.

pub mod error;
pub mod message;
mod parser;
mod scanner;

pub use error::{ParseError, ParseErrorKind};
pub use message::{CommitMessage, Trailers};
pub use parser::{
    parse, parse_partial, BREAKING_CHANGE_KEY, BREAKING_CHANGE_KEY_ALT, MERGE_MARKER, MERGE_TYPE,
    REVERT_MARKER,
};
