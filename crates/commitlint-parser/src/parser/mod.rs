//! Conventional commit message parser
//!
//! The parser is a chain of states sharing one [`Scanner`]. Each state consumes
//! one token and names the state that follows, or `None` to finish.
//!
//! Positions in errors are 0-based byte offsets into the message.

mod trailers;

use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::message::CommitMessage;
use crate::scanner::Scanner;

/// First word of a message created by `git revert`
pub const REVERT_MARKER: &str = "Revert";

/// First word of a message created by `git merge`
pub const MERGE_MARKER: &str = "Merge";

/// Type assigned to merge messages
pub const MERGE_TYPE: &str = "merge";

/// Trailer key that flags a breaking change
pub const BREAKING_CHANGE_KEY: &str = "BREAKING CHANGE";

/// Alternative spelling of [`BREAKING_CHANGE_KEY`]
pub const BREAKING_CHANGE_KEY_ALT: &str = "BREAKING-CHANGE";

const BREAKING_CHANGE_PREFIX: &str = "BREAKING";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Dispatch,
    Revert,
    Merge,
    Type,
    Scope,
    Breaking,
    Subject,
    Body,
    Trailers,
}

type Step = Result<Option<State>, ParseError>;

/// Parse a commit message
pub fn parse(message: &str) -> Result<CommitMessage, ParseError> {
    match parse_partial(message) {
        (commit, None) => Ok(commit),
        (_, Some(err)) => Err(err),
    }
}

/// Parse a commit message, keeping whatever was parsed before a failure
///
/// The partial message is meant for diagnostics; which fields are filled in
/// on failure depends on how far the parser got.
pub fn parse_partial(message: &str) -> (CommitMessage, Option<ParseError>) {
    let mut parser = Parser::new(message);
    let err = parser.run().err();
    (parser.commit, err)
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    commit: CommitMessage,
}

impl<'a> Parser<'a> {
    fn new(message: &'a str) -> Self {
        Self {
            scanner: Scanner::new(message),
            commit: CommitMessage::default(),
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        let mut state = Some(State::Dispatch);
        while let Some(current) = state {
            trace!(state = ?current, pos = self.scanner.pos(), "parser state");
            state = match current {
                State::Dispatch => self.dispatch(),
                State::Revert => self.revert(),
                State::Merge => self.merge(),
                State::Type => self.commit_type(),
                State::Scope => self.scope(),
                State::Breaking => self.breaking(),
                State::Subject => self.subject(),
                State::Body => self.body(),
                State::Trailers => self.trailers(),
            }?;
        }

        if let Some(trailers) = &self.commit.trailers {
            if trailers.contains_key(BREAKING_CHANGE_KEY)
                || trailers.contains_key(BREAKING_CHANGE_KEY_ALT)
            {
                self.commit.breaking = true;
            }
        }

        Ok(())
    }

    fn line_break(&mut self) -> bool {
        self.scanner.accept("\r\n") || self.scanner.accept("\n")
    }

    fn fail(&self, kind: ParseErrorKind, detail: &'static str) -> ParseError {
        ParseError::new(self.scanner.pos(), kind).with_detail(detail)
    }

    fn dispatch(&mut self) -> Step {
        let input = self.scanner.input();
        if input.is_empty() {
            return Err(self.fail(ParseErrorKind::InvalidType, "message is empty"));
        }

        let first_word = input.split_once(' ').map_or(input, |(word, _)| word);
        Ok(Some(match first_word {
            REVERT_MARKER => State::Revert,
            MERGE_MARKER => State::Merge,
            _ => State::Type,
        }))
    }

    fn revert(&mut self) -> Step {
        self.scanner.accept_until(&[' ']);
        if self.scanner.token() != REVERT_MARKER {
            return Err(self.fail(ParseErrorKind::InvalidMessage, "expected \"Revert\""));
        }

        if self.scanner.accept_until(&['"', '\n']) != Some('"') {
            return Err(self.fail(
                ParseErrorKind::InvalidMessage,
                "expected a quotation mark after \"Revert \"",
            ));
        }
        self.scanner.advance();
        self.scanner.skip();

        self.commit.revert = true;
        Ok(Some(State::Type))
    }

    fn merge(&mut self) -> Step {
        self.scanner.accept_until(&['\n']);

        self.commit.merge = true;
        self.commit.commit_type = MERGE_TYPE.to_string();
        let subject = self.scanner.token();
        self.commit.subject = subject.strip_suffix('\r').unwrap_or(subject).to_string();

        Ok(Some(State::Body))
    }

    fn commit_type(&mut self) -> Step {
        let boundary = match self.scanner.accept_until(&[':', '!', '(', '\n']) {
            Some('\n') | None => {
                return Err(self.fail(
                    ParseErrorKind::InvalidType,
                    "expected ':' after the commit type",
                ))
            }
            Some(c) => c,
        };

        let commit_type = self.scanner.token();
        if commit_type.is_empty() {
            return Err(self.fail(ParseErrorKind::InvalidType, "commit type is empty"));
        }
        self.commit.commit_type = commit_type.to_string();

        Ok(Some(match boundary {
            '!' => State::Breaking,
            '(' => State::Scope,
            _ => State::Subject,
        }))
    }

    fn scope(&mut self) -> Step {
        if self.scanner.advance() != Some('(') {
            return Err(self.fail(ParseErrorKind::InvalidScope, "expected '('"));
        }
        self.scanner.skip();

        if self.scanner.accept_until(&[')', '\n']) != Some(')') {
            return Err(self.fail(
                ParseErrorKind::InvalidScope,
                "expected ')' to close the scope",
            ));
        }

        let scope = self.scanner.token();
        if scope.is_empty() {
            return Err(self.fail(
                ParseErrorKind::InvalidScope,
                "parenthesis found but scope is empty",
            ));
        }
        self.commit.scope = Some(scope.to_string());

        self.scanner.advance();
        self.scanner.skip();

        if self.scanner.peek() == Some('!') {
            return Ok(Some(State::Breaking));
        }
        Ok(Some(State::Subject))
    }

    fn breaking(&mut self) -> Step {
        if self.scanner.advance() != Some('!') {
            return Err(self.fail(ParseErrorKind::InvalidMessage, "expected '!'"));
        }
        self.scanner.skip();

        self.commit.breaking = true;
        Ok(Some(State::Subject))
    }

    fn subject(&mut self) -> Step {
        if self.scanner.peek() != Some(':') {
            return Err(self.fail(
                ParseErrorKind::InvalidSubject,
                "expected ':' before the subject",
            ));
        }
        self.scanner.advance();

        if self.scanner.peek() != Some(' ') {
            return Err(self.fail(
                ParseErrorKind::InvalidSubject,
                "expected a space after ':'",
            ));
        }
        self.scanner.advance();
        self.scanner.skip();

        self.scanner.accept_until(&['\n']);
        let token = self.scanner.token();
        let mut subject = token.strip_suffix('\r').unwrap_or(token);

        if self.commit.revert {
            subject = match subject.strip_suffix('"') {
                Some(inner) => inner,
                None => {
                    return Err(self.fail(
                        ParseErrorKind::UnsupportedSpecialCommit,
                        "expected the reverted header to end with a quotation mark",
                    ))
                }
            };
        }

        if subject.is_empty() {
            return Err(self.fail(ParseErrorKind::InvalidSubject, "subject is empty"));
        }
        self.commit.subject = subject.to_string();

        Ok(Some(State::Body))
    }

    fn body(&mut self) -> Step {
        if self.scanner.at_end() {
            return Ok(None);
        }
        if !self.line_break() {
            return Err(self.fail(
                ParseErrorKind::InvalidMessage,
                "expected a line break after the header",
            ));
        }

        // Header followed by a single trailing newline.
        if self.scanner.at_end() {
            return Ok(None);
        }
        if !self.line_break() {
            return Err(self.fail(
                ParseErrorKind::InvalidMessage,
                "expected a blank line after the header",
            ));
        }
        self.scanner.skip();

        let rest = self.scanner.remains().trim_end();
        self.scanner.limit(self.scanner.pos() + rest.len());

        match last_blank_line(rest) {
            None => {
                self.commit.body = non_empty(rest.trim());
                Ok(None)
            }
            Some((i, len)) => {
                self.commit.body = non_empty(rest[..i].trim());
                self.scanner.advance_bytes(i + len);
                self.scanner.skip();
                Ok(Some(State::Trailers))
            }
        }
    }
}

/// Offset and length of the last blank line separator, LF or CRLF
fn last_blank_line(text: &str) -> Option<(usize, usize)> {
    let lf = text.rfind("\n\n").map(|i| (i, 2));
    let crlf = text.rfind("\n\r\n").map(|i| (i, 3));
    lf.into_iter().chain(crlf).max_by_key(|(i, _)| *i)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(commit_type: &str, subject: &str) -> CommitMessage {
        CommitMessage {
            commit_type: commit_type.to_string(),
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_only() {
        for (message, commit_type, subject) in [
            ("change: stuff", "change", "stuff"),
            ("fix: handle empty input", "fix", "handle empty input"),
            ("docs: a: b", "docs", "a: b"),
            ("chore: bump deps\n", "chore", "bump deps"),
        ] {
            let parsed = parse(message).unwrap();
            assert_eq!(parsed, header(commit_type, subject), "message {message:?}");
        }
    }

    #[test]
    fn test_type_scope_subject_and_body() {
        let parsed = parse("feat(woop): something\n\nAdded more features\n").unwrap();
        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.scope.as_deref(), Some("woop"));
        assert_eq!(parsed.subject, "something");
        assert_eq!(parsed.body.as_deref(), Some("Added more features"));
        assert!(parsed.trailers.is_none());
        assert!(!parsed.breaking);
    }

    #[test]
    fn test_breaking_marker() {
        let parsed = parse("feat!: refactored to support Y\n\nDid stuff!").unwrap();
        assert!(parsed.breaking);
        assert!(parsed.scope.is_none());
        assert_eq!(parsed.subject, "refactored to support Y");
        assert_eq!(parsed.body.as_deref(), Some("Did stuff!"));
    }

    #[test]
    fn test_breaking_marker_with_scope() {
        let parsed = parse("feat(cli)!: refactored to support Y\n\nDid stuff!").unwrap();
        assert!(parsed.breaking);
        assert_eq!(parsed.scope.as_deref(), Some("cli"));
        assert_eq!(parsed.commit_type, "feat");
    }

    #[test]
    fn test_misplaced_exclamation_mark() {
        let (partial, err) = parse_partial("feat!(cli): refactored to support Y");
        let err = err.unwrap();
        assert_eq!(err.kind, ParseErrorKind::InvalidSubject);
        assert_eq!(err.pos, 5);
        assert_eq!(partial.commit_type, "feat");
        assert!(partial.breaking);
    }

    #[test]
    fn test_missing_subject_and_missing_colon_differ() {
        let no_subject = parse("change:").unwrap_err();
        assert_eq!(no_subject.kind, ParseErrorKind::InvalidSubject);
        assert_eq!(no_subject.pos, 7);
        assert_eq!(no_subject.detail, Some("expected a space after ':'"));

        let no_colon = parse("change").unwrap_err();
        assert_eq!(no_colon.kind, ParseErrorKind::InvalidType);
        assert_eq!(no_colon.pos, 6);

        assert_ne!(no_subject.kind, no_colon.kind);
    }

    #[test]
    fn test_missing_space() {
        let (partial, err) = parse_partial("feat:new stuff");
        let err = err.unwrap();
        assert_eq!(err.kind, ParseErrorKind::InvalidSubject);
        assert_eq!(err.detail, Some("expected a space after ':'"));
        assert_eq!(err.pos, 5);
        assert_eq!(partial.commit_type, "feat");
    }

    #[test]
    fn test_missing_colon_after_breaking() {
        let (partial, err) = parse_partial("feat! new stuff");
        let err = err.unwrap();
        assert_eq!(err.kind, ParseErrorKind::InvalidSubject);
        assert_eq!(err.detail, Some("expected ':' before the subject"));
        assert!(partial.breaking);
    }

    #[test]
    fn test_empty_scope() {
        let err = parse("feat(): x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScope);
        assert_eq!(err.pos, 5);
    }

    #[test]
    fn test_unclosed_scope() {
        let err = parse("feat(cli: x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScope);
    }

    #[test]
    fn test_empty_message() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidType);
        assert_eq!(err.pos, 0);
    }

    #[test]
    fn test_empty_type() {
        let err = parse(": nothing").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidType);
    }

    #[test]
    fn test_empty_subject() {
        let err = parse("improvement(bah): ").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSubject);
        assert_eq!(err.detail, Some("subject is empty"));
    }

    #[test]
    fn test_type_does_not_cross_lines() {
        let err = parse("add foo\n\nfix: x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidType);
        assert_eq!(err.pos, 7);
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        // 'ï' is two bytes wide
        let err = parse("fïx").unwrap_err();
        assert_eq!(err.pos, 4);
        assert!("fïx".is_char_boundary(err.pos));
    }

    #[test]
    fn test_revert() {
        let parsed = parse("Revert \"feat: new stuff\"").unwrap();
        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.subject, "new stuff");
        assert!(parsed.revert);
        assert!(!parsed.merge);
    }

    #[test]
    fn test_revert_with_body() {
        let parsed =
            parse("Revert \"fix(io): close handles\"\n\nThis reverts commit 1234abcd.\n").unwrap();
        assert!(parsed.revert);
        assert_eq!(parsed.scope.as_deref(), Some("io"));
        assert_eq!(parsed.subject, "close handles");
        assert_eq!(parsed.body.as_deref(), Some("This reverts commit 1234abcd."));
    }

    #[test]
    fn test_revert_without_closing_quote() {
        let err = parse("Revert \"feat: new stuff").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedSpecialCommit);
    }

    #[test]
    fn test_revert_without_quote() {
        let err = parse("Revert feat: new stuff").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidMessage);
    }

    #[test]
    fn test_merge() {
        let parsed = parse("Merge branch 'foo' into 'bar'").unwrap();
        assert_eq!(parsed.commit_type, MERGE_TYPE);
        assert_eq!(parsed.subject, "Merge branch 'foo' into 'bar'");
        assert!(parsed.merge);
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_merge_with_body() {
        let parsed = parse("Merge pull request #12 from a/b\n\nfeat: add thing\n").unwrap();
        assert!(parsed.merge);
        assert_eq!(parsed.subject, "Merge pull request #12 from a/b");
        assert_eq!(parsed.body.as_deref(), Some("feat: add thing"));
    }

    #[test]
    fn test_missing_blank_line() {
        let err = parse("feat: x\nbody").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidMessage);
        assert_eq!(err.pos, 8);
    }

    #[test]
    fn test_multiple_body_paragraphs() {
        let parsed =
            parse("feat: x\n\npara one\n\npara two\n\nSigned-off-by: A <a@example.com>\n").unwrap();
        assert_eq!(parsed.body.as_deref(), Some("para one\n\npara two"));
        assert_eq!(
            parsed.trailer("Signed-off-by"),
            Some(&["A <a@example.com>".to_string()][..])
        );
    }

    #[test]
    fn test_single_paragraph_is_body() {
        let parsed = parse("feat: x\n\nRefs: #1").unwrap();
        assert_eq!(parsed.body.as_deref(), Some("Refs: #1"));
        assert!(parsed.trailers.is_none());
    }

    #[test]
    fn test_blank_body() {
        let parsed = parse("feat: x\n\n\n").unwrap();
        assert!(parsed.body.is_none());
        assert!(parsed.trailers.is_none());
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("feat: x\r\n\r\nbody\r\n").unwrap();
        assert_eq!(parsed.subject, "x");
        assert_eq!(parsed.body.as_deref(), Some("body"));

        let parsed =
            parse("fix(api): y\r\n\r\nfirst\r\n\r\nRefs: #1\r\nReviewed-by: Z\r\n").unwrap();
        assert_eq!(parsed.subject, "y");
        assert_eq!(parsed.body.as_deref(), Some("first"));
        assert_eq!(parsed.trailer("Refs"), Some(&["#1".to_string()][..]));
        assert_eq!(parsed.trailer("Reviewed-by"), Some(&["Z".to_string()][..]));
    }

    #[test]
    fn test_crlf_revert_and_merge() {
        let parsed = parse("Revert \"fix: y\"\r\n\r\nThis reverts abc.\r\n").unwrap();
        assert!(parsed.revert);
        assert_eq!(parsed.subject, "y");

        let parsed = parse("Merge branch 'topic'\r\n").unwrap();
        assert_eq!(parsed.subject, "Merge branch 'topic'");
    }

    #[test]
    fn test_crlf_missing_blank_line() {
        let err = parse("feat: x\r\nbody").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidMessage);
        assert_eq!(err.pos, 9);
    }
}
