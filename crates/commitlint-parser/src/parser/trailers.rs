//! Trailer paragraph parsing
//!
//! The final paragraph of a message is a trailer block only if every line in
//! it is a `Key: value` or `Key #value` line, or a whitespace-indented
//! continuation of the line before. Anything else puts the paragraph back into
//! the body.

use tracing::debug;

use super::{Parser, Step, BREAKING_CHANGE_KEY, BREAKING_CHANGE_PREFIX};
use crate::error::{ParseError, ParseErrorKind};
use crate::message::Trailers;

impl<'a> Parser<'a> {
    pub(super) fn trailers(&mut self) -> Step {
        let paragraph = self.scanner.remains();

        match self.trailer_block() {
            Ok(trailers) => {
                if !trailers.is_empty() {
                    self.commit.trailers = Some(trailers);
                }
            }
            Err(err) => {
                debug!(pos = err.pos, error = %err, "final paragraph is not a trailer block");
                self.commit.body = Some(match self.commit.body.take() {
                    Some(body) => format!("{body}\n\n{paragraph}"),
                    None => paragraph.to_string(),
                });
            }
        }

        Ok(None)
    }

    fn trailer_block(&mut self) -> Result<Trailers, ParseError> {
        let mut trailers = Trailers::new();
        while !self.scanner.at_end() {
            let (key, value) = self.trailer()?;
            trailers.insert(key, value);
        }
        Ok(trailers)
    }

    fn trailer(&mut self) -> Result<(&'a str, String), ParseError> {
        let mut boundary = self.scanner.accept_until(&[':', ' ', '\n']);

        if boundary == Some(' ') && self.scanner.text() == BREAKING_CHANGE_PREFIX {
            boundary = self.scanner.accept_until(&[':', '\n']);
            if self.scanner.text() != BREAKING_CHANGE_KEY {
                return Err(self.fail(
                    ParseErrorKind::InvalidTrailer,
                    "trailer key can not contain spaces",
                ));
            }
        }

        if !matches!(boundary, Some(':') | Some(' ')) {
            return Err(self.fail(
                ParseErrorKind::InvalidTrailer,
                "expected ': ' or ' #' after the trailer key",
            ));
        }

        let key = self.scanner.token();
        if key.is_empty() {
            return Err(self.fail(ParseErrorKind::InvalidTrailer, "trailer key is empty"));
        }
        if !key.starts_with(char::is_uppercase) {
            return Err(self.fail(
                ParseErrorKind::InvalidTrailer,
                "trailer key must start with upper case",
            ));
        }
        if key != BREAKING_CHANGE_KEY && key.contains(char::is_whitespace) {
            return Err(self.fail(
                ParseErrorKind::InvalidTrailer,
                "trailer key can not contain spaces",
            ));
        }

        match self.scanner.advance() {
            Some(' ') => {
                // `Key #value`, the hash belongs to the value.
                if self.scanner.peek() != Some('#') {
                    return Err(self.fail(
                        ParseErrorKind::InvalidTrailer,
                        "expected '#' after the trailer key",
                    ));
                }
            }
            _ => {
                if self.scanner.peek() != Some(' ') {
                    return Err(self.fail(
                        ParseErrorKind::InvalidTrailer,
                        "expected a space after ':'",
                    ));
                }
                self.scanner.advance();
            }
        }
        self.scanner.skip();

        loop {
            self.scanner.accept_until(&['\n']);
            if self.scanner.advance().is_none() {
                break;
            }
            match self.scanner.peek() {
                Some(c) if c != '\n' && c.is_whitespace() => continue,
                _ => break,
            }
        }

        let value = self
            .scanner
            .token()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if value.is_empty() {
            return Err(self.fail(ParseErrorKind::InvalidTrailer, "trailer value is empty"));
        }

        Ok((key, value))
    }
}
