//! Code point cursor used by the parser
//!
//! The cursor tracks the start of the current token and the current position.
//! Both are byte offsets into the input, always on a char boundary.

pub(crate) struct Scanner<'a> {
    input: &'a str,
    end: usize,
    start: usize,
    pos: usize,
    width: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            end: input.len(),
            start: 0,
            pos: 0,
            width: 0,
        }
    }

    /// The whole input, regardless of position or limit
    pub(crate) fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Stop the cursor at `end` instead of the end of the input
    pub(crate) fn limit(&mut self, end: usize) {
        debug_assert!(self.input.is_char_boundary(end));
        self.end = end.clamp(self.pos, self.input.len());
    }

    /// Advance one code point, returning it
    pub(crate) fn advance(&mut self) -> Option<char> {
        match self.input[self.pos..self.end].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Undo the last advance. Only one step can be undone.
    pub(crate) fn back(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    /// Look at the next code point without consuming it
    pub(crate) fn peek(&self) -> Option<char> {
        self.input[self.pos..self.end].chars().next()
    }

    /// Move forward by `bytes`, which must land on a char boundary
    pub(crate) fn advance_bytes(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.end);
        self.width = 0;
    }

    /// Consume `expected` if the input continues with it
    pub(crate) fn accept(&mut self, expected: &str) -> bool {
        if self.input[self.pos..self.end].starts_with(expected) {
            self.advance_bytes(expected.len());
            true
        } else {
            false
        }
    }

    /// Advance until one of `set` is next, leaving the cursor just before it.
    ///
    /// Returns the boundary character, or `None` at the end of input.
    pub(crate) fn accept_until(&mut self, set: &[char]) -> Option<char> {
        while let Some(c) = self.advance() {
            if set.contains(&c) {
                self.back();
                return Some(c);
            }
        }
        None
    }

    /// Text of the current token
    pub(crate) fn text(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    /// Take the current token and start a new one
    pub(crate) fn token(&mut self) -> &'a str {
        let text = self.text();
        self.skip();
        text
    }

    /// Discard the current token
    pub(crate) fn skip(&mut self) {
        self.start = self.pos;
    }

    /// Everything from the token start up to the limit
    pub(crate) fn remains(&self) -> &'a str {
        &self.input[self.start..self.end]
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_steps_over_code_points() {
        let mut scanner = Scanner::new("aé!");
        assert_eq!(scanner.advance(), Some('a'));
        assert_eq!(scanner.pos(), 1);
        assert_eq!(scanner.advance(), Some('é'));
        assert_eq!(scanner.pos(), 3);
        scanner.back();
        assert_eq!(scanner.pos(), 1);
        assert_eq!(scanner.peek(), Some('é'));
    }

    #[test]
    fn test_accept_until_stops_before_boundary() {
        let mut scanner = Scanner::new("feat(cli): x");
        assert_eq!(scanner.accept_until(&[':', '(']), Some('('));
        assert_eq!(scanner.token(), "feat");
        assert_eq!(scanner.peek(), Some('('));
    }

    #[test]
    fn test_accept_until_end_of_input() {
        let mut scanner = Scanner::new("change");
        assert_eq!(scanner.accept_until(&[':']), None);
        assert_eq!(scanner.pos(), 6);
        assert_eq!(scanner.text(), "change");
        assert!(scanner.at_end());
    }

    #[test]
    fn test_back_at_end_is_noop() {
        let mut scanner = Scanner::new("a");
        scanner.advance();
        assert_eq!(scanner.advance(), None);
        scanner.back();
        assert_eq!(scanner.pos(), 1);
    }

    #[test]
    fn test_accept() {
        let mut scanner = Scanner::new("\r\nx");
        assert!(!scanner.accept("\n"));
        assert!(scanner.accept("\r\n"));
        assert_eq!(scanner.pos(), 2);
        assert_eq!(scanner.peek(), Some('x'));
    }

    #[test]
    fn test_limit() {
        let mut scanner = Scanner::new("abc\n\n");
        scanner.limit(3);
        assert_eq!(scanner.accept_until(&['\n']), None);
        assert_eq!(scanner.remains(), "abc");
    }
}
