//! Character-level reader over program text.
//!
//! Records are free-form: labels, punctuation and tokens may be separated by
//! any whitespace, including newlines. Tokens are maximal runs of
//! non-whitespace characters, so `X1<-5` is one (invalid) token.

use crate::errors::SourceLocation;

/// Result of reading an integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerRead {
    /// A signed decimal integer.
    Value(i64),
    /// Text that does not start with an integer, up to the next whitespace.
    Malformed(String),
    /// Nothing but whitespace remained.
    End,
}

/// Cursor over program text tracking line and column.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    offset: usize,
    location: SourceLocation,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `text`.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            location: SourceLocation::START,
        }
    }

    /// Position of the next unread character.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }

    /// Skips whitespace and returns the position of the next character.
    pub fn mark(&mut self) -> SourceLocation {
        self.skip_whitespace();
        self.location
    }

    /// Returns true when only whitespace remains.
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_whitespace();
        self.peek().is_none()
    }

    /// Reads the next whitespace-delimited token.
    pub fn read_token(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let text = self.text;
        let start = self.offset;
        while self.peek().is_some_and(|c| !c.is_whitespace()) {
            self.bump();
        }
        let end = self.offset;
        (end > start).then(|| &text[start..end])
    }

    /// Reads an optionally signed decimal integer.
    ///
    /// Reading stops at the first non-digit, so `3:` yields `3` and leaves
    /// the colon unread.
    pub fn read_integer(&mut self) -> IntegerRead {
        self.skip_whitespace();
        if self.peek().is_none() {
            return IntegerRead::End;
        }

        let start = self.offset;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        let digits_start = self.offset;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }

        if self.offset == digits_start {
            while self.peek().is_some_and(|c| !c.is_whitespace()) {
                self.bump();
            }
            return IntegerRead::Malformed(self.text[start..self.offset].to_string());
        }

        let literal = &self.text[start..self.offset];
        literal
            .parse::<i64>()
            .map_or_else(|_| IntegerRead::Malformed(literal.to_string()), IntegerRead::Value)
    }

    /// Consumes whitespace and then `expected`.
    ///
    /// # Errors
    ///
    /// Returns the first non-whitespace character if it is not `expected`,
    /// or `None` if the text ran out.
    pub fn expect_char(&mut self, expected: char) -> Result<(), Option<char>> {
        self.skip_whitespace();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            other => Err(other),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(c)
    }
}
