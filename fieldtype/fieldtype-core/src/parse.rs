//! Cursor over the textual form of values.
//!
//! Field types parse their own text forms by pulling from a shared
//! [`ParseContext`], so composite types (arrays, null-safe wrappers) can hand
//! the same cursor down to their element or inner type. Token-level matching
//! is done with `nom` combinators applied to the remaining input.

use nom::{
    IResult,
    bytes::complete::take_while1,
    character::complete::multispace0,
    error::Error as NomError,
};

use crate::error::ParseError;

/// Characters that may appear in a bare token (numbers, booleans, identifiers).
pub fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')
}

/// Single-pass cursor over a text input. Never backtracks past `position`.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the cursor into [`input`](Self::input).
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn read_char(&mut self) -> Result<char, ParseError> {
        let c = self
            .peek()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += c.len_utf8();
        Ok(c)
    }

    pub fn skip_whitespace(&mut self) {
        if let Ok((rest, _)) = multispace0::<_, NomError<&str>>(self.remaining()) {
            self.advance_to(rest);
        }
    }

    /// Consume `expected` or fail without moving.
    pub fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}' but found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}' but found end of input"))),
        }
    }

    /// Consume `literal` if the input continues with it.
    pub fn try_literal(&mut self, literal: &str) -> bool {
        if self.remaining().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Like [`try_literal`](Self::try_literal), but only matches a whole token,
    /// so `null` does not match the start of `nullable`.
    pub fn try_keyword(&mut self, word: &str) -> bool {
        let rest = self.remaining();
        if !rest.starts_with(word) {
            return false;
        }
        if rest[word.len()..].chars().next().is_some_and(is_token_char) {
            return false;
        }
        self.pos += word.len();
        true
    }

    /// Consume a non-empty run of [token characters](is_token_char).
    pub fn token(&mut self, what: &str) -> Result<&'a str, ParseError> {
        self.apply(what, take_while1(is_token_char))
    }

    /// Run a `nom` parser on the remaining input and advance past what it consumed.
    pub fn apply<O>(
        &mut self,
        what: &str,
        mut parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    ) -> Result<O, ParseError> {
        match parser(self.remaining()) {
            Ok((rest, out)) => {
                self.advance_to(rest);
                Ok(out)
            }
            Err(_) => Err(self.error(format!("expected {what}"))),
        }
    }

    pub fn expect_eof(&self) -> Result<(), ParseError> {
        if self.is_eof() {
            Ok(())
        } else {
            Err(self.error(format!("trailing input '{}'", self.remaining())))
        }
    }

    pub fn error(&self, detail: impl Into<String>) -> ParseError {
        ParseError::new(self.pos, detail)
    }

    fn advance_to(&mut self, rest: &'a str) {
        self.pos = self.input.len() - rest.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_requires_token_boundary() {
        let mut ctx = ParseContext::new("nullable");
        assert!(!ctx.try_keyword("null"));
        assert_eq!(ctx.position(), 0);

        let mut ctx = ParseContext::new("null, 1");
        assert!(ctx.try_keyword("null"));
        assert_eq!(ctx.remaining(), ", 1");
    }

    #[test]
    fn token_stops_at_separator() {
        let mut ctx = ParseContext::new("-12, 3");
        assert_eq!(ctx.token("integer").unwrap(), "-12");
        assert_eq!(ctx.position(), 3);
        ctx.expect(',').unwrap();
        ctx.skip_whitespace();
        assert_eq!(ctx.token("integer").unwrap(), "3");
        assert!(ctx.expect_eof().is_ok());
    }

    #[test]
    fn expect_reports_position() {
        let mut ctx = ParseContext::new("  x");
        ctx.skip_whitespace();
        let err = ctx.expect('[').unwrap_err();
        assert_eq!(err.position, 2);
        assert!(err.detail.contains("found 'x'"));
    }
}
