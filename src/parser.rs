// src/parser.rs
use crate::errors::MatchError;

/// Character cursor shared by the label expression grammar.
pub struct Parser<'a> {
    s: &'a str,
    i: usize,
}

/// Characters that end a bare label.
fn is_label_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '(' | ')' | '!' | '&' | '|' | ','))
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Reads a bare label such as `dev`, `@prod` or `:true`.
    pub fn parse_label(&mut self) -> Result<&'a str, MatchError> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if is_label_char(c) {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
        if self.i == start {
            return Err(self.error("label expected"));
        }
        Ok(&self.s[start..self.i])
    }

    /// Consumes `kw` if it appears here (ASCII case-insensitive) and is not
    /// immediately followed by another label character.
    pub fn consume_keyword(&mut self, kw: &str) -> bool {
        let rest = &self.s[self.i..];
        if rest.len() < kw.len() || !rest.is_char_boundary(kw.len()) {
            return false;
        }
        if !rest[..kw.len()].eq_ignore_ascii_case(kw) {
            return false;
        }
        match rest[kw.len()..].chars().next() {
            Some(c) if is_label_char(c) => false,
            _ => {
                self.i += kw.len();
                true
            }
        }
    }

    pub fn expect(&mut self, c: char) -> Result<(), MatchError> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{c}'")))
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn consume_str(&mut self, lit: &str) -> bool {
        if self.peek_str(lit) {
            self.i += lit.len();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    pub fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn error(&self, msg: &str) -> MatchError {
        MatchError::Parse(format!("{msg} at offset {} in `{}`", self.i, self.s))
    }
}
