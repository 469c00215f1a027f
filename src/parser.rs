// src/parser.rs
use crate::errors::{EvalError, Result};

/// Characters that end an identifier.
pub const STRUCTURAL: [char; 3] = [',', '[', '('];

/// Rejects strings whose `[`/`]` or `(`/`)` counts differ.
pub fn check_balance(s: &str) -> Result<()> {
    for (open, close) in [('[', ']'), ('(', ')')] {
        let expected = s.matches(open).count();
        let found = s.matches(close).count();
        if expected != found {
            return Err(EvalError::StructuralImbalance {
                open,
                close,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// Splits on commas that are not nested inside parentheses.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&s[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    out.push(&s[last..]);
    out
}

pub struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Consumes text up to the next structural character and returns it
    /// together with that character, which is left unconsumed.
    pub fn take_identifier(&mut self) -> (&'a str, Option<char>) {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if STRUCTURAL.contains(&c) {
                return (&self.s[start..self.i], Some(c));
            }
            self.i += c.len_utf8();
        }
        (&self.s[start..], None)
    }

    /// Consumes a balanced `open ... close` group and returns its inner text.
    /// Only `open`/`close` themselves count towards nesting.
    pub fn capture_group(&mut self, open: char, close: char) -> Result<&'a str> {
        if !self.consume_char(open) {
            return Err(EvalError::UnmatchedGroup { open });
        }
        let start = self.i;
        let mut depth = 1usize;
        while let Some(c) = self.peek_char() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let inner = &self.s[start..self.i];
                    self.i += c.len_utf8();
                    return Ok(inner);
                }
            }
            self.i += c.len_utf8();
        }
        Err(EvalError::UnmatchedGroup { open })
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
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

    pub fn skip_to_end(&mut self) {
        self.i = self.s.len();
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
