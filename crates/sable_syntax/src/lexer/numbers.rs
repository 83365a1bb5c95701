//! Numeric literal scanning.
//!
//! Integers may carry a `0x` / `0b` / `0c` (octal) prefix; any literal may use `_` as a digit separator. The token
//! literal keeps the spelling as written; the parser does the conversion.

use super::{Lexer, Token, TokenKind, is_ident_continue};
use crate::ast::Position;

impl Lexer<'_> {
    /// Scan a number whose first digit has already been consumed.
    pub(super) fn scan_number(&mut self, start: Position) -> Token {
        if self.source[start.offset..].starts_with('0') {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('b' | 'B') => Some(2),
                Some('c' | 'C') => Some(8),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                let digits_start = self.pos;
                self.eat_digits(radix);
                if self.pos == digits_start {
                    return self.invalid_number(start);
                }
                return self.end_number(TokenKind::Int, start);
            }
        }

        self.eat_digits(10);
        let mut kind = TokenKind::Int;

        // A `.` only continues the number when a fraction or exponent follows; `1..5` and `1.abs()` stop here.
        if self.peek() == Some('.') && self.fraction_follows() {
            self.advance();
            self.eat_digits(10);
            kind = TokenKind::Float;
        }
        if matches!(self.peek(), Some('e' | 'E')) && self.exponent_digits_at(1) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.eat_digits(10);
            kind = TokenKind::Float;
        }

        self.end_number(kind, start)
    }

    fn eat_digits(&mut self, radix: u32) {
        while self.peek().is_some_and(|c| c == '_' || c.is_digit(radix)) {
            self.advance();
        }
    }

    /// With the cursor on `.`: is it a decimal point?
    fn fraction_follows(&self) -> bool {
        match self.peek_nth(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('e' | 'E') => self.exponent_digits_at(2),
            _ => false,
        }
    }

    /// Do exponent digits (optionally signed) start `offset` characters ahead?
    fn exponent_digits_at(&self, offset: usize) -> bool {
        match self.peek_nth(offset) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self.peek_nth(offset + 1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn end_number(&mut self, kind: TokenKind, start: Position) -> Token {
        if self.peek().is_some_and(is_ident_continue) {
            return self.invalid_number(start);
        }
        self.finish(kind, start)
    }

    /// Consume the rest of an alphanumeric run (`5x`, `0b12`) and report it as one illegal token.
    fn invalid_number(&mut self, start: Position) -> Token {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let text = self.source[start.offset..self.pos].to_string();
        self.error(start.clone(), format!("invalid numeric literal '{text}'"));
        self.finish(TokenKind::Illegal, start)
    }
}
