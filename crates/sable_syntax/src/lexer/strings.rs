//! String scanning: `"quoted"`, `` `raw` `` and `'interpolated'` strings.

use super::{InterpolationSpan, Lexer, Token, TokenKind};
use crate::ast::Position;

/// Map the character after a backslash to the character it stands for.
fn unescape(c: char) -> char {
    match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'r' => '\r',
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

impl Lexer<'_> {
    /// Scan a `"..."` string; the opening quote has been consumed.
    pub(super) fn scan_string(&mut self, start: Position) -> Token {
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error(start.clone(), "unterminated string literal: reached end of input");
                    break;
                }
                Some('\n') => {
                    self.error(start.clone(), "unterminated string literal: newline before closing quote");
                    break;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some(c) => value.push(unescape(c)),
                        None => {
                            self.error(start.clone(), "unterminated string literal: reached end of input");
                            break;
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }
        self.finish_with(TokenKind::Str, value, start)
    }

    /// Scan a `` `...` `` string verbatim; the opening backtick has been consumed.
    pub(super) fn scan_raw_string(&mut self, start: Position) -> Token {
        let body_start = self.pos;
        loop {
            match self.advance() {
                None => {
                    self.error(start.clone(), "unterminated raw string: reached end of input");
                    let value = self.source[body_start..self.pos].to_string();
                    return self.finish_with(TokenKind::RawStr, value, start);
                }
                Some('`') => {
                    let value = self.source[body_start..self.pos - 1].to_string();
                    return self.finish_with(TokenKind::RawStr, value, start);
                }
                Some(_) => {}
            }
        }
    }

    /// Scan a `'...'` string; the opening quote has been consumed.
    ///
    /// Each `{expr}` becomes a `{N}` placeholder in the literal and its source range is remembered under the
    /// token's offset (see [`Lexer::take_interpolations`]). An empty `{}` is kept literally.
    pub(super) fn scan_interpolated_string(&mut self, start: Position) -> Token {
        let mut value = String::new();
        let mut spans = Vec::new();
        loop {
            match self.peek() {
                None => {
                    self.error(start.clone(), "unterminated interpolated string: reached end of input");
                    break;
                }
                Some('\'') => {
                    self.advance();
                    break;
                }
                // Escapes are kept as written; the backslash only stops `\'` from closing the string.
                Some('\\') => {
                    self.advance();
                    value.push('\\');
                    match self.advance() {
                        Some(c) => value.push(c),
                        None => {
                            self.error(start.clone(), "unterminated interpolated string: reached end of input");
                            break;
                        }
                    }
                }
                Some('{') if self.peek_next() == Some('}') => {
                    self.advance();
                    self.advance();
                    value.push_str("{}");
                }
                Some('{') => {
                    self.advance();
                    let (span_start, line, line_start) = (self.pos, self.line, self.line_start);
                    if !self.skip_to_closing_brace() {
                        self.error(start.clone(), "unterminated interpolation: missing '}'");
                        break;
                    }
                    spans.push(InterpolationSpan {
                        start: span_start,
                        end: self.pos,
                        line,
                        line_start,
                    });
                    self.advance();
                    value.push_str(&format!("{{{}}}", spans.len() - 1));
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }
        if !spans.is_empty() {
            self.interpolations.insert(start.offset, spans);
        }
        self.finish_with(TokenKind::InterpStr, value, start)
    }

    /// Move to the `}` matching an already consumed `{`, leaving it unread. Returns `false` at end of input.
    fn skip_to_closing_brace(&mut self) -> bool {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return false,
                Some('}') if depth == 0 => return true,
                Some('}') => {
                    depth -= 1;
                    self.advance();
                }
                Some('{') => {
                    depth += 1;
                    self.advance();
                }
                Some(quote @ ('"' | '`')) => {
                    self.advance();
                    self.skip_quoted(quote);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn skip_quoted(&mut self, quote: char) {
        while let Some(c) = self.advance() {
            if c == '\\' {
                self.advance();
            } else if c == quote {
                break;
            }
        }
    }
}
