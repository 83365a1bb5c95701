//! Lexer for the Sable scripting language.
//!
//! Tokens are produced lazily by [`Lexer::next_token`]; [`lex`] collects a whole file for tooling and tests.
//!
//! Handles:
//! - Keywords, word operators (`and`, `or`) and identifiers (`$`/`@` allowed)
//! - Compound operators decided by one character of lookahead (`=` → `==` / `=~` / `=>`, ...)
//! - Regex literal vs. division, decided by the previous token (see [`Lexer::regex_allowed`])
//! - Numbers with radix prefixes, `_` separators and exponents, without swallowing a following `..`
//! - Quoted, raw and interpolated strings, and `qw(...)` word lists
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (`TokenKind`, `Token`)
//! - `strings` - Quoted/raw/interpolated string scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::Position;
use crate::diagnostics::SyntaxError;
use sable_core::lang::keywords::KeywordId;
use sable_core::lang::operators::{self, OperatorId};
use sable_core::lang::punctuation::PunctuationId;

/// Source range of one `{expr}` inside an interpolated string.
///
/// `start..end` are byte offsets of the expression text (braces excluded); `line`/`line_start` let a nested lexer
/// report positions relative to the enclosing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationSpan {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub line_start: usize,
}

/// Lexer for Sable source code.
pub struct Lexer<'a> {
    source: &'a str,
    filename: Arc<str>,
    /// Byte offset of the next unread character.
    pos: usize,
    line: usize,
    /// Byte offset where the current line starts.
    line_start: usize,
    /// Kind of the last token returned, for regex/division disambiguation.
    prev_kind: Option<TokenKind>,
    errors: Vec<SyntaxError>,
    /// Interpolation spans keyed by the byte offset of the string token that contains them.
    interpolations: HashMap<usize, Vec<InterpolationSpan>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for anonymous input.
    pub fn new(source: &'a str) -> Self {
        Self::with_filename(source, "<input>")
    }

    /// Create a lexer whose positions report `filename`. A leading byte-order mark is skipped.
    pub fn with_filename(source: &'a str, filename: impl Into<Arc<str>>) -> Self {
        let bom = if source.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
        Self {
            source,
            filename: filename.into(),
            pos: bom,
            line: 1,
            line_start: bom,
            prev_kind: None,
            errors: Vec::new(),
            interpolations: HashMap::new(),
        }
    }

    /// Create a lexer over one `{expr}` span of an interpolated string in `source`.
    ///
    /// Positions continue to refer to the enclosing file; the lexer reports `EOF` at the closing brace.
    pub fn for_interpolation(source: &'a str, filename: Arc<str>, span: &InterpolationSpan) -> Self {
        Self {
            source: &source[..span.end],
            filename,
            pos: span.start,
            line: span.line,
            line_start: span.line_start,
            prev_kind: None,
            errors: Vec::new(),
            interpolations: HashMap::new(),
        }
    }

    /// The text this lexer reads from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn filename(&self) -> Arc<str> {
        Arc::clone(&self.filename)
    }

    /// Current position (start of the next unread character).
    pub fn position(&self) -> Position {
        Position {
            filename: Arc::clone(&self.filename),
            offset: self.pos,
            line: self.line,
            column: self.pos - self.line_start + 1,
        }
    }

    /// Drain the lexical errors recorded so far.
    pub fn take_errors(&mut self) -> Vec<SyntaxError> {
        std::mem::take(&mut self.errors)
    }

    /// Remove and return the interpolation spans of the interpolated string token starting at `offset`.
    pub fn take_interpolations(&mut self, offset: usize) -> Vec<InterpolationSpan> {
        self.interpolations.remove(&offset).unwrap_or_default()
    }

    /// Kind of the token [`Lexer::next_token`] would return, without consuming it or recording errors.
    pub fn peek_kind(&self) -> TokenKind {
        let mut ahead = Lexer {
            source: self.source,
            filename: Arc::clone(&self.filename),
            pos: self.pos,
            line: self.line,
            line_start: self.line_start,
            prev_kind: self.prev_kind,
            errors: Vec::new(),
            interpolations: HashMap::new(),
        };
        ahead.scan_token().kind
    }

    /// Produce the next token. Keeps returning `EOF` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        self.prev_kind = Some(token.kind);
        token
    }

    /// Tokenize the remaining input, including the final `EOF` token.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn error(&mut self, pos: Position, message: impl Into<String>) {
        let len = self.pos.saturating_sub(pos.offset);
        self.errors.push(SyntaxError::new(pos, message, len));
    }

    /// Build a token whose literal is the source text from `start` to the cursor.
    fn finish(&self, kind: TokenKind, start: Position) -> Token {
        let literal = &self.source[start.offset..self.pos];
        Token::new(kind, literal, start, self.position())
    }

    /// Build a token with an explicit literal (string contents, regex pattern, ...).
    fn finish_with(&self, kind: TokenKind, literal: String, start: Position) -> Token {
        Token::new(kind, literal, start, self.position())
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let start = self.position();

            let Some(c) = self.advance() else {
                return self.finish(TokenKind::Eof, start);
            };

            let kind = match c {
                // Comments
                '#' => {
                    self.skip_line();
                    continue;
                }
                '/' if self.peek() == Some('/') => {
                    self.skip_line();
                    continue;
                }

                '/' if self.regex_allowed() => return self.scan_regex(start),
                '/' => self.operator(OperatorId::Slash, &[('=', OperatorId::SlashEq)]),
                '=' => {
                    if self.match_char('>') {
                        TokenKind::Punctuation(PunctuationId::FatArrow)
                    } else {
                        self.operator(OperatorId::Eq, &[('=', OperatorId::EqEq), ('~', OperatorId::Match)])
                    }
                }
                '+' => self.operator(OperatorId::Plus, &[('+', OperatorId::PlusPlus), ('=', OperatorId::PlusEq)]),
                '-' => self.operator(
                    OperatorId::Minus,
                    &[('-', OperatorId::MinusMinus), ('=', OperatorId::MinusEq)],
                ),
                '*' => self.operator(OperatorId::Star, &[('*', OperatorId::StarStar), ('=', OperatorId::StarEq)]),
                '%' => self.operator(OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
                '<' => self.operator(OperatorId::Lt, &[('=', OperatorId::LtEq), ('<', OperatorId::Shl)]),
                '>' => self.operator(OperatorId::Gt, &[('=', OperatorId::GtEq), ('>', OperatorId::Shr)]),
                '!' => self.operator(OperatorId::Bang, &[('=', OperatorId::NotEq), ('~', OperatorId::NotMatch)]),
                '&' => self.operator(OperatorId::Amp, &[('&', OperatorId::AndAnd), ('=', OperatorId::AmpEq)]),
                '|' => self.operator(
                    OperatorId::Bar,
                    &[('|', OperatorId::OrOr), ('=', OperatorId::BarEq), ('>', OperatorId::PipeGt)],
                ),
                '^' => self.operator(OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
                '?' => TokenKind::Operator(OperatorId::Question),
                ':' => TokenKind::Operator(OperatorId::Colon),
                '.' => {
                    if self.match_char('.') {
                        if self.match_char('.') {
                            TokenKind::Punctuation(PunctuationId::Ellipsis)
                        } else {
                            TokenKind::Operator(OperatorId::DotDot)
                        }
                    } else {
                        TokenKind::Punctuation(PunctuationId::Dot)
                    }
                }
                ',' => TokenKind::Punctuation(PunctuationId::Comma),
                ';' => TokenKind::Punctuation(PunctuationId::Semicolon),
                '(' => TokenKind::Punctuation(PunctuationId::LParen),
                ')' => TokenKind::Punctuation(PunctuationId::RParen),
                '[' => TokenKind::Punctuation(PunctuationId::LBracket),
                ']' => TokenKind::Punctuation(PunctuationId::RBracket),
                '{' => TokenKind::Punctuation(PunctuationId::LBrace),
                '}' => TokenKind::Punctuation(PunctuationId::RBrace),

                // Strings
                '"' => return self.scan_string(start),
                '`' => return self.scan_raw_string(start),
                '\'' => return self.scan_interpolated_string(start),

                // Numbers
                '0'..='9' => return self.scan_number(start),

                // Identifiers and keywords
                _ if is_ident_start(c) => return self.scan_identifier(start),

                _ => TokenKind::Illegal,
            };
            return self.finish(kind, start);
        }
    }

    /// Try to match a compound operator, falling back to the single-character one.
    fn operator(&mut self, simple: OperatorId, compounds: &[(char, OperatorId)]) -> TokenKind {
        for (c, id) in compounds {
            if self.match_char(*c) {
                return TokenKind::Operator(*id);
            }
        }
        TokenKind::Operator(simple)
    }

    /// `/` is division only after something that can end an operand: `}`, `)`, `]`, an identifier or a number.
    fn regex_allowed(&self) -> bool {
        !matches!(
            self.prev_kind,
            Some(
                TokenKind::Punctuation(PunctuationId::RBrace | PunctuationId::RParen | PunctuationId::RBracket)
                    | TokenKind::Ident
                    | TokenKind::Int
                    | TokenKind::Float
            )
        )
    }

    fn scan_regex(&mut self, start: Position) -> Token {
        let mut pattern = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error(start.clone(), "unterminated regular expression");
                    break;
                }
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    pattern.push('/');
                }
                Some(c) => {
                    self.advance();
                    pattern.push(c);
                }
            }
        }
        self.finish_with(TokenKind::Regex, pattern, start)
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: Position) -> Token {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let spelling = &self.source[start.offset..self.pos];
        if let Some(op) = operators::word_operator(spelling) {
            return self.finish(TokenKind::Operator(op), start);
        }
        match keyword_id(spelling) {
            Some(KeywordId::Qw) => self.scan_word_list(start),
            Some(id) => self.finish(TokenKind::Keyword(id), start),
            None => self.finish(TokenKind::Ident, start),
        }
    }

    /// `qw(a b c)`: the literal of the resulting `qw` token is the text between the delimiters.
    fn scan_word_list(&mut self, start: Position) -> Token {
        let close = match self.peek() {
            Some('(') => ')',
            Some('[') => ']',
            Some('{') => '}',
            _ => {
                self.error(start.clone(), "expected '(', '[' or '{' after qw");
                return self.finish(TokenKind::Illegal, start);
            }
        };
        self.advance();
        let body_start = self.pos;
        loop {
            match self.advance() {
                None => {
                    self.error(start.clone(), "unterminated qw word list");
                    let words = self.source[body_start..self.pos].to_string();
                    return self.finish_with(TokenKind::Keyword(KeywordId::Qw), words, start);
                }
                Some(c) if c == close => {
                    let words = self.source[body_start..self.pos - c.len_utf8()].to_string();
                    return self.finish_with(TokenKind::Keyword(KeywordId::Qw), words, start);
                }
                Some(_) => {}
            }
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '$' | '@')
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '@')
}

/// Lex a whole source string into tokens (ending with `EOF`) plus any lexical errors.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    Lexer::new(source).tokenize()
}
