//! Token types for the Sable lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators (including the word operators `and` / `or`)
//! - `Punctuation(PunctuationId)` for delimiters and separators
//!
//! Every token also carries its literal text. For string-like tokens that is the processed contents (escapes
//! applied, quotes stripped); for everything else it is the source spelling.

use std::fmt;

use crate::ast::Position;
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    Ident,
    Int,
    Float,
    /// `"..."`, escapes processed
    Str,
    /// `` `...` ``, verbatim
    RawStr,
    /// `'...'` with `{expr}` spans replaced by numbered placeholders
    InterpStr,
    /// `/.../`
    Regex,

    Illegal,
    Eof,
}

impl fmt::Display for TokenKind {
    /// Upper-case token names (`INT`, `LT`, `LET`, `LPAREN`), used in diagnostics and `--lex` output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "{}", keywords::as_str(*id).to_uppercase()),
            TokenKind::Operator(id) => write!(f, "{}", format!("{id:?}").to_uppercase()),
            TokenKind::Punctuation(id) => write!(f, "{}", format!("{id:?}").to_uppercase()),
            TokenKind::Ident => f.write_str("IDENT"),
            TokenKind::Int => f.write_str("INT"),
            TokenKind::Float => f.write_str("FLOAT"),
            TokenKind::Str => f.write_str("STRING"),
            TokenKind::RawStr => f.write_str("RAW_STRING"),
            TokenKind::InterpStr => f.write_str("INTERP_STRING"),
            TokenKind::Regex => f.write_str("REGEX"),
            TokenKind::Illegal => f.write_str("ILLEGAL"),
            TokenKind::Eof => f.write_str("EOF"),
        }
    }
}

/// A token with its kind, literal text and source range.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: Position,
    /// Position just past the token.
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position, end: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            pos,
            end,
        }
    }

    /// A zero-width token synthesised by the parser (e.g. the implicit `0` of `[:3]`).
    pub fn synthetic(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Self::new(kind, literal, pos.clone(), pos)
    }
}

impl fmt::Display for Token {
    /// `KIND("literal") @ line:col`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ {}:{}", self.kind, self.literal, self.pos.line, self.pos.column)
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
