//! Syntax diagnostics.
//!
//! Every lexical and syntactic problem becomes a [`SyntaxError`]. Its `Display` form is the plain
//! `Syntax Error: <file>:<line>:<col> - <message>` line; the [`miette::Diagnostic`] impl adds a labelled span so the
//! CLI can render the offending source.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Position;
use crate::lexer::Token;

/// A recorded lexical or syntactic error.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("Syntax Error: {pos} - {message}")]
#[diagnostic(code(sable::syntax))]
pub struct SyntaxError {
    pub pos: Position,
    pub message: String,
    #[label("here")]
    pub span: SourceSpan,
}

impl SyntaxError {
    /// Create an error at `pos` covering `len` bytes (at least one).
    pub fn new(pos: Position, message: impl Into<String>, len: usize) -> Self {
        let span = SourceSpan::from((pos.offset, len.max(1)));
        Self {
            pos,
            message: message.into(),
            span,
        }
    }

    /// Create an error covering a whole token.
    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        let len = token.end.offset.saturating_sub(token.pos.offset);
        Self::new(token.pos.clone(), message, len)
    }

    /// Number of source bytes the error points at.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// `true` if the span is zero-width (never the case for errors built with [`SyntaxError::new`]).
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_plain_format() {
        let pos = Position::new("main.sbl", 10, 2, 5);
        let err = SyntaxError::new(pos, "expected next token to be RPAREN, got EOF instead", 0);
        assert_eq!(
            err.to_string(),
            "Syntax Error: main.sbl:2:5 - expected next token to be RPAREN, got EOF instead"
        );
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn diagnostic_code_is_stable() {
        let err = SyntaxError::new(Position::new("a.sbl", 0, 1, 1), "boom", 3);
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("sable::syntax"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 0);
        assert_eq!(labels[0].len(), 3);
    }
}
