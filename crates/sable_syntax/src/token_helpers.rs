//! Token predicates used by the parser.
//!
//! Tokens carry registry IDs, so these helpers replace repetitive `matches!(...)` at call sites and look up binding
//! strength and statement-start metadata in `sable_core`.

use crate::lexer::{Token, TokenKind};
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::{self, OperatorId, Precedence};
use sable_core::lang::punctuation::{self, PunctuationId};

impl TokenKind {
    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Binding strength of this token in infix/postfix position ([`Precedence::Lowest`] if it cannot continue an
    /// expression).
    pub fn precedence(&self) -> Precedence {
        match self {
            TokenKind::Operator(id) => operators::precedence(*id),
            TokenKind::Punctuation(id) => punctuation::precedence(*id),
            _ => Precedence::Lowest,
        }
    }

    /// Keywords that begin a declaration or statement (`let`, `fn`, `class`, ...); recovery stops in front of them.
    pub fn starts_statement(&self) -> bool {
        match self {
            TokenKind::Keyword(id) => keywords::info_for(*id).starts_statement,
            _ => false,
        }
    }
}

impl Token {
    /// Shorthand for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }
}
