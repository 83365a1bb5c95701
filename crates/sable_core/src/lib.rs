//! Canonical language vocabulary for the Sable scripting language.
//!
//! This crate is intentionally small and dependency-free. It holds the registries the lexer, parser and tooling
//! share so that keyword/operator/punctuation identity is never re-derived from spellings at call sites.
//!
//! ## Notes
//!
//! - No IO, no global state, no AST types.
//! - Operator precedence lives here (see [`lang::operators::Precedence`]) so that the parser and any
//!   pretty-printers agree on binding strength.

pub mod lang;
