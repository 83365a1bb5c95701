//! Syntax front end for the Sable scripting language: lexer, AST, Pratt parser, diagnostics.
//!
//! The crate turns source text into a position-annotated [`ast::Program`] plus a list of
//! [`diagnostics::SyntaxError`]s. Parsing never aborts: every problem is recorded and the parser keeps going, so one
//! pass reports as many errors as possible. Deciding whether an error is fatal is up to the caller.
//!
//! ## Notes
//! - This crate is "syntax-only": no evaluation, no name resolution, no type checking.
//! - Vocabulary identity (keywords/operators/punctuation, operator precedence) comes from `sable_core::lang`.
//! - `include` statements are resolved through the [`resolver::ModuleResolver`] trait so tests and tooling can swap
//!   the filesystem for an in-memory map.
//!
//! ## Examples
//! ```rust
//! use sable_syntax::config::ParseConfig;
//! use sable_syntax::parser;
//! use sable_syntax::resolver::MemoryResolver;
//!
//! let resolver = MemoryResolver::new();
//! let (program, errors) = parser::parse_with_resolver("let x = 1 + 2 * 3;", &ParseConfig::new(), &resolver);
//! assert!(errors.is_empty());
//! assert_eq!(program.to_string(), "let x = (1 + (2 * 3))");
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod docs;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod token_helpers;

pub use config::ParseConfig;
pub use diagnostics::SyntaxError;
pub use parser::{Parser, parse_source, parse_with_resolver};
