#![forbid(unsafe_code)]
//! Sable scripting language tooling.
//!
//! The front end itself lives in `sable_syntax` (lexer, parser, AST, include resolution) and `sable_core`
//! (vocabulary registries). This crate hosts the command-line driver on top of them.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;

pub use sable_core::lang;
pub use sable_syntax::{ast, diagnostics, lexer, parser};
