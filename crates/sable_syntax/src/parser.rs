//! Pratt parser for the Sable scripting language.
//!
//! Converts the lexer's token stream into a [`Program`]. Expressions are parsed by precedence climbing over the
//! table in `sable_core::lang::operators`; prefix and infix handlers are chosen by a `match` on the token kind.
//!
//! ## Examples
//!
//! ```rust
//! use sable_syntax::config::ParseConfig;
//! use sable_syntax::parser::parse_with_resolver;
//! use sable_syntax::resolver::MemoryResolver;
//!
//! let resolver = MemoryResolver::new();
//! let (program, errors) = parse_with_resolver("a + b * c", &ParseConfig::new(), &resolver);
//! assert!(errors.is_empty());
//! assert_eq!(program.to_string(), "(a + (b * c))");
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::ast::*;
use crate::config::ParseConfig;
use crate::diagnostics::SyntaxError;
use crate::lexer::{InterpolationSpan, Lexer, Token, TokenKind};
use crate::resolver::{FsResolver, ModuleResolver, ResolveError};
use sable_core::lang::keywords::KeywordId;
use sable_core::lang::operators::{self, OperatorId, Precedence};
use sable_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/literals.rs");
include!("parser/loops.rs");
include!("parser/decl.rs");
include!("parser/include.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
