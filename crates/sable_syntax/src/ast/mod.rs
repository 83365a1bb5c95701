//! Abstract syntax tree for Sable programs.
//!
//! Statements and expressions are closed sum types ([`Statement`], [`Expression`]) with one variant per node kind.
//! Every node implements [`Node`]: a start position, an end position, the literal of the token that introduced it,
//! and (through `Display`) a canonical, re-parseable text form used by tests and debugging output.
//!
//! ## Notes
//! - Nodes are built once by the parser and never mutated afterwards.
//! - [`BlockStatement`] is shared by statement and expression nodes alike (function bodies, loop bodies, arms).
//! - `include` statements do not appear in [`Program::statements`]; they live in [`Program::includes`], keyed by the
//!   literal include text.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Positions
// ============================================================================

/// A location in a source file.
///
/// `line` and `column` are 1-based; `column` counts bytes since the last newline. `offset` is the byte offset from the
/// start of the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub filename: Arc<str>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(filename: impl Into<Arc<str>>, offset: usize, line: usize, column: usize) -> Self {
        Self {
            filename: filename.into(),
            offset,
            line,
            column,
        }
    }

    /// The first position of a file.
    pub fn start_of(filename: impl Into<Arc<str>>) -> Self {
        Self::new(filename, 0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

// ============================================================================
// Node capability set
// ============================================================================

/// Capabilities shared by every AST node.
pub trait Node: fmt::Display {
    /// Position of the first token of the node.
    fn pos(&self) -> Position;
    /// Position just past the node. Never before [`Node::pos`].
    fn end(&self) -> Position;
    /// Literal text of the token that introduced the node.
    fn token_literal(&self) -> &str;
}

/// Implement [`Node`] and `Display` for a sum type by delegating to each variant's payload.
macro_rules! delegate_node {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl Node for $ty {
            fn pos(&self) -> Position {
                match self {
                    $($ty::$variant(node) => node.pos(),)*
                }
            }

            fn end(&self) -> Position {
                match self {
                    $($ty::$variant(node) => node.end(),)*
                }
            }

            fn token_literal(&self) -> &str {
                match self {
                    $($ty::$variant(node) => node.token_literal(),)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($ty::$variant(node) => node.fmt(f),)*
                }
            }
        }
    };
}

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

/// Write `items` separated by `sep`.
pub(crate) fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ============================================================================
// Modifiers
// ============================================================================

/// Visibility of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModifierLevel {
    #[default]
    Default,
    Private,
    Protected,
    Public,
}

impl fmt::Display for ModifierLevel {
    /// Non-default levels render with a trailing space so they can prefix a declaration directly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierLevel::Default => Ok(()),
            ModifierLevel::Private => f.write_str("private "),
            ModifierLevel::Protected => f.write_str("protected "),
            ModifierLevel::Public => f.write_str("public "),
        }
    }
}

// ============================================================================
// Program
// ============================================================================

/// Root of a parsed file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
    /// Resolved includes keyed by their literal include text; the first occurrence wins.
    pub includes: BTreeMap<String, IncludeStatement>,
}

impl Program {
    /// Look up a resolved include by its literal include text.
    pub fn include(&self, path: &str) -> Option<&IncludeStatement> {
        self.includes.get(path)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for include in self.includes.values() {
            if !first {
                f.write_str("\n")?;
            }
            write!(f, "{include}")?;
            first = false;
        }
        for stmt in &self.statements {
            if !first {
                f.write_str("\n")?;
            }
            write!(f, "{stmt}")?;
            first = false;
        }
        Ok(())
    }
}
