//! Reserved words of the Sable language.
//!
//! [`KeywordId`] is the stable identity of a reserved word; [`KEYWORDS`] records its canonical spelling, accepted
//! aliases and a coarse category for tooling.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `and` / `or` are *not* keywords: they are word operators and live in [`crate::lang::operators`].
//! - `qw` is reserved because the lexer consumes the whole `qw(...)` word list as one token.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elsif"), Some(KeywordId::Elsif));
//! assert_eq!(keywords::from_str("elseif"), Some(KeywordId::Elsif)); // alias
//! assert_eq!(keywords::from_str("Elsif"), None);
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow
    If,
    Elsif,
    Else,
    Unless,
    Case,
    Is,
    For,
    In,
    Where,
    While,
    Do,
    Break,
    Continue,
    Return,
    Yield,
    Try,
    Catch,
    Finally,
    Throw,
    Defer,
    Spawn,

    // Declarations
    Let,
    Fn,
    Class,
    New,
    Property,
    Get,
    Set,
    Enum,
    Struct,
    Include,

    // Member modifiers
    Public,
    Private,
    Protected,
    Static,

    // List operators
    Grep,
    Map,
    Qw,

    // Literals
    True,
    False,
    Nil,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Modifier,
    ListOp,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    /// `true` when the keyword may start a statement on its own (used by parser error recovery).
    pub starts_statement: bool,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow
    info(KeywordId::If, "if", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Elsif, "elsif", &["elseif"], KeywordCategory::ControlFlow, false),
    info(KeywordId::Else, "else", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Unless, "unless", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Case, "case", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Is, "is", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::For, "for", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::In, "in", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Where, "where", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::While, "while", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Do, "do", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Break, "break", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Continue, "continue", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Return, "return", &[], KeywordCategory::ControlFlow, true),
    info(KeywordId::Yield, "yield", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Try, "try", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Catch, "catch", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Finally, "finally", &[], KeywordCategory::ControlFlow, false),
    info(KeywordId::Throw, "throw", &[], KeywordCategory::ControlFlow, true),
    info(KeywordId::Defer, "defer", &[], KeywordCategory::ControlFlow, true),
    info(KeywordId::Spawn, "spawn", &[], KeywordCategory::ControlFlow, true),
    // Declarations
    info(KeywordId::Let, "let", &[], KeywordCategory::Declaration, true),
    info(KeywordId::Fn, "fn", &[], KeywordCategory::Declaration, true),
    info(KeywordId::Class, "class", &[], KeywordCategory::Declaration, true),
    info(KeywordId::New, "new", &[], KeywordCategory::Declaration, false),
    info(KeywordId::Property, "property", &[], KeywordCategory::Declaration, false),
    info(KeywordId::Get, "get", &[], KeywordCategory::Declaration, false),
    info(KeywordId::Set, "set", &[], KeywordCategory::Declaration, false),
    info(KeywordId::Enum, "enum", &[], KeywordCategory::Declaration, true),
    info(KeywordId::Struct, "struct", &[], KeywordCategory::Declaration, false),
    info(KeywordId::Include, "include", &[], KeywordCategory::Declaration, true),
    // Member modifiers
    info(KeywordId::Public, "public", &[], KeywordCategory::Modifier, false),
    info(KeywordId::Private, "private", &[], KeywordCategory::Modifier, false),
    info(KeywordId::Protected, "protected", &[], KeywordCategory::Modifier, false),
    info(KeywordId::Static, "static", &[], KeywordCategory::Modifier, false),
    // List operators
    info(KeywordId::Grep, "grep", &[], KeywordCategory::ListOp, false),
    info(KeywordId::Map, "map", &[], KeywordCategory::ListOp, false),
    info(KeywordId::Qw, "qw", &[], KeywordCategory::ListOp, false),
    // Literals
    info(KeywordId::True, "true", &[], KeywordCategory::Literal, false),
    info(KeywordId::False, "false", &[], KeywordCategory::Literal, false),
    info(KeywordId::Nil, "nil", &[], KeywordCategory::Literal, false),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return accepted alias spellings for a keyword (possibly empty).
pub fn aliases(id: KeywordId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Return the documentation category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling (canonical or alias).
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS
        .iter()
        .find(|k| {
            let aliases: &[&str] = k.aliases;
            aliases.contains(&s)
        })
        .map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
    starts_statement: bool,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
        starts_statement,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}
