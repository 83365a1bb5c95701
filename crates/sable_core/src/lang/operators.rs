//! Operator vocabulary and binding strength.
//!
//! Each [`OperatorId`] carries the [`Precedence`] level it binds at when it appears in infix/postfix position, its
//! associativity and its primary fixity. The parser drives its precedence-climbing loop straight off this table.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `and` / `or` are spelled with words; those entries have [`OperatorInfo::is_keyword_spelling`] set.
//! - `-`, `+` and `!` also act as prefix operators; prefix operands always bind at [`Precedence::Prefix`].
//! - Call `(`, member access `.` and indexing `[` are punctuation, but bind at [`Precedence::Call`] /
//!   [`Precedence::Index`] (see [`crate::lang::punctuation::precedence`]).
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::operators::{self, OperatorId, Precedence};
//!
//! assert_eq!(operators::from_str("|>"), Some(OperatorId::PipeGt));
//! assert_eq!(operators::precedence(OperatorId::Star), Precedence::Product);
//! assert!(Precedence::Product > Precedence::Sum);
//! ```

use super::registry::{Since, Stability};

/// Binding strength levels, lowest first.
///
/// The derived `Ord` is the binding order: a later variant binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest,
    /// `|>`
    Pipe,
    /// `=` and the compound assignments that don't have their own level
    Assign,
    /// `||`, `or`
    Or,
    /// `&&`, `and`
    And,
    /// `==`, `!=`
    Equals,
    /// `<`, `<=`, `>`, `>=`
    LessGreater,
    /// `|`, `|=`
    BitOr,
    /// `^`, `^=`
    BitXor,
    /// `&`, `&=`
    BitAnd,
    /// `<<`, `>>`
    Shift,
    /// `:` inside index brackets
    Slice,
    /// `? :`
    Ternary,
    /// `..`
    Range,
    /// `+`, `-`, `+=`, `-=`
    Sum,
    /// `*`, `/`, `%`, `**`, `*=`, `/=`, `%=`
    Product,
    /// `=~`, `!~`
    RegexMatch,
    /// Operand of a prefix operator.
    Prefix,
    /// `(` call and `.` member access
    Call,
    /// `[` index
    Index,
    /// `++`, `--`
    Postfix,
}

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Primary position an operator appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Postfix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    And,
    Or,
    Bang,

    // Bitwise
    Amp,
    Bar,
    Caret,
    Shl,
    Shr,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    BarEq,
    CaretEq,

    // Regex
    Match,
    NotMatch,

    // Misc
    DotDot,
    PipeGt,
    Question,
    Colon,

    // Postfix
    PlusPlus,
    MinusMinus,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub precedence: Precedence,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, &["+"], Precedence::Sum, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, &["-"], Precedence::Sum, Associativity::Left, Fixity::Infix),
    op(OperatorId::Star, &["*"], Precedence::Product, Associativity::Left, Fixity::Infix),
    op(OperatorId::StarStar, &["**"], Precedence::Product, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, &["/"], Precedence::Product, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, &["%"], Precedence::Product, Associativity::Left, Fixity::Infix),
    // Comparison
    op(OperatorId::EqEq, &["=="], Precedence::Equals, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEq, &["!="], Precedence::Equals, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, &["<"], Precedence::LessGreater, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, &["<="], Precedence::LessGreater, Associativity::Left, Fixity::Infix),
    op(OperatorId::Gt, &[">"], Precedence::LessGreater, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, &[">="], Precedence::LessGreater, Associativity::Left, Fixity::Infix),
    // Logical
    op(OperatorId::AndAnd, &["&&"], Precedence::And, Associativity::Left, Fixity::Infix),
    op(OperatorId::OrOr, &["||"], Precedence::Or, Associativity::Left, Fixity::Infix),
    word_op(OperatorId::And, &["and"], Precedence::And),
    word_op(OperatorId::Or, &["or"], Precedence::Or),
    op(OperatorId::Bang, &["!"], Precedence::Prefix, Associativity::Right, Fixity::Prefix),
    // Bitwise
    op(OperatorId::Amp, &["&"], Precedence::BitAnd, Associativity::Left, Fixity::Infix),
    op(OperatorId::Bar, &["|"], Precedence::BitOr, Associativity::Left, Fixity::Infix),
    op(OperatorId::Caret, &["^"], Precedence::BitXor, Associativity::Left, Fixity::Infix),
    op(OperatorId::Shl, &["<<"], Precedence::Shift, Associativity::Left, Fixity::Infix),
    op(OperatorId::Shr, &[">>"], Precedence::Shift, Associativity::Left, Fixity::Infix),
    // Assignment
    op(OperatorId::Eq, &["="], Precedence::Assign, Associativity::Right, Fixity::Infix),
    op(OperatorId::PlusEq, &["+="], Precedence::Sum, Associativity::Right, Fixity::Infix),
    op(OperatorId::MinusEq, &["-="], Precedence::Sum, Associativity::Right, Fixity::Infix),
    op(OperatorId::StarEq, &["*="], Precedence::Product, Associativity::Right, Fixity::Infix),
    op(OperatorId::SlashEq, &["/="], Precedence::Product, Associativity::Right, Fixity::Infix),
    op(OperatorId::PercentEq, &["%="], Precedence::Product, Associativity::Right, Fixity::Infix),
    op(OperatorId::AmpEq, &["&="], Precedence::BitAnd, Associativity::Right, Fixity::Infix),
    op(OperatorId::BarEq, &["|="], Precedence::BitOr, Associativity::Right, Fixity::Infix),
    op(OperatorId::CaretEq, &["^="], Precedence::BitXor, Associativity::Right, Fixity::Infix),
    // Regex
    op(OperatorId::Match, &["=~"], Precedence::RegexMatch, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotMatch, &["!~"], Precedence::RegexMatch, Associativity::Left, Fixity::Infix),
    // Misc
    op(OperatorId::DotDot, &[".."], Precedence::Range, Associativity::Left, Fixity::Infix),
    op(OperatorId::PipeGt, &["|>"], Precedence::Pipe, Associativity::Left, Fixity::Infix),
    op(OperatorId::Question, &["?"], Precedence::Ternary, Associativity::Right, Fixity::Infix),
    op(OperatorId::Colon, &[":"], Precedence::Slice, Associativity::Left, Fixity::Infix),
    // Postfix
    op(OperatorId::PlusPlus, &["++"], Precedence::Postfix, Associativity::Left, Fixity::Postfix),
    op(OperatorId::MinusMinus, &["--"], Precedence::Postfix, Associativity::Left, Fixity::Postfix),
];

/// Return the canonical spelling for an operator (its first spelling).
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// Return the binding strength of an operator in infix/postfix position.
pub fn precedence(id: OperatorId) -> Precedence {
    info_for(id).precedence
}

/// Return `true` for `=` and every compound assignment operator.
pub fn is_assignment(id: OperatorId) -> bool {
    matches!(
        id,
        OperatorId::Eq
            | OperatorId::PlusEq
            | OperatorId::MinusEq
            | OperatorId::StarEq
            | OperatorId::SlashEq
            | OperatorId::PercentEq
            | OperatorId::AmpEq
            | OperatorId::BarEq
            | OperatorId::CaretEq
    )
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

/// Resolve an identifier-shaped word to a word operator (`and`, `or`).
pub fn word_operator(word: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .filter(|o| o.is_keyword_spelling)
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&word)
        })
        .map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: Precedence,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling: false,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

const fn word_op(id: OperatorId, spellings: &'static [&'static str], precedence: Precedence) -> OperatorInfo {
    OperatorInfo {
        is_keyword_spelling: true,
        ..op(id, spellings, precedence, Associativity::Left, Fixity::Infix)
    }
}
