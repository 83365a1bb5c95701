//! Expression nodes.

use std::fmt;

use sable_core::lang::operators::{self, OperatorId};

use super::{BlockStatement, FunctionStatement, LetStatement, ModifierLevel, Node, Position, Statement};
use super::write_joined;
use crate::lexer::Token;

/// Any expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Literals
    Identifier(Identifier),
    Integer(IntegerLiteral),
    UnsignedInteger(UnsignedIntegerLiteral),
    Float(FloatLiteral),
    Boolean(BooleanLiteral),
    Nil(NilLiteral),
    String(StringLiteral),
    InterpolatedString(InterpolatedString),
    Regex(RegexLiteral),
    Array(ArrayLiteral),
    Hash(HashLiteral),
    Struct(StructLiteral),
    Tuple(TupleLiteral),
    Enum(EnumLiteral),

    // Control flow
    If(IfExpression),
    Unless(UnlessExpression),
    Ternary(TernaryExpression),
    Case(CaseExpression),
    For(ForExpression),
    While(WhileExpression),
    Do(DoExpression),

    // Functions and classes
    Function(FunctionLiteral),
    Class(ClassLiteral),
    New(NewExpression),

    // Operators
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Postfix(PostfixExpression),
    Pipe(PipeExpression),
    Assign(AssignExpression),
    Index(IndexExpression),
    Slice(SliceExpression),
    MethodCall(MethodCallExpression),
    Call(CallExpression),

    // Comprehensions and list operators
    ListComprehension(ListComprehension),
    HashComprehension(HashComprehension),
    ListOp(ListOpExpression),

    // Flow
    Break(BreakExpression),
    Continue(ContinueExpression),
    Yield(YieldExpression),
    Try(TryExpression),
}

delegate_node!(Expression {
    Identifier,
    Integer,
    UnsignedInteger,
    Float,
    Boolean,
    Nil,
    String,
    InterpolatedString,
    Regex,
    Array,
    Hash,
    Struct,
    Tuple,
    Enum,
    If,
    Unless,
    Ternary,
    Case,
    For,
    While,
    Do,
    Function,
    Class,
    New,
    Prefix,
    Infix,
    Postfix,
    Pipe,
    Assign,
    Index,
    Slice,
    MethodCall,
    Call,
    ListComprehension,
    HashComprehension,
    ListOp,
    Break,
    Continue,
    Yield,
    Try,
});

impl Expression {
    /// Return the identifier name if this is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(ident) => Some(&ident.value),
            _ => None,
        }
    }
}

/// Implement [`Node`] for a node whose extent is exactly its token.
macro_rules! token_node {
    ($($name:ident),* $(,)?) => {
        $(
            impl Node for $name {
                fn pos(&self) -> Position {
                    self.token.pos.clone()
                }

                fn end(&self) -> Position {
                    self.token.end.clone()
                }

                fn token_literal(&self) -> &str {
                    &self.token.literal
                }
            }
        )*
    };
}

/// Implement [`Node`] for a node that records its own end (usually a closing delimiter).
macro_rules! delimited_node {
    ($($name:ident),* $(,)?) => {
        $(
            impl Node for $name {
                fn pos(&self) -> Position {
                    self.token.pos.clone()
                }

                fn end(&self) -> Position {
                    self.end.clone()
                }

                fn token_literal(&self) -> &str {
                    &self.token.literal
                }
            }
        )*
    };
}

token_node!(
    Identifier,
    IntegerLiteral,
    UnsignedIntegerLiteral,
    FloatLiteral,
    BooleanLiteral,
    NilLiteral,
    StringLiteral,
    InterpolatedString,
    RegexLiteral,
    BreakExpression,
    ContinueExpression,
);

delimited_node!(
    ArrayLiteral,
    HashLiteral,
    StructLiteral,
    TupleLiteral,
    EnumLiteral,
    CaseExpression,
    ClassLiteral,
    NewExpression,
    IndexExpression,
    CallExpression,
    ListComprehension,
    HashComprehension,
);

// ============================================================================
// Literals
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn from_token(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An integer literal too large for `i64`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedIntegerLiteral {
    pub token: Token,
    pub value: u64,
}

impl fmt::Display for UnsignedIntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NilLiteral {
    pub token: Token,
}

impl fmt::Display for NilLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("nil")
    }
}

/// A `"quoted"` (escapes processed) or `` `raw` `` string.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
    pub raw: bool,
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw {
            return write!(f, "`{}`", self.value);
        }
        f.write_str("\"")?;
        for c in self.value.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                '\r' => f.write_str("\\r")?,
                '\u{8}' => f.write_str("\\b")?,
                '\u{c}' => f.write_str("\\f")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

/// `'text {expr} text'`
///
/// `value` holds the literal text with each `{expr}` replaced by a numbered placeholder (`{0}`, `{1}`, ...);
/// `exprs` binds each placeholder index to its parsed expression, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedString {
    pub token: Token,
    pub value: String,
    pub exprs: Vec<(usize, Expression)>,
}

impl InterpolatedString {
    /// The expression bound to placeholder `index`.
    pub fn expr(&self, index: usize) -> Option<&Expression> {
        self.exprs.iter().find(|(i, _)| *i == index).map(|(_, e)| e)
    }
}

impl fmt::Display for InterpolatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = self.value.clone();
        for (index, expr) in &self.exprs {
            text = text.replacen(&format!("{{{index}}}"), &format!("{{{expr}}}"), 1);
        }
        write!(f, "'{text}'")
    }
}

/// `/pattern/`
#[derive(Debug, Clone, PartialEq)]
pub struct RegexLiteral {
    pub token: Token,
    pub pattern: String,
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.pattern.replace('/', "\\/"))
    }
}

/// `[a, b, c]`, also produced by `qw(...)` word lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
    pub end: Position,
}

impl fmt::Display for ArrayLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_joined(f, &self.elements, ", ")?;
        f.write_str("]")
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(Expression, Expression)]) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key} => {value}")?;
    }
    f.write_str("}")
}

/// `{key => value, ...}`; pairs are kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
    pub end: Position,
}

impl fmt::Display for HashLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, &self.pairs)
    }
}

/// `struct {name => value, ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct StructLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
    pub end: Position,
}

impl fmt::Display for StructLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("struct ")?;
        write_pairs(f, &self.pairs)
    }
}

/// `()`, `(a,)`, `(a, b)`
#[derive(Debug, Clone, PartialEq)]
pub struct TupleLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
    pub end: Position,
}

impl fmt::Display for TupleLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_joined(f, &self.elements, ", ")?;
        if self.elements.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// `enum { A, B = 5, C }`
///
/// Every member carries its value: unvalued members continue counting from the previous value (starting at 0).
#[derive(Debug, Clone, PartialEq)]
pub struct EnumLiteral {
    pub token: Token,
    pub members: Vec<(Identifier, Expression)>,
    pub end: Position,
}

impl EnumLiteral {
    /// Value bound to member `name`.
    pub fn value_of(&self, name: &str) -> Option<&Expression> {
        self.members.iter().find(|(n, _)| n.value == name).map(|(_, v)| v)
    }

    pub(crate) fn write_members(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {name} = {value}")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("enum ")?;
        self.write_members(f)
    }
}

// ============================================================================
// Control flow
// ============================================================================

/// One `condition { block }` arm of an `if`/`elsif` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalArm {
    pub condition: Expression,
    pub block: BlockStatement,
}

/// `if c { } elsif c { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    /// Never empty: the `if` arm followed by each `elsif` arm.
    pub arms: Vec<ConditionalArm>,
    pub alternative: Option<BlockStatement>,
}

impl Node for IfExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        match (&self.alternative, self.arms.last()) {
            (Some(alt), _) => alt.rbrace.clone(),
            (None, Some(arm)) => arm.block.rbrace.clone(),
            (None, None) => self.token.end.clone(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arm) in self.arms.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { " elsif" };
            write!(f, "{keyword} {} {}", arm.condition, arm.block)?;
        }
        if let Some(alt) = &self.alternative {
            write!(f, " else {alt}")?;
        }
        Ok(())
    }
}

/// `unless c { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct UnlessExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl Node for UnlessExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        match &self.alternative {
            Some(alt) => alt.rbrace.clone(),
            None => self.consequence.rbrace.clone(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for UnlessExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unless {} {}", self.condition, self.consequence)?;
        if let Some(alt) = &self.alternative {
            write!(f, " else {alt}")?;
        }
        Ok(())
    }
}

/// `c ? a : b`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: Box<Expression>,
    pub alternative: Box<Expression>,
}

impl Node for TernaryExpression {
    fn pos(&self) -> Position {
        self.condition.pos()
    }

    fn end(&self) -> Position {
        self.alternative.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for TernaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} ? {} : {})", self.condition, self.consequence, self.alternative)
    }
}

/// How a `case` compares its subject against arm labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMode {
    /// `case x is { ... }`: exact match.
    Is,
    /// `case x in { ... }`: membership.
    In,
}

/// `label, label { block }` inside a `case`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub labels: Vec<Expression>,
    pub block: BlockStatement,
}

/// `case subject is|in { arms... else { } }`
///
/// The optional `else` arm is stored apart from the labelled arms; consumers evaluate it last.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpression {
    pub token: Token,
    pub subject: Box<Expression>,
    pub mode: CaseMode,
    pub arms: Vec<CaseArm>,
    pub default: Option<BlockStatement>,
    pub end: Position,
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            CaseMode::Is => "is",
            CaseMode::In => "in",
        };
        write!(f, "case {} {mode} {{", self.subject)?;
        for arm in &self.arms {
            f.write_str(" ")?;
            write_joined(f, &arm.labels, ", ")?;
            write!(f, " {}", arm.block)?;
        }
        if let Some(default) = &self.default {
            write!(f, " else {default}")?;
        }
        f.write_str(" }")
    }
}

/// What a `for` clause iterates over.
#[derive(Debug, Clone, PartialEq)]
pub enum ForBinding {
    /// `x in xs`: elements of an array or characters of a string.
    Each { var: Identifier, iterable: Box<Expression> },
    /// `i in a..b`
    Range {
        var: Identifier,
        start: Box<Expression>,
        end: Box<Expression>,
    },
    /// `k, v in map`
    Map {
        key: Identifier,
        value: Identifier,
        iterable: Box<Expression>,
    },
}

/// The `binding [where filter]` part shared by `for` loops and comprehensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ForClause {
    pub binding: ForBinding,
    pub filter: Option<Box<Expression>>,
}

impl fmt::Display for ForClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            ForBinding::Each { var, iterable } => write!(f, "for {var} in {iterable}")?,
            ForBinding::Range { var, start, end } => write!(f, "for {var} in {start}..{end}")?,
            ForBinding::Map { key, value, iterable } => write!(f, "for {key}, {value} in {iterable}")?,
        }
        if let Some(filter) = &self.filter {
            write!(f, " where {filter}")?;
        }
        Ok(())
    }
}

/// The shape of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForKind {
    /// `for (init; condition; update) { }`
    CStyle {
        init: Box<Statement>,
        condition: Box<Expression>,
        update: Box<Expression>,
    },
    /// `for x in xs [where c] { }` and its range/map variants.
    Each(ForClause),
    /// `for { }`
    Forever,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForExpression {
    pub token: Token,
    pub kind: ForKind,
    pub block: BlockStatement,
}

impl Node for ForExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.block.rbrace.clone()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for ForExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ForKind::CStyle {
                init,
                condition,
                update,
            } => write!(f, "for ({init}; {condition}; {update}) {}", self.block),
            ForKind::Each(clause) => write!(f, "{clause} {}", self.block),
            ForKind::Forever => write!(f, "for {}", self.block),
        }
    }
}

/// `while c { }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub block: BlockStatement,
}

impl Node for WhileExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.block.rbrace.clone()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for WhileExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while {} {}", self.condition, self.block)
    }
}

/// `do { }`: loops until `break`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoExpression {
    pub token: Token,
    pub block: BlockStatement,
}

impl Node for DoExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.block.rbrace.clone()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for DoExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "do {}", self.block)
    }
}

// ============================================================================
// Functions and classes
// ============================================================================

/// A function parameter with an optional default value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub default: Option<Expression>,
}

/// `fn (params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub params: Vec<Parameter>,
    /// `true` when the last parameter was declared `...name`.
    pub variadic: bool,
    pub body: BlockStatement,
    pub modifier: ModifierLevel,
    pub is_static: bool,
}

impl FunctionLiteral {
    pub(crate) fn write_params(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if self.variadic && i == last {
                f.write_str("...")?;
            }
            write!(f, "{}", param.name)?;
            if let Some(default) = &param.default {
                write!(f, " = {default}")?;
            }
        }
        Ok(())
    }
}

impl Node for FunctionLiteral {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.body.rbrace.clone()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.modifier)?;
        if self.is_static {
            f.write_str("static ")?;
        }
        f.write_str("fn(")?;
        self.write_params(f)?;
        write!(f, ") {}", self.body)
    }
}

/// A `get` or `set` accessor. A missing body asks the evaluator to synthesise the accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub token: Token,
    pub body: Option<BlockStatement>,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.literal)?;
        match &self.body {
            Some(body) => write!(f, " {body}"),
            None => f.write_str(";"),
        }
    }
}

/// `property name { get; set { } }` inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    pub token: Token,
    pub name: Identifier,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
    pub modifier: ModifierLevel,
    pub is_static: bool,
    pub end: Position,
}

impl fmt::Display for PropertyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.modifier)?;
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(f, "property {} {{", self.name)?;
        if let Some(getter) = &self.getter {
            write!(f, " {getter}")?;
        }
        if let Some(setter) = &self.setter {
            write!(f, " {setter}")?;
        }
        f.write_str(" }")
    }
}

/// `class [Name] [: Parent] { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLiteral {
    pub token: Token,
    /// Empty for anonymous class expressions.
    pub name: String,
    /// Single inheritance only.
    pub parent: Option<Identifier>,
    pub members: Vec<LetStatement>,
    pub methods: Vec<FunctionStatement>,
    pub properties: Vec<PropertyDeclaration>,
    pub end: Position,
}

impl ClassLiteral {
    pub fn method(&self, name: &str) -> Option<&FunctionStatement> {
        self.methods.iter().find(|m| m.name.value == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|p| p.name.value == name)
    }
}

impl fmt::Display for ClassLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("class")?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        if let Some(parent) = &self.parent {
            write!(f, " : {parent}")?;
        }
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.members.iter().map(ToString::to_string));
        parts.extend(self.methods.iter().map(ToString::to_string));
        parts.extend(self.properties.iter().map(ToString::to_string));
        if parts.is_empty() {
            return f.write_str(" { }");
        }
        write!(f, " {{ {} }}", parts.join("; "))
    }
}

/// `new Name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub token: Token,
    pub class: Identifier,
    pub arguments: Vec<Expression>,
    pub end: Position,
}

impl fmt::Display for NewExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new {}(", self.class)?;
        write_joined(f, &self.arguments, ", ")?;
        f.write_str(")")
    }
}

// ============================================================================
// Operators
// ============================================================================

/// `-x`, `+x`, `!x`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: OperatorId,
    pub right: Box<Expression>,
}

impl Node for PrefixExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.right.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", operators::as_str(self.operator), self.right)
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: OperatorId,
    pub right: Box<Expression>,
}

impl Node for InfixExpression {
    fn pos(&self) -> Position {
        self.left.pos()
    }

    fn end(&self) -> Position {
        self.right.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, operators::as_str(self.operator), self.right)
    }
}

/// `x++`, `x--`
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: OperatorId,
}

impl Node for PostfixExpression {
    fn pos(&self) -> Position {
        self.left.pos()
    }

    fn end(&self) -> Position {
        self.token.end.clone()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for PostfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.left, operators::as_str(self.operator))
    }
}

/// `value |> function`
#[derive(Debug, Clone, PartialEq)]
pub struct PipeExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl Node for PipeExpression {
    fn pos(&self) -> Position {
        self.left.pos()
    }

    fn end(&self) -> Position {
        self.right.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for PipeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} |> {})", self.left, self.right)
    }
}

/// `target = value` and the compound forms (`+=`, `|=`, ...).
///
/// `target` is an identifier, an index expression or a property access (`obj.name`).
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpression {
    pub token: Token,
    pub target: Box<Expression>,
    pub operator: OperatorId,
    pub value: Box<Expression>,
}

impl Node for AssignExpression {
    fn pos(&self) -> Position {
        self.target.pos()
    }

    fn end(&self) -> Position {
        self.value.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for AssignExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, operators::as_str(self.operator), self.value)
    }
}

/// `left[index]`; `index` is a [`SliceExpression`] for `left[a:b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
    pub end: Position,
}

impl fmt::Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// `start:end` inside index brackets. `[:e]` gets a literal `0` start; `[s:]` has no end.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpression {
    pub token: Token,
    pub start: Box<Expression>,
    pub end: Option<Box<Expression>>,
}

impl Node for SliceExpression {
    fn pos(&self) -> Position {
        self.start.pos()
    }

    fn end(&self) -> Position {
        match &self.end {
            Some(end) => end.end(),
            None => self.token.end.clone(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for SliceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.start)?;
        if let Some(end) = &self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

/// `object.name` or `object.name(args)`.
///
/// `call` is either an [`Identifier`] (property access) or a [`CallExpression`] whose function is the member name.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCallExpression {
    pub token: Token,
    pub object: Box<Expression>,
    pub call: Box<Expression>,
}

impl MethodCallExpression {
    /// `true` for `object.name` without an argument list.
    pub fn is_property_access(&self) -> bool {
        matches!(*self.call, Expression::Identifier(_))
    }
}

impl Node for MethodCallExpression {
    fn pos(&self) -> Position {
        self.object.pos()
    }

    fn end(&self) -> Position {
        self.call.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for MethodCallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.call)
    }
}

/// `function(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub end: Position,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        write_joined(f, &self.arguments, ", ")?;
        f.write_str(")")
    }
}

// ============================================================================
// Comprehensions and list operators
// ============================================================================

/// `[body for x in xs where c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListComprehension {
    pub token: Token,
    pub body: Box<Expression>,
    pub clause: ForClause,
    pub end: Position,
}

impl fmt::Display for ListComprehension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.body, self.clause)
    }
}

/// `{key => value for k, v in h}`
#[derive(Debug, Clone, PartialEq)]
pub struct HashComprehension {
    pub token: Token,
    pub key: Box<Expression>,
    pub value: Box<Expression>,
    pub clause: ForClause,
    pub end: Position,
}

impl fmt::Display for HashComprehension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} => {} {}}}", self.key, self.value, self.clause)
    }
}

/// `grep` or `map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListOp {
    Grep,
    Map,
}

impl fmt::Display for ListOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOp::Grep => f.write_str("grep"),
            ListOp::Map => f.write_str("map"),
        }
    }
}

/// Body of a `grep`/`map`: a block or a single expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOpBody {
    Block(BlockStatement),
    Expression(Box<Expression>),
}

/// `grep { block } source`, `grep expr, source` (and the same for `map`).
#[derive(Debug, Clone, PartialEq)]
pub struct ListOpExpression {
    pub token: Token,
    pub op: ListOp,
    pub body: ListOpBody,
    pub source: Box<Expression>,
}

impl Node for ListOpExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.source.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for ListOpExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            ListOpBody::Block(block) => write!(f, "{} {block} {}", self.op, self.source),
            ListOpBody::Expression(expr) => write!(f, "{} {expr}, {}", self.op, self.source),
        }
    }
}

// ============================================================================
// Flow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BreakExpression {
    pub token: Token,
}

impl fmt::Display for BreakExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("break")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueExpression {
    pub token: Token,
}

impl fmt::Display for ContinueExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("continue")
    }
}

/// `yield [value]`
#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    pub token: Token,
    pub value: Option<Box<Expression>>,
}

impl Node for YieldExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        match &self.value {
            Some(value) => value.end(),
            None => self.token.end.clone(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for YieldExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "yield {value}"),
            None => f.write_str("yield"),
        }
    }
}

/// Which errors a `catch` clause accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum CatchKind {
    /// `catch "TypeName" { }`
    Typed(String),
    /// `catch e { }`: any error, bound to `e`.
    Binding(Identifier),
    /// `catch { }`
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub token: Token,
    pub kind: CatchKind,
    pub block: BlockStatement,
}

impl fmt::Display for CatchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CatchKind::Typed(ty) => write!(f, "catch {ty:?} {}", self.block),
            CatchKind::Binding(name) => write!(f, "catch {name} {}", self.block),
            CatchKind::All => write!(f, "catch {}", self.block),
        }
    }
}

/// `try { } catch ... { } finally { }`
#[derive(Debug, Clone, PartialEq)]
pub struct TryExpression {
    pub token: Token,
    pub block: BlockStatement,
    pub catches: Vec<CatchClause>,
    pub finally: Option<BlockStatement>,
}

impl Node for TryExpression {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        if let Some(finally) = &self.finally {
            return finally.rbrace.clone();
        }
        match self.catches.last() {
            Some(clause) => clause.block.rbrace.clone(),
            None => self.block.rbrace.clone(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for TryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "try {}", self.block)?;
        for clause in &self.catches {
            write!(f, " {clause}")?;
        }
        if let Some(finally) = &self.finally {
            write!(f, " finally {finally}")?;
        }
        Ok(())
    }
}
