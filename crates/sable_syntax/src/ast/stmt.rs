//! Statement nodes.

use std::fmt;

use super::{ClassLiteral, EnumLiteral, Expression, FunctionLiteral, Identifier, ModifierLevel, Node, Position, Program};
use super::write_joined;
use crate::lexer::Token;

/// Any statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Defer(DeferStatement),
    Spawn(SpawnStatement),
    Throw(ThrowStatement),
    Expression(ExpressionStatement),
    Function(FunctionStatement),
    Class(ClassStatement),
    Enum(EnumStatement),
    /// A bare `{ ... }` in statement position.
    Block(BlockStatement),
}

delegate_node!(Statement {
    Let,
    Return,
    Defer,
    Spawn,
    Throw,
    Expression,
    Function,
    Class,
    Enum,
    Block,
});

/// `let name [= value]`, also used for class fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Option<Expression>,
    pub modifier: ModifierLevel,
    pub is_static: bool,
}

impl Node for LetStatement {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        match &self.value {
            Some(value) => value.end(),
            None => self.name.end(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.modifier)?;
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(f, "let {}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        Ok(())
    }
}

/// `return [value]`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

impl Node for ReturnStatement {
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

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {value}"),
            None => f.write_str("return"),
        }
    }
}

/// Statements of the shape `<keyword> <expression>`.
macro_rules! keyword_statement {
    ($(#[$meta:meta])* $name:ident, $keyword:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub token: Token,
            pub value: Expression,
        }

        impl Node for $name {
            fn pos(&self) -> Position {
                self.token.pos.clone()
            }

            fn end(&self) -> Position {
                self.value.end()
            }

            fn token_literal(&self) -> &str {
                &self.token.literal
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($keyword, " {}"), self.value)
            }
        }
    };
}

keyword_statement!(
    /// `defer expr`: run `expr` when the enclosing function exits.
    DeferStatement,
    "defer"
);
keyword_statement!(
    /// `spawn expr`: run `expr` concurrently.
    SpawnStatement,
    "spawn"
);
keyword_statement!(
    /// `throw expr`
    ThrowStatement,
    "throw"
);

/// An expression used as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl Node for ExpressionStatement {
    fn pos(&self) -> Position {
        self.expression.pos()
    }

    fn end(&self) -> Position {
        self.expression.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// `{ statements }`
///
/// `end()` is the end of the last statement, or the opening brace itself when the block is empty. Enclosing nodes
/// that need the closing brace use [`BlockStatement::rbrace`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
    /// Position just past the closing `}`.
    pub rbrace: Position,
}

impl Node for BlockStatement {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        match self.statements.last() {
            Some(last) => last.end(),
            None => self.token.pos.clone(),
        }
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_joined(f, &self.statements, "; ")?;
        f.write_str(" }")
    }
}

/// `fn name(params) { body }`, also used for class methods.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub token: Token,
    pub name: Identifier,
    pub function: FunctionLiteral,
}

impl Node for FunctionStatement {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.function.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for FunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let func = &self.function;
        write!(f, "{}", func.modifier)?;
        if func.is_static {
            f.write_str("static ")?;
        }
        write!(f, "fn {}(", self.name)?;
        func.write_params(f)?;
        write!(f, ") {}", func.body)
    }
}

/// `class Name [: Parent] { ... }` as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStatement {
    pub token: Token,
    pub name: Identifier,
    pub class: ClassLiteral,
}

impl Node for ClassStatement {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.class.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for ClassStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)
    }
}

/// `enum Name { ... }` as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumStatement {
    pub token: Token,
    pub name: Identifier,
    pub enumeration: EnumLiteral,
}

impl Node for EnumStatement {
    fn pos(&self) -> Position {
        self.token.pos.clone()
    }

    fn end(&self) -> Position {
        self.enumeration.end()
    }

    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for EnumStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enum {} ", self.name)?;
        self.enumeration.write_members(f)
    }
}

/// `include name` / `include "path"`.
///
/// Only ever stored in [`Program::includes`].
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeStatement {
    pub token: Token,
    /// Literal include text, exactly as written.
    pub path: String,
    /// `true` when the path was written as a string literal.
    pub quoted: bool,
    /// The parsed module, absent when resolution failed.
    pub program: Option<Program>,
    /// `true` when the include resolved to a directory's module file.
    pub is_module: bool,
    pub end: Position,
}

impl Node for IncludeStatement {
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

impl fmt::Display for IncludeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "include {:?}", self.path)
        } else {
            write!(f, "include {}", self.path)
        }
    }
}
