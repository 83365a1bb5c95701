//! Property-based tests for the Sable front end
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use sable::ast::Node;
use sable::lang::operators::{self, OPERATORS, Precedence};
use sable::lexer::{TokenKind, lex};
use sable::parser::parse_with_resolver;
use sable_syntax::ParseConfig;
use sable_syntax::resolver::MemoryResolver;

fn parse(source: &str) -> (sable::ast::Program, Vec<sable::diagnostics::SyntaxError>) {
    parse_with_resolver(source, &ParseConfig::new(), &MemoryResolver::new())
}

/// Binary arithmetic operator spellings, straight from the registry.
fn arithmetic_ops() -> Vec<&'static str> {
    OPERATORS
        .iter()
        .filter(|info| matches!(info.precedence, Precedence::Sum | Precedence::Product))
        .filter(|info| !operators::is_assignment(info.id))
        .map(|info| info.spellings[0])
        .collect()
}

/// Arithmetic source text over identifiers and integer literals.
fn arithmetic() -> impl Strategy<Value = String> {
    let leaf = prop_oneof!["[a-e]", "[1-9][0-9]{0,2}"];
    let ops = arithmetic_ops();
    leaf.prop_recursive(4, 24, 2, move |inner| {
        let ops = ops.clone();
        prop_oneof![
            (inner.clone(), proptest::sample::select(ops), inner.clone()).prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.prop_map(|e| format!("-({e})")),
        ]
    })
}

// =============================================================================
// Robustness
// =============================================================================

proptest! {
    /// Property: lexing arbitrary text never panics and always ends with exactly one EOF.
    #[test]
    fn lexer_never_panics(source in "[a-z0-9 _+\\-*/%(){}\\[\\];:,.'\"`=<>!?|&^#\n]{0,64}") {
        let (tokens, _) = lex(&source);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    /// Property: parsing arbitrary text never panics and every error points inside the input.
    #[test]
    fn parser_never_panics(source in "[a-z0-9 _+\\-*/%(){}\\[\\];:,.'\"=<>!?|&^\n]{0,64}") {
        let (program, errors) = parse(&source);
        for err in &errors {
            prop_assert!(err.pos.offset <= source.len(), "{} beyond {}", err, source.len());
        }
        for stmt in &program.statements {
            prop_assert!(stmt.end().offset >= stmt.pos().offset);
        }
    }

    /// Property: keyword soup never panics the parser.
    #[test]
    fn parser_survives_keyword_soup(words in proptest::collection::vec(
        prop_oneof![
            Just("let"), Just("fn"), Just("if"), Just("else"), Just("for"), Just("in"), Just("while"),
            Just("case"), Just("is"), Just("try"), Just("catch"), Just("class"), Just("enum"), Just("break"),
            Just("x"), Just("1"), Just("{"), Just("}"), Just("("), Just(")"), Just("="), Just(";"), Just(","),
        ],
        0..32,
    )) {
        let source = words.join(" ");
        let _ = parse(&source);
    }
}

// =============================================================================
// Rendering
// =============================================================================

proptest! {
    /// Property: the canonical rendering of arithmetic re-parses to itself.
    #[test]
    fn arithmetic_rendering_is_a_fixpoint(source in arithmetic()) {
        let (first, errors) = parse(&source);
        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", source, errors);
        let rendered = first.to_string();

        let (second, errors) = parse(&rendered);
        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", rendered, errors);
        prop_assert_eq!(second.to_string(), rendered);
    }
}
