//! Snapshot tests for CLI output formats.

use sable::cli::commands::render_tokens;
use sable::lexer::lex;

#[test]
fn lex_output_lists_every_token() {
    let (tokens, errors) = lex("let x = 1;\ns =~ /a+/");
    assert!(errors.is_empty(), "{errors:?}");
    insta::assert_snapshot!(render_tokens(&tokens), @r#"
    LET("let") @ 1:1
    IDENT("x") @ 1:5
    EQ("=") @ 1:7
    INT("1") @ 1:9
    SEMICOLON(";") @ 1:10
    IDENT("s") @ 2:1
    MATCH("=~") @ 2:3
    REGEX("a+") @ 2:6
    EOF("") @ 2:10
    "#);
}
