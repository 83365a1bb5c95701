#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the shape of specific syntactic forms and on error recovery (one report per mistake, valid
/// statements after a mistake still parsed).
mod tests {
    use super::*;
    use crate::resolver::MemoryResolver;

    fn parse_with(source: &str, resolver: &MemoryResolver) -> (Program, Vec<SyntaxError>) {
        parse_with_resolver(source, &ParseConfig::new(), resolver)
    }

    fn parse(source: &str) -> (Program, Vec<SyntaxError>) {
        parse_with(source, &MemoryResolver::new())
    }

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse(source);
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert!(messages.is_empty(), "unexpected errors for {source:?}: {messages:#?}");
        program
    }

    fn messages(source: &str) -> Vec<String> {
        parse(source).1.iter().map(|e| e.message.clone()).collect()
    }

    /// The expression of the single expression statement in `source`.
    fn expr(source: &str) -> Expression {
        let mut program = parse_ok(source);
        assert_eq!(program.statements.len(), 1, "expected one statement in {source:?}");
        match program.statements.remove(0) {
            Statement::Expression(stmt) => stmt.expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_let_statements() {
        let program = parse_ok("let x = 5; let y = true; let foobar = y;");
        assert_eq!(program.statements.len(), 3);
        let names: Vec<&str> = program
            .statements
            .iter()
            .map(|s| match s {
                Statement::Let(stmt) => stmt.name.value.as_str(),
                other => panic!("expected let, got {other:?}"),
            })
            .collect();
        assert_eq!(names, ["x", "y", "foobar"]);
        assert_eq!(program.statements[0].to_string(), "let x = 5");
    }

    #[test]
    fn test_let_without_value() {
        let program = parse_ok("let x");
        match &program.statements[0] {
            Statement::Let(stmt) => assert!(stmt.value.is_none()),
            other => panic!("expected let, got {other:?}"),
        }
    }

    #[test]
    fn test_return_with_and_without_value() {
        let program = parse_ok("return 5; return;");
        assert_eq!(program.to_string(), "return 5\nreturn");
    }

    #[test]
    fn test_keyword_statements() {
        let program = parse_ok("defer close(f); spawn worker(1); throw \"boom\"");
        assert_eq!(program.to_string(), "defer close(f)\nspawn worker(1)\nthrow \"boom\"");
        assert!(matches!(program.statements[0], Statement::Defer(_)));
        assert!(matches!(program.statements[1], Statement::Spawn(_)));
        assert!(matches!(program.statements[2], Statement::Throw(_)));
    }

    #[test]
    fn test_statement_positions() {
        let program = parse_ok("\nlet x = 5");
        let stmt = &program.statements[0];
        assert_eq!((stmt.pos().line, stmt.pos().column), (2, 1));
        match stmt {
            Statement::Let(stmt) => assert_eq!(stmt.name.pos().column, 5),
            other => panic!("expected let, got {other:?}"),
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    #[test]
    fn test_operator_precedence_rendering() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("a || b && c", "(a || (b && c))"),
            ("a and b or c", "((a and b) or c)"),
            ("a | b ^ c & d", "(a | (b ^ (c & d)))"),
            ("1 << 2 + 3", "(1 << (2 + 3))"),
            ("a + b ** 2", "(a + (b ** 2))"),
            ("s =~ /ab+c/", "(s =~ /ab+c/)"),
            ("add(a, b * c)", "add(a, (b * c))"),
            ("a * [1, 2][1]", "(a * ([1, 2][1]))"),
            ("x |> f |> g", "((x |> f) |> g)"),
            ("i++ + 1", "((i++) + 1)"),
            ("1..10", "(1 .. 10)"),
            ("a + 1..b", "((a + 1) .. b)"),
            ("-x.abs()", "(-x.abs())"),
            ("(a + b) * c", "((a + b) * c)"),
        ];
        for (source, expected) in cases {
            assert_eq!(expr(source).to_string(), expected, "source: {source}");
        }
    }

    #[test]
    fn test_ternary_right_associates() {
        assert_eq!(expr("c ? a : b").to_string(), "(c ? a : b)");
        assert_eq!(expr("a ? b : c ? d : e").to_string(), "(a ? b : (c ? d : e))");
        assert_eq!(expr("n + 1 ? a + 1 : b").to_string(), "((n + 1) ? (a + 1) : b)");
        // `?` binds tighter than comparison operators.
        assert_eq!(expr("x == 1 ? a : b").to_string(), "(x == (1 ? a : b))");
    }

    #[test]
    fn test_assignment_right_associates() {
        match expr("a = b = c") {
            Expression::Assign(outer) => {
                assert_eq!(outer.target.to_string(), "a");
                assert!(matches!(*outer.value, Expression::Assign(_)));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_compound_assignment_takes_whole_rhs() {
        match expr("x += 1 + 2") {
            Expression::Assign(assign) => {
                assert_eq!(assign.operator, OperatorId::PlusEq);
                assert_eq!(assign.to_string(), "x += (1 + 2)");
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_targets() {
        parse_ok("a[0] = 1");
        parse_ok("obj.name = 1");
        for source in ["obj.f() = 1", "1 = 2", "a + b = c"] {
            let msgs = messages(source);
            assert!(
                msgs.iter().any(|m| m.starts_with("invalid assignment target")),
                "{source}: {msgs:?}"
            );
        }
    }

    #[test]
    fn test_method_calls_and_properties() {
        assert_eq!(expr("a.b.c").to_string(), "a.b.c");
        match expr("obj.method(1, 2)") {
            Expression::MethodCall(call) => {
                assert!(!call.is_property_access());
                assert_eq!(call.to_string(), "obj.method(1, 2)");
            }
            other => panic!("expected method call, got {other:?}"),
        }
        // Keywords are valid member names.
        assert_eq!(expr("xs.map(f)").to_string(), "xs.map(f)");
    }

    #[test]
    fn test_slice_defaults() {
        match expr("myArray[:3]") {
            Expression::Index(index) => {
                assert_eq!(index.left.to_string(), "myArray");
                match &*index.index {
                    Expression::Slice(slice) => {
                        assert!(matches!(&*slice.start, Expression::Integer(IntegerLiteral { value: 0, .. })));
                        assert!(matches!(
                            slice.end.as_deref(),
                            Some(Expression::Integer(IntegerLiteral { value: 3, .. }))
                        ));
                    }
                    other => panic!("expected slice, got {other:?}"),
                }
            }
            other => panic!("expected index, got {other:?}"),
        }

        match expr("myArray[1:]") {
            Expression::Index(index) => match &*index.index {
                Expression::Slice(slice) => {
                    assert!(matches!(&*slice.start, Expression::Integer(IntegerLiteral { value: 1, .. })));
                    assert!(slice.end.is_none());
                }
                other => panic!("expected slice, got {other:?}"),
            },
            other => panic!("expected index, got {other:?}"),
        }

        assert_eq!(expr("a[1:n - 1]").to_string(), "(a[1:(n - 1)])");
    }

    // ========================================================================
    // Literals
    // ========================================================================

    #[test]
    fn test_integer_literals() {
        assert!(matches!(expr("0xff"), Expression::Integer(IntegerLiteral { value: 255, .. })));
        assert!(matches!(expr("0b1010"), Expression::Integer(IntegerLiteral { value: 10, .. })));
        assert!(matches!(expr("0c17"), Expression::Integer(IntegerLiteral { value: 15, .. })));
        assert!(matches!(expr("1_000_000"), Expression::Integer(IntegerLiteral { value: 1_000_000, .. })));
        assert!(matches!(
            expr("18446744073709551615"),
            Expression::UnsignedInteger(UnsignedIntegerLiteral { value: u64::MAX, .. })
        ));
    }

    #[test]
    fn test_integer_overflow_is_error() {
        let msgs = messages("let x = 99999999999999999999999");
        assert_eq!(msgs, ["could not parse 99999999999999999999999 as integer"]);
    }

    #[test]
    fn test_float_literals() {
        match expr("1_000.5e-1") {
            Expression::Float(float) => assert!((float.value - 100.05).abs() < 1e-9),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_string_literals() {
        match expr(r#""a\tb""#) {
            Expression::String(s) => {
                assert_eq!(s.value, "a\tb");
                assert!(!s.raw);
            }
            other => panic!("expected string, got {other:?}"),
        }
        match expr("`a\\tb`") {
            Expression::String(s) => {
                assert_eq!(s.value, "a\\tb");
                assert!(s.raw);
            }
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_interpolated_string_single_slot() {
        match expr("'abc{x}'") {
            Expression::InterpolatedString(s) => {
                assert_eq!(s.value, "abc{0}");
                assert_eq!(s.exprs.len(), 1);
                assert_eq!(s.expr(0).and_then(Expression::as_identifier), Some("x"));
                assert_eq!(s.to_string(), "'abc{x}'");
            }
            other => panic!("expected interpolated string, got {other:?}"),
        }
    }

    #[test]
    fn test_interpolated_string_many_slots() {
        match expr("'{hello}{x}{world}'") {
            Expression::InterpolatedString(s) => {
                assert_eq!(s.value, "{0}{1}{2}");
                assert_eq!(s.exprs.len(), 3);
                assert_eq!(s.expr(2).and_then(Expression::as_identifier), Some("world"));
            }
            other => panic!("expected interpolated string, got {other:?}"),
        }
    }

    #[test]
    fn test_interpolated_expression_positions_point_into_file() {
        match expr("'a{x + 1}'") {
            Expression::InterpolatedString(s) => {
                let inner = s.expr(0).map(ToString::to_string);
                assert_eq!(inner.as_deref(), Some("(x + 1)"));
                let pos = s.exprs[0].1.pos();
                assert_eq!((pos.offset, pos.column), (3, 4));
            }
            other => panic!("expected interpolated string, got {other:?}"),
        }
    }

    #[test]
    fn test_interpolation_errors_are_reported() {
        let msgs = messages("'{1 +}'");
        assert_eq!(msgs, ["no prefix parse function for EOF found"]);
        let msgs = messages("'{a b}'");
        assert_eq!(msgs, ["unexpected IDENT in interpolation"]);
    }

    #[test]
    fn test_collection_literals() {
        assert_eq!(expr("[1, 2 * 2, 3,]").to_string(), "[1, (2 * 2), 3]");
        assert_eq!(expr(r#"{"a" => 1, "b" => 2}"#).to_string(), r#"{"a" => 1, "b" => 2}"#);
        assert!(matches!(expr("{}"), Expression::Hash(h) if h.pairs.is_empty()));
        assert_eq!(expr(r#"struct { name => "x" }"#).to_string(), r#"struct {name => "x"}"#);
        assert_eq!(expr("()").to_string(), "()");
        assert_eq!(expr("(1,)").to_string(), "(1,)");
        assert_eq!(expr("(1, 2)").to_string(), "(1, 2)");
        assert!(matches!(expr("(1)"), Expression::Integer(_)));
    }

    #[test]
    fn test_hash_pairs_keep_source_order() {
        match expr("{z => 1, a => 2, m => 3}") {
            Expression::Hash(hash) => {
                let keys: Vec<String> = hash.pairs.iter().map(|(k, _)| k.to_string()).collect();
                assert_eq!(keys, ["z", "a", "m"]);
            }
            other => panic!("expected hash, got {other:?}"),
        }
    }

    #[test]
    fn test_word_list() {
        match expr("qw(a b  c)") {
            Expression::Array(array) => {
                assert_eq!(array.elements.len(), 3);
                assert_eq!(array.to_string(), r#"["a", "b", "c"]"#);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_comprehensions() {
        assert_eq!(
            expr("[x * 2 for x in xs where x > 1]").to_string(),
            "[(x * 2) for x in xs where (x > 1)]"
        );
        assert_eq!(expr("[i for i in 1..5]").to_string(), "[i for i in 1..5]");
        assert_eq!(expr("{k => v for k, v in h}").to_string(), "{k => v for k, v in h}");

        match expr("[i for i in 1..5]") {
            Expression::ListComprehension(c) => assert!(matches!(c.clause.binding, ForBinding::Range { .. })),
            other => panic!("expected comprehension, got {other:?}"),
        }
    }

    #[test]
    fn test_list_ops() {
        match expr("grep { $_ > 1 } xs") {
            Expression::ListOp(op) => {
                assert_eq!(op.op, ListOp::Grep);
                assert!(matches!(op.body, ListOpBody::Block(_)));
                assert_eq!(op.to_string(), "grep { ($_ > 1) } xs");
            }
            other => panic!("expected grep, got {other:?}"),
        }
        match expr("map $_ * 2, xs") {
            Expression::ListOp(op) => {
                assert_eq!(op.op, ListOp::Map);
                assert_eq!(op.to_string(), "map ($_ * 2), xs");
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    #[test]
    fn test_if_elsif_else_chain() {
        match expr("if (x < y) { x } elsif x == y { 0 } elseif z { 1 } else { y }") {
            Expression::If(stmt) => {
                assert_eq!(stmt.arms.len(), 3);
                assert!(stmt.alternative.is_some());
                assert_eq!(
                    stmt.to_string(),
                    "if (x < y) { x } elsif (x == y) { 0 } elsif z { 1 } else { y }"
                );
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_unless() {
        assert_eq!(expr("unless ok { fail() } else { go() }").to_string(), "unless ok { fail() } else { go() }");
    }

    #[test]
    fn test_case_arms() {
        match expr("case x is { 1, 2 { a } 3 { b } else { c } }") {
            Expression::Case(case) => {
                assert_eq!(case.mode, CaseMode::Is);
                assert_eq!(case.arms.len(), 2);
                assert_eq!(case.arms[0].labels.len(), 2);
                assert!(case.default.is_some());
                assert_eq!(case.to_string(), "case x is { 1, 2 { a } 3 { b } else { c } }");
            }
            other => panic!("expected case, got {other:?}"),
        }
        match expr("case x in { [1, 2] { a } }") {
            Expression::Case(case) => assert_eq!(case.mode, CaseMode::In),
            other => panic!("expected case, got {other:?}"),
        }
    }

    #[test]
    fn test_for_forms() {
        match expr("for x in xs where x > 1 { print(x) }") {
            Expression::For(f) => match f.kind {
                ForKind::Each(clause) => {
                    assert!(matches!(clause.binding, ForBinding::Each { .. }));
                    assert!(clause.filter.is_some());
                }
                other => panic!("expected each, got {other:?}"),
            },
            other => panic!("expected for, got {other:?}"),
        }

        let range = expr("for i in 0..10 { }");
        assert!(matches!(&range, Expression::For(f) if matches!(&f.kind, ForKind::Each(ForClause { binding: ForBinding::Range { .. }, .. }))));

        let map = expr("for k, v in h { }");
        assert!(matches!(&map, Expression::For(f) if matches!(&f.kind, ForKind::Each(ForClause { binding: ForBinding::Map { .. }, .. }))));

        assert!(matches!(expr("for { break }"), Expression::For(ForExpression { kind: ForKind::Forever, .. })));

        let c_style = expr("for (let i = 0; i < 10; i++) { continue }");
        assert_eq!(c_style.to_string(), "for (let i = 0; (i < 10); (i++)) { continue }");
    }

    #[test]
    fn test_map_binding_over_range_is_error() {
        let msgs = messages("for k, v in 1..3 { }");
        assert!(msgs.contains(&"cannot destructure a range into key and value".to_string()), "{msgs:?}");
    }

    #[test]
    fn test_while_and_do() {
        assert_eq!(expr("while x < 3 { x++ }").to_string(), "while (x < 3) { (x++) }");
        assert_eq!(expr("do { break }").to_string(), "do { break }");
    }

    #[test]
    fn test_break_outside_loop_is_error() {
        assert_eq!(messages("break"), ["'break' outside of a loop"]);
        assert_eq!(messages("continue"), ["'continue' outside of a loop"]);
        parse_ok("for x in a { break }");
        parse_ok("while true { if done { break } }");
    }

    #[test]
    fn test_function_body_resets_loop_context() {
        assert_eq!(messages("for x in a { fn() { break } }"), ["'break' outside of a loop"]);
    }

    #[test]
    fn test_try_catch_finally() {
        match expr(r#"try { risky() } catch "IOError" { a } catch e { b } finally { c }"#) {
            Expression::Try(t) => {
                assert_eq!(t.catches.len(), 2);
                assert_eq!(t.catches[0].kind, CatchKind::Typed("IOError".to_string()));
                assert!(matches!(t.catches[1].kind, CatchKind::Binding(_)));
                assert!(t.finally.is_some());
            }
            other => panic!("expected try, got {other:?}"),
        }
        assert!(matches!(expr("try { x } catch { y }"), Expression::Try(t) if t.catches[0].kind == CatchKind::All));
        assert_eq!(messages("try { x }"), ["try requires at least one catch or finally clause"]);
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_function_statement_and_literal() {
        let program = parse_ok("fn add(a, b, ...rest) { a + b }\nlet f = fn(x = 1) { x * 2 }");
        match &program.statements[0] {
            Statement::Function(stmt) => {
                assert_eq!(stmt.name.value, "add");
                assert_eq!(stmt.function.params.len(), 3);
                assert!(stmt.function.variadic);
            }
            other => panic!("expected function, got {other:?}"),
        }
        assert_eq!(program.to_string(), "fn add(a, b, ...rest) { (a + b) }\nlet f = fn(x = 1) { (x * 2) }");
    }

    #[test]
    fn test_parameter_ordering_errors() {
        assert_eq!(messages("fn f(...a, b) { }"), ["variadic parameter 'a' must be the last parameter"]);
        assert_eq!(messages("fn f(...a, ...b) { }"), ["only one variadic parameter is allowed"]);
        assert_eq!(
            messages("fn f(a = 1, ...rest) { }"),
            ["default parameter values cannot precede a variadic parameter"]
        );
    }

    #[test]
    fn test_class_statement() {
        let source = r#"
class Point : Base {
    let x = 0;
    private static let count = 0
    public fn move(dx) { x += dx }
    property name { get; set { this.n = value } }
}
"#;
        let program = parse_ok(source);
        let class = match &program.statements[0] {
            Statement::Class(stmt) => &stmt.class,
            other => panic!("expected class, got {other:?}"),
        };
        assert_eq!(class.name, "Point");
        assert_eq!(class.parent.as_ref().map(|p| p.value.as_str()), Some("Base"));
        assert_eq!(class.members.len(), 2);
        assert_eq!(class.members[1].modifier, ModifierLevel::Private);
        assert!(class.members[1].is_static);

        let method = class.method("move").map(|m| m.function.modifier);
        assert_eq!(method, Some(ModifierLevel::Public));

        let property = class.property("name").map(|p| (p.getter.as_ref(), p.setter.as_ref()));
        match property {
            Some((Some(getter), Some(setter))) => {
                assert!(getter.body.is_none());
                assert!(setter.body.is_some());
            }
            other => panic!("expected getter and setter, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_class_members_are_errors() {
        assert_eq!(messages("class A { fn f() { } fn f() { } }"), ["duplicate method 'f' in class"]);
        assert_eq!(
            messages("class A { property p { get } property p { set } }"),
            ["duplicate property 'p' in class"]
        );
    }

    #[test]
    fn test_anonymous_class_and_new() {
        let program = parse_ok("let C = class { }\nlet p = new Point(1, 2)\nlet q = new Point");
        assert_eq!(program.to_string(), "let C = class { }\nlet p = new Point(1, 2)\nlet q = new Point()");
    }

    #[test]
    fn test_class_member_cut_short_by_closing_brace() {
        let (program, errors) = parse("class A { public }\nlet z = 1");
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["Syntax Error: <input>:1:18 - expected let, fn or property in class body, got RBRACE instead"]
        );
        assert_eq!(program.statements.len(), 2);
        match &program.statements[0] {
            Statement::Class(stmt) => assert!(stmt.class.members.is_empty()),
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_auto_increment() {
        let program = parse_ok("enum Color { Red, Green = 5, Blue }");
        assert_eq!(program.to_string(), "enum Color { Red = 0, Green = 5, Blue = 6 }");

        let program = parse_ok("let e = enum { A = -2, B }");
        assert_eq!(program.to_string(), "let e = enum { A = -2, B = -1 }");
    }

    #[test]
    fn test_enum_duplicate_member_keeps_first() {
        let (program, errors) = parse("enum E { A = 3, A }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "duplicate enum member 'A'");
        match &program.statements[0] {
            Statement::Enum(stmt) => {
                assert_eq!(stmt.enumeration.members.len(), 1);
                assert_eq!(stmt.enumeration.value_of("A").map(ToString::to_string).as_deref(), Some("3"));
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_most_negative_value() {
        let program = parse_ok("enum E { A = -9223372036854775808, B }");
        match &program.statements[0] {
            Statement::Enum(stmt) => {
                assert!(matches!(stmt.enumeration.value_of("A"), Some(Expression::Integer(i)) if i.value == i64::MIN));
                assert!(matches!(stmt.enumeration.value_of("B"), Some(Expression::Integer(i)) if i.value == i64::MIN + 1));
            }
            other => panic!("expected enum, got {other:?}"),
        }

        let msgs = messages("enum E { A = -9223372036854775809 }");
        assert_eq!(msgs, ["enum member value out of range"]);
    }

    #[test]
    fn test_enum_non_integer_value_is_error() {
        let msgs = messages(r#"enum E { A = "x" }"#);
        assert_eq!(msgs, [r#"enum member value must be an integer constant, got '"x"'"#]);
    }

    // ========================================================================
    // Errors and recovery
    // ========================================================================

    #[test]
    fn test_error_does_not_abort_parse() {
        let (program, errors) = parse("let = 5; let y = 10;");
        assert_eq!(program.to_string(), "let y = 10");
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["Syntax Error: <input>:1:5 - expected next token to be IDENT, got EQ instead"]
        );
    }

    #[test]
    fn test_no_prefix_parse_function() {
        assert_eq!(messages("let x = ;"), ["no prefix parse function for SEMICOLON found"]);
    }

    #[test]
    fn test_lexer_error_is_not_reported_twice() {
        assert_eq!(messages("let a = 5x; let b = 1"), ["invalid numeric literal '5x'"]);
    }

    #[test]
    fn test_recovery_inside_block() {
        let (program, errors) = parse("fn f() { let = 1; g() }\nh()");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.to_string(), "fn f() { g() }\nh()");
    }

    #[test]
    fn test_recovery_resumes_at_statement_keyword() {
        let (program, errors) = parse("let x = \nlet y = 2\ny");
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["Syntax Error: <input>:2:1 - no prefix parse function for LET found"]
        );
        assert_eq!(program.to_string(), "let y = 2\ny");

        let (program, errors) = parse("fn f() { throw\nlet z = 1 }");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.to_string(), "fn f() { let z = 1 }");
    }

    #[test]
    fn test_block_statement() {
        let program = parse_ok("{ let x = 1; x }\n{ { y } }");
        assert_eq!(program.statements.len(), 2);
        match &program.statements[0] {
            Statement::Block(block) => assert_eq!(block.statements.len(), 2),
            other => panic!("expected block, got {other:?}"),
        }
        assert_eq!(program.to_string(), "{ let x = 1; x }\n{ { y } }");

        assert!(matches!(&parse_ok("{ a => 1 }").statements[0], Statement::Expression(_)));
    }

    #[test]
    fn test_unterminated_block() {
        let msgs = messages("if x { y");
        assert_eq!(msgs, ["unterminated block: expected '}'"]);
    }

    #[test]
    fn test_parser_error_accessors() {
        let resolver = MemoryResolver::new();
        let mut parser = Parser::new(Lexer::new("let 1"), ".", &resolver);
        let program = parser.parse_program();
        assert!(program.statements.is_empty());
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(
            parser.error_strings(),
            ["Syntax Error: <input>:1:5 - expected next token to be IDENT, got INT instead"]
        );
    }

    #[test]
    fn test_end_never_precedes_pos() {
        let source = r#"
let a = [1, 2, 3]
fn f(x) { }
class C { fn m() { } }
enum E { A }
let h = {"k" => v}
if a { } else { }
for x in xs { }
try { } finally { }
x.y(1)[2]
"#;
        let program = parse_ok(source);
        for stmt in &program.statements {
            assert!(stmt.end().offset >= stmt.pos().offset, "end before pos for `{stmt}`");
        }
    }

    // ========================================================================
    // Includes
    // ========================================================================

    #[test]
    fn test_include_is_deduplicated() {
        let resolver = MemoryResolver::new().with_file("lib.sbl", "let a = 1");
        let (program, errors) = parse_with("include lib\ninclude lib\nlet b = 2", &resolver);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(program.includes.len(), 1);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.to_string(), "include lib\nlet b = 2");

        let included = program.include("lib").and_then(|i| i.program.as_ref());
        assert_eq!(included.map(ToString::to_string).as_deref(), Some("let a = 1"));
    }

    #[test]
    fn test_quoted_include_and_module_directory() {
        let resolver = MemoryResolver::new().with_file("pkg/module.sbl", "let m = 1");
        let (program, errors) = parse_with("include \"pkg\"", &resolver);
        assert!(errors.is_empty(), "{errors:?}");
        let include = program.include("pkg");
        assert!(include.is_some_and(|i| i.quoted && i.is_module));
        assert_eq!(program.to_string(), "include \"pkg\"");
    }

    #[test]
    fn test_missing_include_is_recorded() {
        let (program, errors) = parse("include missing\nlet a = 1");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("cannot resolve include 'missing'"), "{}", errors[0]);
        assert!(program.include("missing").is_some_and(|i| i.program.is_none()));
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_nested_include_errors_carry_their_filename() {
        let resolver = MemoryResolver::new().with_file("bad.sbl", "let = 1");
        let (_, errors) = parse_with("include bad", &resolver);
        assert_eq!(errors.len(), 1);
        assert_eq!(&*errors[0].pos.filename, "bad.sbl");
    }

    #[test]
    fn test_circular_include_is_error() {
        let resolver = MemoryResolver::new()
            .with_file("a.sbl", "include b")
            .with_file("b.sbl", "include a");
        let (program, errors) = parse_with("include a", &resolver);
        let msgs: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, ["circular include of 'a.sbl'"]);
        assert!(program.include("a").is_some_and(|i| i.program.is_some()));
    }
}
