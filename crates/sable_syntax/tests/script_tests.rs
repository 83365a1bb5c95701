//! Whole-script parsing: a realistic program mixing declarations, control flow and recovery.

use sable_syntax::ParseConfig;
use sable_syntax::ast::{Node, Statement};
use sable_syntax::docs::{DocKind, collect_doc_items};
use sable_syntax::parser::parse_with_resolver;
use sable_syntax::resolver::MemoryResolver;

const SCRIPT: &str = r#"
# Shared counter.
let total = 0

// Shapes we know how to draw.
enum Shape { Circle, Square = 4, Triangle }

# A point in the plane.
class Point : Base {
    let x = 0
    public fn move(dx) { x += dx }
    property name { get; set { this.n = value } }
}

fn run(items, ...rest) {
    for item in items where item != nil {
        case item is {
            1, 2 { total += item }
            else { continue }
        }
    }
    let names = [p.name for p in items]
    try {
        risky(names)
    } catch "IOError" {
        total = -1
    } finally {
        close()
    }
    return total > 0 ? 'ok: {total}' : "none"
}
"#;

fn parse(source: &str) -> (sable_syntax::ast::Program, Vec<sable_syntax::SyntaxError>) {
    parse_with_resolver(source, &ParseConfig::new().with_filename("script.sbl"), &MemoryResolver::new())
}

#[test]
fn test_script_parses_cleanly() {
    let (program, errors) = parse(SCRIPT);
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert!(messages.is_empty(), "{messages:#?}");

    let kinds: Vec<&str> = program
        .statements
        .iter()
        .map(|s| match s {
            Statement::Let(_) => "let",
            Statement::Enum(_) => "enum",
            Statement::Class(_) => "class",
            Statement::Function(_) => "fn",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["let", "enum", "class", "fn"]);

    for stmt in &program.statements {
        assert!(stmt.end().offset >= stmt.pos().offset);
        assert_eq!(&*stmt.pos().filename, "script.sbl");
    }
}

#[test]
fn test_script_doc_items() {
    let (program, _) = parse(SCRIPT);
    let items = collect_doc_items(&program, SCRIPT);
    let summary: Vec<(DocKind, &str, Option<&str>)> =
        items.iter().map(|i| (i.kind, i.name.as_str(), i.doc.as_deref())).collect();
    assert_eq!(
        summary,
        [
            (DocKind::Let, "total", Some("Shared counter.")),
            (DocKind::Enum, "Shape", Some("Shapes we know how to draw.")),
            (DocKind::Class, "Point", Some("A point in the plane.")),
            (DocKind::Function, "run", None),
        ]
    );
    assert!(items[1].text.starts_with("enum Shape"));
}

#[test]
fn test_mistakes_are_reported_once_and_parsing_continues() {
    let source = "let = 1\nlet ok = 2\nfn f() { break }\nlet after = ok";
    let (program, errors) = parse(source);
    let lines: Vec<usize> = errors.iter().map(|e| e.pos.line).collect();
    assert_eq!(lines, [1, 3]);
    assert_eq!(errors[1].message, "'break' outside of a loop");

    let names: Vec<String> = program
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::Let(l) => Some(l.name.value.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["ok", "after"]);
}
