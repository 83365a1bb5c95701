//! Doc-item extraction.
//!
//! For every top-level `let`, `fn`, `class` and `enum`, slice the declaration text out of the source using the node's
//! `pos()..end()` range, and collect the block of comment lines directly above it. Documentation generators consume
//! the resulting [`DocItem`]s; rendering them is not this crate's job.

use std::fmt;

use crate::ast::{Node, Position, Program, Statement};

/// Kind of declaration a [`DocItem`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Let,
    Function,
    Class,
    Enum,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKind::Let => f.write_str("let"),
            DocKind::Function => f.write_str("fn"),
            DocKind::Class => f.write_str("class"),
            DocKind::Enum => f.write_str("enum"),
        }
    }
}

/// One documented top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DocItem {
    pub kind: DocKind,
    pub name: String,
    /// Comment lines immediately above the declaration, markers stripped, joined with `\n`.
    pub doc: Option<String>,
    /// Verbatim declaration text.
    pub text: String,
    pub pos: Position,
}

impl fmt::Display for DocItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} ({}:{})", self.kind, self.name, self.pos.line, self.pos.column)?;
        if let Some(doc) = &self.doc {
            for line in doc.lines() {
                writeln!(f, "  | {line}")?;
            }
        }
        write!(f, "  {}", self.text)
    }
}

/// Collect doc items for the top-level declarations of `program`, which was parsed from `source`.
pub fn collect_doc_items(program: &Program, source: &str) -> Vec<DocItem> {
    program
        .statements
        .iter()
        .filter_map(|stmt| {
            let (kind, name) = match stmt {
                Statement::Let(s) => (DocKind::Let, s.name.value.clone()),
                Statement::Function(s) => (DocKind::Function, s.name.value.clone()),
                Statement::Class(s) => (DocKind::Class, s.name.value.clone()),
                Statement::Enum(s) => (DocKind::Enum, s.name.value.clone()),
                _ => return None,
            };
            let pos = stmt.pos();
            let text = source.get(pos.offset..stmt.end().offset)?.to_string();
            let doc = leading_comment(source, pos.offset);
            Some(DocItem {
                kind,
                name,
                doc,
                text,
                pos,
            })
        })
        .collect()
}

/// The run of `#` / `//` comment lines ending on the line just above `offset`.
///
/// A blank line or any code line ends the run.
fn leading_comment(source: &str, offset: usize) -> Option<String> {
    let before = source.get(..offset)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    if !before[line_start..].trim().is_empty() {
        // Something precedes the declaration on its own line.
        return None;
    }

    let mut lines: Vec<&str> = Vec::new();
    for line in before[..line_start].lines().rev() {
        let trimmed = line.trim_start();
        let text = if let Some(rest) = trimmed.strip_prefix("//") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix('#') {
            rest
        } else {
            break;
        };
        lines.push(text.strip_prefix(' ').unwrap_or(text).trim_end());
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::parser::parse_with_resolver;
    use crate::resolver::MemoryResolver;

    fn items(source: &str) -> Vec<DocItem> {
        let (program, errors) = parse_with_resolver(source, &ParseConfig::new(), &MemoryResolver::new());
        assert!(errors.is_empty(), "{errors:?}");
        collect_doc_items(&program, source)
    }

    #[test]
    fn test_collects_declarations_with_comments() {
        let source = "# Adds two numbers.\n# Returns the sum.\nfn add(a, b) { a + b }\n\nlet limit = 10\n";
        let items = items(source);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].kind, DocKind::Function);
        assert_eq!(items[0].name, "add");
        assert_eq!(items[0].doc.as_deref(), Some("Adds two numbers.\nReturns the sum."));
        assert_eq!(items[0].text, "fn add(a, b) { a + b }");

        assert_eq!(items[1].kind, DocKind::Let);
        assert_eq!(items[1].doc, None);
        assert_eq!(items[1].text, "let limit = 10");
    }

    #[test]
    fn test_slash_comments_and_blank_line_break() {
        let source = "// stale\n\n// Colors.\nenum Color { Red, Green }\n";
        let items = items(source);
        assert_eq!(items[0].doc.as_deref(), Some("Colors."));
        assert_eq!(items[0].text, "enum Color { Red, Green }");
    }

    #[test]
    fn test_class_text_spans_body() {
        let source = "class A {\n  fn m() { }\n}\nA";
        let items = items(source);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "class A {\n  fn m() { }\n}");
    }

    #[test]
    fn test_expression_statements_are_skipped() {
        assert!(items("print(1)\nx = 2").is_empty());
    }
}
