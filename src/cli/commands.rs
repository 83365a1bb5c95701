//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use miette::{NamedSource, Report};
use sable_syntax::docs::collect_doc_items;
use sable_syntax::lexer::{Lexer, Token};
use sable_syntax::{ParseConfig, SyntaxError, parse_source};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or exceeds `MAX_SOURCE_SIZE`.
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let shown = file_path.display();
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{shown}': {e}")))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{shown}' is too large ({} bytes, max {MAX_SOURCE_SIZE} bytes)",
            metadata.len()
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{shown}': {e}")))
}

/// Render syntax errors with source context.
///
/// Errors from included files are rendered against that file's text; if it can't be read the plain one-line form is
/// used instead.
pub fn render_errors(root_name: &str, root_source: &str, errors: Vec<SyntaxError>) -> String {
    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    sources.insert(root_name.to_string(), Some(root_source.to_string()));

    let mut out = String::new();
    for err in errors {
        let filename = err.pos.filename.to_string();
        let text = sources
            .entry(filename.clone())
            .or_insert_with(|| fs::read_to_string(&filename).ok())
            .clone();
        match text {
            Some(text) => {
                let report = Report::new(err).with_source_code(NamedSource::new(filename, text));
                out.push_str(&format!("{report:?}\n"));
            }
            None => out.push_str(&format!("{err}\n")),
        }
    }
    out
}

/// One `KIND("literal") @ line:col` line per token.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Tokenize and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let name = file_path.display().to_string();
    let (tokens, errors) = Lexer::with_filename(&source, name.as_str()).tokenize();

    println!("{}", render_tokens(&tokens));
    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(render_errors(&name, &source, errors).trim_end()))
    }
}

/// Parse and display the canonical rendering of the program.
pub fn parse_file(file_path: &Path, config: &ParseConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let (program, errors) = parse_source(&source, config);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "parse failed");
        return Err(CliError::failure(render_errors(&config.filename, &source, errors).trim_end()));
    }

    println!("{program}");
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the documented top-level declarations.
pub fn docs_file(file_path: &Path, config: &ParseConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let (program, errors) = parse_source(&source, config);
    if !errors.is_empty() {
        return Err(CliError::failure(render_errors(&config.filename, &source, errors).trim_end()));
    }

    for item in collect_doc_items(&program, &source) {
        println!("{item}\n");
    }
    Ok(ExitCode::SUCCESS)
}
