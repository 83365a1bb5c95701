//! CLI module for the Sable front end
//!
//! ## Commands
//!
//! - `sable <file>` / `--parse <file>` - Parse and print the canonical rendering of the program
//! - `--lex <file>` - Print the token stream
//! - `--docs <file>` - Print the documented top-level declarations
//!
//! ## Design
//!
//! Arguments are a clap derive struct. Commands report failure through `CliResult`; `run()` is the single place
//! that turns a failure into a process exit status.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sable_syntax::ParseConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// A failed command: what to print on stderr and the status to exit with.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// Printed verbatim; may span several lines of rendered diagnostics
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Shorthand for a failure with status 1.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Lexer and parser driver for the Sable scripting language
#[derive(Parser, Debug)]
#[command(name = "sable")]
#[command(version = VERSION)]
#[command(about = "Lexer and parser driver for the Sable scripting language", long_about = None)]
pub struct Cli {
    /// File to parse (default action when no flag given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tokenize only
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["file", "parse_file", "docs_file"])]
    pub lex_file: Option<PathBuf>,

    /// Parse and print the program
    #[arg(long = "parse", value_name = "FILE", conflicts_with_all = ["file", "docs_file"])]
    pub parse_file: Option<PathBuf>,

    /// Print documented top-level declarations
    #[arg(long = "docs", value_name = "FILE", conflicts_with = "file")]
    pub docs_file: Option<PathBuf>,

    /// Source file extension used when resolving includes
    #[arg(long = "ext", value_name = "EXT", default_value = "sbl")]
    pub extension: String,
}

impl Cli {
    /// Parse configuration for `file`, honouring `--ext`.
    pub fn config_for(&self, file: &std::path::Path) -> ParseConfig {
        ParseConfig::for_file(file).with_extension(self.extension.as_str())
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Parse arguments, dispatch, and exit with the command's status.
pub fn run() {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Dispatch to the selected command. Flags win over the positional file.
fn execute(cli: &Cli) -> CliResult<ExitCode> {
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file);
    }
    if let Some(file) = &cli.docs_file {
        return commands::docs_file(file, &cli.config_for(file));
    }
    match cli.parse_file.as_ref().or(cli.file.as_ref()) {
        Some(file) => commands::parse_file(file, &cli.config_for(file)),
        None => Err(CliError::failure("Error: no input file (try --help)")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_file() {
        let cli = Cli::try_parse_from(["sable", "script.sbl"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("script.sbl")));
        assert_eq!(cli.extension, "sbl");
    }

    #[test]
    fn test_cli_debug_flags() {
        let cli = Cli::try_parse_from(["sable", "--lex", "a.sbl"]).unwrap();
        assert_eq!(cli.lex_file, Some(PathBuf::from("a.sbl")));

        let cli = Cli::try_parse_from(["sable", "--parse", "a.sbl"]).unwrap();
        assert_eq!(cli.parse_file, Some(PathBuf::from("a.sbl")));

        let cli = Cli::try_parse_from(["sable", "--docs", "a.sbl"]).unwrap();
        assert_eq!(cli.docs_file, Some(PathBuf::from("a.sbl")));
    }

    #[test]
    fn test_cli_debug_flags_conflict_with_file() {
        assert!(Cli::try_parse_from(["sable", "--lex", "a.sbl", "b.sbl"]).is_err());
        assert!(Cli::try_parse_from(["sable", "--lex", "a.sbl", "--parse", "b.sbl"]).is_err());
    }

    #[test]
    fn test_cli_extension_feeds_config() {
        let cli = Cli::try_parse_from(["sable", "--ext", ".lib", "dir/main.lib"]).unwrap();
        let config = cli.config_for(std::path::Path::new("dir/main.lib"));
        assert_eq!(config.extension, "lib");
        assert_eq!(config.work_dir, PathBuf::from("dir"));
        assert_eq!(config.filename, "dir/main.lib");
    }

    #[test]
    fn test_execute_without_file_fails() {
        let cli = Cli::try_parse_from(["sable"]).unwrap();
        let err = execute(&cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
