/// Public parsing entrypoints.
///
/// ## Notes
/// - Both entrypoints always return a [`Program`]; an empty error list means the source parsed cleanly.

/// Parse `source`, resolving includes from the filesystem.
///
/// ## Parameters
/// - `source`: Sable source text.
/// - `config`: filename for positions, include base directory, extension and module file stem.
///
/// ## Returns
/// - The parsed program and every lexical/syntax error encountered.
#[tracing::instrument(skip_all, fields(filename = %config.filename, source_len = source.len()))]
pub fn parse_source(source: &str, config: &ParseConfig) -> (Program, Vec<SyntaxError>) {
    let resolver = FsResolver::from_config(config);
    parse_with_resolver(source, config, &resolver)
}

/// Parse `source`, resolving includes through `resolver`.
pub fn parse_with_resolver(
    source: &str,
    config: &ParseConfig,
    resolver: &dyn ModuleResolver,
) -> (Program, Vec<SyntaxError>) {
    let lexer = Lexer::with_filename(source, config.filename.as_str());
    let chain = root_chain(&config.filename);
    let mut parser = Parser::with_include_chain(lexer, config.work_dir.clone(), resolver, chain);
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// The include chain of a top-level parse: the root file itself, when it names one on disk.
fn root_chain(filename: &str) -> Vec<PathBuf> {
    let path = Path::new(filename);
    match path.canonicalize() {
        Ok(file) if file.is_file() => vec![file],
        _ => Vec::new(),
    }
}
