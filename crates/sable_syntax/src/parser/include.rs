/// `include` resolution.
///
/// ## Notes
/// - Includes never become statements: they are recorded in the program's include map, keyed by the literal
///   include text. A repeated include is absorbed without re-parsing.
/// - The module source is parsed by a nested [`Parser`] rooted at the module's directory. Its errors are appended to
///   ours; a failed resolution is recorded as an error and leaves `program` empty.
impl<'a> Parser<'a> {
    /// `include name` / `include "path"`
    fn parse_include_statement(&mut self) {
        let token = self.cur_token.clone();
        let quoted = match self.peek_token.kind {
            TokenKind::Ident => false,
            TokenKind::Str | TokenKind::RawStr => true,
            _ => {
                let message = format!("expected include path, got {} instead", self.peek_token.kind);
                let err = SyntaxError::at_token(&self.peek_token, message);
                self.errors.push(err);
                return;
            }
        };
        self.next_token();
        let path_token = self.cur_token.clone();
        let path = path_token.literal.clone();

        if self.includes.contains_key(&path) {
            tracing::debug!(path = %path, "include already resolved, skipping");
            return;
        }

        let mut include = IncludeStatement {
            token,
            path: path.clone(),
            quoted,
            program: None,
            is_module: false,
            end: path_token.end.clone(),
        };

        match self.resolve_include(&path) {
            Ok((program, is_module)) => {
                include.program = Some(program);
                include.is_module = is_module;
            }
            Err(err) => self.error_at(&path_token, err.to_string()),
        }

        self.includes.insert(path, include);
    }

    /// Locate `path` through the resolver and parse it with a nested parser.
    #[tracing::instrument(skip(self), fields(work_dir = %self.work_dir.display()))]
    fn resolve_include(&mut self, path: &str) -> Result<(Program, bool), ResolveError> {
        let module = self.resolver.resolve(&self.work_dir, path)?;
        if self.include_chain.contains(&module.file) {
            return Err(ResolveError::Circular(module.file));
        }
        tracing::debug!(file = %module.file.display(), is_module = module.is_module, "resolved include");

        let mut chain = self.include_chain.clone();
        chain.push(module.file.clone());

        let filename = module.file.display().to_string();
        let lexer = Lexer::with_filename(&module.source, filename);
        let mut sub = Parser::with_include_chain(lexer, module.dir.clone(), self.resolver, chain);
        let program = sub.parse_program();
        self.errors.extend(sub.into_errors());

        Ok((program, module.is_module))
    }
}
