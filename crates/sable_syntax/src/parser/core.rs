/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the prefix/infix handler types, and the top-level
/// [`Parser::parse_program`] loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - Handlers follow one convention: they are entered with `cur_token` on the first token of their construct and
///   return with `cur_token` on its last token.
type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Option<Expression>;
type InfixParseFn<'a> = fn(&mut Parser<'a>, Expression) -> Option<Expression>;

/// Parser state.
///
/// ## Notes
/// - Two tokens of lookahead: `cur_token` and `peek_token`.
/// - Errors are accumulated, never returned early; see [`Parser::errors`].
/// - `loop_depth` tracks whether `break`/`continue` are legal at the current point.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<SyntaxError>,
    /// Number of enclosing loop bodies, reset inside function bodies.
    loop_depth: u32,
    /// Directory `include` paths are resolved against.
    work_dir: PathBuf,
    resolver: &'a dyn ModuleResolver,
    includes: BTreeMap<String, IncludeStatement>,
    /// Files currently being parsed by this parser and its ancestors.
    include_chain: Vec<PathBuf>,
    /// Set when recovery stopped on the first token of the next statement; the statement loop must not advance.
    resume_on_cur: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser over `lexer`, resolving includes relative to `work_dir`.
    pub fn new(lexer: Lexer<'a>, work_dir: impl Into<PathBuf>, resolver: &'a dyn ModuleResolver) -> Self {
        Self::with_include_chain(lexer, work_dir.into(), resolver, Vec::new())
    }

    fn with_include_chain(
        mut lexer: Lexer<'a>,
        work_dir: PathBuf,
        resolver: &'a dyn ModuleResolver,
        include_chain: Vec<PathBuf>,
    ) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        let errors = lexer.take_errors();
        Self {
            lexer,
            cur_token,
            peek_token,
            errors,
            loop_depth: 0,
            work_dir,
            resolver,
            includes: BTreeMap::new(),
            include_chain,
            resume_on_cur: false,
        }
    }

    /// Parse the whole token stream into a [`Program`].
    ///
    /// Never fails: problems are recorded in [`Parser::errors`] and parsing continues with the next statement.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement_recovering() {
                statements.push(stmt);
            }
            self.advance_statement();
        }

        Program {
            statements,
            includes: std::mem::take(&mut self.includes),
        }
    }

    /// Errors recorded so far, in source order of discovery.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Errors rendered as `Syntax Error: <file>:<line>:<col> - <message>` lines.
    pub fn error_strings(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    // ========================================================================
    // Pratt core
    // ========================================================================

    /// Parse an expression whose operators all bind tighter than `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = Self::prefix_parse_fn(&self.cur_token.kind) else {
            self.no_prefix_parse_fn_error();
            return None;
        };
        let mut left = prefix(self)?;

        while !self.peek_is_punct(PunctuationId::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_parse_fn(&self.peek_token.kind) else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    /// Handler for a token in prefix (operand) position.
    fn prefix_parse_fn(kind: &TokenKind) -> Option<PrefixParseFn<'a>> {
        let f: PrefixParseFn<'a> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::Float => Self::parse_float_literal,
            TokenKind::Str | TokenKind::RawStr => Self::parse_string_literal,
            TokenKind::InterpStr => Self::parse_interpolated_string,
            TokenKind::Regex => Self::parse_regex_literal,

            TokenKind::Operator(OperatorId::Minus | OperatorId::Plus | OperatorId::Bang) => {
                Self::parse_prefix_expression
            }
            TokenKind::Operator(OperatorId::Colon) => Self::parse_open_slice,

            TokenKind::Punctuation(PunctuationId::LParen) => Self::parse_grouped_or_tuple,
            TokenKind::Punctuation(PunctuationId::LBracket) => Self::parse_array_literal,
            TokenKind::Punctuation(PunctuationId::LBrace) => Self::parse_hash_literal,

            TokenKind::Keyword(id) => match id {
                KeywordId::True | KeywordId::False => Self::parse_boolean,
                KeywordId::Nil => Self::parse_nil,
                KeywordId::If => Self::parse_if_expression,
                KeywordId::Unless => Self::parse_unless_expression,
                KeywordId::Case => Self::parse_case_expression,
                KeywordId::For => Self::parse_for_expression,
                KeywordId::While => Self::parse_while_expression,
                KeywordId::Do => Self::parse_do_expression,
                KeywordId::Fn => Self::parse_function_literal,
                KeywordId::Class => Self::parse_class_literal,
                KeywordId::New => Self::parse_new_expression,
                KeywordId::Enum => Self::parse_enum_literal,
                KeywordId::Struct => Self::parse_struct_literal,
                KeywordId::Try => Self::parse_try_expression,
                KeywordId::Grep | KeywordId::Map => Self::parse_list_op,
                KeywordId::Break => Self::parse_break,
                KeywordId::Continue => Self::parse_continue,
                KeywordId::Yield => Self::parse_yield,
                KeywordId::Qw => Self::parse_word_list,
                _ => return None,
            },

            _ => return None,
        };
        Some(f)
    }

    /// Handler for a token in infix/postfix position.
    fn infix_parse_fn(kind: &TokenKind) -> Option<InfixParseFn<'a>> {
        let f: InfixParseFn<'a> = match kind {
            TokenKind::Operator(id) => match id {
                OperatorId::PlusPlus | OperatorId::MinusMinus => Self::parse_postfix_expression,
                OperatorId::PipeGt => Self::parse_pipe_expression,
                OperatorId::Question => Self::parse_ternary_expression,
                OperatorId::Colon => Self::parse_slice_expression,
                OperatorId::Bang => return None,
                id if operators::is_assignment(*id) => Self::parse_assign_expression,
                _ => Self::parse_infix_expression,
            },
            TokenKind::Punctuation(PunctuationId::LParen) => Self::parse_call_expression,
            TokenKind::Punctuation(PunctuationId::LBracket) => Self::parse_index_expression,
            TokenKind::Punctuation(PunctuationId::Dot) => Self::parse_method_call,
            _ => return None,
        };
        Some(f)
    }
}
