/// Statement parsing.
///
/// This chunk handles statement dispatch, `let`, `return`, the `keyword expr` statements (`defer`, `spawn`,
/// `throw`), expression statements, and `{ }` blocks.
///
/// In statement position `{` opens a block, except for `{}` and `{ key => ...`, which are hash literals.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse one statement and recover if it failed.
    ///
    /// Recovery only runs when the statement produced no node *and* recorded an error; a resolved `include`
    /// also produces no node but is not a failure.
    fn parse_statement_recovering(&mut self) -> Option<Statement> {
        let errors_before = self.errors.len();
        let start = self.cur_token.pos.offset;
        let stmt = self.parse_statement();
        if stmt.is_none() && self.errors.len() > errors_before {
            self.synchronize(start);
        }
        stmt
    }

    /// Step to the first token of the next statement.
    fn advance_statement(&mut self) {
        if !std::mem::take(&mut self.resume_on_cur) {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        let stmt = match self.cur_token.kind {
            TokenKind::Keyword(KeywordId::Let) => self.parse_let_statement().map(Statement::Let),
            TokenKind::Keyword(KeywordId::Return) => self.parse_return_statement(),
            TokenKind::Keyword(KeywordId::Defer) => self.parse_defer_statement(),
            TokenKind::Keyword(KeywordId::Spawn) => self.parse_spawn_statement(),
            TokenKind::Keyword(KeywordId::Throw) => self.parse_throw_statement(),
            TokenKind::Keyword(KeywordId::Include) => {
                self.parse_include_statement();
                None
            }
            TokenKind::Keyword(KeywordId::Fn) if self.peek_is(TokenKind::Ident) => self.parse_function_statement(),
            TokenKind::Keyword(KeywordId::Class) if self.peek_is(TokenKind::Ident) => self.parse_class_statement(),
            TokenKind::Keyword(KeywordId::Enum) if self.peek_is(TokenKind::Ident) => self.parse_enum_statement(),
            TokenKind::Punctuation(PunctuationId::LBrace) if !self.brace_opens_hash() => {
                Some(Statement::Block(self.parse_block_statement()))
            }
            _ => self.parse_expression_statement(),
        };
        self.skip_semicolon();
        stmt
    }

    /// `let name [= value]`
    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::from_token(self.cur_token.clone());

        let value = if self.peek_is_op(OperatorId::Eq) {
            self.next_token();
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        } else {
            None
        };

        Some(LetStatement {
            token,
            name,
            value,
            modifier: ModifierLevel::Default,
            is_static: false,
        })
    }

    /// `return [value]`
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let value = if self.peek_starts_operand() {
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        } else {
            None
        };
        Some(Statement::Return(ReturnStatement { token, value }))
    }

    fn parse_defer_statement(&mut self) -> Option<Statement> {
        let (token, value) = self.parse_keyword_operand()?;
        Some(Statement::Defer(DeferStatement { token, value }))
    }

    fn parse_spawn_statement(&mut self) -> Option<Statement> {
        let (token, value) = self.parse_keyword_operand()?;
        Some(Statement::Spawn(SpawnStatement { token, value }))
    }

    fn parse_throw_statement(&mut self) -> Option<Statement> {
        let (token, value) = self.parse_keyword_operand()?;
        Some(Statement::Throw(ThrowStatement { token, value }))
    }

    /// The keyword token and the mandatory expression that follows it.
    fn parse_keyword_operand(&mut self) -> Option<(Token, Expression)> {
        let token = self.cur_token.clone();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some((token, value))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        Some(Statement::Expression(ExpressionStatement { token, expression }))
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Parse `{ statements }` with `cur_token` on the `{`. Returns with `cur_token` on the `}`.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();
        self.next_token();

        while !self.cur_is_punct(PunctuationId::RBrace) && !self.cur_is(TokenKind::Eof) {
            match self.parse_statement_recovering() {
                Some(stmt) => statements.push(stmt),
                // A failed statement may stop on the closing brace; don't step past it.
                None if self.cur_is_punct(PunctuationId::RBrace) => break,
                None => {}
            }
            self.advance_statement();
        }

        if self.cur_is(TokenKind::Eof) {
            self.error_at(&token, "unterminated block: expected '}'");
        }

        BlockStatement {
            token,
            statements,
            rbrace: self.cur_token.end.clone(),
        }
    }

    /// Expect a `{` next and parse the block it opens.
    fn parse_braced_block(&mut self) -> Option<BlockStatement> {
        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        Some(self.parse_block_statement())
    }

    /// Parse a loop body: `break` and `continue` are legal inside.
    fn parse_loop_body(&mut self) -> Option<BlockStatement> {
        self.loop_depth += 1;
        let body = self.parse_braced_block();
        self.loop_depth -= 1;
        body
    }

    /// Parse a function body: enclosing loops do not extend into it.
    fn parse_function_body(&mut self) -> Option<BlockStatement> {
        let saved = std::mem::replace(&mut self.loop_depth, 0);
        let body = self.parse_braced_block();
        self.loop_depth = saved;
        body
    }
}
