/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Advancing the two-token window (`next_token`)
/// - Checking / expecting keywords, operators, and punctuation
/// - Recording errors
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Shift the lookahead window by one token, collecting any lexical errors produced on the way.
    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
        self.errors.extend(self.lexer.take_errors());
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn cur_is_keyword(&self, id: KeywordId) -> bool {
        self.cur_token.kind.is_keyword(id)
    }

    fn peek_is_keyword(&self, id: KeywordId) -> bool {
        self.peek_token.kind.is_keyword(id)
    }

    fn cur_is_punct(&self, id: PunctuationId) -> bool {
        self.cur_token.kind.is_punctuation(id)
    }

    fn peek_is_punct(&self, id: PunctuationId) -> bool {
        self.peek_token.kind.is_punctuation(id)
    }

    fn peek_is_op(&self, id: OperatorId) -> bool {
        self.peek_token.kind.is_operator(id)
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token.kind.precedence()
    }

    /// If the next token is `kind`, advance onto it; otherwise record an error and stay put.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn expect_peek_punct(&mut self, id: PunctuationId) -> bool {
        self.expect_peek(TokenKind::Punctuation(id))
    }

    /// If the next token is `;`, consume it.
    fn skip_semicolon(&mut self) {
        if self.peek_is_punct(PunctuationId::Semicolon) {
            self.next_token();
        }
    }

    /// `true` if the next token can begin an operand (used by `return` / `yield` with optional values).
    fn peek_starts_operand(&self) -> bool {
        match self.peek_token.kind {
            TokenKind::Eof => false,
            TokenKind::Punctuation(id) => !matches!(
                id,
                PunctuationId::Semicolon
                    | PunctuationId::RBrace
                    | PunctuationId::RParen
                    | PunctuationId::RBracket
                    | PunctuationId::Comma
            ),
            TokenKind::Keyword(_) => Self::prefix_parse_fn(&self.peek_token.kind).is_some(),
            _ => true,
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn error_at(&mut self, token: &Token, message: impl Into<String>) {
        self.errors.push(SyntaxError::at_token(token, message));
    }

    fn error_at_cur(&mut self, message: impl Into<String>) {
        let err = SyntaxError::at_token(&self.cur_token, message);
        self.errors.push(err);
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let message = format!("expected next token to be {expected}, got {} instead", self.peek_token.kind);
        let err = SyntaxError::at_token(&self.peek_token, message);
        self.errors.push(err);
    }

    /// No handler for `cur_token` in operand position.
    ///
    /// Tokens the lexer already rejected (e.g. `5x`) have an error at the same offset; don't report them twice.
    fn no_prefix_parse_fn_error(&mut self) {
        let token = &self.cur_token;
        let already_reported = self
            .errors
            .iter()
            .rev()
            .any(|e| e.pos.offset == token.pos.offset && e.pos.filename == token.pos.filename);
        if already_reported {
            return;
        }
        let message = format!("no prefix parse function for {} found", token.kind);
        self.error_at_cur(message);
    }

    /// With `cur_token` on `{`: `true` for `{}` and `{ key => ...`.
    fn brace_opens_hash(&self) -> bool {
        self.peek_is_punct(PunctuationId::RBrace) || self.lexer.peek_kind().is_punctuation(PunctuationId::FatArrow)
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip to a plausible statement boundary after a failed statement.
    ///
    /// Stops on a `;`, or before a closing `}`, the end of input, or a keyword that starts a statement. A failure that
    /// already sits on such a keyword (`let x = let y = 2`) resumes right there, unless it is where the failed statement
    /// began at offset `start`.
    fn synchronize(&mut self, start: usize) {
        let from = self.cur_token.pos.clone();
        if self.cur_token.kind.starts_statement() && self.cur_token.pos.offset != start {
            self.resume_on_cur = true;
            tracing::trace!(from = %from, "resuming at statement keyword");
            return;
        }
        while !self.cur_is_punct(PunctuationId::Semicolon)
            && !self.cur_is_punct(PunctuationId::RBrace)
            && !self.cur_is(TokenKind::Eof)
        {
            if self.peek_is_punct(PunctuationId::RBrace)
                || self.peek_is(TokenKind::Eof)
                || self.peek_token.kind.starts_statement()
            {
                break;
            }
            self.next_token();
        }
        tracing::trace!(from = %from, to = %self.cur_token.pos, "recovered after syntax error");
    }
}
