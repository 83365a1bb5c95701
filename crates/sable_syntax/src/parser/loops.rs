/// Control flow: conditionals, `case`, loops, and `try`.
///
/// ## Notes
/// - Loop bodies (`for`, `while`, `do`) are parsed through [`Parser::parse_loop_body`], which is what makes
///   `break`/`continue` legal inside them.
/// - Conditions need no parentheses; `if (c) { }` works because `(c)` is an ordinary grouped expression.
impl<'a> Parser<'a> {
    // ========================================================================
    // Conditionals
    // ========================================================================

    /// `if c { } elsif c { } else { }` (`elseif` is accepted for `elsif`).
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let mut arms = vec![self.parse_conditional_arm()?];

        while self.peek_is_keyword(KeywordId::Elsif) {
            self.next_token();
            arms.push(self.parse_conditional_arm()?);
        }

        let alternative = self.parse_else_block()?;
        Some(Expression::If(IfExpression {
            token,
            arms,
            alternative,
        }))
    }

    /// `condition { block }`, with `cur_token` on the keyword before the condition.
    fn parse_conditional_arm(&mut self) -> Option<ConditionalArm> {
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        let block = self.parse_braced_block()?;
        Some(ConditionalArm { condition, block })
    }

    /// An optional trailing `else { }`. The outer `None` means the `else` was malformed.
    fn parse_else_block(&mut self) -> Option<Option<BlockStatement>> {
        if !self.peek_is_keyword(KeywordId::Else) {
            return Some(None);
        }
        self.next_token();
        Some(Some(self.parse_braced_block()?))
    }

    /// `unless c { } else { }`
    fn parse_unless_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let ConditionalArm { condition, block } = self.parse_conditional_arm()?;
        let alternative = self.parse_else_block()?;
        Some(Expression::Unless(UnlessExpression {
            token,
            condition: Box::new(condition),
            consequence: block,
            alternative,
        }))
    }

    /// `case subject is|in { l1, l2 { } ... else { } }`
    fn parse_case_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();
        let subject = self.parse_expression(Precedence::Lowest)?;

        let mode = if self.peek_is_keyword(KeywordId::Is) {
            CaseMode::Is
        } else if self.peek_is_keyword(KeywordId::In) {
            CaseMode::In
        } else {
            let message = format!("expected 'is' or 'in' after case subject, got {} instead", self.peek_token.kind);
            let err = SyntaxError::at_token(&self.peek_token, message);
            self.errors.push(err);
            return None;
        };
        self.next_token();

        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        self.next_token();

        let mut arms = Vec::new();
        let mut default = None;
        while !self.cur_is_punct(PunctuationId::RBrace) && !self.cur_is(TokenKind::Eof) {
            if self.cur_is_keyword(KeywordId::Else) {
                let else_token = self.cur_token.clone();
                let block = self.parse_braced_block()?;
                if default.is_some() {
                    self.error_at(&else_token, "case has more than one else arm");
                } else {
                    default = Some(block);
                }
            } else {
                let mut labels = vec![self.parse_expression(Precedence::Lowest)?];
                while self.peek_is_punct(PunctuationId::Comma) {
                    self.next_token();
                    self.next_token();
                    labels.push(self.parse_expression(Precedence::Lowest)?);
                }
                let block = self.parse_braced_block()?;
                arms.push(CaseArm { labels, block });
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            self.error_at(&token, "unterminated case: expected '}'");
            return None;
        }

        Some(Expression::Case(CaseExpression {
            token,
            subject: Box::new(subject),
            mode,
            arms,
            default,
            end: self.cur_token.end.clone(),
        }))
    }

    // ========================================================================
    // Loops
    // ========================================================================

    /// `for { }`, `for (init; cond; update) { }`, or `for <clause> { }`.
    fn parse_for_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        let kind = if self.peek_is_punct(PunctuationId::LBrace) {
            ForKind::Forever
        } else if self.peek_is_punct(PunctuationId::LParen) {
            self.next_token();
            self.parse_c_style_header()?
        } else {
            ForKind::Each(self.parse_for_clause()?)
        };

        let block = self.parse_loop_body()?;
        Some(Expression::For(ForExpression { token, kind, block }))
    }

    /// `(init; condition; update)`, with `cur_token` on the `(`.
    fn parse_c_style_header(&mut self) -> Option<ForKind> {
        self.next_token();
        let init = self.parse_statement()?;
        // `parse_statement` swallows an optional `;`; require one either way.
        if !self.cur_is_punct(PunctuationId::Semicolon) && !self.expect_peek_punct(PunctuationId::Semicolon) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek_punct(PunctuationId::Semicolon) {
            return None;
        }

        self.next_token();
        let update = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek_punct(PunctuationId::RParen) {
            return None;
        }

        Some(ForKind::CStyle {
            init: Box::new(init),
            condition: Box::new(condition),
            update: Box::new(update),
        })
    }

    /// `x in xs`, `i in a..b`, `k, v in h`, each with an optional `where filter`.
    ///
    /// Entered with `cur_token` on the `for` keyword; returns on the last token of the clause.
    fn parse_for_clause(&mut self) -> Option<ForClause> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let first = Identifier::from_token(self.cur_token.clone());

        let second = if self.peek_is_punct(PunctuationId::Comma) {
            self.next_token();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            Some(Identifier::from_token(self.cur_token.clone()))
        } else {
            None
        };

        if !self.expect_peek(TokenKind::Keyword(KeywordId::In)) {
            return None;
        }
        self.next_token();
        let iterable = self.parse_expression(Precedence::Lowest)?;

        let binding = match (second, iterable) {
            (None, Expression::Infix(range)) if range.operator == OperatorId::DotDot => ForBinding::Range {
                var: first,
                start: range.left,
                end: range.right,
            },
            (Some(_), Expression::Infix(range)) if range.operator == OperatorId::DotDot => {
                self.error_at(&range.token, "cannot destructure a range into key and value");
                return None;
            }
            (Some(value), iterable) => ForBinding::Map {
                key: first,
                value,
                iterable: Box::new(iterable),
            },
            (None, iterable) => ForBinding::Each {
                var: first,
                iterable: Box::new(iterable),
            },
        };

        let filter = if self.peek_is_keyword(KeywordId::Where) {
            self.next_token();
            self.next_token();
            Some(Box::new(self.parse_expression(Precedence::Lowest)?))
        } else {
            None
        };

        Some(ForClause { binding, filter })
    }

    /// `while condition { }`
    fn parse_while_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        let block = self.parse_loop_body()?;
        Some(Expression::While(WhileExpression {
            token,
            condition: Box::new(condition),
            block,
        }))
    }

    /// `do { }`
    fn parse_do_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let block = self.parse_loop_body()?;
        Some(Expression::Do(DoExpression { token, block }))
    }

    // ========================================================================
    // Exceptions
    // ========================================================================

    /// `try { } catch "Type" { } catch e { } catch { } finally { }`
    fn parse_try_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let block = self.parse_braced_block()?;

        let mut catches = Vec::new();
        while self.peek_is_keyword(KeywordId::Catch) {
            self.next_token();
            let catch_token = self.cur_token.clone();
            let kind = match self.peek_token.kind {
                TokenKind::Str | TokenKind::RawStr => {
                    self.next_token();
                    CatchKind::Typed(self.cur_token.literal.clone())
                }
                TokenKind::Ident => {
                    self.next_token();
                    CatchKind::Binding(Identifier::from_token(self.cur_token.clone()))
                }
                _ => CatchKind::All,
            };
            let block = self.parse_braced_block()?;
            catches.push(CatchClause {
                token: catch_token,
                kind,
                block,
            });
        }

        let finally = if self.peek_is_keyword(KeywordId::Finally) {
            self.next_token();
            Some(self.parse_braced_block()?)
        } else {
            None
        };

        if catches.is_empty() && finally.is_none() {
            self.error_at(&token, "try requires at least one catch or finally clause");
        }

        Some(Expression::Try(TryExpression {
            token,
            block,
            catches,
            finally,
        }))
    }
}
