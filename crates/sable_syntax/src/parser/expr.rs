/// Expression parsing: operators, calls, indexing, member access.
///
/// ## Notes
/// - Binary operators are left-associative: the right operand is parsed at the operator's own precedence.
/// - Assignment and ternary right-associate (see [`Parser::parse_assign_expression`] and
///   [`Parser::parse_ternary_expression`]).
impl<'a> Parser<'a> {
    // ========================================================================
    // Operators
    // ========================================================================

    /// `-x`, `+x`, `!x`
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.operator_id()?;
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.operator_id()?;
        let precedence = operators::precedence(operator);
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// `x++`, `x--`
    fn parse_postfix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.operator_id()?;
        Some(Expression::Postfix(PostfixExpression {
            token,
            left: Box::new(left),
            operator,
        }))
    }

    /// `value |> function`
    fn parse_pipe_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Pipe)?;
        Some(Expression::Pipe(PipeExpression {
            token,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// `target op value` for `=` and every compound assignment.
    ///
    /// The value is parsed just above pipe level so that `a = b = c` nests to the right and `x += 1 + 2` takes the
    /// whole sum.
    fn parse_assign_expression(&mut self, target: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.operator_id()?;

        let valid_target = match &target {
            Expression::Identifier(_) | Expression::Index(_) => true,
            Expression::MethodCall(call) => call.is_property_access(),
            _ => false,
        };
        if !valid_target {
            let message = format!(
                "invalid assignment target '{target}': expected an identifier, index or property"
            );
            self.errors.push(SyntaxError::new(
                target.pos(),
                message,
                token.pos.offset.saturating_sub(target.pos().offset),
            ));
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Pipe)?;
        Some(Expression::Assign(AssignExpression {
            token,
            target: Box::new(target),
            operator,
            value: Box::new(value),
        }))
    }

    /// `condition ? consequence : alternative`
    fn parse_ternary_expression(&mut self, condition: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();
        let consequence = self.parse_expression(Precedence::Ternary)?;
        if !self.expect_peek(TokenKind::Operator(OperatorId::Colon)) {
            return None;
        }
        self.next_token();
        let alternative = self.parse_expression(Precedence::Slice)?;
        Some(Expression::Ternary(TernaryExpression {
            token,
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative: Box::new(alternative),
        }))
    }

    // ========================================================================
    // Slices
    // ========================================================================

    /// `start:end` / `start:`
    fn parse_slice_expression(&mut self, start: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.finish_slice(token, start)
    }

    /// `:end`, with an implicit `0` start.
    fn parse_open_slice(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let zero = Token::synthetic(TokenKind::Int, "0", token.pos.clone());
        let start = Expression::Integer(IntegerLiteral { token: zero, value: 0 });
        self.finish_slice(token, start)
    }

    fn finish_slice(&mut self, token: Token, start: Expression) -> Option<Expression> {
        let end = if self.peek_is_punct(PunctuationId::RBracket) {
            None
        } else {
            self.next_token();
            Some(Box::new(self.parse_expression(Precedence::Slice)?))
        };
        Some(Expression::Slice(SliceExpression {
            token,
            start: Box::new(start),
            end,
        }))
    }

    // ========================================================================
    // Calls, indexing, members
    // ========================================================================

    /// `function(args)`
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(PunctuationId::RParen)?;
        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
            end: self.cur_token.end.clone(),
        }))
    }

    /// `left[index]`
    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek_punct(PunctuationId::RBracket) {
            return None;
        }
        Some(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
            end: self.cur_token.end.clone(),
        }))
    }

    /// `object.name` or `object.name(args)`. Keywords are valid member names (`obj.map(...)`, `obj.class`).
    fn parse_method_call(&mut self, object: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        if !matches!(self.peek_token.kind, TokenKind::Ident | TokenKind::Keyword(_)) {
            let message = format!("expected member name after '.', got {} instead", self.peek_token.kind);
            let err = SyntaxError::at_token(&self.peek_token, message);
            self.errors.push(err);
            return None;
        }
        self.next_token();
        let name = Expression::Identifier(Identifier::from_token(self.cur_token.clone()));

        let call = if self.peek_is_punct(PunctuationId::LParen) {
            self.next_token();
            self.parse_call_expression(name)?
        } else {
            name
        };

        Some(Expression::MethodCall(MethodCallExpression {
            token,
            object: Box::new(object),
            call: Box::new(call),
        }))
    }

    /// Comma-separated expressions up to `close`, with `cur_token` on the opening delimiter. A trailing comma is
    /// allowed. Returns with `cur_token` on `close`.
    fn parse_expression_list(&mut self, close: PunctuationId) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is_punct(close) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is_punct(PunctuationId::Comma) {
            self.next_token();
            if self.peek_is_punct(close) {
                break;
            }
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek_punct(close) {
            return None;
        }
        Some(list)
    }

    // ========================================================================
    // Flow
    // ========================================================================

    fn parse_break(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.check_in_loop(&token);
        Some(Expression::Break(BreakExpression { token }))
    }

    fn parse_continue(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.check_in_loop(&token);
        Some(Expression::Continue(ContinueExpression { token }))
    }

    /// `break`/`continue` are only legal inside a loop body of the current function.
    fn check_in_loop(&mut self, token: &Token) {
        if self.loop_depth == 0 {
            self.error_at(token, format!("'{}' outside of a loop", token.literal));
        }
    }

    /// `yield [value]`
    fn parse_yield(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = if self.peek_starts_operand() {
            self.next_token();
            Some(Box::new(self.parse_expression(Precedence::Lowest)?))
        } else {
            None
        };
        Some(Expression::Yield(YieldExpression { token, value }))
    }

    /// `grep { block } source` / `grep expr, source`, and the same for `map`.
    fn parse_list_op(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let op = if token.kind.is_keyword(KeywordId::Grep) { ListOp::Grep } else { ListOp::Map };

        let body = if self.peek_is_punct(PunctuationId::LBrace) {
            self.next_token();
            ListOpBody::Block(self.parse_block_statement())
        } else {
            self.next_token();
            let expr = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek_punct(PunctuationId::Comma) {
                return None;
            }
            ListOpBody::Expression(Box::new(expr))
        };

        self.next_token();
        let source = self.parse_expression(Precedence::Lowest)?;
        Some(Expression::ListOp(ListOpExpression {
            token,
            op,
            body,
            source: Box::new(source),
        }))
    }
}
