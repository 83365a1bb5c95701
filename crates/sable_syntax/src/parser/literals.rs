/// Literal parsing: scalars, strings (including interpolation), and collection literals.
impl<'a> Parser<'a> {
    // ========================================================================
    // Scalars
    // ========================================================================

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::from_token(self.cur_token.clone())))
    }

    /// Decimal or `0x`/`0b`/`0c` integer. Values past `i64::MAX` become [`UnsignedIntegerLiteral`]s.
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let text: String = token.literal.chars().filter(|c| *c != '_').collect();
        let (digits, radix) = split_radix(&text);

        if let Ok(value) = i64::from_str_radix(digits, radix) {
            return Some(Expression::Integer(IntegerLiteral { token, value }));
        }
        if let Ok(value) = u64::from_str_radix(digits, radix) {
            return Some(Expression::UnsignedInteger(UnsignedIntegerLiteral { token, value }));
        }
        self.error_at_cur(format!("could not parse {} as integer", token.literal));
        None
    }

    fn parse_float_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let text: String = token.literal.chars().filter(|c| *c != '_').collect();
        match text.parse::<f64>() {
            Ok(value) => Some(Expression::Float(FloatLiteral { token, value })),
            Err(_) => {
                self.error_at_cur(format!("could not parse {} as float", token.literal));
                None
            }
        }
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = token.kind.is_keyword(KeywordId::True);
        Some(Expression::Boolean(BooleanLiteral { token, value }))
    }

    fn parse_nil(&mut self) -> Option<Expression> {
        Some(Expression::Nil(NilLiteral {
            token: self.cur_token.clone(),
        }))
    }

    fn parse_regex_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let pattern = token.literal.clone();
        Some(Expression::Regex(RegexLiteral { token, pattern }))
    }

    // ========================================================================
    // Strings
    // ========================================================================

    /// `"quoted"` or `` `raw` ``; the lexer has already processed escapes.
    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = token.literal.clone();
        let raw = token.kind == TokenKind::RawStr;
        Some(Expression::String(StringLiteral { token, value, raw }))
    }

    /// `'text {expr} text'`
    ///
    /// The token literal already carries numbered placeholders. Each `{expr}` span is re-lexed from the original
    /// source by a nested parser, so expression positions point into the enclosing file.
    fn parse_interpolated_string(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let spans = self.lexer.take_interpolations(token.pos.offset);

        let mut exprs = Vec::with_capacity(spans.len());
        for (index, span) in spans.iter().enumerate() {
            if let Some(expr) = self.parse_interpolation(span) {
                exprs.push((index, expr));
            }
        }

        Some(Expression::InterpolatedString(InterpolatedString {
            value: token.literal.clone(),
            token,
            exprs,
        }))
    }

    fn parse_interpolation(&mut self, span: &InterpolationSpan) -> Option<Expression> {
        let lexer = Lexer::for_interpolation(self.lexer.source(), self.lexer.filename(), span);
        let mut sub = Parser::with_include_chain(lexer, self.work_dir.clone(), self.resolver, self.include_chain.clone());
        sub.loop_depth = self.loop_depth;

        let expr = sub.parse_expression(Precedence::Lowest);
        if expr.is_some() && !sub.peek_is(TokenKind::Eof) {
            let message = format!("unexpected {} in interpolation", sub.peek_token.kind);
            let err = SyntaxError::at_token(&sub.peek_token, message);
            sub.errors.push(err);
        }

        self.errors.extend(sub.into_errors());
        expr
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// `( expr )`, or a tuple: `()`, `(a,)`, `(a, b)`.
    fn parse_grouped_or_tuple(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_is_punct(PunctuationId::RParen) {
            self.next_token();
            return Some(Expression::Tuple(TupleLiteral {
                token,
                elements: Vec::new(),
                end: self.cur_token.end.clone(),
            }));
        }

        self.next_token();
        let first = self.parse_expression(Precedence::Lowest)?;

        if !self.peek_is_punct(PunctuationId::Comma) {
            if !self.expect_peek_punct(PunctuationId::RParen) {
                return None;
            }
            return Some(first);
        }

        let mut elements = vec![first];
        while self.peek_is_punct(PunctuationId::Comma) {
            self.next_token();
            if self.peek_is_punct(PunctuationId::RParen) {
                break;
            }
            self.next_token();
            elements.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek_punct(PunctuationId::RParen) {
            return None;
        }

        Some(Expression::Tuple(TupleLiteral {
            token,
            elements,
            end: self.cur_token.end.clone(),
        }))
    }

    /// `[a, b, c]` or `[expr for ...]`.
    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_is_punct(PunctuationId::RBracket) {
            self.next_token();
            return Some(Expression::Array(ArrayLiteral {
                token,
                elements: Vec::new(),
                end: self.cur_token.end.clone(),
            }));
        }

        self.next_token();
        let first = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is_keyword(KeywordId::For) {
            self.next_token();
            let clause = self.parse_for_clause()?;
            if !self.expect_peek_punct(PunctuationId::RBracket) {
                return None;
            }
            return Some(Expression::ListComprehension(ListComprehension {
                token,
                body: Box::new(first),
                clause,
                end: self.cur_token.end.clone(),
            }));
        }

        let mut elements = vec![first];
        while self.peek_is_punct(PunctuationId::Comma) {
            self.next_token();
            if self.peek_is_punct(PunctuationId::RBracket) {
                break;
            }
            self.next_token();
            elements.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek_punct(PunctuationId::RBracket) {
            return None;
        }

        Some(Expression::Array(ArrayLiteral {
            token,
            elements,
            end: self.cur_token.end.clone(),
        }))
    }

    /// `{k => v, ...}` or `{k => v for ...}`.
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if self.peek_is_punct(PunctuationId::RBrace) {
            self.next_token();
            return Some(Expression::Hash(HashLiteral {
                token,
                pairs: Vec::new(),
                end: self.cur_token.end.clone(),
            }));
        }

        self.next_token();
        let (key, value) = self.parse_pair()?;

        if self.peek_is_keyword(KeywordId::For) {
            self.next_token();
            let clause = self.parse_for_clause()?;
            if !self.expect_peek_punct(PunctuationId::RBrace) {
                return None;
            }
            return Some(Expression::HashComprehension(HashComprehension {
                token,
                key: Box::new(key),
                value: Box::new(value),
                clause,
                end: self.cur_token.end.clone(),
            }));
        }

        let pairs = self.parse_remaining_pairs(vec![(key, value)])?;
        Some(Expression::Hash(HashLiteral {
            token,
            pairs,
            end: self.cur_token.end.clone(),
        }))
    }

    /// `struct { name => value, ... }`
    fn parse_struct_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }

        let pairs = if self.peek_is_punct(PunctuationId::RBrace) {
            self.next_token();
            Vec::new()
        } else {
            self.next_token();
            let first = self.parse_pair()?;
            self.parse_remaining_pairs(vec![first])?
        };

        Some(Expression::Struct(StructLiteral {
            token,
            pairs,
            end: self.cur_token.end.clone(),
        }))
    }

    /// `key => value`, with `cur_token` on the first token of the key.
    fn parse_pair(&mut self) -> Option<(Expression, Expression)> {
        let key = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek_punct(PunctuationId::FatArrow) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some((key, value))
    }

    /// `, key => value` repeated, then the closing `}`. A trailing comma is allowed.
    fn parse_remaining_pairs(
        &mut self,
        mut pairs: Vec<(Expression, Expression)>,
    ) -> Option<Vec<(Expression, Expression)>> {
        while self.peek_is_punct(PunctuationId::Comma) {
            self.next_token();
            if self.peek_is_punct(PunctuationId::RBrace) {
                break;
            }
            self.next_token();
            pairs.push(self.parse_pair()?);
        }
        if !self.expect_peek_punct(PunctuationId::RBrace) {
            return None;
        }
        Some(pairs)
    }

    /// `qw(a b c)`: an array of string literals split on whitespace.
    fn parse_word_list(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let elements = token
            .literal
            .split_whitespace()
            .map(|word| {
                let word_token = Token::synthetic(TokenKind::Str, word, token.pos.clone());
                Expression::String(StringLiteral {
                    token: word_token,
                    value: word.to_string(),
                    raw: false,
                })
            })
            .collect();
        Some(Expression::Array(ArrayLiteral {
            end: token.end.clone(),
            token,
            elements,
        }))
    }
}

/// Split a `_`-free integer spelling into its digits and radix.
fn split_radix(text: &str) -> (&str, u32) {
    let prefix = text.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (&text[2..], 16),
        Some("0b") => (&text[2..], 2),
        Some("0c") => (&text[2..], 8),
        _ => (text, 10),
    }
}
