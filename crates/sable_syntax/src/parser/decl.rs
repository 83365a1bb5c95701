/// Declarations: functions, classes, enums, and `new`.
///
/// This chunk contains the parsers for the declaration-shaped constructs. Each has an expression form
/// (`fn (..) { }`, `class { }`, `enum { }`) and, when followed by a name in statement position, a statement form that
/// binds the name.
impl<'a> Parser<'a> {
    // ========================================================================
    // Functions
    // ========================================================================

    /// `fn (params) { body }`
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.parse_function_rest(token).map(Expression::Function)
    }

    /// `fn name(params) { body }`
    fn parse_function_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        self.next_token();
        let name = Identifier::from_token(self.cur_token.clone());
        let function = self.parse_function_rest(token.clone())?;
        Some(Statement::Function(FunctionStatement { token, name, function }))
    }

    /// Parameter list and body, with `cur_token` on the token before the `(`.
    fn parse_function_rest(&mut self, token: Token) -> Option<FunctionLiteral> {
        if !self.expect_peek_punct(PunctuationId::LParen) {
            return None;
        }
        let (params, variadic) = self.parse_function_parameters()?;
        let body = self.parse_function_body()?;
        Some(FunctionLiteral {
            token,
            params,
            variadic,
            body,
            modifier: ModifierLevel::Default,
            is_static: false,
        })
    }

    /// `(a, b = 1, ...rest)`, with `cur_token` on the `(`. Returns the parameters and whether the last one is
    /// variadic.
    ///
    /// Ordering mistakes (two variadics, a variadic before other parameters, a default before a variadic) are
    /// recorded but do not abort the parse.
    fn parse_function_parameters(&mut self) -> Option<(Vec<Parameter>, bool)> {
        let mut params: Vec<Parameter> = Vec::new();
        let mut variadic_at: Option<usize> = None;

        if self.peek_is_punct(PunctuationId::RParen) {
            self.next_token();
            return Some((params, false));
        }

        loop {
            self.next_token();

            let is_variadic = self.cur_is_punct(PunctuationId::Ellipsis);
            if is_variadic {
                let ellipsis = self.cur_token.clone();
                if variadic_at.is_some() {
                    self.error_at(&ellipsis, "only one variadic parameter is allowed");
                }
                if params.iter().any(|p| p.default.is_some()) {
                    self.error_at(&ellipsis, "default parameter values cannot precede a variadic parameter");
                }
                if !self.expect_peek(TokenKind::Ident) {
                    return None;
                }
            } else if !self.cur_is(TokenKind::Ident) {
                let message = format!("expected parameter name, got {} instead", self.cur_token.kind);
                self.error_at_cur(message);
                return None;
            } else if let Some(at) = variadic_at {
                let message = format!("variadic parameter '{}' must be the last parameter", params[at].name);
                self.error_at_cur(message);
            }

            let name = Identifier::from_token(self.cur_token.clone());
            let default = if self.peek_is_op(OperatorId::Eq) {
                self.next_token();
                self.next_token();
                Some(self.parse_expression(Precedence::Lowest)?)
            } else {
                None
            };

            if is_variadic && variadic_at.is_none() {
                variadic_at = Some(params.len());
            }
            params.push(Parameter { name, default });

            if !self.peek_is_punct(PunctuationId::Comma) {
                break;
            }
            self.next_token();
        }

        if !self.expect_peek_punct(PunctuationId::RParen) {
            return None;
        }

        let variadic = variadic_at.is_some_and(|at| at + 1 == params.len());
        Some((params, variadic))
    }

    // ========================================================================
    // Classes
    // ========================================================================

    /// `class [Name] [: Parent] { members }` in expression position.
    fn parse_class_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let name = if self.peek_is(TokenKind::Ident) {
            self.next_token();
            self.cur_token.literal.clone()
        } else {
            String::new()
        };
        self.parse_class_rest(token, name).map(Expression::Class)
    }

    /// `class Name [: Parent] { members }`
    fn parse_class_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        self.next_token();
        let name = Identifier::from_token(self.cur_token.clone());
        let class = self.parse_class_rest(token.clone(), name.value.clone())?;
        Some(Statement::Class(ClassStatement { token, name, class }))
    }

    /// Optional parent and the class body, with `cur_token` on the class name (or `class`).
    fn parse_class_rest(&mut self, token: Token, name: String) -> Option<ClassLiteral> {
        let parent = if self.peek_is_op(OperatorId::Colon) {
            self.next_token();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            Some(Identifier::from_token(self.cur_token.clone()))
        } else {
            None
        };

        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        self.next_token();

        let mut class = ClassLiteral {
            token,
            name,
            parent,
            members: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            end: self.cur_token.end.clone(),
        };

        while !self.cur_is_punct(PunctuationId::RBrace) && !self.cur_is(TokenKind::Eof) {
            // A member cut short by the class's own `}` leaves it for the loop condition.
            if !self.cur_is_punct(PunctuationId::Semicolon) && self.parse_class_member(&mut class) {
                continue;
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            self.error_at(&class.token, "unterminated class body: expected '}'");
            return None;
        }
        class.end = self.cur_token.end.clone();
        Some(class)
    }

    /// One `[modifiers] let|fn|property` member, added to `class`.
    ///
    /// Returns `true` when the member was cut short with `cur_token` on the closing `}` of the class (`{ public }`).
    fn parse_class_member(&mut self, class: &mut ClassLiteral) -> bool {
        let mut modifier = ModifierLevel::Default;
        let mut is_static = false;
        loop {
            match self.cur_token.kind {
                TokenKind::Keyword(KeywordId::Public) => modifier = ModifierLevel::Public,
                TokenKind::Keyword(KeywordId::Private) => modifier = ModifierLevel::Private,
                TokenKind::Keyword(KeywordId::Protected) => modifier = ModifierLevel::Protected,
                TokenKind::Keyword(KeywordId::Static) => is_static = true,
                _ => break,
            }
            self.next_token();
        }

        match self.cur_token.kind {
            TokenKind::Keyword(KeywordId::Let) => {
                let Some(mut member) = self.parse_let_statement() else {
                    self.skip_class_member();
                    return false;
                };
                member.modifier = modifier;
                member.is_static = is_static;
                class.members.push(member);
            }
            TokenKind::Keyword(KeywordId::Fn) => {
                let token = self.cur_token.clone();
                if !self.expect_peek(TokenKind::Ident) {
                    self.skip_class_member();
                    return false;
                }
                let name = Identifier::from_token(self.cur_token.clone());
                let Some(mut function) = self.parse_function_rest(token.clone()) else {
                    self.skip_class_member();
                    return false;
                };
                function.modifier = modifier;
                function.is_static = is_static;
                if class.method(&name.value).is_some() {
                    self.error_at(&name.token, format!("duplicate method '{name}' in class"));
                } else {
                    class.methods.push(FunctionStatement { token, name, function });
                }
            }
            TokenKind::Keyword(KeywordId::Property) => {
                let Some(mut property) = self.parse_property_declaration() else {
                    self.skip_class_member();
                    return false;
                };
                property.modifier = modifier;
                property.is_static = is_static;
                if class.property(&property.name.value).is_some() {
                    let name = property.name.clone();
                    self.error_at(&name.token, format!("duplicate property '{name}' in class"));
                } else {
                    class.properties.push(property);
                }
            }
            _ => {
                let message = format!("expected let, fn or property in class body, got {} instead", self.cur_token.kind);
                self.error_at_cur(message);
                if self.cur_is_punct(PunctuationId::RBrace) {
                    return true;
                }
                self.skip_class_member();
                return false;
            }
        }
        self.skip_semicolon();
        false
    }

    /// Skip to just before the next member keyword or the closing `}` of a class body.
    fn skip_class_member(&mut self) {
        loop {
            match self.peek_token.kind {
                TokenKind::Eof | TokenKind::Punctuation(PunctuationId::RBrace) => break,
                TokenKind::Keyword(
                    KeywordId::Let
                    | KeywordId::Fn
                    | KeywordId::Property
                    | KeywordId::Public
                    | KeywordId::Private
                    | KeywordId::Protected
                    | KeywordId::Static,
                ) => break,
                _ => self.next_token(),
            }
        }
    }

    /// `property name { get[;|{..}] set[;|{..}] }`
    fn parse_property_declaration(&mut self) -> Option<PropertyDeclaration> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::from_token(self.cur_token.clone());
        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        self.next_token();

        let mut getter = None;
        let mut setter = None;
        while !self.cur_is_punct(PunctuationId::RBrace) && !self.cur_is(TokenKind::Eof) {
            let slot = match self.cur_token.kind {
                TokenKind::Keyword(KeywordId::Get) => Some(&mut getter),
                TokenKind::Keyword(KeywordId::Set) => Some(&mut setter),
                TokenKind::Punctuation(PunctuationId::Semicolon) => None,
                _ => {
                    let message = format!("expected get or set in property, got {} instead", self.cur_token.kind);
                    self.error_at_cur(message);
                    return None;
                }
            };
            if let Some(slot) = slot {
                let accessor = self.parse_accessor();
                if slot.is_some() {
                    self.error_at(&accessor.token, format!("duplicate '{}' accessor", accessor.token.literal));
                } else {
                    *slot = Some(accessor);
                }
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            self.error_at(&token, "unterminated property: expected '}'");
            return None;
        }

        Some(PropertyDeclaration {
            token,
            name,
            getter,
            setter,
            modifier: ModifierLevel::Default,
            is_static: false,
            end: self.cur_token.end.clone(),
        })
    }

    /// `get`, `get;` or `get { body }` (same for `set`). A missing body means an auto-implemented accessor.
    fn parse_accessor(&mut self) -> Accessor {
        let token = self.cur_token.clone();
        let body = if self.peek_is_punct(PunctuationId::LBrace) {
            self.next_token();
            let saved = std::mem::replace(&mut self.loop_depth, 0);
            let body = self.parse_block_statement();
            self.loop_depth = saved;
            Some(body)
        } else {
            self.skip_semicolon();
            None
        };
        Accessor { token, body }
    }

    /// `new Name(args)`; the argument list may be omitted.
    fn parse_new_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let class = Identifier::from_token(self.cur_token.clone());

        let arguments = if self.peek_is_punct(PunctuationId::LParen) {
            self.next_token();
            self.parse_expression_list(PunctuationId::RParen)?
        } else {
            Vec::new()
        };

        Some(Expression::New(NewExpression {
            token,
            class,
            arguments,
            end: self.cur_token.end.clone(),
        }))
    }

    // ========================================================================
    // Enums
    // ========================================================================

    /// `enum { A, B = 5, C }` in expression position.
    fn parse_enum_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.parse_enum_body(token).map(Expression::Enum)
    }

    /// `enum Name { ... }`
    fn parse_enum_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        self.next_token();
        let name = Identifier::from_token(self.cur_token.clone());
        let enumeration = self.parse_enum_body(token.clone())?;
        Some(Statement::Enum(EnumStatement {
            token,
            name,
            enumeration,
        }))
    }

    /// `{ members }`, with `cur_token` just before the `{`.
    ///
    /// Members without a value continue counting from the previous one, starting at 0; an explicit integer resets
    /// the counter to `value + 1`. A repeated member name is an error and the first binding is kept.
    fn parse_enum_body(&mut self, token: Token) -> Option<EnumLiteral> {
        if !self.expect_peek_punct(PunctuationId::LBrace) {
            return None;
        }
        self.next_token();

        let mut members: Vec<(Identifier, Expression)> = Vec::new();
        let mut next_value: i64 = 0;

        while !self.cur_is_punct(PunctuationId::RBrace) && !self.cur_is(TokenKind::Eof) {
            if self.cur_is_punct(PunctuationId::Comma) || self.cur_is_punct(PunctuationId::Semicolon) {
                self.next_token();
                continue;
            }
            if !self.cur_is(TokenKind::Ident) {
                let message = format!("expected enum member name, got {} instead", self.cur_token.kind);
                self.error_at_cur(message);
                return None;
            }
            let name = Identifier::from_token(self.cur_token.clone());

            let value = if self.peek_is_op(OperatorId::Eq) {
                self.next_token();
                self.next_token();
                self.parse_enum_value()?
            } else {
                let literal = Token::synthetic(TokenKind::Int, next_value.to_string(), name.token.end.clone());
                Expression::Integer(IntegerLiteral {
                    token: literal,
                    value: next_value,
                })
            };

            if members.iter().any(|(existing, _)| existing.value == name.value) {
                self.error_at(&name.token, format!("duplicate enum member '{name}'"));
            } else {
                match &value {
                    Expression::Integer(int) => next_value = int.value.saturating_add(1),
                    Expression::UnsignedInteger(_) => next_value = i64::MAX,
                    _ => {}
                }
                members.push((name, value));
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            self.error_at(&token, "unterminated enum: expected '}'");
            return None;
        }

        Some(EnumLiteral {
            token,
            members,
            end: self.cur_token.end.clone(),
        })
    }

    /// An explicit member value: an integer constant, optionally negated.
    fn parse_enum_value(&mut self) -> Option<Expression> {
        if self.cur_token.kind.is_operator(OperatorId::Minus) && self.peek_is(TokenKind::Int) {
            let minus = self.cur_token.clone();
            self.next_token();
            let literal = self.parse_integer_literal()?;
            // Negate in the unsigned domain so `-9223372036854775808` still fits.
            let magnitude = match &literal {
                Expression::Integer(int) => int.value.unsigned_abs(),
                Expression::UnsignedInteger(int) => int.value,
                _ => return Some(literal),
            };
            if magnitude > i64::MIN.unsigned_abs() {
                self.error_at(&minus, "enum member value out of range");
                return Some(literal);
            }
            let value = 0i64.wrapping_sub_unsigned(magnitude);
            let token = Token::new(TokenKind::Int, format!("-{}", literal.token_literal()), minus.pos, literal.end());
            return Some(Expression::Integer(IntegerLiteral { token, value }));
        }

        let value = self.parse_expression(Precedence::Lowest)?;
        if !matches!(value, Expression::Integer(_) | Expression::UnsignedInteger(_)) {
            let message = format!("enum member value must be an integer constant, got '{value}'");
            self.errors.push(SyntaxError::new(value.pos(), message, 1));
        }
        Some(value)
    }
}
