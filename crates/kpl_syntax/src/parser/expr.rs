/// Expressions.
///
/// Binary operators are parsed by precedence climbing over the ladder in `kpl_core::lang::operators`; every
/// binary level is left-associative. Below the binary levels sit prefix operators, then the postfix chain
/// (`.field`, `.method(args)`, `[index]`, `asPtrTo T`, `asInteger`, `arraySize`, `isInstanceOf T`,
/// `isKindOf T`), then primaries.
impl<'a> Parser<'a> {
    /// Can the current token begin an expression?
    fn is_at_expression_start(&self) -> bool {
        let kind = &self.peek().kind;
        if kind.is_literal() {
            return true;
        }
        match kind {
            TokenKind::Ident(_) => true,
            TokenKind::Punctuation(p) => *p == PunctuationId::LParen,
            TokenKind::Operator(_) => kind.is_unary_prefix(),
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::SelfKw
                    | KeywordId::Super
                    | KeywordId::SizeOf
                    | KeywordId::New
                    | KeywordId::Alloc
                    | KeywordId::Function
            ),
            _ => false,
        }
    }

    /// Parse an expression.
    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.nested(|p| p.binary(Precedence::LogicalOr))
    }

    /// Precedence climbing: parse operands and every binary operator binding at least as tightly as `min`.
    fn binary(&mut self, min: Precedence) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.unary()?;

        loop {
            let Some(id) = self.peek().operator_id() else {
                break;
            };
            let (Some(precedence), Some(operator)) = (operators::binary_precedence(id), BinaryOp::from_operator(id))
            else {
                break;
            };
            if precedence < min {
                break;
            }
            if id == OperatorId::Star && !self.star_continues_expression() {
                break;
            }

            self.advance();
            let right = self.binary(precedence.tighter().unwrap_or(precedence))?;
            let span = left.span.merge(right.span);
            left = Spanned::new(
                Expr::Binary {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// `! - * &` applied to an operand (right-associative: `- - x` is `-(-x)`).
    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let Some(operator) = self
            .peek()
            .operator_id()
            .filter(|id| operators::is_unary_prefix(*id))
            .and_then(UnaryOp::from_operator)
        else {
            return self.postfix();
        };

        let start = self.advance().span;
        let operand = self.nested(|p| p.unary())?;
        let span = start.merge(operand.span);
        Ok(Spanned::new(
            Expr::Unary {
                operator,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.primary()?;

        loop {
            let start = expr.span;
            let node = if self.match_punct(PunctuationId::Dot) {
                let name = self.identifier("field or method name")?;
                if self.check_punct(PunctuationId::LParen) {
                    let args = self.argument_list()?;
                    Expr::MethodCall {
                        object: Box::new(expr),
                        method: name,
                        args,
                    }
                } else {
                    Expr::Field {
                        object: Box::new(expr),
                        field: name,
                    }
                }
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket)?;
                Expr::Index {
                    array: Box::new(expr),
                    index: Box::new(index),
                }
            } else if self.match_keyword(KeywordId::AsPtrTo) {
                let ty = self.parse_type()?;
                Expr::AsPtrTo {
                    expr: Box::new(expr),
                    ty: Box::new(ty),
                }
            } else if self.match_keyword(KeywordId::AsInteger) {
                Expr::AsInteger(Box::new(expr))
            } else if self.match_keyword(KeywordId::ArraySize) {
                Expr::ArraySize(Box::new(expr))
            } else if self.match_keyword(KeywordId::IsInstanceOf) {
                let ty = self.parse_type()?;
                Expr::IsInstanceOf {
                    expr: Box::new(expr),
                    ty: Box::new(ty),
                }
            } else if self.match_keyword(KeywordId::IsKindOf) {
                let ty = self.parse_type()?;
                Expr::IsKindOf {
                    expr: Box::new(expr),
                    ty: Box::new(ty),
                }
            } else {
                break;
            };
            expr = Spanned::new(node, self.span_from(start));
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span();

        let literal = match &self.peek().kind {
            TokenKind::Int(n) => Some(Literal::Int(*n)),
            TokenKind::HexInt(n) => Some(Literal::Hex(*n)),
            TokenKind::Double(d) => Some(Literal::Double(*d)),
            TokenKind::Char(c) => Some(Literal::Char(*c)),
            TokenKind::String(s) => Some(Literal::String(s.clone())),
            TokenKind::Keyword(KeywordId::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Some(Literal::Bool(false)),
            TokenKind::Keyword(KeywordId::Null) => Some(Literal::Null),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Ok(Spanned::new(Expr::Literal(literal), start));
        }

        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            if self.check_punct(PunctuationId::LParen) {
                let args = self.argument_list()?;
                return Ok(Spanned::new(Expr::Call { function: name, args }, self.span_from(start)));
            }
            return Ok(Spanned::new(Expr::Ident(name), start));
        }

        if self.match_punct(PunctuationId::LParen) {
            let inner = self.expression()?;
            self.expect_punct(PunctuationId::RParen)?;
            return Ok(Spanned::new(Expr::Paren(Box::new(inner)), self.span_from(start)));
        }

        let expr = match self.peek().keyword_id() {
            Some(KeywordId::SelfKw) => {
                self.advance();
                Expr::SelfExpr
            }
            Some(KeywordId::Super) => {
                self.advance();
                Expr::Super
            }
            Some(KeywordId::SizeOf) => {
                self.advance();
                Expr::SizeOf(Box::new(self.parse_type()?))
            }
            Some(KeywordId::New) => Expr::Constructor(self.constructor(ConstructorKind::New)?),
            Some(KeywordId::Alloc) => Expr::Constructor(self.constructor(ConstructorKind::Alloc)?),
            Some(KeywordId::Function) => Expr::Closure(self.closure()?),
            _ => return Err(self.error_expected("expression")),
        };

        Ok(Spanned::new(expr, self.span_from(start)))
    }

    /// `new T [{...}]` / `alloc T [{...}]`
    fn constructor(&mut self, kind: ConstructorKind) -> Result<ConstructorExpr, CompileError> {
        self.advance();
        let ty = self.parse_type()?;
        let init = if self.at_field_initializers() {
            Some(self.field_initializers()?)
        } else if self.check_punct(PunctuationId::LBrace) {
            Some(self.array_initializers()?)
        } else {
            None
        };
        Ok(ConstructorExpr {
            kind,
            ty: Box::new(ty),
            init,
        })
    }

    /// `{name = value, ...}`
    fn field_initializers(&mut self) -> Result<Initializer, CompileError> {
        self.expect_punct(PunctuationId::LBrace)?;
        let mut fields = Vec::new();
        loop {
            let name = self.identifier("field name")?;
            self.expect_op(OperatorId::Eq)?;
            let value = self.expression()?;
            fields.push(FieldInit { name, value });
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Initializer::Fields(fields))
    }

    /// `{[count of] value, ...}`
    fn array_initializers(&mut self) -> Result<Initializer, CompileError> {
        self.expect_punct(PunctuationId::LBrace)?;
        let mut elements = Vec::new();
        loop {
            let first = self.expression()?;
            let element = if self.match_keyword(KeywordId::Of) {
                ArrayInit {
                    count: Some(first),
                    value: self.expression()?,
                }
            } else {
                ArrayInit {
                    count: None,
                    value: first,
                }
            };
            elements.push(element);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Initializer::Array(elements))
    }

    /// `function (params) [returns T] <body> endFunction`
    fn closure(&mut self) -> Result<ClosureExpr, CompileError> {
        self.open_block(KeywordId::Function)?;
        let params = self.parameter_list()?;
        let return_type = self.return_type()?.map(Box::new);
        let body = self.body()?;
        self.close_block()?;
        Ok(ClosureExpr {
            params,
            return_type,
            body,
        })
    }
}
