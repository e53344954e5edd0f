/// Type expressions.
impl<'a> Parser<'a> {
    /// Parse a type.
    ///
    /// ```text
    /// int | bool | char | double | void | typeOfNull | anyType
    /// ptr to T
    /// array [dim, ...] of T          (dim is `*` or an expression; the brackets are optional)
    /// record a, b: T ... endRecord
    /// function (T, ...) [returns R]
    /// Name [ [T, ...] ]
    /// ```
    fn parse_type(&mut self) -> Result<Spanned<Type>, CompileError> {
        self.nested(|p| p.type_inner())
    }

    fn type_inner(&mut self) -> Result<Spanned<Type>, CompileError> {
        let start = self.current_span();

        if let Some(primitive) = self.peek().keyword_id().and_then(PrimitiveType::from_keyword) {
            self.advance();
            return Ok(Spanned::new(Type::Primitive(primitive), start));
        }

        let ty = match self.peek().keyword_id() {
            Some(KeywordId::Ptr) => {
                self.advance();
                self.expect_keyword(KeywordId::To)?;
                let ty = self.parse_type()?;
                Type::Pointer { ty: Box::new(ty) }
            }
            Some(KeywordId::Array) => {
                self.advance();
                let dimensions = if self.match_punct(PunctuationId::LBracket) {
                    self.array_dimensions()?
                } else {
                    Vec::new()
                };
                self.expect_keyword(KeywordId::Of)?;
                let ty = self.parse_type()?;
                Type::Array {
                    dimensions,
                    ty: Box::new(ty),
                }
            }
            Some(KeywordId::Record) => self.record_type()?,
            Some(KeywordId::Function) => {
                self.advance();
                self.expect_punct(PunctuationId::LParen)?;
                let mut params = Vec::new();
                if !self.check_punct(PunctuationId::RParen) {
                    loop {
                        params.push(self.parse_type()?);
                        if !self.match_punct(PunctuationId::Comma) {
                            break;
                        }
                    }
                }
                self.expect_punct(PunctuationId::RParen)?;
                let return_type = self.return_type()?.map(Box::new);
                Type::Function { params, return_type }
            }
            _ if self.check_ident() => {
                let named = self.named_type()?;
                return Ok(Spanned::new(Type::Named(named.node), named.span));
            }
            _ => return Err(self.error_expected("type")),
        };

        Ok(Spanned::new(ty, self.span_from(start)))
    }

    /// Dimensions after `[`, through the closing `]`.
    fn array_dimensions(&mut self) -> Result<Vec<ArrayDimension>, CompileError> {
        let mut dimensions = Vec::new();
        loop {
            if self.at_dynamic_dimension() {
                self.advance();
                dimensions.push(ArrayDimension::Dynamic);
            } else {
                dimensions.push(ArrayDimension::Sized(self.expression()?));
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBracket)?;
        Ok(dimensions)
    }

    /// `record a, b: T ... endRecord` with at least one field.
    fn record_type(&mut self) -> Result<Type, CompileError> {
        self.open_block(KeywordId::Record)?;
        if !self.at_declarator_start() {
            return Err(self
                .error_expected("record field")
                .with_hint("a `record` needs at least one field, e.g. `record x, y: int endRecord`"));
        }
        let mut fields = Vec::new();
        while self.at_declarator_start() {
            let names = self.identifier_list("field name")?;
            self.expect_punct(PunctuationId::Colon)?;
            let ty = self.parse_type()?;
            fields.push(RecordField { names, ty });
        }
        self.close_block()?;
        Ok(Type::Record { fields })
    }

    /// `Name` with optional `[T, ...]` arguments.
    fn named_type(&mut self) -> Result<Spanned<NamedType>, CompileError> {
        let start = self.current_span();
        let name = self.identifier("type name")?;
        let mut args = Vec::new();
        if self.match_punct(PunctuationId::LBracket) {
            loop {
                args.push(self.parse_type()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::RBracket)?;
        }
        Ok(Spanned::new(NamedType { name, args }, self.span_from(start)))
    }
}
