/// Small shared pieces: names, parameter and argument lists, return types, bodies.
impl<'a> Parser<'a> {
    /// Consume an identifier. `what` names it in the error ("expected function name, found ...").
    fn identifier(&mut self, what: &str) -> Result<Ident, CompileError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            return Ok(name);
        }

        let mut err = self.error_expected(what);
        if let Some(keyword) = self.peek().keyword_id() {
            err = err.with_hint(format!(
                "`{}` is a reserved word and cannot be used as a name",
                keywords::as_str(keyword)
            ));
        }
        Err(err)
    }

    /// `a, b, c`
    fn identifier_list(&mut self, what: &str) -> Result<Vec<Ident>, CompileError> {
        let mut names = vec![self.identifier(what)?];
        while self.match_punct(PunctuationId::Comma) {
            names.push(self.identifier(what)?);
        }
        Ok(names)
    }

    /// `( [a, b: T, c: U ...] )`
    fn parameter_list(&mut self) -> Result<Vec<Parameter>, CompileError> {
        self.expect_punct(PunctuationId::LParen)?;
        let mut params = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let names = self.identifier_list("parameter name")?;
                self.expect_punct(PunctuationId::Colon)?;
                let ty = self.parse_type()?;
                params.push(Parameter { names, ty });
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen)?;
        Ok(params)
    }

    /// `( [expr, ...] )`
    fn argument_list(&mut self) -> Result<Vec<Spanned<Expr>>, CompileError> {
        self.expect_punct(PunctuationId::LParen)?;
        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen)?;
        Ok(args)
    }

    /// Optional `returns T`.
    fn return_type(&mut self) -> Result<Option<Spanned<Type>>, CompileError> {
        if self.match_keyword(KeywordId::Returns) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    /// Local `var` sections, then statements.
    fn body(&mut self) -> Result<Body, CompileError> {
        let mut vars = Vec::new();
        while self.check_keyword(KeywordId::Var) {
            vars.push(self.var_decl()?);
        }
        let statements = self.statements()?;
        if self.check_keyword(KeywordId::Var) {
            return Err(self
                .error_here("`var` sections must come before the first statement")
                .with_hint("move this declaration to the top of the body"));
        }
        Ok(Body { vars, statements })
    }
}
