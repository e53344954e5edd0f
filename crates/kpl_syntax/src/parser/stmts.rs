/// Statements.
///
/// Statements have no separator: a statement list simply continues while the next token can start a statement,
/// and stops at the first token that cannot (a terminator, `elseIf`, `case`, `catch`, `;`, `)` ...). Whatever
/// construct owns the list then decides whether that token is acceptable.
impl<'a> Parser<'a> {
    /// Can the current token begin a statement?
    ///
    /// A closure never starts a statement: a stray `function` inside a body is far more likely a missing
    /// `endFunction`, and stopping here reports it as one.
    fn is_at_statement_start(&self) -> bool {
        match self.peek().keyword_id() {
            Some(KeywordId::Function) => false,
            Some(
                KeywordId::If
                | KeywordId::While
                | KeywordId::Do
                | KeywordId::For
                | KeywordId::Switch
                | KeywordId::Try
                | KeywordId::Return
                | KeywordId::Break
                | KeywordId::Continue
                | KeywordId::Throw
                | KeywordId::Free
                | KeywordId::Debug,
            ) => true,
            _ => self.is_at_expression_start(),
        }
    }

    fn statements(&mut self) -> Result<Vec<Spanned<Statement>>, CompileError> {
        let mut statements = Vec::new();
        while self.is_at_statement_start() {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        self.nested(|p| {
            let start = p.current_span();
            let stmt = p.statement_inner()?;
            Ok(Spanned::new(stmt, p.span_from(start)))
        })
    }

    fn statement_inner(&mut self) -> Result<Statement, CompileError> {
        match self.peek().keyword_id() {
            Some(KeywordId::If) => self.if_statement(),
            Some(KeywordId::While) => self.while_statement(),
            Some(KeywordId::Do) => self.do_until_statement(),
            Some(KeywordId::For) => self.for_statement(),
            Some(KeywordId::Switch) => self.switch_statement(),
            Some(KeywordId::Try) => self.try_statement(),
            Some(KeywordId::Return) => {
                self.advance();
                let value = if self.is_at_expression_start() {
                    Some(self.expression()?)
                } else {
                    None
                };
                Ok(Statement::Return(value))
            }
            Some(KeywordId::Break) => {
                self.advance();
                Ok(Statement::Break)
            }
            Some(KeywordId::Continue) => {
                self.advance();
                Ok(Statement::Continue)
            }
            Some(KeywordId::Debug) => {
                self.advance();
                Ok(Statement::Debug)
            }
            Some(KeywordId::Throw) => {
                self.advance();
                let name = self.identifier("error name")?;
                let args = self.argument_list()?;
                Ok(Statement::Throw(ThrowStmt { name, args }))
            }
            Some(KeywordId::Free) => {
                self.advance();
                Ok(Statement::Free(self.expression()?))
            }
            _ => {
                let left = self.expression()?;
                if self.match_op(OperatorId::Eq) {
                    let right = self.expression()?;
                    Ok(Statement::Assignment(AssignmentStmt { left, right }))
                } else {
                    Ok(Statement::Expr(left))
                }
            }
        }
    }

    /// `if cond ... [elseIf cond ...]* [else ...] endIf`
    fn if_statement(&mut self) -> Result<Statement, CompileError> {
        self.open_block(KeywordId::If)?;
        let condition = self.expression()?;
        let then_body = self.statements()?;

        let mut else_ifs = Vec::new();
        while self.match_keyword(KeywordId::ElseIf) {
            let condition = self.expression()?;
            let body = self.statements()?;
            else_ifs.push(ElseIfClause { condition, body });
        }
        let else_body = if self.match_keyword(KeywordId::Else) {
            Some(self.statements()?)
        } else {
            None
        };

        let trailing_clause = self.check_keyword(KeywordId::ElseIf) || self.check_keyword(KeywordId::Else);
        self.close_block().map_err(|err| {
            if trailing_clause {
                err.with_hint("`else` must be the last clause of an `if`")
            } else {
                err
            }
        })?;

        Ok(Statement::If(IfStmt {
            condition,
            then_body,
            else_ifs,
            else_body,
        }))
    }

    /// `while cond ... endWhile`
    fn while_statement(&mut self) -> Result<Statement, CompileError> {
        self.open_block(KeywordId::While)?;
        let condition = self.expression()?;
        let body = self.statements()?;
        self.close_block()?;
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    /// `do ... until cond`
    fn do_until_statement(&mut self) -> Result<Statement, CompileError> {
        self.open_block(KeywordId::Do)?;
        let body = self.statements()?;
        self.close_block()?;
        let condition = self.expression()?;
        Ok(Statement::DoUntil(DoUntilStmt { body, condition }))
    }

    /// Either form of `for`, chosen by [`Parser::at_classic_for`].
    fn for_statement(&mut self) -> Result<Statement, CompileError> {
        let classic = self.at_classic_for();
        self.open_block(KeywordId::For)?;

        let stmt = if classic {
            self.expect_punct(PunctuationId::LParen)?;
            let init = self.statements()?;
            self.expect_punct(PunctuationId::Semicolon)?;
            let condition = if self.check_punct(PunctuationId::Semicolon) {
                None
            } else {
                Some(self.expression()?)
            };
            self.expect_punct(PunctuationId::Semicolon)?;
            let increment = self.statements()?;
            self.expect_punct(PunctuationId::RParen)?;
            let body = self.statements()?;
            ForStmt::Classic {
                init,
                condition,
                increment,
                body,
            }
        } else {
            let iterator = self.expression()?;
            self.expect_op(OperatorId::Eq)?;
            let from = self.expression()?;
            self.expect_keyword(KeywordId::To)?;
            let to = self.expression()?;
            let by = if self.match_keyword(KeywordId::By) {
                Some(self.expression()?)
            } else {
                None
            };
            let body = self.statements()?;
            ForStmt::Range {
                iterator,
                from,
                to,
                by,
                body,
            }
        };

        self.close_block()?;
        Ok(Statement::For(stmt))
    }

    /// `switch value case v: ... [default: ...] endSwitch` with at least one `case`.
    fn switch_statement(&mut self) -> Result<Statement, CompileError> {
        self.open_block(KeywordId::Switch)?;
        let value = self.expression()?;

        if !self.check_keyword(KeywordId::Case) {
            return Err(self
                .error_expected("`case`")
                .with_hint("a `switch` needs at least one `case` clause"));
        }
        let mut cases = Vec::new();
        while self.match_keyword(KeywordId::Case) {
            let value = self.expression()?;
            self.expect_punct(PunctuationId::Colon)?;
            let body = self.statements()?;
            cases.push(CaseClause { value, body });
        }
        let default = if self.match_keyword(KeywordId::Default) {
            self.expect_punct(PunctuationId::Colon)?;
            Some(self.statements()?)
        } else {
            None
        };

        let trailing_clause = self.check_keyword(KeywordId::Default) || self.check_keyword(KeywordId::Case);
        self.close_block().map_err(|err| {
            if trailing_clause {
                err.with_hint("a `switch` has at most one `default` clause and it must come last")
            } else {
                err
            }
        })?;

        Ok(Statement::Switch(SwitchStmt { value, cases, default }))
    }

    /// `try ... catch Name(params): ... endTry` with at least one `catch`.
    fn try_statement(&mut self) -> Result<Statement, CompileError> {
        self.open_block(KeywordId::Try)?;
        let body = self.statements()?;

        if !self.check_keyword(KeywordId::Catch) {
            return Err(self
                .error_expected("`catch`")
                .with_hint("a `try` needs at least one `catch` clause"));
        }
        let mut catches = Vec::new();
        while self.match_keyword(KeywordId::Catch) {
            let name = self.identifier("error name")?;
            let params = self.parameter_list()?;
            self.expect_punct(PunctuationId::Colon)?;
            let body = self.statements()?;
            catches.push(CatchClause { name, params, body });
        }

        self.close_block()?;
        Ok(Statement::Try(TryStmt { body, catches }))
    }
}
