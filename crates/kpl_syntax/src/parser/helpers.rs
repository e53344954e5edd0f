/// Token cursor helpers, block bookkeeping, and error construction.
///
/// ## Notes
/// - Every entrypoint checks that the stream ends in `Eof`, and `advance` never moves past it, so `peek` always has
///   a token to return.
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Look `offset` tokens ahead, stopping at `Eof`.
    fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn peek_next(&self) -> &Token {
        self.peek_at(1)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous().span)
    }

    // ========================================================================
    // Checks
    // ========================================================================

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<Span, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(&format!("`{}`", keywords::as_str(id))))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<Span, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(&format!("`{}`", kpl_core::lang::punctuation::as_str(id))))
        }
    }

    fn expect_op(&mut self, id: OperatorId) -> Result<Span, CompileError> {
        if self.check_op(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(&format!("`{}`", operators::as_str(id))))
        }
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Consume the opener keyword `opener` and record the terminator it now owes.
    fn open_block(&mut self, opener: KeywordId) -> Result<Span, CompileError> {
        let position = self.peek().start;
        let span = self.expect_keyword(opener)?;
        self.open_blocks.push(OpenBlock { opener, position });
        Ok(span)
    }

    /// Consume the terminator owed by the innermost open block.
    ///
    /// ## Errors
    /// - `UnexpectedEof` if input ends first.
    /// - `Syntax` naming the expected terminator, the opener and where it was opened, if any other token is found.
    fn close_block(&mut self) -> Result<Span, CompileError> {
        let Some(block) = self.open_blocks.last().copied() else {
            return Err(self.error_expected("end of block"));
        };
        // Every opener pushed through `open_block` has a registered terminator.
        let Some(terminator) = keywords::terminator_for(block.opener) else {
            return Err(self.error_expected("end of block"));
        };

        if self.check_keyword(terminator) {
            self.open_blocks.pop();
            return Ok(self.advance().span);
        }

        let found = self.peek();
        let expected = keywords::as_str(terminator);
        let opener = keywords::as_str(block.opener);
        if matches!(found.kind, TokenKind::Eof) {
            return Err(errors::unclosed_block(expected, opener, block.position, found.span, found.start));
        }

        let mut err = errors::mismatched_terminator(
            expected,
            opener,
            block.position,
            &found.kind.to_string(),
            found.span,
            found.start,
        );
        if let Some(found_terminator) = found.keyword_id().filter(|id| keywords::is_terminator(*id)) {
            if let Some(other_opener) = keywords::opener_for(found_terminator) {
                err = err.with_note(format!(
                    "`{}` closes `{}`, but the innermost open block is `{opener}`",
                    keywords::as_str(found_terminator),
                    keywords::as_str(other_opener)
                ));
            }
        }
        Err(err)
    }

    /// Run `f` one nesting level deeper, failing once `max_nesting_depth` is reached.
    ///
    /// The stack is grown before descending, so any depth within the limit is safe on any thread.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CompileError>) -> Result<T, CompileError> {
        if self.depth >= self.options.max_nesting_depth {
            let token = self.peek();
            return Err(errors::nesting_too_deep(self.options.max_nesting_depth, token.span, token.start));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// "expected X, found Y" at the current token.
    ///
    /// At end of input this is an `UnexpectedEof` error that also names the innermost block still open.
    fn error_expected(&self, expected: &str) -> CompileError {
        let token = self.peek();
        if matches!(token.kind, TokenKind::Eof) {
            let err =
                CompileError::unexpected_eof(format!("expected {expected}, found end of input"), token.span, token.start);
            return match self.open_blocks.last() {
                Some(block) => err.with_note(format!(
                    "`{}` opened at {} is still open",
                    keywords::as_str(block.opener),
                    block.position
                )),
                None => err,
            };
        }
        errors::unexpected_token(expected, &token.kind.to_string(), token.span, token.start)
    }

    /// A syntax error at the current token with a free-form message.
    fn error_here(&self, message: impl Into<String>) -> CompileError {
        let token = self.peek();
        CompileError::syntax(message, token.span, token.start)
    }
}
