/// Multi-token decisions the grammar cannot make from the current token alone.
///
/// ## Notes
/// - Predicates only inspect tokens; they never build AST or report errors, so rewinding the cursor is enough to
///   undo them.
/// - Each decision is traced at `trace` level (`RUST_LOG=kpl_syntax=trace`) so surprising parses can be explained.
impl<'a> Parser<'a> {
    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    /// Run `f` and restore the cursor afterwards.
    fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.rewind(checkpoint);
        result
    }

    /// Does a declarator of the shape `name (, name)* :` start here?
    ///
    /// Used after each `var` declarator to decide whether the section continues, and for class fields, record
    /// fields and parameters which share the same shape. `var a: int = 1  b, c: char` continues; `var a: int  b = 2`
    /// does not (`b = 2` is an assignment statement).
    fn at_declarator_start(&mut self) -> bool {
        let starts = self.look_ahead(|p| {
            if !p.check_ident() {
                return false;
            }
            p.advance();
            while p.match_punct(PunctuationId::Comma) {
                if !p.check_ident() {
                    return false;
                }
                p.advance();
            }
            p.check_punct(PunctuationId::Colon)
        });
        tracing::trace!(at = %self.peek().start, starts, "declarator boundary");
        starts
    }

    /// `name =`: the start of a `const` or `type` declarator.
    fn at_binding_start(&self) -> bool {
        self.check_ident() && self.peek_next().kind.is_operator(OperatorId::Eq)
    }

    /// `name (`: the start of an error declarator or a function prototype.
    fn at_signature_start(&self) -> bool {
        self.check_ident() && self.peek_next().kind.is_punctuation(PunctuationId::LParen)
    }

    /// `name :`: one part of a keyword method prototype.
    fn at_keyword_part(&self) -> bool {
        self.check_ident() && self.peek_next().kind.is_punctuation(PunctuationId::Colon)
    }

    fn at_method_prototype_start(&self) -> bool {
        self.check_keyword(KeywordId::Infix)
            || self.check_keyword(KeywordId::Prefix)
            || self.at_signature_start()
            || self.at_keyword_part()
    }

    /// Does the `*` under the cursor continue the expression to its left?
    ///
    /// Only when it sits on the line where the left operand ends. A `*` at the start of a new line begins a
    /// dereference in the next statement, so `x = a\n*p = 3` is two statements.
    fn star_continues_expression(&self) -> bool {
        let same_line = self.previous().ends_on_line_of(self.peek());
        tracing::trace!(at = %self.peek().start, same_line, "`*` placement");
        same_line
    }

    /// `for (` selects the classic three-part form; anything else is the range form.
    fn at_classic_for(&self) -> bool {
        let classic = self.peek().kind.is_keyword(KeywordId::For) && self.peek_next().kind.is_punctuation(PunctuationId::LParen);
        tracing::trace!(at = %self.peek().start, classic, "`for` form");
        classic
    }

    /// `{ name =` selects the field-initializer form of a constructor.
    fn at_field_initializers(&self) -> bool {
        self.check_punct(PunctuationId::LBrace)
            && matches!(self.peek_at(1).kind, TokenKind::Ident(_))
            && self.peek_at(2).kind.is_operator(OperatorId::Eq)
    }

    /// `*` followed by `,` or `]` inside array dimensions is an unsized dimension.
    fn at_dynamic_dimension(&self) -> bool {
        self.check_op(OperatorId::Star)
            && (self.peek_next().kind.is_punctuation(PunctuationId::Comma)
                || self.peek_next().kind.is_punctuation(PunctuationId::RBracket))
    }
}
