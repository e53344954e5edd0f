/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint, plus the
/// expected-terminator record pushed for every open block.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// A block that has been opened and still awaits its terminator.
#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    opener: KeywordId,
    position: Position,
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and fail-fast: the first error ends the parse.
/// - All state (cursor, open blocks, depth) is local to one parser; separate parses share nothing but the
///   read-only vocabulary tables in `kpl_core`.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: ParseOptions,
    /// Innermost block last.
    open_blocks: Vec<OpenBlock>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `kpl_syntax::lexer`, ending in `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            open_blocks: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns the first [`CompileError`] encountered.
    pub fn parse(mut self) -> Result<Program, CompileError> {
        self.check_stream()?;
        let mut units = Vec::new();

        while !self.is_at_end() {
            units.push(self.unit()?);
        }

        Ok(Program { units })
    }

    /// Parse statements up to the end of input (no enclosing unit or function).
    fn parse_statements_to_end(mut self) -> Result<Vec<Spanned<Statement>>, CompileError> {
        self.check_stream()?;
        let statements = self.statements()?;
        if !self.is_at_end() {
            return Err(self.error_expected("statement"));
        }
        Ok(statements)
    }

    /// Parse a single expression that must span the whole input.
    fn parse_expression_to_end(mut self) -> Result<Spanned<Expr>, CompileError> {
        self.check_stream()?;
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(self.error_expected("end of expression"));
        }
        Ok(expr)
    }

    /// Reject token streams that do not end in `Eof` (the cursor relies on it as a sentinel).
    fn check_stream(&self) -> Result<(), CompileError> {
        match self.tokens.last() {
            Some(last) if matches!(last.kind, TokenKind::Eof) => Ok(()),
            Some(last) => Err(CompileError::syntax(
                "token stream must end with an end-of-input token",
                last.span,
                last.end,
            )),
            None => Err(CompileError::syntax(
                "token stream must end with an end-of-input token",
                Span::default(),
                Position::default(),
            )),
        }
    }
}
