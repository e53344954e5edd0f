// ============================================================================
// Public entrypoints
// ============================================================================

/// Parse a token stream into a [`Program`] with default [`ParseOptions`].
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, CompileError> {
    parse_with_options(tokens, ParseOptions::default())
}

/// Parse a token stream into a [`Program`].
///
/// ## Errors
/// Returns the first error; no partial tree is produced.
pub fn parse_with_options(tokens: &[Token], options: ParseOptions) -> Result<Program, CompileError> {
    traced(Parser::with_options(tokens, options).parse())
}

/// Parse a statement list with no enclosing unit (`x = 1  while x < 3 x = x + 1 endWhile`).
///
/// Useful for tests and tooling that work on snippets.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_fragment(tokens: &[Token]) -> Result<Vec<Spanned<Statement>>, CompileError> {
    traced(Parser::new(tokens).parse_statements_to_end())
}

/// Parse a single expression that spans the whole token stream.
///
/// ## Examples
/// ```rust
/// use kpl_syntax::{lexer, parser};
///
/// let tokens = lexer::lex("a + b * c").unwrap();
/// let expr = parser::parse_expression(&tokens).unwrap();
/// assert_eq!(expr.to_string(), "(+ a (* b c))");
/// ```
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_expression(tokens: &[Token]) -> Result<Spanned<Expr>, CompileError> {
    traced(Parser::new(tokens).parse_expression_to_end())
}

fn traced<T>(result: Result<T, CompileError>) -> Result<T, CompileError> {
    if let Err(err) = &result {
        tracing::debug!(position = %err.position, kind = %err.kind, message = %err.message, "parsing failed");
    }
    result
}
