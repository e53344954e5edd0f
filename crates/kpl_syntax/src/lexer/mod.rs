//! Lexer for the KPL programming language
//!
//! Handles tokenization including:
//! - Reserved words and identifiers (reserved words are case-sensitive: `endIf`, not `endif`)
//! - Literals (decimal and `0x` integers, doubles, characters, strings)
//! - Operators and punctuation (`>>>` is a single operator)
//! - Whitespace and comments (`-- line` and non-nesting `/* block */`), which are skipped
//!
//! Every token carries its start and end line/column so the parser can decide whether a `*` sits on the same line
//! as the token before it.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String and character literal scanning
//! - `numbers` - Numeric literal scanning
//! - `comments` - Whitespace and comment skipping

mod comments;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::{Position, Span};
use crate::diagnostics::CompileError;
use kpl_core::lang::operators::OperatorId;
use kpl_core::lang::punctuation::PunctuationId;

/// Lexer for KPL source code.
///
/// Converts source text into a stream of tokens. Lexing is fail-fast: the first invalid character or unterminated
/// literal/comment stops the scan with a [`CompileError`] of kind `Lexical`.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// 1-based line of the next character.
    line: usize,
    /// 1-based column (in characters) of the next character.
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token.
    ///
    /// ## Errors
    /// Returns the first lexical error encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, CompileError> {
        loop {
            self.skip_trivia()?;
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }

        let here = self.position();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
            here,
            here,
        ));
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        // `\n`, `\r\n` and a lone `\r` each end a line.
        let line_break = c == '\n' || (c == '\r' && self.peek() != Some('\n'));
        if line_break {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), CompileError> {
        let start = self.current_pos;
        let start_position = self.position();

        let Some(c) = self.advance() else {
            return Ok(());
        };

        match c {
            // Operators
            '+' => self.add_op(OperatorId::Plus, start, start_position),
            '-' => self.add_op(OperatorId::Minus, start, start_position),
            '*' => self.add_op(OperatorId::Star, start, start_position),
            '/' => self.add_op(OperatorId::Slash, start, start_position),
            '%' => self.add_op(OperatorId::Percent, start, start_position),
            '^' => self.add_op(OperatorId::Caret, start, start_position),
            '~' => self.add_op(OperatorId::Tilde, start, start_position),
            '!' => self.operator(start, start_position, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '=' => self.operator(start, start_position, OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '&' => self.operator(start, start_position, OperatorId::Amp, &[('&', OperatorId::AndAnd)]),
            '|' => self.operator(start, start_position, OperatorId::Pipe, &[('|', OperatorId::OrOr)]),
            '<' => self.operator(
                start,
                start_position,
                OperatorId::Lt,
                &[('<', OperatorId::Shl), ('=', OperatorId::LtEq)],
            ),
            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        self.add_op(OperatorId::UShr, start, start_position);
                    } else {
                        self.add_op(OperatorId::Shr, start, start_position);
                    }
                } else if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start, start_position);
                } else {
                    self.add_op(OperatorId::Gt, start, start_position);
                }
            }

            // Punctuation
            ',' => self.add_punct(PunctuationId::Comma, start, start_position),
            ':' => self.add_punct(PunctuationId::Colon, start, start_position),
            ';' => self.add_punct(PunctuationId::Semicolon, start, start_position),
            '.' => self.add_punct(PunctuationId::Dot, start, start_position),
            '(' => self.add_punct(PunctuationId::LParen, start, start_position),
            ')' => self.add_punct(PunctuationId::RParen, start, start_position),
            '[' => self.add_punct(PunctuationId::LBracket, start, start_position),
            ']' => self.add_punct(PunctuationId::RBracket, start, start_position),
            '{' => self.add_punct(PunctuationId::LBrace, start, start_position),
            '}' => self.add_punct(PunctuationId::RBrace, start, start_position),

            // Literals
            '"' => self.scan_string(start, start_position)?,
            '\'' => self.scan_char(start, start_position)?,
            '0'..='9' => self.scan_number(start, start_position, c)?,

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start, start_position),

            _ => {
                return Err(CompileError::lexical(
                    format!("unexpected character {c:?}"),
                    Span::new(start, self.current_pos),
                    start_position,
                ));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize, start_position: Position) {
        let end = self.position();
        self.tokens
            .push(Token::new(kind, Span::new(start, self.current_pos), start_position, end));
    }

    fn add_op(&mut self, id: OperatorId, start: usize, start_position: Position) {
        self.add_token(TokenKind::Operator(id), start, start_position);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize, start_position: Position) {
        self.add_token(TokenKind::Punctuation(id), start, start_position);
    }

    /// Try to match a two-character operator, fallback to the single-character one.
    fn operator(
        &mut self,
        start: usize,
        start_position: Position,
        simple: OperatorId,
        compounds: &[(char, OperatorId)],
    ) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start, start_position);
                return;
            }
        }
        self.add_op(simple, start, start_position);
    }

    /// Build a lexical error spanning from `start` to the current cursor.
    fn error_from(&self, message: impl Into<String>, start: usize, start_position: Position) -> CompileError {
        CompileError::lexical(message, Span::new(start, self.current_pos), start_position)
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize, start_position: Position) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Look up identifier spelling in the reserved-word registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start, start_position);
        } else {
            let name = spelling.to_string();
            self.add_token(TokenKind::Ident(name), start, start_position);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    let result = Lexer::new(source).tokenize();
    if let Err(err) = &result {
        tracing::debug!(position = %err.position, message = %err.message, "lexing failed");
    }
    result
}

// ============================================================================
// TESTS
// ============================================================================
