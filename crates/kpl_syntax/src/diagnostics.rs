//! Error reporting for the KPL frontend.
//!
//! Every failure the lexer or parser can produce is a single [`CompileError`]: the frontend is fail-fast, so there
//! is never more than one error per run and never a partial tree alongside it.
//!
//! `CompileError` implements [`miette::Diagnostic`], so callers can either render it with [`render_error`] /
//! [`print_error`] or hand it to their own miette report handler.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource};

use crate::ast::{Position, Span};

/// A lexical or syntax error with its source location.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at {position}: {message}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    pub position: Position,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            position,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Invalid character, unterminated literal or unterminated block comment.
    pub fn lexical(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self::new(ErrorKind::Lexical, message, span, position)
    }

    pub fn syntax(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, span, position)
    }

    /// Input ended while a construct was still open.
    pub fn unexpected_eof(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self::new(ErrorKind::UnexpectedEof, message, span, position)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    UnexpectedEof,
}

impl ErrorKind {
    /// Stable diagnostic code reported through miette.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "kpl::lexical",
            ErrorKind::Syntax => "kpl::syntax",
            ErrorKind::UnexpectedEof => "kpl::unexpected_eof",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
        }
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.hints.is_empty() && self.notes.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .hints
            .iter()
            .cloned()
            .chain(self.notes.iter().map(|n| format!("note: {n}")))
            .collect();
        Some(Box::new(lines.join("\n")))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let len = self.span.end.saturating_sub(self.span.start);
        let label = match self.kind {
            ErrorKind::Lexical => "invalid input here",
            ErrorKind::Syntax => "unexpected here",
            ErrorKind::UnexpectedEof => "input ends here",
        };
        Some(Box::new(std::iter::once(LabeledSpan::at((self.span.start, len), label))))
    }
}

/// Render an error with source context as plain text (no ANSI colours).
///
/// ## Parameters
/// - `file_name`: name shown in the report header.
/// - `source`: the full text the error's span points into.
pub fn render_error(file_name: &str, source: &str, error: &CompileError) -> String {
    let report =
        miette::Report::new(error.clone()).with_source_code(NamedSource::new(file_name, source.to_string()));
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    if handler.render_report(&mut out, &*report).is_err() {
        // Fall back to the one-line form; rendering into a String only fails on a formatter bug.
        out = format!("{file_name}:{error}\n");
    }
    out
}

/// Print an error with source context to stderr.
pub fn print_error(file_name: &str, source: &str, error: &CompileError) {
    eprint!("{}", render_error(file_name, source, error));
}

// ============================================================================
// Error catalog: the recurring syntax errors, worded consistently
// ============================================================================

pub mod errors {
    use super::*;

    /// A block was closed by the wrong terminator (or by something that is not a terminator at all).
    pub fn mismatched_terminator(
        expected: &str,
        opener: &str,
        opened_at: Position,
        found: &str,
        span: Span,
        position: Position,
    ) -> CompileError {
        CompileError::syntax(
            format!("expected `{expected}` to close `{opener}` opened at {opened_at}, found {found}"),
            span,
            position,
        )
    }

    /// Input ended inside an open block.
    pub fn unclosed_block(expected: &str, opener: &str, opened_at: Position, span: Span, position: Position) -> CompileError {
        CompileError::unexpected_eof(
            format!("expected `{expected}` to close `{opener}` opened at {opened_at}, found end of input"),
            span,
            position,
        )
    }

    pub fn unexpected_token(expected: &str, found: &str, span: Span, position: Position) -> CompileError {
        CompileError::syntax(format!("expected {expected}, found {found}"), span, position)
    }

    pub fn nesting_too_deep(limit: usize, span: Span, position: Position) -> CompileError {
        CompileError::syntax(format!("nesting too deep (limit is {limit})"), span, position)
            .with_hint("split the construct into smaller functions or raise `max_nesting_depth`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompileError {
        errors::mismatched_terminator(
            "endWhile",
            "while",
            Position::new(1, 1),
            "`endIf`",
            Span::new(18, 23),
            Position::new(1, 19),
        )
        .with_hint("every `while` must be closed by `endWhile`")
    }

    #[test]
    fn display_includes_kind_position_and_message() {
        let err = sample();
        assert_eq!(
            err.to_string(),
            "syntax error at 1:19: expected `endWhile` to close `while` opened at 1:1, found `endIf`"
        );
    }

    #[test]
    fn diagnostic_code_tracks_kind() {
        let err = sample();
        assert_eq!(err.code().map(|c| c.to_string()), Some("kpl::syntax".to_string()));
        let eof = CompileError::unexpected_eof("x", Span::new(0, 0), Position::new(1, 1));
        assert_eq!(eof.code().map(|c| c.to_string()), Some("kpl::unexpected_eof".to_string()));
    }

    #[test]
    fn render_is_plain_text_with_source_context() {
        let source = "while true x = 1 endIf";
        let rendered = render_error("main.k", source, &sample());
        assert!(rendered.contains("kpl::syntax"), "{rendered}");
        assert!(rendered.contains("main.k"), "{rendered}");
        assert!(rendered.contains("endWhile"), "{rendered}");
        assert!(rendered.contains("every `while` must be closed"), "{rendered}");
        assert!(!rendered.contains('\u{1b}'), "report must not contain ANSI escapes");
    }
}
