//! Token types for the KPL lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.
//! - Every token records its start and end [`Position`]; the parser's same-line `*` check compares lines.

use std::fmt;

use crate::ast::{Position, Span};
use kpl_core::lang::keywords::{self, KeywordId};
use kpl_core::lang::operators::{self, OperatorId};
use kpl_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Int(i64),
    HexInt(i64),
    Double(f64),
    Char(char),
    String(String),

    // ========== Special ==========
    Eof,
}

impl fmt::Display for TokenKind {
    /// Human-readable form used in diagnostics (`` `endIf` ``, `` identifier `x` ``, `end of input`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "`{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "`{}`", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "`{}`", punctuation::as_str(*id)),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Int(n) => write!(f, "integer `{n}`"),
            TokenKind::HexInt(n) => write!(f, "integer `0x{n:X}`"),
            TokenKind::Double(d) => write!(f, "number `{d:?}`"),
            TokenKind::Char(c) => write!(f, "character {c:?}"),
            TokenKind::String(s) => write!(f, "string {s:?}"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Position of the first character.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, start: Position, end: Position) -> Self {
        Self { kind, span, start, end }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
