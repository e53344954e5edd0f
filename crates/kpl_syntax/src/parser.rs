//! Parser for the KPL programming language
//!
//! Converts a token stream into an AST. The grammar is keyword-delimited: every block opened by a keyword (`if`,
//! `while`, `class`, `header`, ...) must be closed by its own terminator (`endIf`, `endWhile`, `endClass`,
//! `endHeader`, ...), and statements have no separator token.
//!
//! Two decisions need more than one token of context and live in `parser/lookahead.rs`:
//! - where one `var` declarator ends and the next begins (`var a, b: int = 1 c: char`)
//! - whether a `*` continues the current expression (same line) or starts a dereference (next line)
//!
//! ## Examples
//!
//! ```rust
//! use kpl_syntax::{lexer, parser};
//!
//! let source = "code Main\n  function main()\n    x = 1 + 2 * 3\n  endFunction\nendCode\n";
//! let tokens = lexer::lex(source).unwrap();
//! let ast = parser::parse(&tokens).unwrap();
//! assert_eq!(ast.units.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::{CompileError, errors};
use crate::lexer::{Token, TokenKind};
use crate::stack::ensure_sufficient_stack;
use kpl_core::lang::keywords::{self, KeywordId};
use kpl_core::lang::operators::{self, OperatorId, Precedence};
use kpl_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/options.rs");
include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/lookahead.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
