//! Syntax frontend for KPL: lexer, parser, AST, diagnostics.
//!
//! This crate turns KPL source text into a syntax tree. It is the shared entrypoint for anything that needs to read
//! KPL programs (compilers, linters, editor tooling).
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not do name resolution, type checking, or code generation.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `kpl_core::lang` registries.
//! - Parsing is fail-fast: the first lexical or syntax error aborts the whole parse and no partial tree is returned.
//!
//! ## Examples
//! ```rust
//! use kpl_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("code Main\n  var x: int = 1\nendCode\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.units.len(), 1);
//! ```
//!
//! ## See also
//! - `kpl_core::lang` for registry-backed language vocabulary (keywords/operators/punctuation/precedence).

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
mod stack;
pub mod token_helpers;
