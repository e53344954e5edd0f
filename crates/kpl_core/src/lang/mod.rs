//! KPL vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved words, operators, and punctuation.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer/parser/diagnostics.
//! Instead, callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics, docs,
//!   highlighting).
//!
//! ## Examples
//! ```rust
//! use kpl_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("endWhile"), Some(KeywordId::EndWhile));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! assert_eq!(keywords::terminator_for(KeywordId::While), Some(KeywordId::EndWhile));
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
