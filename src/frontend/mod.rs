//! KPL frontend entrypoints
//!
//! Runs the two frontend phases back to back:
//! - `lexer`: source text to tokens
//! - `parser`: tokens to a [`Program`]
//!
//! Both phases are fail-fast, so every function here returns the first error encountered and never a partial tree.

use std::path::{Path, PathBuf};

use thiserror::Error;

// Syntax components are provided by the shared kpl_syntax crate.
pub use kpl_syntax::{ast, diagnostics, lexer, parser};

use ast::Program;
use diagnostics::CompileError;
use parser::ParseOptions;

/// Errors from the frontend entrypoints.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl FrontendError {
    /// The lexical or syntax error, if this is one.
    pub fn compile_error(&self) -> Option<&CompileError> {
        match self {
            FrontendError::Compile(err) => Some(err),
            FrontendError::Io { .. } => None,
        }
    }
}

/// Lex and parse `source` with default options.
///
/// ## Examples
/// ```rust
/// let program = kpl::frontend::parse_source("header Lib\n  const MAX = 10\nendHeader\n").unwrap();
/// assert_eq!(program.units.len(), 1);
/// ```
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_source(source: &str) -> Result<Program, CompileError> {
    parse_source_with_options(source, ParseOptions::default())
}

pub fn parse_source_with_options(source: &str, options: ParseOptions) -> Result<Program, CompileError> {
    let tokens = lexer::lex(source)?;
    tracing::debug!(tokens = tokens.len(), "lexed");
    parser::parse_with_options(&tokens, options)
}

/// Read a `.kpl` file and parse it.
///
/// ## Errors
/// - [`FrontendError::Io`] if the file cannot be read.
/// - [`FrontendError::Compile`] for the first lexical or syntax error.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Program, FrontendError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| FrontendError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_source(&source)?)
}
