#![forbid(unsafe_code)]
//! KPL syntax frontend
//!
//! Turns source text of the Kernel Programming Language into a syntax tree. Semantic analysis and code generation
//! are left to downstream tools; this crate only decides whether a program is well-formed and what its tree is.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Lexing and parsing return the
//!   first error as a [`diagnostics::CompileError`]; no input makes them panic.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//! ```rust
//! use kpl::diagnostics::render_error;
//!
//! let source = "code Main\n  function f()\n    while true\n      x = 1\n    endIf\n  endFunction\nendCode\n";
//! let err = kpl::parse_source(source).unwrap_err();
//! assert!(err.message.starts_with("expected `endWhile`"));
//! let report = render_error("main.kpl", source, &err);
//! assert!(report.contains("kpl::syntax"));
//! ```

pub mod frontend;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;

pub use frontend::{FrontendError, parse_file, parse_source, parse_source_with_options};
pub use parser::ParseOptions;
