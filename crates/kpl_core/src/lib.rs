//! Canonical language vocabulary for the KPL (Kernel Programming Language) frontend.
//!
//! This crate is intentionally small and dependency-free. It holds the read-only tables that every parse consults:
//! reserved words, operators (with their binary precedence ladder), and punctuation.
//!
//! ## Notes
//!
//! - All tables are `const` data. They exist before the first parse and are never mutated, so any number of parses may
//!   share them across threads.
//! - Syntax rules themselves (what may follow what) live in `kpl_syntax`; this crate only names things.

pub mod lang;
