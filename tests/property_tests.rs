//! Property-based tests for the KPL frontend
//!
//! These tests use proptest to verify invariants across many randomly generated inputs, catching edge cases that
//! hand-written tests might miss.

use kpl::ast::{Declaration, Statement, Unit};
use kpl::parse_source;
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,5}".prop_filter("reserved", |s| kpl_core::lang::keywords::from_str(s).is_none())
}

/// Wrap statements in a function inside a code unit.
fn in_function(body: &str) -> String {
    format!("code Test\n  function f()\n{body}\n  endFunction\nendCode\n")
}

fn function_statements(source: &str) -> Vec<Statement> {
    let program = parse_source(source).unwrap_or_else(|e| panic!("parse failed: {e}\n{source}"));
    let Some(Unit::Code(code)) = program.units.into_iter().next().map(|u| u.node) else {
        panic!("expected code unit");
    };
    let Some(Declaration::Function(f)) = code.declarations.into_iter().next().map(|d| d.node) else {
        panic!("expected function");
    };
    f.body.statements.into_iter().map(|s| s.node).collect()
}

proptest! {
    /// Property: arbitrary text never panics the frontend; it either parses or reports an error.
    #[test]
    fn frontend_never_panics(source in "\\PC{0,300}") {
        let _ = parse_source(&source);
    }

    /// Property: keyword soup never panics either.
    #[test]
    fn keyword_soup_never_panics(words in prop::collection::vec(
        prop::sample::select(vec![
            "code", "endCode", "if", "endIf", "while", "endWhile", "var", "x", ":", "int", "=", "1", "*", "\n",
            "for", "(", ")", ";", "to", "switch", "case", "default", "try", "catch", "function", "endFunction",
        ]),
        0..60,
    )) {
        let _ = parse_source(&words.join(" "));
    }

    /// Property: nested `while` loops close in reverse order, whatever the depth.
    #[test]
    fn nested_blocks_close_in_reverse_order(depth in 1usize..20) {
        let body = format!("{}x = 1\n{}", "while true\n".repeat(depth), "endWhile\n".repeat(depth));
        let stmts = function_statements(&in_function(&body));
        prop_assert_eq!(stmts.len(), 1);

        let mut current = &stmts[0];
        for _ in 1..depth {
            let Statement::While(w) = current else {
                return Err(TestCaseError::fail("expected while"));
            };
            prop_assert_eq!(w.body.len(), 1);
            current = &w.body[0].node;
        }
    }

    /// Property: each line that starts with `*` begins a new statement.
    #[test]
    fn leading_star_always_splits(names in prop::collection::vec(ident(), 1..6)) {
        let body = names.iter().map(|n| format!("*{n}")).collect::<Vec<_>>().join("\n");
        let stmts = function_statements(&in_function(&format!("x\n{body}")));
        prop_assert_eq!(stmts.len(), names.len() + 1);
    }
}
