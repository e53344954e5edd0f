#![no_main]

use kpl::parser::ParseOptions;
use kpl::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only UTF-8 input is meaningful source text
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            // Errors are fine; panics and hangs are not
            let _ = parser::parse(&tokens);
            let _ = parser::parse_with_options(&tokens, ParseOptions::new().with_bare_expressions(true));
            let _ = parser::parse_fragment(&tokens);
        }
    }
});
