//! String and character literal scanning.
//!
//! Both literal forms share one escape syntax: a backslash followed by any character. The recognised escapes map
//! to control characters (`\n`, `\t`, `\r`, `\0`, `\a`, `\b`, `\f`, `\v`); any other escaped character stands for
//! itself (`\\`, `\'`, `\"`, `\q` -> `q`).
//!
//! Strings may span lines. Character literals hold exactly one (possibly escaped) character.

use super::{Lexer, TokenKind};
use crate::ast::Position;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    /// Scan a `"..."` literal; the opening quote is already consumed.
    pub(super) fn scan_string(&mut self, start: usize, start_position: Position) -> Result<(), CompileError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some(escaped) => value.push(unescape(escaped)),
                    None => return Err(self.unterminated("string", start, start_position)),
                },
                Some(c) => value.push(c),
                None => return Err(self.unterminated("string", start, start_position)),
            }
        }
        self.add_token(TokenKind::String(value), start, start_position);
        Ok(())
    }

    /// Scan a `'c'` literal; the opening quote is already consumed.
    pub(super) fn scan_char(&mut self, start: usize, start_position: Position) -> Result<(), CompileError> {
        let value = match self.advance() {
            Some('\'') => {
                return Err(self.error_from("empty character literal", start, start_position));
            }
            Some('\\') => match self.advance() {
                Some(escaped) => unescape(escaped),
                None => return Err(self.unterminated("character", start, start_position)),
            },
            Some(c) => c,
            None => return Err(self.unterminated("character", start, start_position)),
        };

        if !self.match_char('\'') {
            return Err(self
                .unterminated("character", start, start_position)
                .with_note("a character literal holds exactly one character; use \"...\" for strings"));
        }
        self.add_token(TokenKind::Char(value), start, start_position);
        Ok(())
    }

    fn unterminated(&self, what: &str, start: usize, start_position: Position) -> CompileError {
        self.error_from(format!("unterminated {what} literal"), start, start_position)
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Position;
    use crate::diagnostics::ErrorKind;
    use crate::lexer::{TokenKind, lex};

    fn single(source: &str) -> TokenKind {
        let tokens = lex(source).unwrap_or_else(|e| panic!("lex({source:?}) failed: {e}"));
        assert_eq!(tokens.len(), 2, "{tokens:?}");
        tokens[0].kind.clone()
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(single(r#""a\tb\n\"q\"\\""#), TokenKind::String("a\tb\n\"q\"\\".into()));
    }

    #[test]
    fn test_unknown_escape_keeps_character() {
        assert_eq!(single(r#""\q""#), TokenKind::String("q".into()));
    }

    #[test]
    fn test_string_may_span_lines() {
        let tokens = lex("\"one\ntwo\" x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("one\ntwo".into()));
        assert_eq!(tokens[0].end, Position::new(2, 5));
        assert_eq!(tokens[1].start, Position::new(2, 6));
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(single("'a'"), TokenKind::Char('a'));
        assert_eq!(single(r"'\n'"), TokenKind::Char('\n'));
        assert_eq!(single(r"'\''"), TokenKind::Char('\''));
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("x = \"open").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert_eq!(err.position, Position::new(1, 5));
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn test_bad_character_literals() {
        assert_eq!(lex("'ab'").unwrap_err().message, "unterminated character literal");
        assert_eq!(lex("'a").unwrap_err().message, "unterminated character literal");
        assert_eq!(lex("''").unwrap_err().message, "empty character literal");
    }
}
