//! Whitespace and comment skipping.
//!
//! KPL has two comment forms:
//! - `--` to end of line
//! - `/* ... */`, which does **not** nest: the first `*/` closes the comment.

use super::Lexer;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    /// Skip whitespace and comments up to the next significant character.
    ///
    /// ## Errors
    /// A `/*` without a closing `*/` is a lexical error reported at the comment's start.
    pub(super) fn skip_trivia(&mut self) -> Result<(), CompileError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('-') if self.peek_next() == Some('-') => self.skip_line_comment(),
                Some('/') if self.peek_next() == Some('*') => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), CompileError> {
        let start = self.current_pos;
        let start_position = self.position();
        self.advance(); // /
        self.advance(); // *

        while let Some(c) = self.advance() {
            if c == '*' && self.match_char('/') {
                return Ok(());
            }
        }

        Err(self
            .error_from("unterminated block comment", start, start_position)
            .with_hint("close the comment with `*/`"))
    }
}
