//! Numeric literal scanning.
//!
//! Forms:
//! - decimal integer: `[0-9]+`
//! - hex integer: `0x` / `0X` followed by at least one hex digit
//! - double: `[0-9]+ . [0-9]+` with an optional exponent `e[+-]?[0-9]+`
//!
//! A fraction needs digits on both sides of the dot (`1.foo` is `1` `.` `foo`), and an exponent is only part of a
//! double (`1e5` is the integer `1` followed by the identifier `e5`).

use super::{Lexer, TokenKind};
use crate::ast::Position;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    /// Scan a numeric literal whose first digit has already been consumed.
    pub(super) fn scan_number(&mut self, start: usize, start_position: Position, first: char) -> Result<(), CompileError> {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            return self.scan_hex(start, start_position);
        }

        self.consume_digits();

        let is_double = self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if !is_double {
            let text = &self.source[start..self.current_pos];
            let value = text.parse::<i64>().map_err(|_| {
                self.error_from(format!("integer literal `{text}` is out of range"), start, start_position)
            })?;
            self.add_token(TokenKind::Int(value), start, start_position);
            return Ok(());
        }

        self.advance(); // .
        self.consume_digits();
        if self.exponent_follows() {
            self.advance(); // e / E
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.consume_digits();
        }

        let text = &self.source[start..self.current_pos];
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error_from(format!("invalid number `{text}`"), start, start_position))?;
        self.add_token(TokenKind::Double(value), start, start_position);
        Ok(())
    }

    fn scan_hex(&mut self, start: usize, start_position: Position) -> Result<(), CompileError> {
        self.advance(); // x / X
        let digits_start = self.current_pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
        }

        let digits = &self.source[digits_start..self.current_pos];
        if digits.is_empty() {
            return Err(self
                .error_from("hex literal has no digits", start, start_position)
                .with_hint("write at least one hex digit after `0x`, e.g. `0x1F`"));
        }
        let value = i64::from_str_radix(digits, 16).map_err(|_| {
            self.error_from(format!("hex literal `0x{digits}` is out of range"), start, start_position)
        })?;
        self.add_token(TokenKind::HexInt(value), start, start_position);
        Ok(())
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// `e` / `E`, an optional sign, then at least one digit.
    fn exponent_follows(&self) -> bool {
        let rest = self.source[self.current_pos..].as_bytes();
        match rest {
            [b'e' | b'E', b'+' | b'-', d, ..] | [b'e' | b'E', d, ..] => d.is_ascii_digit(),
            _ => false,
        }
    }
}
