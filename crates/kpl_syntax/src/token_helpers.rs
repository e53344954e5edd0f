//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use kpl_core::lang::keywords::{self, KeywordId};
use kpl_core::lang::operators::{self, OperatorId};
use kpl_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the identifier spelling, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Return `true` if this token closes a block (`endIf`, `until`, `endClass`, ...).
    pub fn is_terminator(&self) -> bool {
        self.keyword_id().is_some_and(keywords::is_terminator)
    }

    /// Return `true` if this is a literal token (including `true` / `false` / `null`).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int(_) | TokenKind::HexInt(_) | TokenKind::Double(_) | TokenKind::Char(_) | TokenKind::String(_)
        ) || matches!(
            self.keyword_id(),
            Some(KeywordId::True | KeywordId::False | KeywordId::Null)
        )
    }

    /// Return `true` if this operator can start a unary expression (`! - * &`).
    pub fn is_unary_prefix(&self) -> bool {
        self.operator_id().is_some_and(operators::is_unary_prefix)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Return `true` if `other` starts on the line this token ends on.
    pub fn ends_on_line_of(&self, other: &Token) -> bool {
        self.end.line == other.start.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn terminator_and_literal_helpers() {
        let tokens = lex("endWhile until null 'c' x").unwrap();
        assert!(tokens[0].kind.is_terminator());
        assert!(tokens[1].kind.is_terminator());
        assert!(tokens[2].kind.is_literal());
        assert!(tokens[3].kind.is_literal());
        assert_eq!(tokens[4].kind.ident(), Some("x"));
        assert!(!tokens[4].kind.is_terminator());
    }

    #[test]
    fn same_line_check() {
        let tokens = lex("a *\nb").unwrap();
        assert!(tokens[0].ends_on_line_of(&tokens[1]));
        assert!(!tokens[1].ends_on_line_of(&tokens[2]));
    }
}
