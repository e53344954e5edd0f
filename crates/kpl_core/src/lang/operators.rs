//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the binary precedence ladder,
//! associativity, and whether an operator may also appear in prefix position.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact (`>>>` is one operator, not `>>` + `>`).
//! - The ladder is total and strict: every binary operator sits on exactly one [`Precedence`] level and
//!   all binary operators are left-associative.
//! - `=` is listed for completeness (assignment / initializers / `for` ranges) but has no binary
//!   precedence: it never continues an expression.
//!
//! ## Examples
//! ```rust
//! use kpl_core::lang::operators::{self, OperatorId, Precedence};
//!
//! assert_eq!(operators::from_str(">>>"), Some(OperatorId::UShr));
//! assert_eq!(operators::binary_precedence(OperatorId::Star), Some(Precedence::Multiplicative));
//! assert!(Precedence::Multiplicative > Precedence::Additive);
//! ```

/// Precedence levels, lowest to highest.
///
/// ## Notes
/// - `KeywordMessage` and `CustomInfix` are reserved at the bottom of the ladder for user-defined message
///   sends; no built-in operator uses them.
/// - Levels above `Multiplicative` are not binary: they order unary prefixes, postfix chains, calls, and primaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precedence {
    KeywordMessage = 1,
    CustomInfix = 2,
    LogicalOr = 3,
    LogicalAnd = 4,
    BitwiseOr = 5,
    BitwiseXor = 6,
    BitwiseAnd = 7,
    Equality = 8,
    Relational = 9,
    Shift = 10,
    Additive = 11,
    Multiplicative = 12,
    Unary = 13,
    Postfix = 14,
    Call = 15,
    Primary = 16,
}

/// Every level, in ascending order.
pub const PRECEDENCE_LADDER: &[Precedence] = &[
    Precedence::KeywordMessage,
    Precedence::CustomInfix,
    Precedence::LogicalOr,
    Precedence::LogicalAnd,
    Precedence::BitwiseOr,
    Precedence::BitwiseXor,
    Precedence::BitwiseAnd,
    Precedence::Equality,
    Precedence::Relational,
    Precedence::Shift,
    Precedence::Additive,
    Precedence::Multiplicative,
    Precedence::Unary,
    Precedence::Postfix,
    Precedence::Call,
    Precedence::Primary,
];

impl Precedence {
    /// Numeric level (1 = loosest, 16 = tightest).
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Look a level up by its number.
    pub fn from_level(level: u8) -> Option<Precedence> {
        PRECEDENCE_LADDER.iter().copied().find(|p| p.level() == level)
    }

    /// The next tighter level, or `None` at the top of the ladder.
    pub fn tighter(self) -> Option<Precedence> {
        Self::from_level(self.level() + 1)
    }
}

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Logical
    OrOr,
    AndAnd,
    Bang,

    // Bitwise
    Pipe,
    Caret,
    Amp,
    Tilde,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Shifts
    Shl,
    Shr,
    UShr,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Assignment
    Eq,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `binary` is `None` for operators that never appear infix in expressions.
/// - `prefix` marks operators accepted in prefix position: `! - * &` in unary expressions, plus `~`, which only
///   appears as the name of a `prefix` method.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub binary: Option<Precedence>,
    pub prefix: bool,
    pub associativity: Associativity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Logical
    op(OperatorId::OrOr, "||", Some(Precedence::LogicalOr), false),
    op(OperatorId::AndAnd, "&&", Some(Precedence::LogicalAnd), false),
    prefix_op(OperatorId::Bang, "!"),
    // Bitwise
    op(OperatorId::Pipe, "|", Some(Precedence::BitwiseOr), false),
    op(OperatorId::Caret, "^", Some(Precedence::BitwiseXor), false),
    op(OperatorId::Amp, "&", Some(Precedence::BitwiseAnd), true),
    prefix_op(OperatorId::Tilde, "~"),
    // Comparison
    op(OperatorId::EqEq, "==", Some(Precedence::Equality), false),
    op(OperatorId::NotEq, "!=", Some(Precedence::Equality), false),
    op(OperatorId::Lt, "<", Some(Precedence::Relational), false),
    op(OperatorId::LtEq, "<=", Some(Precedence::Relational), false),
    op(OperatorId::Gt, ">", Some(Precedence::Relational), false),
    op(OperatorId::GtEq, ">=", Some(Precedence::Relational), false),
    // Shifts
    op(OperatorId::Shl, "<<", Some(Precedence::Shift), false),
    op(OperatorId::Shr, ">>", Some(Precedence::Shift), false),
    op(OperatorId::UShr, ">>>", Some(Precedence::Shift), false),
    // Arithmetic
    op(OperatorId::Plus, "+", Some(Precedence::Additive), false),
    op(OperatorId::Minus, "-", Some(Precedence::Additive), true),
    op(OperatorId::Star, "*", Some(Precedence::Multiplicative), true),
    op(OperatorId::Slash, "/", Some(Precedence::Multiplicative), false),
    op(OperatorId::Percent, "%", Some(Precedence::Multiplicative), false),
    // Assignment
    op(OperatorId::Eq, "=", None, false),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Binary precedence of `id`, or `None` if it never continues an expression as an infix operator.
pub fn binary_precedence(id: OperatorId) -> Option<Precedence> {
    info_for(id).binary
}

/// Return `true` if `id` may start a unary expression (`! - * &`).
///
/// ## Notes
/// - `~` is a prefix *method name* only, so it is excluded here.
pub fn is_unary_prefix(id: OperatorId) -> bool {
    info_for(id).prefix && id != OperatorId::Tilde
}

/// Return `true` if `id` may name a `prefix` method (`! - * & ~`).
pub fn is_prefix_method_name(id: OperatorId) -> bool {
    info_for(id).prefix
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, binary: Option<Precedence>, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        binary,
        prefix,
        associativity: Associativity::Left,
    }
}

const fn prefix_op(id: OperatorId, spelling: &'static str) -> OperatorInfo {
    OperatorInfo {
        associativity: Associativity::Right,
        ..op(id, spelling, None, true)
    }
}
