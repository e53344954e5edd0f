//! Define the reserved word vocabulary for KPL.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings
//! and categories. It also owns the block-terminator table ([`BLOCK_TERMINATORS`]) that pairs
//! every block-opening keyword with the one `end<X>` word allowed to close it.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`endIf` is reserved, `endif` is an identifier).
//! - Every reserved word is unavailable as an identifier, including the primitive type names.
//! - This registry is intentionally **pure** (no AST/IO/side effects).
//!
//! ## Examples
//! ```rust
//! use kpl_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elseIf"), Some(KeywordId::ElseIf));
//! assert_eq!(keywords::from_str("elseif"), None);
//! assert_eq!(keywords::terminator_for(KeywordId::Do), Some(KeywordId::Until));
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Units
    Header,
    EndHeader,
    Code,
    EndCode,
    Uses,
    Renaming,

    // Declarations
    Const,
    Enum,
    Type,
    Errors,
    Var,
    Functions,
    Function,
    EndFunction,
    Returns,
    External,
    Interface,
    Extends,
    Messages,
    EndInterface,
    Class,
    Implements,
    Superclass,
    Fields,
    Methods,
    EndClass,
    Behavior,
    EndBehavior,
    Method,
    EndMethod,
    Infix,
    Prefix,

    // Statements
    If,
    ElseIf,
    Else,
    EndIf,
    While,
    EndWhile,
    Do,
    Until,
    For,
    EndFor,
    By,
    Switch,
    Case,
    Default,
    EndSwitch,
    Try,
    Catch,
    EndTry,
    Return,
    Break,
    Continue,
    Throw,
    Free,
    Debug,

    // Expressions
    New,
    Alloc,
    SizeOf,
    AsPtrTo,
    AsInteger,
    ArraySize,
    IsInstanceOf,
    IsKindOf,
    SelfKw,
    Super,

    // Literals
    True,
    False,
    Null,

    // Types
    Record,
    EndRecord,
    Ptr,
    To,
    Array,
    Of,

    // Primitive types
    Int,
    Bool,
    Char,
    Double,
    Void,
    TypeOfNull,
    AnyType,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// `header` / `code` / `uses` / `renaming`.
    Unit,
    /// Words that introduce a declaration or a section inside one.
    Declaration,
    /// Words that close a block (`endIf`, `until`, ...).
    Terminator,
    /// Statement-leading words and clause markers.
    ControlFlow,
    /// Expression forms spelled with a word (`new`, `sizeOf`, postfix type operators).
    Expression,
    /// `true` / `false` / `null`.
    Literal,
    /// Type constructors (`ptr`, `array`, `record`).
    Type,
    /// Built-in primitive type names.
    PrimitiveType,
    /// Linking words inside a larger construct (`to`, `of`, `by`, `returns`).
    Connective,
}

/// Metadata for a reserved word.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved words.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Units
    info(KeywordId::Header, "header", KeywordCategory::Unit),
    info(KeywordId::EndHeader, "endHeader", KeywordCategory::Terminator),
    info(KeywordId::Code, "code", KeywordCategory::Unit),
    info(KeywordId::EndCode, "endCode", KeywordCategory::Terminator),
    info(KeywordId::Uses, "uses", KeywordCategory::Unit),
    info(KeywordId::Renaming, "renaming", KeywordCategory::Unit),
    // Declarations
    info(KeywordId::Const, "const", KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration),
    info(KeywordId::Type, "type", KeywordCategory::Declaration),
    info(KeywordId::Errors, "errors", KeywordCategory::Declaration),
    info(KeywordId::Var, "var", KeywordCategory::Declaration),
    info(KeywordId::Functions, "functions", KeywordCategory::Declaration),
    info(KeywordId::Function, "function", KeywordCategory::Declaration),
    info(KeywordId::EndFunction, "endFunction", KeywordCategory::Terminator),
    info(KeywordId::Returns, "returns", KeywordCategory::Connective),
    info(KeywordId::External, "external", KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration),
    info(KeywordId::Extends, "extends", KeywordCategory::Declaration),
    info(KeywordId::Messages, "messages", KeywordCategory::Declaration),
    info(KeywordId::EndInterface, "endInterface", KeywordCategory::Terminator),
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Implements, "implements", KeywordCategory::Declaration),
    info(KeywordId::Superclass, "superclass", KeywordCategory::Declaration),
    info(KeywordId::Fields, "fields", KeywordCategory::Declaration),
    info(KeywordId::Methods, "methods", KeywordCategory::Declaration),
    info(KeywordId::EndClass, "endClass", KeywordCategory::Terminator),
    info(KeywordId::Behavior, "behavior", KeywordCategory::Declaration),
    info(KeywordId::EndBehavior, "endBehavior", KeywordCategory::Terminator),
    info(KeywordId::Method, "method", KeywordCategory::Declaration),
    info(KeywordId::EndMethod, "endMethod", KeywordCategory::Terminator),
    info(KeywordId::Infix, "infix", KeywordCategory::Declaration),
    info(KeywordId::Prefix, "prefix", KeywordCategory::Declaration),
    // Statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::ElseIf, "elseIf", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::EndIf, "endIf", KeywordCategory::Terminator),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::EndWhile, "endWhile", KeywordCategory::Terminator),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    info(KeywordId::Until, "until", KeywordCategory::Terminator),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::EndFor, "endFor", KeywordCategory::Terminator),
    info(KeywordId::By, "by", KeywordCategory::Connective),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow),
    info(KeywordId::EndSwitch, "endSwitch", KeywordCategory::Terminator),
    info(KeywordId::Try, "try", KeywordCategory::ControlFlow),
    info(KeywordId::Catch, "catch", KeywordCategory::ControlFlow),
    info(KeywordId::EndTry, "endTry", KeywordCategory::Terminator),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow),
    info(KeywordId::Throw, "throw", KeywordCategory::ControlFlow),
    info(KeywordId::Free, "free", KeywordCategory::ControlFlow),
    info(KeywordId::Debug, "debug", KeywordCategory::ControlFlow),
    // Expressions
    info(KeywordId::New, "new", KeywordCategory::Expression),
    info(KeywordId::Alloc, "alloc", KeywordCategory::Expression),
    info(KeywordId::SizeOf, "sizeOf", KeywordCategory::Expression),
    info(KeywordId::AsPtrTo, "asPtrTo", KeywordCategory::Expression),
    info(KeywordId::AsInteger, "asInteger", KeywordCategory::Expression),
    info(KeywordId::ArraySize, "arraySize", KeywordCategory::Expression),
    info(KeywordId::IsInstanceOf, "isInstanceOf", KeywordCategory::Expression),
    info(KeywordId::IsKindOf, "isKindOf", KeywordCategory::Expression),
    info(KeywordId::SelfKw, "self", KeywordCategory::Expression),
    info(KeywordId::Super, "super", KeywordCategory::Expression),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
    // Types
    info(KeywordId::Record, "record", KeywordCategory::Type),
    info(KeywordId::EndRecord, "endRecord", KeywordCategory::Terminator),
    info(KeywordId::Ptr, "ptr", KeywordCategory::Type),
    info(KeywordId::To, "to", KeywordCategory::Connective),
    info(KeywordId::Array, "array", KeywordCategory::Type),
    info(KeywordId::Of, "of", KeywordCategory::Connective),
    // Primitive types
    info(KeywordId::Int, "int", KeywordCategory::PrimitiveType),
    info(KeywordId::Bool, "bool", KeywordCategory::PrimitiveType),
    info(KeywordId::Char, "char", KeywordCategory::PrimitiveType),
    info(KeywordId::Double, "double", KeywordCategory::PrimitiveType),
    info(KeywordId::Void, "void", KeywordCategory::PrimitiveType),
    info(KeywordId::TypeOfNull, "typeOfNull", KeywordCategory::PrimitiveType),
    info(KeywordId::AnyType, "anyType", KeywordCategory::PrimitiveType),
];

/// Block-opening keywords paired with the single terminator that closes them.
///
/// ## Notes
/// - There is no generic `end`: a block closed by any other terminator is a syntax error.
/// - `do` is closed by `until` (followed by the loop condition).
pub const BLOCK_TERMINATORS: &[(KeywordId, KeywordId)] = &[
    (KeywordId::Header, KeywordId::EndHeader),
    (KeywordId::Code, KeywordId::EndCode),
    (KeywordId::Function, KeywordId::EndFunction),
    (KeywordId::Interface, KeywordId::EndInterface),
    (KeywordId::Class, KeywordId::EndClass),
    (KeywordId::Behavior, KeywordId::EndBehavior),
    (KeywordId::Method, KeywordId::EndMethod),
    (KeywordId::If, KeywordId::EndIf),
    (KeywordId::While, KeywordId::EndWhile),
    (KeywordId::Do, KeywordId::Until),
    (KeywordId::For, KeywordId::EndFor),
    (KeywordId::Switch, KeywordId::EndSwitch),
    (KeywordId::Try, KeywordId::EndTry),
    (KeywordId::Record, KeywordId::EndRecord),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise (the spelling is an ordinary identifier).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return the terminator that closes a block opened by `opener`, if `opener` opens a block.
pub fn terminator_for(opener: KeywordId) -> Option<KeywordId> {
    BLOCK_TERMINATORS
        .iter()
        .find(|(open, _)| *open == opener)
        .map(|(_, close)| *close)
}

/// Return the block-opening keyword closed by `terminator`, if it is a terminator.
pub fn opener_for(terminator: KeywordId) -> Option<KeywordId> {
    BLOCK_TERMINATORS
        .iter()
        .find(|(_, close)| *close == terminator)
        .map(|(open, _)| *open)
}

/// Return `true` if `id` closes some block.
pub fn is_terminator(id: KeywordId) -> bool {
    opener_for(id).is_some()
}

/// Return `true` if `id` names a built-in primitive type.
pub fn is_primitive_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::PrimitiveType
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
    }
}
