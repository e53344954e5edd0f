//! Abstract Syntax Tree definitions for KPL
//!
//! This module defines all AST node types for the KPL language. Every grammar production has its own variant or
//! struct, and children are stored under the names the grammar gives them (`condition`, `left`, `right`, `name`,
//! `ty` for `type`, `for_type` for `for`, ...). [`NodeKind`] exposes the production name and field set of each node
//! for tooling that walks the tree by field name.

use std::fmt;

use kpl_core::lang::keywords::KeywordId;
use kpl_core::lang::operators::{self, OperatorId, Precedence};

mod display;
mod kinds;

pub use kinds::{FieldValue, NodeKind};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// 1-based line/column location. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

// ============================================================================
// Units
// ============================================================================

/// A source file: an ordered sequence of top-level units.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub units: Vec<Spanned<Unit>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Header(HeaderUnit),
    Code(CodeUnit),
    /// Bare top-level expression; only produced with `ParseOptions::allow_bare_expressions`.
    Expression(Spanned<Expr>),
}

/// `header <name> [uses ...] <declarations> endHeader`
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderUnit {
    pub name: Ident,
    pub uses: Option<UsesClause>,
    pub declarations: Vec<Spanned<Declaration>>,
}

/// `code <name> <declarations> endCode`
#[derive(Debug, Clone, PartialEq)]
pub struct CodeUnit {
    pub name: Ident,
    pub declarations: Vec<Spanned<Declaration>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsesClause {
    pub packages: Vec<UsedPackage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsedPackage {
    pub name: Ident,
    pub renamings: Vec<Renaming>,
}

/// `renaming <from> to <to>`
#[derive(Debug, Clone, PartialEq)]
pub struct Renaming {
    pub from: Ident,
    pub to: Ident,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Const(ConstDecl),
    Enum(EnumDecl),
    Type(TypeDecl),
    Errors(ErrorsDecl),
    Var(VarDecl),
    Functions(FunctionsSection),
    Function(FunctionDecl),
    Interface(InterfaceDecl),
    Class(ClassDecl),
    Behavior(BehaviorDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub declarators: Vec<Spanned<ConstDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDeclarator {
    pub name: Ident,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub values: Vec<Spanned<EnumValue>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: Ident,
    pub value: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub declarators: Vec<Spanned<TypeDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclarator {
    pub name: Ident,
    pub ty: Spanned<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorsDecl {
    pub declarators: Vec<Spanned<ErrorDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDeclarator {
    pub name: Ident,
    pub params: Vec<Parameter>,
}

/// `var` followed by one or more declarators.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub declarators: Vec<Spanned<VarDeclarator>>,
}

/// `a, b, c: T [= value]`: comma-joined names sharing one type and one optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub names: Vec<Ident>,
    pub ty: Spanned<Type>,
    pub value: Option<Spanned<Expr>>,
}

/// `a, b: T` inside a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub names: Vec<Ident>,
    pub ty: Spanned<Type>,
}

/// `functions` followed by prototypes (header units only).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionsSection {
    pub prototypes: Vec<Spanned<FunctionPrototype>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionPrototype {
    pub external: bool,
    pub name: Ident,
    pub params: Vec<Parameter>,
    pub return_type: Option<Spanned<Type>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Parameter>,
    pub return_type: Option<Spanned<Type>>,
    pub body: Body,
}

/// Local `var` sections followed by statements. Shared by functions, methods and closures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub vars: Vec<Spanned<VarDecl>>,
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: Ident,
    pub ty: Spanned<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: Ident,
    pub type_params: Vec<TypeParameter>,
    pub extends: Vec<Spanned<NamedType>>,
    pub messages: Vec<Spanned<MethodPrototype>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Ident,
    pub type_params: Vec<TypeParameter>,
    pub implements: Vec<Spanned<NamedType>>,
    pub superclass: Option<Spanned<NamedType>>,
    pub fields: Vec<Spanned<ClassField>>,
    pub methods: Vec<Spanned<MethodPrototype>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassField {
    pub names: Vec<Ident>,
    pub ty: Spanned<Type>,
}

/// `behavior <name> [for <type>] method... endBehavior`
///
/// Not bound to the class it implements at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorDecl {
    pub name: Ident,
    pub for_type: Option<Spanned<NamedType>>,
    pub methods: Vec<Spanned<MethodDecl>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub prototype: Spanned<MethodPrototype>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodPrototype {
    pub kind: MethodKind,
    pub return_type: Option<Spanned<Type>>,
}

impl MethodPrototype {
    /// The selector: the method name, the prefix operator spelling, or the joined keywords (`at:put:`).
    pub fn selector(&self) -> String {
        match &self.kind {
            MethodKind::Normal { name, .. } | MethodKind::Infix { name, .. } => name.clone(),
            MethodKind::Prefix { operator, .. } => operators::as_str(*operator).to_string(),
            MethodKind::Keyword { parts } => parts.iter().map(|p| format!("{}:", p.keyword)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodKind {
    /// `name(params)`
    Normal { name: Ident, params: Vec<Parameter> },
    /// `infix name(params)`
    Infix { name: Ident, params: Vec<Parameter> },
    /// `prefix op(params)` with op one of `! - * & ~`
    Prefix { operator: OperatorId, params: Vec<Parameter> },
    /// `kw1: T1 kw2: T2 ...`
    Keyword { parts: Vec<KeywordParameter> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordParameter {
    pub keyword: Ident,
    pub ty: Spanned<Type>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveType),
    /// `ptr to T`
    Pointer { ty: Box<Spanned<Type>> },
    /// `array [d1, d2] of T`; no dimensions means `array of T`
    Array {
        dimensions: Vec<ArrayDimension>,
        ty: Box<Spanned<Type>>,
    },
    /// `record field... endRecord`
    Record { fields: Vec<RecordField> },
    /// `function (T1, T2) returns R`
    Function {
        params: Vec<Spanned<Type>>,
        return_type: Option<Box<Spanned<Type>>>,
    },
    Named(NamedType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Bool,
    Char,
    Double,
    Void,
    TypeOfNull,
    AnyType,
}

impl PrimitiveType {
    pub fn from_keyword(id: KeywordId) -> Option<Self> {
        Some(match id {
            KeywordId::Int => PrimitiveType::Int,
            KeywordId::Bool => PrimitiveType::Bool,
            KeywordId::Char => PrimitiveType::Char,
            KeywordId::Double => PrimitiveType::Double,
            KeywordId::Void => PrimitiveType::Void,
            KeywordId::TypeOfNull => PrimitiveType::TypeOfNull,
            KeywordId::AnyType => PrimitiveType::AnyType,
            _ => return None,
        })
    }

    pub fn keyword(self) -> KeywordId {
        match self {
            PrimitiveType::Int => KeywordId::Int,
            PrimitiveType::Bool => KeywordId::Bool,
            PrimitiveType::Char => KeywordId::Char,
            PrimitiveType::Double => KeywordId::Double,
            PrimitiveType::Void => KeywordId::Void,
            PrimitiveType::TypeOfNull => KeywordId::TypeOfNull,
            PrimitiveType::AnyType => KeywordId::AnyType,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayDimension {
    /// `*`
    Dynamic,
    Sized(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub names: Vec<Ident>,
    pub ty: Spanned<Type>,
}

/// `Name` or `Name[T1, T2]`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: Ident,
    pub args: Vec<Spanned<Type>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(IfStmt),
    While(WhileStmt),
    DoUntil(DoUntilStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Try(TryStmt),
    Return(Option<Spanned<Expr>>),
    Break,
    Continue,
    Throw(ThrowStmt),
    Free(Spanned<Expr>),
    Debug,
    Assignment(AssignmentStmt),
    Expr(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Vec<Spanned<Statement>>,
    pub else_ifs: Vec<ElseIfClause>,
    pub else_body: Option<Vec<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause {
    pub condition: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

/// `do ... until condition`
#[derive(Debug, Clone, PartialEq)]
pub struct DoUntilStmt {
    pub body: Vec<Spanned<Statement>>,
    pub condition: Spanned<Expr>,
}

/// The two `for` shapes, selected by whether `(` follows `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForStmt {
    /// `for i = from to to [by step] ... endFor`
    Range {
        iterator: Spanned<Expr>,
        from: Spanned<Expr>,
        to: Spanned<Expr>,
        by: Option<Spanned<Expr>>,
        body: Vec<Spanned<Statement>>,
    },
    /// `for (init ; [condition] ; increment) ... endFor`
    Classic {
        init: Vec<Spanned<Statement>>,
        condition: Option<Spanned<Expr>>,
        increment: Vec<Spanned<Statement>>,
        body: Vec<Spanned<Statement>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub value: Spanned<Expr>,
    pub cases: Vec<CaseClause>,
    pub default: Option<Vec<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub value: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub body: Vec<Spanned<Statement>>,
    pub catches: Vec<CatchClause>,
}

/// `catch ErrorName(params): ...`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub name: Ident,
    pub params: Vec<Parameter>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStmt {
    pub name: Ident,
    pub args: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub left: Spanned<Expr>,
    pub right: Spanned<Expr>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Ident),
    SelfExpr,
    Super,
    Paren(Box<Spanned<Expr>>),
    Binary {
        left: Box<Spanned<Expr>>,
        operator: BinaryOp,
        right: Box<Spanned<Expr>>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    /// `f(args)`: only a bare identifier can be called directly.
    Call {
        function: Ident,
        args: Vec<Spanned<Expr>>,
    },
    Field {
        object: Box<Spanned<Expr>>,
        field: Ident,
    },
    MethodCall {
        object: Box<Spanned<Expr>>,
        method: Ident,
        args: Vec<Spanned<Expr>>,
    },
    Index {
        array: Box<Spanned<Expr>>,
        index: Box<Spanned<Expr>>,
    },
    AsPtrTo {
        expr: Box<Spanned<Expr>>,
        ty: Box<Spanned<Type>>,
    },
    AsInteger(Box<Spanned<Expr>>),
    ArraySize(Box<Spanned<Expr>>),
    IsInstanceOf {
        expr: Box<Spanned<Expr>>,
        ty: Box<Spanned<Type>>,
    },
    IsKindOf {
        expr: Box<Spanned<Expr>>,
        ty: Box<Spanned<Type>>,
    },
    SizeOf(Box<Spanned<Type>>),
    Constructor(ConstructorExpr),
    Closure(ClosureExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// `0x` literal; kept apart from `Int` so tooling can echo the original radix.
    Hex(i64),
    Double(f64),
    Char(char),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Map a lexed operator to its binary form, if it has one.
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        Some(match id {
            OperatorId::OrOr => BinaryOp::Or,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::Pipe => BinaryOp::BitOr,
            OperatorId::Caret => BinaryOp::BitXor,
            OperatorId::Amp => BinaryOp::BitAnd,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::Shl => BinaryOp::Shl,
            OperatorId::Shr => BinaryOp::Shr,
            OperatorId::UShr => BinaryOp::UShr,
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Percent => BinaryOp::Rem,
            OperatorId::Bang | OperatorId::Tilde | OperatorId::Eq => return None,
        })
    }

    pub fn operator_id(self) -> OperatorId {
        match self {
            BinaryOp::Or => OperatorId::OrOr,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::BitOr => OperatorId::Pipe,
            BinaryOp::BitXor => OperatorId::Caret,
            BinaryOp::BitAnd => OperatorId::Amp,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::Shl => OperatorId::Shl,
            BinaryOp::Shr => OperatorId::Shr,
            BinaryOp::UShr => OperatorId::UShr,
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Rem => OperatorId::Percent,
        }
    }

    pub fn precedence(self) -> Precedence {
        // Every BinaryOp maps to an operator with a binary level.
        operators::binary_precedence(self.operator_id()).unwrap_or(Precedence::Multiplicative)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator_id()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
    /// `*`
    Deref,
    /// `&`
    AddrOf,
}

impl UnaryOp {
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        match id {
            OperatorId::Bang => Some(UnaryOp::Not),
            OperatorId::Minus => Some(UnaryOp::Neg),
            OperatorId::Star => Some(UnaryOp::Deref),
            OperatorId::Amp => Some(UnaryOp::AddrOf),
            _ => None,
        }
    }

    pub fn operator_id(self) -> OperatorId {
        match self {
            UnaryOp::Not => OperatorId::Bang,
            UnaryOp::Neg => OperatorId::Minus,
            UnaryOp::Deref => OperatorId::Star,
            UnaryOp::AddrOf => OperatorId::Amp,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(operators::as_str(self.operator_id()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructorKind {
    New,
    Alloc,
}

/// `new T [{...}]` / `alloc T [{...}]`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorExpr {
    pub kind: ConstructorKind,
    pub ty: Box<Spanned<Type>>,
    pub init: Option<Initializer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// `{name = value, ...}`
    Fields(Vec<FieldInit>),
    /// `{[count of] value, ...}`
    Array(Vec<ArrayInit>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInit {
    pub name: Ident,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayInit {
    pub count: Option<Spanned<Expr>>,
    pub value: Spanned<Expr>,
}

/// `function (params) [returns T] ... endFunction` in expression position.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureExpr {
    pub params: Vec<Parameter>,
    pub return_type: Option<Box<Spanned<Type>>>,
    pub body: Body,
}

// ============================================================================
// Visitor trait for AST traversal
// ============================================================================

/// Read-only traversal. Every `visit_*` defaults to walking its children, so an implementor only overrides the
/// nodes it cares about (calling the matching `walk_*` to keep descending).
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        for unit in &program.units {
            self.visit_unit(unit);
        }
    }

    fn visit_unit(&mut self, unit: &Spanned<Unit>) {
        match &unit.node {
            Unit::Header(h) => h.declarations.iter().for_each(|d| self.visit_declaration(d)),
            Unit::Code(c) => c.declarations.iter().for_each(|d| self.visit_declaration(d)),
            Unit::Expression(e) => self.visit_expr(e),
        }
    }

    fn visit_declaration(&mut self, decl: &Spanned<Declaration>) {
        walk_declaration(self, decl);
    }

    fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
        walk_statement(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &Spanned<Type>) {
        walk_type(self, ty);
    }
}

pub fn walk_declaration<V: Visitor + ?Sized>(v: &mut V, decl: &Spanned<Declaration>) {
    match &decl.node {
        Declaration::Const(c) => c.declarators.iter().for_each(|d| v.visit_expr(&d.node.value)),
        Declaration::Enum(e) => e.values.iter().filter_map(|d| d.node.value.as_ref()).for_each(|x| v.visit_expr(x)),
        Declaration::Type(t) => t.declarators.iter().for_each(|d| v.visit_type(&d.node.ty)),
        Declaration::Errors(e) => e.declarators.iter().for_each(|d| walk_parameters(v, &d.node.params)),
        Declaration::Var(var) => walk_var_decl(v, var),
        Declaration::Functions(section) => {
            for proto in &section.prototypes {
                walk_parameters(v, &proto.node.params);
                if let Some(ty) = &proto.node.return_type {
                    v.visit_type(ty);
                }
            }
        }
        Declaration::Function(f) => {
            walk_parameters(v, &f.params);
            if let Some(ty) = &f.return_type {
                v.visit_type(ty);
            }
            walk_body(v, &f.body);
        }
        Declaration::Interface(i) => {
            i.type_params.iter().for_each(|p| v.visit_type(&p.ty));
            i.extends.iter().for_each(|n| walk_named_type(v, &n.node));
            i.messages.iter().for_each(|m| walk_prototype(v, &m.node));
        }
        Declaration::Class(c) => {
            c.type_params.iter().for_each(|p| v.visit_type(&p.ty));
            c.implements.iter().chain(&c.superclass).for_each(|n| walk_named_type(v, &n.node));
            c.fields.iter().for_each(|f| v.visit_type(&f.node.ty));
            c.methods.iter().for_each(|m| walk_prototype(v, &m.node));
        }
        Declaration::Behavior(b) => {
            if let Some(for_type) = &b.for_type {
                walk_named_type(v, &for_type.node);
            }
            for method in &b.methods {
                walk_prototype(v, &method.node.prototype.node);
                walk_body(v, &method.node.body);
            }
        }
    }
}

fn walk_parameters<V: Visitor + ?Sized>(v: &mut V, params: &[Parameter]) {
    params.iter().for_each(|p| v.visit_type(&p.ty));
}

fn walk_prototype<V: Visitor + ?Sized>(v: &mut V, proto: &MethodPrototype) {
    match &proto.kind {
        MethodKind::Normal { params, .. } | MethodKind::Infix { params, .. } | MethodKind::Prefix { params, .. } => {
            walk_parameters(v, params)
        }
        MethodKind::Keyword { parts } => parts.iter().for_each(|p| v.visit_type(&p.ty)),
    }
    if let Some(ty) = &proto.return_type {
        v.visit_type(ty);
    }
}

fn walk_named_type<V: Visitor + ?Sized>(v: &mut V, named: &NamedType) {
    named.args.iter().for_each(|a| v.visit_type(a));
}

fn walk_var_decl<V: Visitor + ?Sized>(v: &mut V, var: &VarDecl) {
    for d in &var.declarators {
        v.visit_type(&d.node.ty);
        if let Some(value) = &d.node.value {
            v.visit_expr(value);
        }
    }
}

fn walk_body<V: Visitor + ?Sized>(v: &mut V, body: &Body) {
    for var in &body.vars {
        walk_var_decl(v, &var.node);
    }
    walk_block(v, &body.statements);
}

fn walk_block<V: Visitor + ?Sized>(v: &mut V, stmts: &[Spanned<Statement>]) {
    for s in stmts {
        v.visit_statement(s);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, stmt: &Spanned<Statement>) {
    match &stmt.node {
        Statement::If(s) => {
            v.visit_expr(&s.condition);
            walk_block(v, &s.then_body);
            for clause in &s.else_ifs {
                v.visit_expr(&clause.condition);
                walk_block(v, &clause.body);
            }
            if let Some(body) = &s.else_body {
                walk_block(v, body);
            }
        }
        Statement::While(s) => {
            v.visit_expr(&s.condition);
            walk_block(v, &s.body);
        }
        Statement::DoUntil(s) => {
            walk_block(v, &s.body);
            v.visit_expr(&s.condition);
        }
        Statement::For(ForStmt::Range {
            iterator,
            from,
            to,
            by,
            body,
        }) => {
            v.visit_expr(iterator);
            v.visit_expr(from);
            v.visit_expr(to);
            if let Some(by) = by {
                v.visit_expr(by);
            }
            walk_block(v, body);
        }
        Statement::For(ForStmt::Classic {
            init,
            condition,
            increment,
            body,
        }) => {
            walk_block(v, init);
            if let Some(c) = condition {
                v.visit_expr(c);
            }
            walk_block(v, increment);
            walk_block(v, body);
        }
        Statement::Switch(s) => {
            v.visit_expr(&s.value);
            for case in &s.cases {
                v.visit_expr(&case.value);
                walk_block(v, &case.body);
            }
            if let Some(body) = &s.default {
                walk_block(v, body);
            }
        }
        Statement::Try(s) => {
            walk_block(v, &s.body);
            for c in &s.catches {
                walk_parameters(v, &c.params);
                walk_block(v, &c.body);
            }
        }
        Statement::Return(Some(e)) | Statement::Free(e) | Statement::Expr(e) => v.visit_expr(e),
        Statement::Throw(t) => t.args.iter().for_each(|a| v.visit_expr(a)),
        Statement::Assignment(a) => {
            v.visit_expr(&a.left);
            v.visit_expr(&a.right);
        }
        Statement::Return(None) | Statement::Break | Statement::Continue | Statement::Debug => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        Expr::Literal(_) | Expr::Ident(_) | Expr::SelfExpr | Expr::Super => {}
        Expr::Paren(e) | Expr::AsInteger(e) | Expr::ArraySize(e) => v.visit_expr(e),
        Expr::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Call { args, .. } => args.iter().for_each(|a| v.visit_expr(a)),
        Expr::Field { object, .. } => v.visit_expr(object),
        Expr::MethodCall { object, args, .. } => {
            v.visit_expr(object);
            args.iter().for_each(|a| v.visit_expr(a));
        }
        Expr::Index { array, index } => {
            v.visit_expr(array);
            v.visit_expr(index);
        }
        Expr::AsPtrTo { expr, ty } | Expr::IsInstanceOf { expr, ty } | Expr::IsKindOf { expr, ty } => {
            v.visit_expr(expr);
            v.visit_type(ty);
        }
        Expr::SizeOf(ty) => v.visit_type(ty),
        Expr::Constructor(c) => {
            v.visit_type(&c.ty);
            match &c.init {
                Some(Initializer::Fields(fields)) => fields.iter().for_each(|f| v.visit_expr(&f.value)),
                Some(Initializer::Array(items)) => {
                    for item in items {
                        if let Some(count) = &item.count {
                            v.visit_expr(count);
                        }
                        v.visit_expr(&item.value);
                    }
                }
                None => {}
            }
        }
        Expr::Closure(c) => {
            walk_parameters(v, &c.params);
            if let Some(ty) = &c.return_type {
                v.visit_type(ty);
            }
            walk_body(v, &c.body);
        }
    }
}

pub fn walk_type<V: Visitor + ?Sized>(v: &mut V, ty: &Spanned<Type>) {
    match &ty.node {
        Type::Primitive(_) => {}
        Type::Pointer { ty } => v.visit_type(ty),
        Type::Array { dimensions, ty } => {
            for dim in dimensions {
                if let ArrayDimension::Sized(size) = dim {
                    v.visit_expr(size);
                }
            }
            v.visit_type(ty);
        }
        Type::Record { fields } => fields.iter().for_each(|f| v.visit_type(&f.ty)),
        Type::Function { params, return_type } => {
            params.iter().for_each(|p| v.visit_type(p));
            if let Some(ret) = return_type {
                v.visit_type(ret);
            }
        }
        Type::Named(named) => walk_named_type(v, named),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    #[derive(Default)]
    struct Collector {
        idents: Vec<String>,
        statements: usize,
        types: usize,
    }

    impl Visitor for Collector {
        fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
            self.statements += 1;
            walk_statement(self, stmt);
        }

        fn visit_expr(&mut self, expr: &Spanned<Expr>) {
            if let Expr::Ident(name) = &expr.node {
                self.idents.push(name.clone());
            }
            walk_expr(self, expr);
        }

        fn visit_type(&mut self, _ty: &Spanned<Type>) {
            self.types += 1;
        }
    }

    #[test]
    fn visitor_reaches_nested_statements_and_expressions() {
        let source = "code M\n  function f()\n    var a: int = b\n    while a < c\n      if d\n        e = f(g)\n      endIf\n    endWhile\n  endFunction\nendCode\n";
        let tokens = lexer::lex(source).unwrap();
        let program = parser::parse(&tokens).unwrap();

        let mut collector = Collector::default();
        collector.visit_program(&program);

        assert_eq!(collector.idents, vec!["b", "a", "c", "d", "e", "g"]);
        assert_eq!(collector.statements, 3);
        assert_eq!(collector.types, 1);
    }

    #[derive(Default)]
    struct TypeCollector {
        kinds: Vec<&'static str>,
        idents: Vec<String>,
    }

    impl Visitor for TypeCollector {
        fn visit_type(&mut self, ty: &Spanned<Type>) {
            self.kinds.push(ty.node.kind().name());
            walk_type(self, ty);
        }

        fn visit_expr(&mut self, expr: &Spanned<Expr>) {
            if let Expr::Ident(name) = &expr.node {
                self.idents.push(name.clone());
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn visitor_reaches_signature_and_nested_types() {
        let source = "code M\n  class C [T: int] implements I[bool] superclass Base\n    fields\n      x, y: array [n] of char\n    methods\n      at: int put: ptr to T returns bool\n  endClass\n  function f(p: int) returns double\n    try\n      debug\n    catch Bad(code: anyType):\n      debug\n    endTry\n  endFunction\nendCode\n";
        let tokens = lexer::lex(source).unwrap();
        let program = parser::parse(&tokens).unwrap();

        let mut collector = TypeCollector::default();
        collector.visit_program(&program);

        assert_eq!(
            collector.kinds,
            vec![
                "primitive_type",
                "primitive_type",
                "array_type",
                "primitive_type",
                "primitive_type",
                "pointer_type",
                "named_type",
                "primitive_type",
                "primitive_type",
                "primitive_type",
                "primitive_type",
            ]
        );
        assert_eq!(collector.idents, vec!["n"]);
    }
}
