//! Production names and named-field access for syntax tree nodes.
//!
//! Downstream tools address children by the names the grammar gives them (`condition`, `left`, `type`, ...) rather
//! than by position. Each node reports a static [`NodeKind`] (production name plus its field names) and answers
//! `field(name)` lookups with a borrowed [`FieldValue`].
//!
//! ## Notes
//! - Field names follow the grammar spelling: `type` and `for`, not the Rust field names `ty` / `for_type`.
//! - Lists (statement bodies, argument lists) are not named fields; reach them through the typed structs.

use kpl_core::lang::operators;

use super::{
    ArrayInit, CaseClause, CatchClause, ConstDeclarator, Declaration, ElseIfClause, EnumValue, Expr, FieldInit,
    ForStmt, Ident, KeywordParameter, NamedType, Parameter, Renaming, Spanned, Statement, Type, TypeDeclarator,
    VarDeclarator,
};

/// Production name and named fields of one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKind {
    name: &'static str,
    fields: &'static [&'static str],
}

impl NodeKind {
    const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }
}

/// A child reached by field name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Expr(&'a Spanned<Expr>),
    Type(&'a Spanned<Type>),
    NamedType(&'a Spanned<NamedType>),
    Name(&'a str),
    Names(&'a [Ident]),
    Operator(&'static str),
}

// --- declarations -------------------------------------------------------------

const CONST_DECLARATION: NodeKind = NodeKind::new("const_declaration", &[]);
const ENUM_DECLARATION: NodeKind = NodeKind::new("enum_declaration", &[]);
const TYPE_DECLARATION: NodeKind = NodeKind::new("type_declaration", &[]);
const ERROR_DECLARATION: NodeKind = NodeKind::new("error_declaration", &[]);
const VAR_DECLARATION: NodeKind = NodeKind::new("var_declaration", &[]);
const FUNCTIONS_SECTION: NodeKind = NodeKind::new("functions_section", &[]);
const FUNCTION_DECLARATION: NodeKind = NodeKind::new("function_declaration", &["name", "return_type"]);
const INTERFACE_DECLARATION: NodeKind = NodeKind::new("interface_declaration", &["name"]);
const CLASS_DECLARATION: NodeKind = NodeKind::new("class_declaration", &["name", "superclass"]);
const BEHAVIOR_DECLARATION: NodeKind = NodeKind::new("behavior_declaration", &["name", "for"]);

// --- clauses and declarators --------------------------------------------------

const RENAMING: NodeKind = NodeKind::new("renaming", &["from", "to"]);
const CONST_DECLARATOR: NodeKind = NodeKind::new("const_declarator", &["name", "value"]);
const ENUM_VALUE: NodeKind = NodeKind::new("enum_value", &["name", "value"]);
const TYPE_DECLARATOR: NodeKind = NodeKind::new("type_declarator", &["name", "type"]);
const VAR_DECLARATOR: NodeKind = NodeKind::new("var_declarator", &["name", "type", "value"]);
const PARAMETER: NodeKind = NodeKind::new("parameter", &["name", "type"]);
const KEYWORD_PARAMETER: NodeKind = NodeKind::new("keyword_parameter", &["keyword", "type"]);
const ELSE_IF_CLAUSE: NodeKind = NodeKind::new("else_if_clause", &["condition"]);
const CASE_CLAUSE: NodeKind = NodeKind::new("case_clause", &["value"]);
const CATCH_CLAUSE: NodeKind = NodeKind::new("catch_clause", &["name"]);
const FIELD_INITIALIZER: NodeKind = NodeKind::new("field_initializer", &["name", "value"]);
const ARRAY_INITIALIZER: NodeKind = NodeKind::new("array_initializer", &["count", "value"]);

// --- statements ---------------------------------------------------------------

const IF_STATEMENT: NodeKind = NodeKind::new("if_statement", &["condition"]);
const WHILE_STATEMENT: NodeKind = NodeKind::new("while_statement", &["condition"]);
const DO_UNTIL_STATEMENT: NodeKind = NodeKind::new("do_until_statement", &["condition"]);
const FOR_RANGE_STATEMENT: NodeKind = NodeKind::new("for_statement", &["iterator", "from", "to", "by"]);
const FOR_CLASSIC_STATEMENT: NodeKind = NodeKind::new("for_statement", &["condition"]);
const SWITCH_STATEMENT: NodeKind = NodeKind::new("switch_statement", &["value"]);
const TRY_STATEMENT: NodeKind = NodeKind::new("try_statement", &[]);
const RETURN_STATEMENT: NodeKind = NodeKind::new("return_statement", &["value"]);
const BREAK_STATEMENT: NodeKind = NodeKind::new("break_statement", &[]);
const CONTINUE_STATEMENT: NodeKind = NodeKind::new("continue_statement", &[]);
const THROW_STATEMENT: NodeKind = NodeKind::new("throw_statement", &["name"]);
const FREE_STATEMENT: NodeKind = NodeKind::new("free_statement", &["value"]);
const DEBUG_STATEMENT: NodeKind = NodeKind::new("debug_statement", &[]);
const ASSIGNMENT_STATEMENT: NodeKind = NodeKind::new("assignment_statement", &["left", "right"]);
const EXPRESSION_STATEMENT: NodeKind = NodeKind::new("expression_statement", &["value"]);

// --- expressions --------------------------------------------------------------

const LITERAL: NodeKind = NodeKind::new("literal", &[]);
const IDENTIFIER: NodeKind = NodeKind::new("identifier", &[]);
const SELF_EXPRESSION: NodeKind = NodeKind::new("self_expression", &[]);
const SUPER_EXPRESSION: NodeKind = NodeKind::new("super_expression", &[]);
const PARENTHESIZED_EXPRESSION: NodeKind = NodeKind::new("parenthesized_expression", &["value"]);
const BINARY_EXPRESSION: NodeKind = NodeKind::new("binary_expression", &["left", "operator", "right"]);
const UNARY_EXPRESSION: NodeKind = NodeKind::new("unary_expression", &["operator", "operand"]);
const CALL_EXPRESSION: NodeKind = NodeKind::new("call_expression", &["function"]);
const FIELD_ACCESS: NodeKind = NodeKind::new("field_access", &["object", "field"]);
const METHOD_CALL: NodeKind = NodeKind::new("method_call", &["object", "method"]);
const ARRAY_ACCESS: NodeKind = NodeKind::new("array_access", &["array", "index"]);
const AS_PTR_TO_EXPRESSION: NodeKind = NodeKind::new("as_ptr_to_expression", &["value", "type"]);
const AS_INTEGER_EXPRESSION: NodeKind = NodeKind::new("as_integer_expression", &["value"]);
const ARRAY_SIZE_EXPRESSION: NodeKind = NodeKind::new("array_size_expression", &["value"]);
const IS_INSTANCE_OF_EXPRESSION: NodeKind = NodeKind::new("is_instance_of_expression", &["value", "type"]);
const IS_KIND_OF_EXPRESSION: NodeKind = NodeKind::new("is_kind_of_expression", &["value", "type"]);
const SIZE_OF_EXPRESSION: NodeKind = NodeKind::new("size_of_expression", &["type"]);
const CONSTRUCTOR_EXPRESSION: NodeKind = NodeKind::new("constructor_expression", &["type"]);
const CLOSURE_EXPRESSION: NodeKind = NodeKind::new("closure_expression", &["return_type"]);

// --- types --------------------------------------------------------------------

const PRIMITIVE_TYPE: NodeKind = NodeKind::new("primitive_type", &[]);
const POINTER_TYPE: NodeKind = NodeKind::new("pointer_type", &["type"]);
const ARRAY_TYPE: NodeKind = NodeKind::new("array_type", &["type"]);
const RECORD_TYPE: NodeKind = NodeKind::new("record_type", &[]);
const FUNCTION_TYPE: NodeKind = NodeKind::new("function_type", &["return_type"]);
const NAMED_TYPE: NodeKind = NodeKind::new("named_type", &["name"]);

impl Declaration {
    pub fn kind(&self) -> NodeKind {
        match self {
            Declaration::Const(_) => CONST_DECLARATION,
            Declaration::Enum(_) => ENUM_DECLARATION,
            Declaration::Type(_) => TYPE_DECLARATION,
            Declaration::Errors(_) => ERROR_DECLARATION,
            Declaration::Var(_) => VAR_DECLARATION,
            Declaration::Functions(_) => FUNCTIONS_SECTION,
            Declaration::Function(_) => FUNCTION_DECLARATION,
            Declaration::Interface(_) => INTERFACE_DECLARATION,
            Declaration::Class(_) => CLASS_DECLARATION,
            Declaration::Behavior(_) => BEHAVIOR_DECLARATION,
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match (self, name) {
            (Declaration::Function(f), "name") => Some(FieldValue::Name(&f.name)),
            (Declaration::Function(f), "return_type") => f.return_type.as_ref().map(FieldValue::Type),
            (Declaration::Interface(i), "name") => Some(FieldValue::Name(&i.name)),
            (Declaration::Class(c), "name") => Some(FieldValue::Name(&c.name)),
            (Declaration::Class(c), "superclass") => c.superclass.as_ref().map(FieldValue::NamedType),
            (Declaration::Behavior(b), "name") => Some(FieldValue::Name(&b.name)),
            (Declaration::Behavior(b), "for") => b.for_type.as_ref().map(FieldValue::NamedType),
            _ => None,
        }
    }
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::If(_) => IF_STATEMENT,
            Statement::While(_) => WHILE_STATEMENT,
            Statement::DoUntil(_) => DO_UNTIL_STATEMENT,
            Statement::For(ForStmt::Range { .. }) => FOR_RANGE_STATEMENT,
            Statement::For(ForStmt::Classic { .. }) => FOR_CLASSIC_STATEMENT,
            Statement::Switch(_) => SWITCH_STATEMENT,
            Statement::Try(_) => TRY_STATEMENT,
            Statement::Return(_) => RETURN_STATEMENT,
            Statement::Break => BREAK_STATEMENT,
            Statement::Continue => CONTINUE_STATEMENT,
            Statement::Throw(_) => THROW_STATEMENT,
            Statement::Free(_) => FREE_STATEMENT,
            Statement::Debug => DEBUG_STATEMENT,
            Statement::Assignment(_) => ASSIGNMENT_STATEMENT,
            Statement::Expr(_) => EXPRESSION_STATEMENT,
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match (self, name) {
            (Statement::If(s), "condition") => &s.condition,
            (Statement::While(s), "condition") => &s.condition,
            (Statement::DoUntil(s), "condition") => &s.condition,
            (Statement::For(ForStmt::Range { iterator, .. }), "iterator") => iterator,
            (Statement::For(ForStmt::Range { from, .. }), "from") => from,
            (Statement::For(ForStmt::Range { to, .. }), "to") => to,
            (Statement::For(ForStmt::Range { by, .. }), "by") => by.as_ref()?,
            (Statement::For(ForStmt::Classic { condition, .. }), "condition") => condition.as_ref()?,
            (Statement::Switch(s), "value") => &s.value,
            (Statement::Return(value), "value") => value.as_ref()?,
            (Statement::Throw(t), "name") => return Some(FieldValue::Name(&t.name)),
            (Statement::Free(value), "value") | (Statement::Expr(value), "value") => value,
            (Statement::Assignment(a), "left") => &a.left,
            (Statement::Assignment(a), "right") => &a.right,
            _ => return None,
        };
        Some(FieldValue::Expr(value))
    }
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Literal(_) => LITERAL,
            Expr::Ident(_) => IDENTIFIER,
            Expr::SelfExpr => SELF_EXPRESSION,
            Expr::Super => SUPER_EXPRESSION,
            Expr::Paren(_) => PARENTHESIZED_EXPRESSION,
            Expr::Binary { .. } => BINARY_EXPRESSION,
            Expr::Unary { .. } => UNARY_EXPRESSION,
            Expr::Call { .. } => CALL_EXPRESSION,
            Expr::Field { .. } => FIELD_ACCESS,
            Expr::MethodCall { .. } => METHOD_CALL,
            Expr::Index { .. } => ARRAY_ACCESS,
            Expr::AsPtrTo { .. } => AS_PTR_TO_EXPRESSION,
            Expr::AsInteger(_) => AS_INTEGER_EXPRESSION,
            Expr::ArraySize(_) => ARRAY_SIZE_EXPRESSION,
            Expr::IsInstanceOf { .. } => IS_INSTANCE_OF_EXPRESSION,
            Expr::IsKindOf { .. } => IS_KIND_OF_EXPRESSION,
            Expr::SizeOf(_) => SIZE_OF_EXPRESSION,
            Expr::Constructor(_) => CONSTRUCTOR_EXPRESSION,
            Expr::Closure(_) => CLOSURE_EXPRESSION,
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match (self, name) {
            (Expr::Paren(e), "value") | (Expr::AsInteger(e), "value") | (Expr::ArraySize(e), "value") => {
                Some(FieldValue::Expr(e))
            }
            (Expr::Binary { left, .. }, "left") => Some(FieldValue::Expr(left)),
            (Expr::Binary { right, .. }, "right") => Some(FieldValue::Expr(right)),
            (Expr::Binary { operator, .. }, "operator") => {
                Some(FieldValue::Operator(operators::as_str(operator.operator_id())))
            }
            (Expr::Unary { operator, .. }, "operator") => {
                Some(FieldValue::Operator(operators::as_str(operator.operator_id())))
            }
            (Expr::Unary { operand, .. }, "operand") => Some(FieldValue::Expr(operand)),
            (Expr::Call { function, .. }, "function") => Some(FieldValue::Name(function)),
            (Expr::Field { object, .. }, "object") | (Expr::MethodCall { object, .. }, "object") => {
                Some(FieldValue::Expr(object))
            }
            (Expr::Field { field, .. }, "field") => Some(FieldValue::Name(field)),
            (Expr::MethodCall { method, .. }, "method") => Some(FieldValue::Name(method)),
            (Expr::Index { array, .. }, "array") => Some(FieldValue::Expr(array)),
            (Expr::Index { index, .. }, "index") => Some(FieldValue::Expr(index)),
            (Expr::AsPtrTo { expr, .. }, "value")
            | (Expr::IsInstanceOf { expr, .. }, "value")
            | (Expr::IsKindOf { expr, .. }, "value") => Some(FieldValue::Expr(expr)),
            (Expr::AsPtrTo { ty, .. }, "type")
            | (Expr::IsInstanceOf { ty, .. }, "type")
            | (Expr::IsKindOf { ty, .. }, "type")
            | (Expr::SizeOf(ty), "type") => Some(FieldValue::Type(ty)),
            (Expr::Constructor(c), "type") => Some(FieldValue::Type(&c.ty)),
            (Expr::Closure(c), "return_type") => c.return_type.as_deref().map(FieldValue::Type),
            _ => None,
        }
    }
}

impl Type {
    pub fn kind(&self) -> NodeKind {
        match self {
            Type::Primitive(_) => PRIMITIVE_TYPE,
            Type::Pointer { .. } => POINTER_TYPE,
            Type::Array { .. } => ARRAY_TYPE,
            Type::Record { .. } => RECORD_TYPE,
            Type::Function { .. } => FUNCTION_TYPE,
            Type::Named(_) => NAMED_TYPE,
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match (self, name) {
            (Type::Pointer { ty }, "type") | (Type::Array { ty, .. }, "type") => Some(FieldValue::Type(ty)),
            (Type::Function { return_type, .. }, "return_type") => return_type.as_deref().map(FieldValue::Type),
            (Type::Named(n), "name") => Some(FieldValue::Name(&n.name)),
            _ => None,
        }
    }
}

/// Field access for the nodes that hang off declarations, statements and constructors.
macro_rules! sub_node {
    ($ty:ty, $kind:expr, |$node:ident, $name:ident| $body:expr) => {
        impl $ty {
            pub fn kind(&self) -> NodeKind {
                $kind
            }

            pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
                let $node = self;
                let $name = name;
                $body
            }
        }
    };
}

sub_node!(Renaming, RENAMING, |r, name| match name {
    "from" => Some(FieldValue::Name(&r.from)),
    "to" => Some(FieldValue::Name(&r.to)),
    _ => None,
});

sub_node!(ConstDeclarator, CONST_DECLARATOR, |d, name| match name {
    "name" => Some(FieldValue::Name(&d.name)),
    "value" => Some(FieldValue::Expr(&d.value)),
    _ => None,
});

sub_node!(EnumValue, ENUM_VALUE, |v, name| match name {
    "name" => Some(FieldValue::Name(&v.name)),
    "value" => v.value.as_ref().map(FieldValue::Expr),
    _ => None,
});

sub_node!(TypeDeclarator, TYPE_DECLARATOR, |d, name| match name {
    "name" => Some(FieldValue::Name(&d.name)),
    "type" => Some(FieldValue::Type(&d.ty)),
    _ => None,
});

sub_node!(VarDeclarator, VAR_DECLARATOR, |d, name| match name {
    "name" => Some(FieldValue::Names(&d.names)),
    "type" => Some(FieldValue::Type(&d.ty)),
    "value" => d.value.as_ref().map(FieldValue::Expr),
    _ => None,
});

sub_node!(Parameter, PARAMETER, |p, name| match name {
    "name" => Some(FieldValue::Names(&p.names)),
    "type" => Some(FieldValue::Type(&p.ty)),
    _ => None,
});

sub_node!(KeywordParameter, KEYWORD_PARAMETER, |p, name| match name {
    "keyword" => Some(FieldValue::Name(&p.keyword)),
    "type" => Some(FieldValue::Type(&p.ty)),
    _ => None,
});

sub_node!(ElseIfClause, ELSE_IF_CLAUSE, |c, name| match name {
    "condition" => Some(FieldValue::Expr(&c.condition)),
    _ => None,
});

sub_node!(CaseClause, CASE_CLAUSE, |c, name| match name {
    "value" => Some(FieldValue::Expr(&c.value)),
    _ => None,
});

sub_node!(CatchClause, CATCH_CLAUSE, |c, name| match name {
    "name" => Some(FieldValue::Name(&c.name)),
    _ => None,
});

sub_node!(FieldInit, FIELD_INITIALIZER, |f, name| match name {
    "name" => Some(FieldValue::Name(&f.name)),
    "value" => Some(FieldValue::Expr(&f.value)),
    _ => None,
});

sub_node!(ArrayInit, ARRAY_INITIALIZER, |i, name| match name {
    "count" => i.count.as_ref().map(FieldValue::Expr),
    "value" => Some(FieldValue::Expr(&i.value)),
    _ => None,
});
