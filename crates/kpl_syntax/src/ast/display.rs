//! Compact text forms of AST nodes.
//!
//! Expressions print as S-expressions (`1 + 2 * 3` is `(+ 1 (* 2 3))`), which makes grouping visible at a glance in
//! tests and debug output. Types print the way they are written in source.

use std::fmt;

use kpl_core::lang::keywords;

use super::{ArrayDimension, ConstructorKind, Expr, Initializer, Literal, PrimitiveType, Spanned, Type};

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Hex(n) => write!(f, "0x{n:X}"),
            Literal::Double(d) => write!(f, "{d:?}"),
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(keywords::as_str(self.keyword()))
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Spanned<Expr>]) -> fmt::Result {
    for a in args {
        write!(f, " {a}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => lit.fmt(f),
            Expr::Ident(name) => f.write_str(name),
            Expr::SelfExpr => f.write_str("self"),
            Expr::Super => f.write_str("super"),
            Expr::Paren(inner) => write!(f, "(paren {inner})"),
            Expr::Binary { left, operator, right } => write!(f, "({operator} {left} {right})"),
            Expr::Unary { operator, operand } => write!(f, "({operator} {operand})"),
            Expr::Call { function, args } => {
                write!(f, "(call {function}")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Expr::Field { object, field } => write!(f, "(field {object} {field})"),
            Expr::MethodCall { object, method, args } => {
                write!(f, "(method {object} {method}")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            Expr::Index { array, index } => write!(f, "(index {array} {index})"),
            Expr::AsPtrTo { expr, ty } => write!(f, "(asPtrTo {expr} {ty})"),
            Expr::AsInteger(expr) => write!(f, "(asInteger {expr})"),
            Expr::ArraySize(expr) => write!(f, "(arraySize {expr})"),
            Expr::IsInstanceOf { expr, ty } => write!(f, "(isInstanceOf {expr} {ty})"),
            Expr::IsKindOf { expr, ty } => write!(f, "(isKindOf {expr} {ty})"),
            Expr::SizeOf(ty) => write!(f, "(sizeOf {ty})"),
            Expr::Constructor(c) => {
                let word = match c.kind {
                    ConstructorKind::New => "new",
                    ConstructorKind::Alloc => "alloc",
                };
                write!(f, "({word} {}", c.ty)?;
                match &c.init {
                    Some(Initializer::Fields(fields)) => {
                        f.write_str(" (fields")?;
                        for field in fields {
                            write!(f, " ({} {})", field.name, field.value)?;
                        }
                        f.write_str(")")?;
                    }
                    Some(Initializer::Array(items)) => {
                        f.write_str(" (array")?;
                        for item in items {
                            match &item.count {
                                Some(count) => write!(f, " (of {count} {})", item.value)?,
                                None => write!(f, " {}", item.value)?,
                            }
                        }
                        f.write_str(")")?;
                    }
                    None => {}
                }
                f.write_str(")")
            }
            Expr::Closure(c) => {
                f.write_str("(closure (")?;
                let names: Vec<&str> = c.params.iter().flat_map(|p| p.names.iter().map(String::as_str)).collect();
                f.write_str(&names.join(" "))?;
                write!(f, ") {})", c.body.statements.len())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => p.fmt(f),
            Type::Pointer { ty } => write!(f, "ptr to {ty}"),
            Type::Array { dimensions, ty } => {
                f.write_str("array ")?;
                if !dimensions.is_empty() {
                    f.write_str("[")?;
                    for (i, d) in dimensions.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        match d {
                            ArrayDimension::Dynamic => f.write_str("*")?,
                            ArrayDimension::Sized(e) => write!(f, "{e}")?,
                        }
                    }
                    f.write_str("] ")?;
                }
                write!(f, "of {ty}")
            }
            Type::Record { fields } => {
                f.write_str("record")?;
                for field in fields {
                    write!(f, " {}: {}", field.names.join(", "), field.ty)?;
                }
                f.write_str(" endRecord")
            }
            Type::Function { params, return_type } => {
                f.write_str("function (")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str(")")?;
                if let Some(ret) = return_type {
                    write!(f, " returns {ret}")?;
                }
                Ok(())
            }
            Type::Named(named) => {
                f.write_str(&named.name)?;
                if !named.args.is_empty() {
                    f.write_str("[")?;
                    for (i, a) in named.args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{a}")?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
        }
    }
}
