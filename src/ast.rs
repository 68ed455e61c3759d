//! AST for relation definitions
//!
//! A definition is a head (`R1(h1, m1)`), the `<=>` connective, and a body.
//! Only the head is constrained; the body may be empty, an expression, or
//! arbitrary text kept verbatim. Truth assignment binds the parameters and
//! walks the expression when there is one.

use std::fmt;

/// A parsed relation definition
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    pub subscript: u32,
    pub params: Vec<String>,
    pub body: Body,
}

/// The right-hand side of a definition's `<=>`
///
/// Validation leaves it unconstrained. Text that parses as an expression is
/// kept as a tree for evaluation; anything else is kept exactly as written
/// and only rejected if evaluation ever reaches it.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Nothing after the connective
    Empty,
    /// Text that is not an expression
    Raw(String),
    /// An evaluable expression tree
    Parsed(Expr),
}

impl Body {
    /// The expression tree, when the body is one
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Body::Parsed(expr) => Some(expr),
            _ => None,
        }
    }
}

/// Comparison operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpOp::Lt => write!(f, "<"),
            CmpOp::Le => write!(f, "<="),
            CmpOp::Gt => write!(f, ">"),
            CmpOp::Ge => write!(f, ">="),
            CmpOp::Eq => write!(f, "="),
            CmpOp::Ne => write!(f, "!="),
        }
    }
}

/// Arithmetic operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
        }
    }
}

/// A body expression
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Int(i64),
    Real(f64),
    /// A definition parameter by name
    Param(String),
    /// A call to a registered predicate function
    Call(String, Vec<Expr>),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Cmp(CmpOp, Box<Expr>, Box<Expr>),
    Arith(ArithOp, Box<Expr>, Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Real(x) => write!(f, "{}", x),
            Expr::Param(name) => write!(f, "{}", name),
            Expr::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Not(inner) => write!(f, "not {}", inner),
            Expr::And(lhs, rhs) => write!(f, "({} and {})", lhs, rhs),
            Expr::Or(lhs, rhs) => write!(f, "({} or {})", lhs, rhs),
            Expr::Cmp(op, lhs, rhs) => write!(f, "{} {} {}", lhs, op, rhs),
            Expr::Arith(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}({}) <=> ", self.subscript, self.params.join(","))?;
        match &self.body {
            Body::Empty => Ok(()),
            Body::Raw(text) => write!(f, "{}", text),
            Body::Parsed(expr) => write!(f, "{}", expr),
        }
    }
}
