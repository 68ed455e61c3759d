//! Evaluation of relation definition bodies
//!
//! The combinatorial search in formula truth assignment never touches
//! expression trees directly; it hands a candidate tuple to a
//! [`RelationEvaluator`] and gets back a verdict. [`ExprEvaluator`] is the
//! default implementation, walking the parsed body with the definition's
//! parameters bound in domain order.

use std::cmp::Ordering;
use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{ArithOp, Body, CmpOp, Expr};
use crate::relation::Relation;
use crate::value::Value;

/// Result alias for evaluation
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Every way a definition body can fail to evaluate
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Relation R{0} has no body to evaluate")]
    MissingBody(u32),
    #[error("Relation R{subscript} has a body that is not an expression: '{body}'")]
    MalformedBody { subscript: u32, body: String },
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Function '{name}' expects {expected} arguments, got {got}")]
    FunctionArity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("Cannot compare {lhs} with {rhs}")]
    Incomparable { lhs: Value, rhs: Value },
    #[error("Expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: String,
    },
    #[error("Arithmetic overflow in relation body")]
    Overflow,
    #[error("Relation R{subscript} binds {expected} values, got {got}")]
    BindingCount {
        subscript: u32,
        expected: usize,
        got: usize,
    },
}

/// A named predicate callable from definition bodies
///
/// Arguments arrive fully evaluated; the predicate decides satisfaction.
pub type PredicateFn = fn(&[Value]) -> EvalResult<bool>;

/// Decide whether `values`, bound to the relation's parameters in domain
/// order, satisfy the relation
pub trait RelationEvaluator {
    fn evaluate(&self, relation: &Relation, values: &[Value]) -> EvalResult<bool>;
}

/// Default evaluator: walks the parsed definition body
///
/// Named predicate functions may be registered to serve `Call` expressions;
/// an unregistered name is an evaluation error, never silently false.
#[derive(Clone, Debug, Default)]
pub struct ExprEvaluator {
    functions: HashMap<String, (usize, PredicateFn)>,
}

impl ExprEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate under `name` with a fixed argument count
    pub fn register(&mut self, name: impl Into<String>, arity: usize, function: PredicateFn) {
        self.functions.insert(name.into(), (arity, function));
    }
}

impl RelationEvaluator for ExprEvaluator {
    fn evaluate(&self, relation: &Relation, values: &[Value]) -> EvalResult<bool> {
        let params = relation.params();
        if params.len() != values.len() {
            return Err(EvalError::BindingCount {
                subscript: relation.subscript(),
                expected: params.len(),
                got: values.len(),
            });
        }
        let body = match relation.body() {
            Body::Parsed(expr) => expr,
            Body::Empty => return Err(EvalError::MissingBody(relation.subscript())),
            Body::Raw(text) => {
                return Err(EvalError::MalformedBody {
                    subscript: relation.subscript(),
                    body: text.clone(),
                })
            }
        };

        let scope = Scope {
            params,
            values,
            functions: &self.functions,
        };
        match scope.eval(body)? {
            Evaluated::Bool(b) => Ok(b),
            Evaluated::Val(v) => Err(EvalError::TypeMismatch {
                expected: "a boolean body",
                got: v.to_string(),
            }),
        }
    }
}

// ============================================================================
// Tree walking
// ============================================================================

/// A subexpression result: either a truth value or a plain value
enum Evaluated {
    Bool(bool),
    Val(Value),
}

struct Scope<'a> {
    params: &'a [String],
    values: &'a [Value],
    functions: &'a HashMap<String, (usize, PredicateFn)>,
}

impl Scope<'_> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .position(|p| p == name)
            .map(|i| &self.values[i])
    }

    fn eval(&self, expr: &Expr) -> EvalResult<Evaluated> {
        match expr {
            Expr::Int(n) => Ok(Evaluated::Val(Value::Int(*n))),
            Expr::Real(x) => Ok(Evaluated::Val(Value::Real(*x))),
            Expr::Param(name) => match self.lookup(name) {
                Some(value) => Ok(Evaluated::Val(value.clone())),
                None => Err(EvalError::UnknownParameter(name.clone())),
            },
            Expr::Call(name, args) => {
                let (arity, function) = self
                    .functions
                    .get(name)
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                if args.len() != *arity {
                    return Err(EvalError::FunctionArity {
                        name: name.clone(),
                        expected: *arity,
                        got: args.len(),
                    });
                }
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(self.eval_value(arg)?);
                }
                function(&evaluated).map(Evaluated::Bool)
            }
            Expr::Not(inner) => Ok(Evaluated::Bool(!self.eval_bool(inner)?)),
            // `and`/`or` short-circuit; the right operand is not evaluated
            // when the left already decides
            Expr::And(lhs, rhs) => {
                if !self.eval_bool(lhs)? {
                    return Ok(Evaluated::Bool(false));
                }
                Ok(Evaluated::Bool(self.eval_bool(rhs)?))
            }
            Expr::Or(lhs, rhs) => {
                if self.eval_bool(lhs)? {
                    return Ok(Evaluated::Bool(true));
                }
                Ok(Evaluated::Bool(self.eval_bool(rhs)?))
            }
            Expr::Cmp(op, lhs, rhs) => {
                let lhs = self.eval_value(lhs)?;
                let rhs = self.eval_value(rhs)?;
                compare(*op, &lhs, &rhs).map(Evaluated::Bool)
            }
            Expr::Arith(op, lhs, rhs) => {
                let lhs = self.eval_value(lhs)?;
                let rhs = self.eval_value(rhs)?;
                arithmetic(*op, &lhs, &rhs).map(Evaluated::Val)
            }
        }
    }

    fn eval_bool(&self, expr: &Expr) -> EvalResult<bool> {
        match self.eval(expr)? {
            Evaluated::Bool(b) => Ok(b),
            Evaluated::Val(v) => Err(EvalError::TypeMismatch {
                expected: "a boolean operand",
                got: v.to_string(),
            }),
        }
    }

    fn eval_value(&self, expr: &Expr) -> EvalResult<Value> {
        match self.eval(expr)? {
            Evaluated::Val(v) => Ok(v),
            Evaluated::Bool(b) => Err(EvalError::TypeMismatch {
                expected: "a value operand",
                got: b.to_string(),
            }),
        }
    }
}

fn compare(op: CmpOp, lhs: &Value, rhs: &Value) -> EvalResult<bool> {
    match op {
        // Equality across incompatible kinds is falsity, not an error
        CmpOp::Eq => Ok(lhs == rhs),
        CmpOp::Ne => Ok(lhs != rhs),
        CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge => {
            let ordering = lhs.partial_cmp(rhs).ok_or_else(|| EvalError::Incomparable {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            })?;
            Ok(match op {
                CmpOp::Lt => ordering == Ordering::Less,
                CmpOp::Le => ordering != Ordering::Greater,
                CmpOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less, // CmpOp::Ge
            })
        }
    }
}

fn arithmetic(op: ArithOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match op {
                ArithOp::Add => a.checked_add(*b),
                ArithOp::Sub => a.checked_sub(*b),
            };
            result.map(Value::Int).ok_or(EvalError::Overflow)
        }
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Real(match op {
                ArithOp::Add => a + b,
                ArithOp::Sub => a - b,
            })),
            _ => Err(EvalError::TypeMismatch {
                expected: "numeric operands",
                got: format!("{} {} {}", lhs.kind(), op, rhs.kind()),
            }),
        },
    }
}

// Unit tests moved to tests/unit_formula.rs
