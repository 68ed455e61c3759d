//! Attlog: an algebra of attributes and relations
//!
//! Attlog models systems whose objects carry indeterminate attribute values:
//! each (attribute, object) pair is ascribed a list of candidate values, and
//! formulas over interpreted relation symbols are judged true when some
//! choice of one candidate per argument satisfies the relation's defining
//! expression.

pub mod assignment;
pub mod ast;
pub mod attribute;
pub mod error;
pub mod eval;
pub mod formula;
pub mod interpretation;
pub mod lexer;
pub mod parser;
pub mod relation;
pub mod state;
pub mod structure;
pub mod system;
pub mod value;
pub mod vocabulary;

pub use assignment::{ConstantAssignment, VariableAssignment};
pub use ast::{ArithOp, Body, CmpOp, Definition, Expr};
pub use attribute::Attribute;
pub use error::{Error, ErrorKind, Result};
pub use eval::{EvalError, EvalResult, ExprEvaluator, PredicateFn, RelationEvaluator};
pub use formula::{AssumptionBase, Formula};
pub use interpretation::{AttributeInterpretation, InterpretedSymbol};
pub use lexer::{lexer, Span, Token};
pub use parser::parse_definition;
pub use relation::Relation;
pub use state::NamedState;
pub use structure::{AttributeStructure, Element};
pub use system::AttributeSystem;
pub use value::{Value, ValueSet};
pub use vocabulary::{RelationSymbol, Vocabulary};
