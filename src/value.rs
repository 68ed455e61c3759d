//! Attribute values and value sets
//!
//! The algebra only asks values for equality, ordering, membership, and
//! rendering; everything else about a value's meaning lives in relation
//! definitions.

use std::cmp::Ordering;
use std::fmt;

/// A single attribute value
///
/// `Int` and `Real` compare numerically with each other; `Str` compares only
/// with `Str`. Ordering between a number and a string is undefined.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Real(f64),
    Str(String),
}

impl Value {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Real(x) => Some(*x),
            Value::Str(_) => None,
        }
    }

    /// Short kind name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Str(_) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Str(_), _) | (_, Value::Str(_)) => false,
            // Both numeric from here on
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Str(_), _) | (_, Value::Str(_)) => None,
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Real(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// The permissible values of an attribute
///
/// A finite collection of discrete values plus inclusive integer ranges.
/// The empty set is legal: such an attribute admits no value and exists only
/// to be named by relation domains (basis extraction still sees it).
#[derive(Clone, Debug, Default)]
pub struct ValueSet {
    values: Vec<Value>,
    ranges: Vec<(i64, i64)>,
}

impl ValueSet {
    /// The empty value set
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set of discrete values, deduplicated
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut set = Self::empty();
        for value in values {
            if !set.values.contains(&value) {
                set.values.push(value);
            }
        }
        set
    }

    /// A set of integer values
    pub fn ints(values: impl IntoIterator<Item = i64>) -> Self {
        Self::from_values(values.into_iter().map(Value::Int))
    }

    /// A set of string values
    pub fn strs<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_values(values.into_iter().map(Value::from))
    }

    /// A single inclusive integer range; bounds are normalized so argument
    /// order does not matter
    pub fn range(lo: i64, hi: i64) -> Self {
        Self::empty().with_range(lo, hi)
    }

    /// Add an inclusive integer range to the set
    pub fn with_range(mut self, lo: i64, hi: i64) -> Self {
        let bounds = (lo.min(hi), lo.max(hi));
        if !self.ranges.contains(&bounds) {
            self.ranges.push(bounds);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.ranges.is_empty()
    }

    /// Membership test; numeric values test the ranges as well
    pub fn contains(&self, value: &Value) -> bool {
        if self.values.iter().any(|member| member == value) {
            return true;
        }
        match value.as_f64() {
            Some(x) => self
                .ranges
                .iter()
                .any(|&(lo, hi)| lo as f64 <= x && x <= hi as f64),
            None => false,
        }
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

// Set equality: same members regardless of order. Ranges compare
// structurally, not by the integers they cover.
impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.ranges.len() == other.ranges.len()
            && self.values.iter().all(|v| other.values.contains(v))
            && self.ranges.iter().all(|r| other.ranges.contains(r))
    }
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for value in &self.values {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
            first = false;
        }
        for (lo, hi) in &self.ranges {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}..={}", lo, hi)?;
            first = false;
        }
        write!(f, "}}")
    }
}

// Unit tests moved to tests/unit_algebra.rs
