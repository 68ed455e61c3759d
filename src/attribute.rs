//! Attributes: named dimensions with a permissible value set

use std::fmt;

use crate::value::{Value, ValueSet};

/// A named dimension an object can be measured along
///
/// Two attributes are equal when both label and value set agree; the label
/// alone is the identity key inside a structure.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    label: String,
    value_set: ValueSet,
}

impl Attribute {
    pub fn new(label: impl Into<String>, value_set: ValueSet) -> Self {
        Self {
            label: label.into(),
            value_set,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value_set(&self) -> &ValueSet {
        &self.value_set
    }

    /// Whether `value` is permissible for this attribute
    pub fn admits(&self, value: &Value) -> bool {
        self.value_set.contains(value)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value_set)
    }
}

// Unit tests moved to tests/unit_algebra.rs
