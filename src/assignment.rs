//! Assignments: partial injective maps from terms to objects
//!
//! A constant assignment binds constants of a vocabulary to objects of a
//! system; a variable assignment does the same for variables. Both are
//! partial (unbound terms are fine) and injective (no two terms share an
//! object).

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::system::AttributeSystem;
use crate::vocabulary::Vocabulary;

/// A partial injective map from declared constants to objects
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantAssignment {
    vocabulary: Vocabulary,
    system: AttributeSystem,
    mapping: IndexMap<String, String>,
}

impl ConstantAssignment {
    pub fn new(
        vocabulary: &Vocabulary,
        system: &AttributeSystem,
        mapping: &[(&str, &str)],
    ) -> Result<Self> {
        let mapping = build_mapping(mapping, system, |term| {
            if vocabulary.is_constant(term) {
                Ok(())
            } else {
                Err(Error::UndeclaredConstant(term.to_string()))
            }
        })?;
        Ok(Self {
            vocabulary: vocabulary.clone(),
            system: system.clone(),
            mapping,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn system(&self) -> &AttributeSystem {
        &self.system
    }

    /// The object bound to `term`, if any
    pub fn get(&self, term: &str) -> Option<&str> {
        self.mapping.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(t, o)| (t.as_str(), o.as_str()))
    }
}

impl fmt::Display for ConstantAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CA{}", render_mapping(&self.mapping))
    }
}

/// A partial injective map from declared variables to objects
#[derive(Clone, Debug, PartialEq)]
pub struct VariableAssignment {
    vocabulary: Vocabulary,
    system: AttributeSystem,
    mapping: IndexMap<String, String>,
}

impl VariableAssignment {
    pub fn new(
        vocabulary: &Vocabulary,
        system: &AttributeSystem,
        mapping: &[(&str, &str)],
    ) -> Result<Self> {
        let mapping = build_mapping(mapping, system, |term| {
            if vocabulary.is_variable(term) {
                Ok(())
            } else {
                Err(Error::UndeclaredVariable(term.to_string()))
            }
        })?;
        Ok(Self {
            vocabulary: vocabulary.clone(),
            system: system.clone(),
            mapping,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn system(&self) -> &AttributeSystem {
        &self.system
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.mapping.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(t, o)| (t.as_str(), o.as_str()))
    }
}

impl fmt::Display for VariableAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA{}", render_mapping(&self.mapping))
    }
}

fn build_mapping(
    mapping: &[(&str, &str)],
    system: &AttributeSystem,
    declared: impl Fn(&str) -> Result<()>,
) -> Result<IndexMap<String, String>> {
    let mut table: IndexMap<String, String> = IndexMap::new();
    for (term, object) in mapping {
        declared(term)?;
        if !system.contains_object(object) {
            return Err(Error::ObjectNotFound(object.to_string()));
        }
        if table.contains_key(*term) {
            return Err(Error::DuplicateBinding(term.to_string()));
        }
        if table.values().any(|bound| bound == object) {
            return Err(Error::ConflictingTarget {
                term: term.to_string(),
                object: object.to_string(),
            });
        }
        table.insert(term.to_string(), object.to_string());
    }
    Ok(table)
}

fn render_mapping(mapping: &IndexMap<String, String>) -> String {
    let entries = mapping
        .iter()
        .map(|(term, object)| format!("{term}: {object}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{entries}}}")
}

// Unit tests moved to tests/unit_vocabulary.rs
