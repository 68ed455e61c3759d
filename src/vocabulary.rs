//! Vocabularies: constants, relation symbols and variables for formulas

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};

/// A relation symbol with a fixed positive arity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationSymbol {
    name: String,
    arity: usize,
}

impl RelationSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Result<Self> {
        let name = name.into();
        if arity == 0 {
            return Err(Error::ZeroAritySymbol(name));
        }
        Ok(Self { name, arity })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for RelationSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The term and symbol inventory a formula may draw from
///
/// Constants and variables must be disjoint. Exact duplicates collapse
/// silently; two symbols sharing a name at different arities are rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    constants: IndexSet<String>,
    symbols: IndexMap<String, RelationSymbol>,
    variables: IndexSet<String>,
}

impl Vocabulary {
    pub fn new(
        constants: &[&str],
        symbols: Vec<RelationSymbol>,
        variables: &[&str],
    ) -> Result<Self> {
        let constants: IndexSet<String> = constants.iter().map(|s| s.to_string()).collect();
        let mut table: IndexMap<String, RelationSymbol> = IndexMap::new();
        for symbol in symbols {
            match table.get(symbol.name()) {
                Some(present) if *present == symbol => {}
                Some(_) => return Err(Error::DuplicateSymbol(symbol.name().to_string())),
                None => {
                    table.insert(symbol.name().to_string(), symbol);
                }
            }
        }
        let variables: IndexSet<String> = variables.iter().map(|s| s.to_string()).collect();
        for variable in &variables {
            if constants.contains(variable) {
                return Err(Error::ConstantVariableClash(variable.clone()));
            }
        }
        Ok(Self {
            constants,
            symbols: table,
            variables,
        })
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }

    pub fn is_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    pub fn symbol(&self, name: &str) -> Option<&RelationSymbol> {
        self.symbols.get(name)
    }

    pub fn constants(&self) -> impl Iterator<Item = &str> {
        self.constants.iter().map(String::as_str)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &RelationSymbol> {
        self.symbols.values()
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constants = self.constants.iter().cloned().collect::<Vec<_>>().join(", ");
        let symbols = self
            .symbols
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let variables = self.variables.iter().cloned().collect::<Vec<_>>().join(", ");
        write!(f, "([{constants}], [{symbols}], [{variables}])")
    }
}

// Unit tests moved to tests/unit_vocabulary.rs
