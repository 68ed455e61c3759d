//! Relations: arity-fixed predicates over a domain of attribute labels
//!
//! A relation owns its textual definition and the parse of it. The body is
//! opaque payload here; the algebra only cares that the head is well formed
//! and agrees with the declared domain and subscript.

use std::fmt;

use crate::ast::{Body, Definition};
use crate::error::{Error, Result};
use crate::parser::parse_definition;

/// A named logical predicate over attribute labels
///
/// The domain may repeat a label: a 4-ary ordering over two clocks reads
/// `(hour, minute, hour, minute)`.
#[derive(Clone, Debug)]
pub struct Relation {
    definition: String,
    parsed: Definition,
    domain: Vec<String>,
    subscript: u32,
}

impl Relation {
    /// Build a relation, validating the definition text against the domain
    /// and subscript
    pub fn new(definition: &str, domain: &[&str], subscript: u32) -> Result<Self> {
        let parsed = validate(definition, domain.len(), subscript)?;
        Ok(Self {
            definition: definition.to_string(),
            parsed,
            domain: domain.iter().map(|s| s.to_string()).collect(),
            subscript,
        })
    }

    /// Whether `definition` matches the grammar with pairwise distinct
    /// argument names
    ///
    /// The verdict is decided on the whitespace-stripped text and never
    /// reads past the `<=>` connective. Arity and subscript agreement
    /// against a domain are checked by [`Relation::new`].
    pub fn is_valid_definition(definition: &str) -> bool {
        match parse_definition(definition) {
            Ok(parsed) => duplicate_argument(&parsed.params).is_none(),
            Err(_) => false,
        }
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn subscript(&self) -> u32 {
        self.subscript
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    /// Parameter names from the definition head, in order
    pub fn params(&self) -> &[String] {
        &self.parsed.params
    }

    /// The definition body: empty, an expression tree, or verbatim text
    pub fn body(&self) -> &Body {
        &self.parsed.body
    }

    /// The domain rendered as `a X b X c`
    pub fn domain_str(&self) -> String {
        self.domain.join(" X ")
    }

    /// Replace the definition text, re-validating every invariant against
    /// the current domain and subscript
    pub fn set_definition(&mut self, definition: &str) -> Result<()> {
        let parsed = validate(definition, self.domain.len(), self.subscript)?;
        self.definition = definition.to_string();
        self.parsed = parsed;
        Ok(())
    }

    /// Replace the domain, re-validating its length against the current
    /// definition
    pub fn set_domain(&mut self, domain: &[&str]) -> Result<()> {
        if domain.len() != self.parsed.params.len() {
            return Err(Error::DefinitionArity {
                definition: self.definition.clone(),
                parameters: self.parsed.params.len(),
                domain: domain.len(),
            });
        }
        self.domain = domain.iter().map(|s| s.to_string()).collect();
        Ok(())
    }
}

// Identity is the definition text plus domain plus subscript; the parse is
// derived and not compared.
impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.definition == other.definition
            && self.domain == other.domain
            && self.subscript == other.subscript
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{} is a subset of {}, defined as follows: {}",
            self.subscript,
            self.domain_str(),
            self.definition
        )
    }
}

fn duplicate_argument(params: &[String]) -> Option<&String> {
    params
        .iter()
        .enumerate()
        .find(|(i, p)| params[..*i].contains(p))
        .map(|(_, p)| p)
}

fn validate(definition: &str, domain_len: usize, subscript: u32) -> Result<Definition> {
    let parsed = parse_definition(definition)?;
    if let Some(argument) = duplicate_argument(&parsed.params) {
        return Err(Error::DuplicateArgument {
            definition: definition.to_string(),
            argument: argument.clone(),
        });
    }
    if parsed.subscript != subscript {
        return Err(Error::SubscriptMismatch {
            definition: definition.to_string(),
            declared: subscript,
        });
    }
    if parsed.params.len() != domain_len {
        return Err(Error::DefinitionArity {
            definition: definition.to_string(),
            parameters: parsed.params.len(),
            domain: domain_len,
        });
    }
    Ok(parsed)
}

// Unit tests moved to tests/unit_definitions.rs
