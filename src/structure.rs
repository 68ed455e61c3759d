//! Attribute structures: collections of attributes and relations under a
//! set-like algebra
//!
//! `+` and `-` are value operations: they return a new structure and leave
//! the receiver untouched. Comparison is subset order, so two structures may
//! be incomparable.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;

use crate::attribute::Attribute;
use crate::error::{Error, Result};
use crate::relation::Relation;
use crate::system::AttributeSystem;

// ==================================================
// Elements
// ==================================================

/// Operand of the structure and system algebras
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Attribute(Attribute),
    Relation(Relation),
    Structure(AttributeStructure),
    System(AttributeSystem),
    Objects(Vec<String>),
}

impl Element {
    /// An object-list operand, for extending a system
    pub fn objects(names: &[&str]) -> Self {
        Element::Objects(names.iter().map(|s| s.to_string()).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Attribute(_) => "attribute",
            Element::Relation(_) => "relation",
            Element::Structure(_) => "structure",
            Element::System(_) => "system",
            Element::Objects(_) => "objects",
        }
    }
}

impl From<Attribute> for Element {
    fn from(attribute: Attribute) -> Self {
        Element::Attribute(attribute)
    }
}

impl From<Relation> for Element {
    fn from(relation: Relation) -> Self {
        Element::Relation(relation)
    }
}

impl From<AttributeStructure> for Element {
    fn from(structure: AttributeStructure) -> Self {
        Element::Structure(structure)
    }
}

impl From<AttributeSystem> for Element {
    fn from(system: AttributeSystem) -> Self {
        Element::System(system)
    }
}

impl From<Vec<String>> for Element {
    fn from(names: Vec<String>) -> Self {
        Element::Objects(names)
    }
}

// ==================================================
// Attribute structures
// ==================================================

/// Attributes keyed by label plus relations keyed by subscript
///
/// Every relation's domain must name attributes of the structure, and the
/// algebra maintains that invariant through every `with`/`without`.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeStructure {
    attributes: IndexMap<String, Attribute>,
    relations: BTreeMap<u32, Relation>,
}

impl AttributeStructure {
    pub fn empty() -> Self {
        Self {
            attributes: IndexMap::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Build a structure from parts, folding them in with the same checks
    /// `with` applies one at a time
    pub fn new(attributes: Vec<Attribute>, relations: Vec<Relation>) -> Result<Self> {
        let mut structure = Self::empty();
        for attribute in attributes {
            structure = structure.with(attribute)?;
        }
        for relation in relations {
            structure = structure.with(relation)?;
        }
        Ok(structure)
    }

    /// Count of attributes plus relations
    pub fn cardinality(&self) -> usize {
        self.attributes.len() + self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.relations.is_empty()
    }

    pub fn attribute(&self, label: &str) -> Option<&Attribute> {
        self.attributes.get(label)
    }

    pub fn relation(&self, subscript: u32) -> Option<&Relation> {
        self.relations.get(&subscript)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Relations in subscript order
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// A copy of this structure extended by `element`
    ///
    /// Adding a structure merges it member-wise; members equal on both sides
    /// are kept once, members that share a key but differ are conflicts.
    pub fn with(&self, element: impl Into<Element>) -> Result<Self> {
        let mut next = self.clone();
        match element.into() {
            Element::Attribute(attribute) => next.insert_attribute(attribute)?,
            Element::Relation(relation) => next.insert_relation(relation)?,
            Element::Structure(other) => {
                // Attributes first so merged relation domains resolve
                // against the combined label set.
                for attribute in other.attributes.into_values() {
                    match next.attributes.get(attribute.label()) {
                        Some(present) if *present == attribute => {}
                        Some(_) => {
                            return Err(Error::ConflictingAttribute(attribute.label().to_string()))
                        }
                        None => next.insert_attribute(attribute)?,
                    }
                }
                for relation in other.relations.into_values() {
                    match next.relations.get(&relation.subscript()) {
                        Some(present) if *present == relation => {}
                        Some(_) => return Err(Error::ConflictingRelation(relation.subscript())),
                        None => next.insert_relation(relation)?,
                    }
                }
            }
            element => {
                return Err(Error::UnsupportedOperand {
                    operation: "+",
                    kind: element.kind(),
                })
            }
        }
        Ok(next)
    }

    /// A copy of this structure with `element` removed
    ///
    /// Removal demands an exactly-equal member; an attribute still named by
    /// some relation's domain cannot go.
    pub fn without(&self, element: impl Into<Element>) -> Result<Self> {
        let mut next = self.clone();
        match element.into() {
            Element::Attribute(attribute) => next.remove_attribute(&attribute)?,
            Element::Relation(relation) => next.remove_relation(&relation)?,
            Element::Structure(other) => {
                // Relations first so their domains stop pinning the
                // attributes removed right after.
                for relation in other.relations.values() {
                    next.remove_relation(relation)?;
                }
                for attribute in other.attributes.values() {
                    next.remove_attribute(attribute)?;
                }
            }
            element => {
                return Err(Error::UnsupportedOperand {
                    operation: "-",
                    kind: element.kind(),
                })
            }
        }
        Ok(next)
    }

    /// Whether every member of `self` is a member of `other`
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.attributes
            .values()
            .all(|attribute| other.attributes.get(attribute.label()) == Some(attribute))
            && self
                .relations
                .values()
                .all(|relation| other.relations.get(&relation.subscript()) == Some(relation))
    }

    fn insert_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if self.attributes.contains_key(attribute.label()) {
            return Err(Error::DuplicateAttribute(attribute.label().to_string()));
        }
        self.attributes.insert(attribute.label().to_string(), attribute);
        Ok(())
    }

    fn insert_relation(&mut self, relation: Relation) -> Result<()> {
        if self.relations.contains_key(&relation.subscript()) {
            return Err(Error::DuplicateRelation(relation.subscript()));
        }
        for label in relation.domain() {
            if !self.attributes.contains_key(label) {
                return Err(Error::DomainLabelMissing {
                    subscript: relation.subscript(),
                    label: label.clone(),
                });
            }
        }
        self.relations.insert(relation.subscript(), relation);
        Ok(())
    }

    fn remove_attribute(&mut self, attribute: &Attribute) -> Result<()> {
        match self.attributes.get(attribute.label()) {
            Some(present) if present == attribute => {}
            _ => return Err(Error::AttributeNotFound(attribute.label().to_string())),
        }
        for relation in self.relations.values() {
            if relation.domain().iter().any(|label| label == attribute.label()) {
                return Err(Error::AttributeInUse {
                    label: attribute.label().to_string(),
                    subscript: relation.subscript(),
                });
            }
        }
        self.attributes.shift_remove(attribute.label());
        Ok(())
    }

    fn remove_relation(&mut self, relation: &Relation) -> Result<()> {
        match self.relations.get(&relation.subscript()) {
            Some(present) if present == relation => {}
            _ => return Err(Error::RelationNotFound(relation.subscript())),
        }
        self.relations.remove(&relation.subscript());
        Ok(())
    }
}

impl PartialOrd for AttributeStructure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_subset_of(other), other.is_subset_of(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl fmt::Display for AttributeStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes = self
            .attributes
            .values()
            .map(Attribute::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let relations = self
            .relations
            .keys()
            .map(|subscript| format!("R{subscript}"))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "({attributes} ; {relations})")
    }
}

// Unit tests moved to tests/unit_algebra.rs
