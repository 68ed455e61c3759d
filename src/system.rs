//! Attribute systems: a structure applied to a finite universe of objects

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::structure::{AttributeStructure, Element};
use crate::value::Value;

/// An attribute structure together with named objects
///
/// Objects are held sorted and unique, so equality and subset tests are
/// insensitive to the order objects were supplied in.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSystem {
    structure: AttributeStructure,
    objects: Vec<String>,
}

impl AttributeSystem {
    pub fn new(structure: AttributeStructure, objects: &[&str]) -> Result<Self> {
        let mut sorted: Vec<String> = objects.iter().map(|s| s.to_string()).collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(Error::DuplicateObject(pair[0].clone()));
            }
        }
        Ok(Self {
            structure,
            objects: sorted,
        })
    }

    pub fn structure(&self) -> &AttributeStructure {
        &self.structure
    }

    /// Object names in sorted order
    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.binary_search_by(|o| o.as_str().cmp(name)).is_ok()
    }

    /// Object count times structure cardinality
    pub fn power(&self) -> usize {
        self.objects.len() * self.structure.cardinality()
    }

    /// Whether some object's own name is admitted by an attribute of the
    /// structure
    pub fn is_automorphic(&self) -> bool {
        self.objects.iter().any(|object| {
            self.structure
                .attributes()
                .any(|attribute| attribute.admits(&Value::from(object.as_str())))
        })
    }

    /// A copy of this system extended by `element`
    ///
    /// Attributes, relations and structures extend the inner structure;
    /// object lists extend the universe. Adding a whole system requires the
    /// two universes to be disjoint.
    pub fn with(&self, element: impl Into<Element>) -> Result<Self> {
        let mut next = self.clone();
        match element.into() {
            Element::Objects(names) => {
                for name in &names {
                    next.insert_object(name)?;
                }
            }
            Element::System(other) => {
                let shared: Vec<String> = other
                    .objects
                    .iter()
                    .filter(|name| next.contains_object(name))
                    .cloned()
                    .collect();
                if !shared.is_empty() {
                    return Err(Error::ObjectOverlap(shared));
                }
                next.structure = next.structure.with(other.structure)?;
                for name in &other.objects {
                    next.insert_object(name)?;
                }
            }
            element => next.structure = next.structure.with(element)?,
        }
        Ok(next)
    }

    /// A copy of this system with `element` removed
    pub fn without(&self, element: impl Into<Element>) -> Result<Self> {
        let mut next = self.clone();
        match element.into() {
            Element::Objects(names) => {
                for name in &names {
                    next.remove_object(name)?;
                }
            }
            Element::System(other) => {
                next.structure = next.structure.without(other.structure)?;
                for name in &other.objects {
                    next.remove_object(name)?;
                }
            }
            element => next.structure = next.structure.without(element)?,
        }
        Ok(next)
    }

    /// Whether `self`'s structure and objects are both contained in `other`
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.structure.is_subset_of(&other.structure)
            && self.objects.iter().all(|name| other.contains_object(name))
    }

    fn insert_object(&mut self, name: &str) -> Result<()> {
        match self.objects.binary_search_by(|o| o.as_str().cmp(name)) {
            Ok(_) => Err(Error::DuplicateObject(name.to_string())),
            Err(position) => {
                self.objects.insert(position, name.to_string());
                Ok(())
            }
        }
    }

    fn remove_object(&mut self, name: &str) -> Result<()> {
        match self.objects.binary_search_by(|o| o.as_str().cmp(name)) {
            Ok(position) => {
                self.objects.remove(position);
                Ok(())
            }
            Err(_) => Err(Error::ObjectNotFound(name.to_string())),
        }
    }
}

impl PartialOrd for AttributeSystem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_subset_of(other), other.is_subset_of(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl fmt::Display for AttributeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({{{}}} ; {})", self.objects.join(", "), self.structure)
    }
}

// Unit tests moved to tests/unit_algebra.rs
