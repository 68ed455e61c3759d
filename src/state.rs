//! Named states: candidate-value ascriptions over a system's objects
//!
//! A state pins down, per `(attribute, object)` pair, the list of values
//! that pair might hold. A pair with no ascription is unconstrained, which
//! is not the same as a pair ascribed the empty list: the former says
//! "unknown", the latter says "nothing is possible".

use std::fmt;

use indexmap::IndexMap;

use crate::assignment::ConstantAssignment;
use crate::error::{Error, Result};
use crate::system::AttributeSystem;
use crate::value::Value;

/// An attribute system, a constant assignment over it, and mutable
/// ascriptions
#[derive(Clone, Debug, PartialEq)]
pub struct NamedState {
    system: AttributeSystem,
    constants: ConstantAssignment,
    ascriptions: IndexMap<(String, String), Vec<Value>>,
}

impl NamedState {
    /// Build an empty state; `constants` must have been built against
    /// `system`
    pub fn new(system: &AttributeSystem, constants: &ConstantAssignment) -> Result<Self> {
        if constants.system() != system {
            return Err(Error::SystemMismatch);
        }
        Ok(Self {
            system: system.clone(),
            constants: constants.clone(),
            ascriptions: IndexMap::new(),
        })
    }

    pub fn system(&self) -> &AttributeSystem {
        &self.system
    }

    pub fn constants(&self) -> &ConstantAssignment {
        &self.constants
    }

    /// Set the candidate values of `(label, object)`, replacing any
    /// previous ascription
    ///
    /// Every value must be admitted by the attribute's value set. The empty
    /// list is legal and marks the pair as impossible rather than unknown.
    pub fn set_ascription(
        &mut self,
        label: &str,
        object: &str,
        values: Vec<Value>,
    ) -> Result<()> {
        let attribute = match self.system.structure().attribute(label) {
            Some(attribute) => attribute,
            None => return Err(Error::AttributeNotFound(label.to_string())),
        };
        if !self.system.contains_object(object) {
            return Err(Error::ObjectNotFound(object.to_string()));
        }
        for value in &values {
            if !attribute.admits(value) {
                return Err(Error::ValueNotAdmitted {
                    label: label.to_string(),
                    value: value.clone(),
                });
            }
        }
        log::trace!("Ascribe {label}({object}): {} candidate(s)", values.len());
        self.ascriptions
            .insert((label.to_string(), object.to_string()), values);
        Ok(())
    }

    /// The ascription of `(label, object)`, or `None` if the pair was never
    /// ascribed
    pub fn ascription(&self, label: &str, object: &str) -> Option<&[Value]> {
        self.ascriptions
            .get(&(label.to_string(), object.to_string()))
            .map(Vec::as_slice)
    }

    /// Like [`NamedState::ascription`], collapsing "never ascribed" into the
    /// empty list
    pub fn ascription_or_empty(&self, label: &str, object: &str) -> &[Value] {
        self.ascription(label, object).unwrap_or(&[])
    }

    pub fn ascriptions(&self) -> impl Iterator<Item = (&str, &str, &[Value])> {
        self.ascriptions
            .iter()
            .map(|((label, object), values)| (label.as_str(), object.as_str(), values.as_slice()))
    }
}

impl fmt::Display for NamedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.system)?;
        for ((label, object), values) in &self.ascriptions {
            let rendered = values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "\n{label}({object}): [{rendered}]")?;
        }
        Ok(())
    }
}

// Unit tests moved to tests/unit_state.rs
