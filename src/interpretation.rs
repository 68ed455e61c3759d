//! Attribute interpretations: wiring relation symbols to defined relations
//!
//! An interpretation fixes, for every symbol of a vocabulary, which relation
//! realizes it and how the symbol's argument positions line up with the
//! relation's domain positions. The lining-up is a profile: entry `i` names
//! the domain slot, by attribute label and occurrence index, that argument
//! `i` feeds.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::relation::Relation;
use crate::structure::AttributeStructure;
use crate::vocabulary::Vocabulary;

/// One symbol's resolved binding: target relation, profile, and the
/// precomputed domain position of each argument
#[derive(Clone, Debug, PartialEq)]
pub struct InterpretedSymbol {
    subscript: u32,
    profile: Vec<(String, usize)>,
    positions: Vec<usize>,
}

impl InterpretedSymbol {
    pub fn subscript(&self) -> u32 {
        self.subscript
    }

    /// Profile entries as given: `(label, occurrence)` with occurrences
    /// counted from 1
    pub fn profile(&self) -> &[(String, usize)] {
        &self.profile
    }

    /// For each argument position, the domain position it feeds
    ///
    /// Always a permutation of `0..domain.len()` of the target relation.
    pub fn domain_positions(&self) -> &[usize] {
        &self.positions
    }
}

/// A total map from vocabulary symbols to relations of a structure
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeInterpretation {
    vocabulary: Vocabulary,
    structure: AttributeStructure,
    table: IndexMap<String, InterpretedSymbol>,
}

impl AttributeInterpretation {
    /// Validate and build an interpretation
    ///
    /// `mapping` pairs symbol names with relation subscripts; `profiles`
    /// pairs symbol names with their profile entries. Every symbol of the
    /// vocabulary must be mapped, injectively, and every mapped symbol must
    /// carry a profile whose entries exhaust the target relation's domain
    /// exactly once each.
    pub fn new(
        vocabulary: &Vocabulary,
        structure: &AttributeStructure,
        mapping: &[(&str, u32)],
        profiles: &[(&str, &[(&str, usize)])],
    ) -> Result<Self> {
        let mut subscripts: IndexMap<String, u32> = IndexMap::new();
        for (name, subscript) in mapping {
            if vocabulary.symbol(name).is_none() {
                return Err(Error::SymbolNotFound(name.to_string()));
            }
            if structure.relation(*subscript).is_none() {
                return Err(Error::RelationNotFound(*subscript));
            }
            if subscripts.contains_key(*name) {
                return Err(Error::DuplicateBinding(name.to_string()));
            }
            if let Some((first, _)) = subscripts.iter().find(|(_, s)| **s == *subscript) {
                return Err(Error::SharedSubscript {
                    subscript: *subscript,
                    first: first.clone(),
                    second: name.to_string(),
                });
            }
            subscripts.insert(name.to_string(), *subscript);
        }
        for symbol in vocabulary.symbols() {
            if !subscripts.contains_key(symbol.name()) {
                return Err(Error::UnmappedSymbol(symbol.name().to_string()));
            }
        }

        let mut entries_by_symbol: IndexMap<String, Vec<(String, usize)>> = IndexMap::new();
        for (name, entries) in profiles {
            if vocabulary.symbol(name).is_none() {
                return Err(Error::SymbolNotFound(name.to_string()));
            }
            if entries_by_symbol.contains_key(*name) {
                return Err(Error::DuplicateBinding(name.to_string()));
            }
            entries_by_symbol.insert(
                name.to_string(),
                entries.iter().map(|(l, o)| (l.to_string(), *o)).collect(),
            );
        }

        let mut table: IndexMap<String, InterpretedSymbol> = IndexMap::new();
        for symbol in vocabulary.symbols() {
            let name = symbol.name();
            let subscript = match subscripts.get(name) {
                Some(subscript) => *subscript,
                None => return Err(Error::UnmappedSymbol(name.to_string())),
            };
            let relation = match structure.relation(subscript) {
                Some(relation) => relation,
                None => return Err(Error::RelationNotFound(subscript)),
            };
            let entries = match entries_by_symbol.get(name) {
                Some(entries) => entries,
                None => return Err(Error::MissingProfile(name.to_string())),
            };
            if entries.len() != symbol.arity() {
                return Err(Error::ProfileArity {
                    symbol: name.to_string(),
                    arity: symbol.arity(),
                    entries: entries.len(),
                });
            }
            let positions = resolve_positions(name, relation, entries)?;
            table.insert(
                name.to_string(),
                InterpretedSymbol {
                    subscript,
                    profile: entries.clone(),
                    positions,
                },
            );
        }

        Ok(Self {
            vocabulary: vocabulary.clone(),
            structure: structure.clone(),
            table,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn structure(&self) -> &AttributeStructure {
        &self.structure
    }

    /// The resolved binding for `symbol`, if the vocabulary declares it
    pub fn entry(&self, symbol: &str) -> Option<&InterpretedSymbol> {
        self.table.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterpretedSymbol)> {
        self.table.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

impl fmt::Display for AttributeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .table
            .iter()
            .map(|(name, entry)| {
                let profile = entry
                    .profile
                    .iter()
                    .map(|(label, occurrence)| format!("({label}, {occurrence})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{name} -> R{} [{profile}]", entry.subscript)
            })
            .collect::<Vec<_>>();
        write!(f, "{}", rows.join("\n"))
    }
}

/// Turn `(label, occurrence)` entries into domain positions, then demand
/// those positions cover the domain exactly
fn resolve_positions(
    symbol: &str,
    relation: &Relation,
    entries: &[(String, usize)],
) -> Result<Vec<usize>> {
    let domain = relation.domain();
    let mut positions = Vec::with_capacity(entries.len());
    for (label, occurrence) in entries {
        let position = if *occurrence == 0 {
            None
        } else {
            domain
                .iter()
                .enumerate()
                .filter(|(_, l)| *l == label)
                .nth(occurrence - 1)
                .map(|(i, _)| i)
        };
        match position {
            Some(position) => positions.push(position),
            None => {
                return Err(Error::ProfileOccurrence {
                    symbol: symbol.to_string(),
                    label: label.clone(),
                    occurrence: *occurrence,
                })
            }
        }
    }

    let mut seen = vec![false; domain.len()];
    for &position in &positions {
        if seen[position] {
            return Err(Error::ProfileDomainMismatch {
                symbol: symbol.to_string(),
                subscript: relation.subscript(),
            });
        }
        seen[position] = true;
    }
    if seen.iter().any(|&covered| !covered) {
        return Err(Error::ProfileDomainMismatch {
            symbol: symbol.to_string(),
            subscript: relation.subscript(),
        });
    }
    Ok(positions)
}

// Unit tests moved to tests/unit_interpretation.rs
