//! Formulas: relation symbols applied to terms, and truth over a state
//!
//! A formula `Sym(t1, ..., tk)` holds in a state when some choice of one
//! candidate value per argument satisfies the defining expression of the
//! relation the symbol is interpreted as. Candidates come from the state's
//! ascriptions at the `(label, object)` pairs the interpretation's profile
//! selects, so truth here is existential over the indeterminacy of the
//! state.

use std::fmt;

use indexmap::IndexSet;

use crate::assignment::{ConstantAssignment, VariableAssignment};
use crate::error::{Error, Result};
use crate::eval::{ExprEvaluator, RelationEvaluator};
use crate::interpretation::AttributeInterpretation;
use crate::state::NamedState;
use crate::value::Value;
use crate::vocabulary::Vocabulary;

// ==================================================
// Formulas
// ==================================================

/// A relation symbol applied to constant and variable terms
///
/// Equality is positional: the same terms in a different order make a
/// different formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    vocabulary: Vocabulary,
    symbol: String,
    terms: Vec<String>,
}

impl Formula {
    /// Build a formula, checking the symbol exists, the term count matches
    /// its arity, and every term is declared
    pub fn new(vocabulary: &Vocabulary, symbol: &str, terms: &[&str]) -> Result<Self> {
        let declared = match vocabulary.symbol(symbol) {
            Some(declared) => declared,
            None => return Err(Error::SymbolNotFound(symbol.to_string())),
        };
        if terms.len() != declared.arity() {
            return Err(Error::TermCount {
                symbol: symbol.to_string(),
                arity: declared.arity(),
                terms: terms.len(),
            });
        }
        for term in terms {
            if !vocabulary.is_constant(term) && !vocabulary.is_variable(term) {
                return Err(Error::UndeclaredTerm(term.to_string()));
            }
        }
        Ok(Self {
            vocabulary: vocabulary.clone(),
            symbol: symbol.to_string(),
            terms: terms.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Truth of this formula in `state`, using the default expression
    /// evaluator
    pub fn assign_truth_value(
        &self,
        interpretation: &AttributeInterpretation,
        state: &NamedState,
        variables: &VariableAssignment,
    ) -> Result<bool> {
        self.assign_truth_value_with(interpretation, state, variables, &ExprEvaluator::new())
    }

    /// Truth of this formula in `state` under a caller-supplied evaluator
    ///
    /// Resolves each term to an object, gathers the candidate values the
    /// state ascribes at the profile's `(label, object)` pairs, and searches
    /// the Cartesian product for a satisfying tuple. An argument with no
    /// candidates makes the formula false outright.
    pub fn assign_truth_value_with<E: RelationEvaluator>(
        &self,
        interpretation: &AttributeInterpretation,
        state: &NamedState,
        variables: &VariableAssignment,
        evaluator: &E,
    ) -> Result<bool> {
        if interpretation.vocabulary() != &self.vocabulary {
            return Err(Error::VocabularyMismatch("interpretation"));
        }
        if state.constants().vocabulary() != &self.vocabulary {
            return Err(Error::VocabularyMismatch("constant assignment"));
        }
        if variables.vocabulary() != &self.vocabulary {
            return Err(Error::VocabularyMismatch("variable assignment"));
        }

        let entry = match interpretation.entry(&self.symbol) {
            Some(entry) => entry,
            None => return Err(Error::SymbolNotFound(self.symbol.clone())),
        };
        let relation = match interpretation.structure().relation(entry.subscript()) {
            Some(relation) => relation,
            None => return Err(Error::RelationNotFound(entry.subscript())),
        };

        // Candidate lists, one per argument position
        let mut candidates: Vec<&[Value]> = Vec::with_capacity(self.terms.len());
        for (term, (label, _)) in self.terms.iter().zip(entry.profile()) {
            let object = resolve_term(&self.vocabulary, state.constants(), variables, term)?;
            candidates.push(state.ascription_or_empty(label, object));
        }
        if candidates.iter().any(|list| list.is_empty()) {
            return Ok(false);
        }

        let total: usize = candidates.iter().map(|list| list.len()).product();
        log::trace!("Evaluating {} over {} candidate tuple(s)", self, total);

        let positions = entry.domain_positions();
        let width = candidates.len();
        let mut cursor = vec![0usize; width];
        loop {
            // Scatter the chosen candidates into domain order
            let mut slots: Vec<Option<&Value>> = vec![None; width];
            for (argument, &position) in positions.iter().enumerate() {
                slots[position] = Some(&candidates[argument][cursor[argument]]);
            }
            let tuple: Vec<Value> = slots.into_iter().flatten().cloned().collect();
            if evaluator.evaluate(relation, &tuple)? {
                return Ok(true);
            }

            let mut position = width;
            loop {
                if position == 0 {
                    return Ok(false);
                }
                position -= 1;
                cursor[position] += 1;
                if cursor[position] < candidates[position].len() {
                    break;
                }
                cursor[position] = 0;
            }
        }
    }

    /// The `(label, object)` pairs a set of formulas reads from
    ///
    /// This is the part of a state the formulas' truth can depend on: the
    /// union over every formula and argument position of the profile label
    /// paired with the resolved term object.
    pub fn basis(
        constants: &ConstantAssignment,
        variables: &VariableAssignment,
        interpretation: &AttributeInterpretation,
        formulas: &[&Formula],
    ) -> Result<IndexSet<(String, String)>> {
        let vocabulary = interpretation.vocabulary();
        if constants.vocabulary() != vocabulary {
            return Err(Error::VocabularyMismatch("constant assignment"));
        }
        if variables.vocabulary() != vocabulary {
            return Err(Error::VocabularyMismatch("variable assignment"));
        }

        let mut pairs: IndexSet<(String, String)> = IndexSet::new();
        for formula in formulas {
            if formula.vocabulary() != vocabulary {
                return Err(Error::VocabularyMismatch("formula"));
            }
            let entry = match interpretation.entry(formula.symbol()) {
                Some(entry) => entry,
                None => return Err(Error::SymbolNotFound(formula.symbol().to_string())),
            };
            for (term, (label, _)) in formula.terms().iter().zip(entry.profile()) {
                let object = resolve_term(vocabulary, constants, variables, term)?;
                pairs.insert((label.clone(), object.to_string()));
            }
        }
        Ok(pairs)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol, self.terms.join(", "))
    }
}

fn resolve_term<'a>(
    vocabulary: &Vocabulary,
    constants: &'a ConstantAssignment,
    variables: &'a VariableAssignment,
    term: &str,
) -> Result<&'a str> {
    let object = if vocabulary.is_constant(term) {
        constants.get(term)
    } else {
        variables.get(term)
    };
    match object {
        Some(object) => Ok(object),
        None => Err(Error::UnboundTerm(term.to_string())),
    }
}

// ==================================================
// Assumption bases
// ==================================================

/// An ordered, duplicate-free collection of formulas over one vocabulary
#[derive(Clone, Debug, PartialEq)]
pub struct AssumptionBase {
    vocabulary: Vocabulary,
    formulas: Vec<Formula>,
}

impl AssumptionBase {
    /// An empty base over `vocabulary`
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            vocabulary: vocabulary.clone(),
            formulas: Vec::new(),
        }
    }

    /// Build a base from formulas, taking the vocabulary from the first
    ///
    /// Duplicates collapse silently; formulas over a different vocabulary
    /// are rejected.
    pub fn from_formulas(formulas: Vec<Formula>) -> Result<Self> {
        let vocabulary = match formulas.first() {
            Some(first) => first.vocabulary().clone(),
            None => return Err(Error::NoFormulas),
        };
        let mut base = Self {
            vocabulary,
            formulas: Vec::new(),
        };
        for formula in formulas {
            base.insert(formula)?;
        }
        Ok(base)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Append a formula unless already present; `Ok(false)` means it was a
    /// duplicate
    pub fn insert(&mut self, formula: Formula) -> Result<bool> {
        if formula.vocabulary() != &self.vocabulary {
            return Err(Error::VocabularyMismatch("formula"));
        }
        if self.formulas.contains(&formula) {
            return Ok(false);
        }
        self.formulas.push(formula);
        Ok(true)
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.formulas.contains(formula)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

impl<'a> IntoIterator for &'a AssumptionBase {
    type Item = &'a Formula;
    type IntoIter = std::slice::Iter<'a, Formula>;

    fn into_iter(self) -> Self::IntoIter {
        self.formulas.iter()
    }
}

impl fmt::Display for AssumptionBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formulas = self
            .formulas
            .iter()
            .map(Formula::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "AB({formulas})")
    }
}

// Unit tests moved to tests/unit_formula.rs
