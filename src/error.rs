//! Errors for attlog
//!
//! One crate-wide error enum, a coarse taxonomy for callers that only need
//! to classify failures, and ariadne-based rendering of definition parse
//! errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::prelude::Simple;
use thiserror::Error;

use crate::eval::EvalError;
use crate::lexer::Token;
use crate::value::Value;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a construction or operation can fail
#[derive(Debug, Error)]
pub enum Error {
    // Definition text
    #[error("Invalid relation definition '{definition}':\n{details}")]
    InvalidDefinition { definition: String, details: String },
    #[error("Duplicate argument '{argument}' in definition '{definition}'")]
    DuplicateArgument {
        definition: String,
        argument: String,
    },
    #[error("Definition '{definition}' does not carry declared subscript {declared}")]
    SubscriptMismatch { definition: String, declared: u32 },
    #[error("Definition '{definition}' has {parameters} parameters but the domain has {domain} labels")]
    DefinitionArity {
        definition: String,
        parameters: usize,
        domain: usize,
    },

    // Structure algebra
    #[error("Duplicate attribute label: {0}")]
    DuplicateAttribute(String),
    #[error("Duplicate relation subscript: R{0}")]
    DuplicateRelation(u32),
    #[error("Conflicting definitions for attribute '{0}'")]
    ConflictingAttribute(String),
    #[error("Conflicting definitions for relation R{0}")]
    ConflictingRelation(u32),
    #[error("Unknown attribute label: {0}")]
    AttributeNotFound(String),
    #[error("Unknown relation subscript: R{0}")]
    RelationNotFound(u32),
    #[error("Attribute '{label}' is still used by the domain of R{subscript}")]
    AttributeInUse { label: String, subscript: u32 },
    #[error("Domain of R{subscript} names attribute '{label}', which is not in the structure")]
    DomainLabelMissing { subscript: u32, label: String },

    // System algebra
    #[error("Duplicate object: {0}")]
    DuplicateObject(String),
    #[error("Unknown object: {0}")]
    ObjectNotFound(String),
    #[error("Object sets overlap: {}", .0.join(", "))]
    ObjectOverlap(Vec<String>),
    #[error("Cannot apply {operation} to operand of kind {kind}")]
    UnsupportedOperand {
        operation: &'static str,
        kind: &'static str,
    },

    // Vocabulary
    #[error("Relation symbol '{0}' must have arity at least 1")]
    ZeroAritySymbol(String),
    #[error("Duplicate relation symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Name '{0}' is declared both constant and variable")]
    ConstantVariableClash(String),

    // Assignments
    #[error("'{0}' is not a declared constant")]
    UndeclaredConstant(String),
    #[error("'{0}' is not a declared variable")]
    UndeclaredVariable(String),
    #[error("Duplicate binding for '{0}'")]
    DuplicateBinding(String),
    #[error("Term '{term}' maps to object '{object}', which is already taken")]
    ConflictingTarget { term: String, object: String },

    // Interpretation
    #[error("Unknown relation symbol: {0}")]
    SymbolNotFound(String),
    #[error("Relation symbol '{0}' has no relation mapped to it")]
    UnmappedSymbol(String),
    #[error("Relation symbol '{0}' has no profile")]
    MissingProfile(String),
    #[error("Symbols '{first}' and '{second}' both map to R{subscript}")]
    SharedSubscript {
        subscript: u32,
        first: String,
        second: String,
    },
    #[error("Profile for '{symbol}' has {entries} entries but the symbol has arity {arity}")]
    ProfileArity {
        symbol: String,
        arity: usize,
        entries: usize,
    },
    #[error("Profile for '{symbol}' names occurrence {occurrence} of '{label}', which does not exist in the domain")]
    ProfileOccurrence {
        symbol: String,
        label: String,
        occurrence: usize,
    },
    #[error("Profile for '{symbol}' does not cover the domain of R{subscript} exactly")]
    ProfileDomainMismatch { symbol: String, subscript: u32 },

    // States
    #[error("Constant assignment was built against a different attribute system")]
    SystemMismatch,
    #[error("Value {value} is not in the value set of attribute '{label}'")]
    ValueNotAdmitted { label: String, value: Value },

    // Formulas
    #[error("Vocabulary mismatch: {0}")]
    VocabularyMismatch(&'static str),
    #[error("Symbol '{symbol}' has arity {arity} but {terms} terms were given")]
    TermCount {
        symbol: String,
        arity: usize,
        terms: usize,
    },
    #[error("Term '{0}' is neither a declared constant nor a declared variable")]
    UndeclaredTerm(String),
    #[error("Term '{0}' is not bound to any object")]
    UnboundTerm(String),
    #[error("An assumption base built from formulas needs at least one formula")]
    NoFormulas,

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Coarse classification of [`Error`] variants, for callers that only need
/// to tell malformed input from incompatible combinations from lookups that
/// found nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The definition text does not parse or violates the definition grammar
    Parse,
    /// Well-typed but semantically invalid input
    Value,
    /// A keyed member (label, subscript, object, symbol, binding) already exists
    Duplicate,
    /// Two well-formed values collide and neither can win
    Conflict,
    /// A keyed member does not exist
    NotFound,
    /// Inputs built against different vocabularies, systems, or kinds
    Mismatch,
    /// The relation's defining expression failed to evaluate
    Eval,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            InvalidDefinition { .. }
            | DuplicateArgument { .. }
            | SubscriptMismatch { .. }
            | DefinitionArity { .. } => ErrorKind::Parse,
            DuplicateAttribute(_)
            | DuplicateRelation(_)
            | DuplicateObject(_)
            | DuplicateSymbol(_)
            | DuplicateBinding(_)
            | ObjectOverlap(_) => ErrorKind::Duplicate,
            ConflictingAttribute(_)
            | ConflictingRelation(_)
            | AttributeInUse { .. }
            | SharedSubscript { .. }
            | ConflictingTarget { .. }
            | ConstantVariableClash(_) => ErrorKind::Conflict,
            AttributeNotFound(_) | RelationNotFound(_) | ObjectNotFound(_)
            | SymbolNotFound(_) => ErrorKind::NotFound,
            DomainLabelMissing { .. }
            | ZeroAritySymbol(_)
            | UndeclaredConstant(_)
            | UndeclaredVariable(_)
            | UnmappedSymbol(_)
            | MissingProfile(_)
            | ProfileArity { .. }
            | ProfileOccurrence { .. }
            | ProfileDomainMismatch { .. }
            | ValueNotAdmitted { .. }
            | TermCount { .. }
            | UndeclaredTerm(_)
            | UnboundTerm(_)
            | NoFormulas => ErrorKind::Value,
            SystemMismatch | VocabularyMismatch(_) | UnsupportedOperand { .. } => {
                ErrorKind::Mismatch
            }
            Eval(_) => ErrorKind::Eval,
        }
    }
}

// ============================================================================
// Definition diagnostics
// ============================================================================

/// Format lexer errors over a definition into a labeled report
pub fn format_lexer_errors(source: &str, errors: Vec<Simple<char>>) -> String {
    let mut output = Vec::new();
    for error in &errors {
        render_report(
            source,
            "Lexical error",
            error.span(),
            format_lexer_error(error),
            &mut output,
        );
    }
    finish_reports(output)
}

fn format_lexer_error(error: &Simple<char>) -> String {
    let found = error
        .found()
        .map(|c| format!("'{}'", c))
        .unwrap_or_else(|| "end of input".to_string());

    let expected: Vec<String> = error
        .expected()
        .filter_map(|opt| opt.as_ref())
        .map(|c| format!("'{}'", c))
        .collect();

    if expected.is_empty() {
        format!("Unexpected character {}", found)
    } else {
        format!("Unexpected {}, expected {}", found, expected.join(" or "))
    }
}

/// Format parser errors over a definition into a labeled report
///
/// Token spans survive the lexer-to-parser handoff as character ranges, so
/// labels point back into the text that was lexed.
pub fn format_parser_errors(source: &str, errors: Vec<Simple<Token>>) -> String {
    let mut output = Vec::new();
    for error in &errors {
        let span = error.span();
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);
        render_report(
            source,
            "Parse error",
            start..end,
            format_parser_error(error),
            &mut output,
        );
    }
    finish_reports(output)
}

/// Append one labeled report against the text the errors refer to
fn render_report(
    source: &str,
    heading: &str,
    span: std::ops::Range<usize>,
    message: String,
    output: &mut Vec<u8>,
) {
    Report::build(ReportKind::Error, (), span.start)
        .with_message(heading)
        .with_label(Label::new(span).with_message(message).with_color(Color::Red))
        .finish()
        .write(Source::from(source), output)
        .expect("Failed to write error report");
}

fn finish_reports(output: Vec<u8>) -> String {
    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}

fn format_parser_error(error: &Simple<Token>) -> String {
    use chumsky::error::SimpleReason;

    // Custom messages (from Simple::custom) carry the most context
    if let SimpleReason::Custom(msg) = error.reason() {
        return msg.clone();
    }

    let found = error
        .found()
        .map(|t| format!("'{}'", t))
        .unwrap_or_else(|| "end of input".to_string());

    let expected: Vec<String> = error
        .expected()
        .filter_map(|opt| opt.as_ref())
        .map(|t| format!("'{}'", t))
        .collect();

    if expected.is_empty() {
        format!("Unexpected token {}", found)
    } else {
        format!(
            "Unexpected {}, expected one of: {}",
            found,
            expected.join(", ")
        )
    }
}

// Unit tests moved to tests/unit_definitions.rs
