//! Lexer for relation definitions
//!
//! Tokenizes definition text like `R1(h1, m1) <=> h1 > m1` into a stream
//! for the parser.

use chumsky::prelude::*;
use std::ops::Range;

/// Token types for the definition language
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Keywords
    And,
    Or,
    Not,

    // Identifiers and literals (numeric lexemes are kept as text; the
    // parser converts them)
    Ident(String),
    Int(String),
    Real(String),

    // Punctuation
    LParen, // (
    RParen, // )
    Comma,  // ,
    Iff,    // <=>
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Eq,     // =
    Ne,     // !=
    Plus,   // +
    Minus,  // -
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Int(s) => write!(f, "{}", s),
            Token::Real(s) => write!(f, "{}", s),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Iff => write!(f, "<=>"),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
            Token::Eq => write!(f, "="),
            Token::Ne => write!(f, "!="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
        }
    }
}

/// Type alias for spans
pub type Span = Range<usize>;

/// Create a lexer for relation definitions
pub fn lexer() -> impl Parser<char, Vec<(Token, Span)>, Error = Simple<char>> {
    let keyword_or_ident = text::ident().map(|s: String| match s.as_str() {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        _ => Token::Ident(s),
    });

    let number = text::int(10)
        .then(just('.').ignore_then(text::digits(10)).or_not())
        .map(|(whole, frac): (String, Option<String>)| match frac {
            Some(frac) => Token::Real(format!("{}.{}", whole, frac)),
            None => Token::Int(whole),
        });

    // Longest operators first so `<=>` never lexes as `<=` `>`
    let operator = choice((
        just("<=>").to(Token::Iff),
        just("<=").to(Token::Le),
        just(">=").to(Token::Ge),
        just("!=").to(Token::Ne),
        just('<').to(Token::Lt),
        just('>').to(Token::Gt),
        just('=').to(Token::Eq),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just(',').to(Token::Comma),
        just('+').to(Token::Plus),
        just('-').to(Token::Minus),
    ));

    number
        .or(keyword_or_ident)
        .or(operator)
        .map_with_span(|tok, span| (tok, span))
        .padded()
        .repeated()
        .then_ignore(end())
}

// Unit tests moved to tests/unit_definitions.rs
