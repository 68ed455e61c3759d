//! Parser for relation definitions
//!
//! A definition is validated on its whitespace-stripped text: the head
//! `R<n>(<params>)` and the `<=>` connective must be well formed, and
//! everything right of the connective is unconstrained payload. Acceptance
//! therefore never depends on spacing. The body is still parsed as an
//! expression when it is one, against the original spacing so keywords and
//! identifiers stay separated.

use chumsky::prelude::*;

use crate::ast::{ArithOp, Body, CmpOp, Definition, Expr};
use crate::error::{format_lexer_errors, format_parser_errors, Error, Result};
use crate::lexer::{lexer, Span, Token};

const CONNECTIVE: &str = "<=>";

/// Lex and parse a definition, rendering any head errors against the
/// stripped text
pub fn parse_definition(input: &str) -> Result<Definition> {
    let (stripped, offsets) = strip_whitespace(input);

    let arrow = match stripped.find(CONNECTIVE) {
        Some(arrow) => arrow,
        None => {
            return Err(Error::InvalidDefinition {
                definition: input.to_string(),
                details: format!("Definition has no '{}' connective", CONNECTIVE),
            })
        }
    };
    let (subscript, params) = parse_head(input, &stripped[..arrow])?;

    // Map the first body character back into the original text so the body
    // is read with its spacing intact
    let body = match offsets.get(arrow + CONNECTIVE.len()) {
        Some(&offset) => parse_body(input[offset..].trim_end()),
        None => Body::Empty,
    };
    Ok(Definition {
        subscript,
        params,
        body,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Drop every whitespace character, recording for each surviving byte the
/// offset it came from
fn strip_whitespace(input: &str) -> (String, Vec<usize>) {
    let mut stripped = String::with_capacity(input.len());
    let mut offsets = Vec::with_capacity(input.len());
    for (offset, c) in input.char_indices() {
        if !c.is_whitespace() {
            stripped.push(c);
            for _ in 0..c.len_utf8() {
                offsets.push(offset);
            }
        }
    }
    (stripped, offsets)
}

/// Parse the stripped text left of the connective as `R<n>(<params>)`
fn parse_head(input: &str, head: &str) -> Result<(u32, Vec<String>)> {
    let tokens = lexer().parse(head).map_err(|errs| Error::InvalidDefinition {
        definition: input.to_string(),
        details: format_lexer_errors(head, errs),
    })?;

    let len = head.len();
    head_parser()
        .parse(chumsky::Stream::from_iter(len..len + 1, tokens.into_iter()))
        .map_err(|errs| Error::InvalidDefinition {
            definition: input.to_string(),
            details: format_parser_errors(head, errs),
        })
}

fn head_parser() -> impl Parser<Token, (u32, Vec<String>), Error = Simple<Token>> {
    relation_head()
        .then(
            ident()
                .separated_by(just(Token::Comma))
                .at_least(1)
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        )
        .then_ignore(end())
}

/// Parse the connective's right side, keeping text that is not an expression
fn parse_body(text: &str) -> Body {
    let tokens = match lexer().parse(text) {
        Ok(tokens) => tokens,
        Err(_) => return Body::Raw(text.to_string()),
    };

    let len = text.len();
    let parsed = expr()
        .then_ignore(end())
        .parse(chumsky::Stream::from_iter(len..len + 1, tokens.into_iter()));
    match parsed {
        Ok(expr) => Body::Parsed(expr),
        Err(_) => Body::Raw(text.to_string()),
    }
}

fn ident() -> impl Parser<Token, String, Error = Simple<Token>> + Clone {
    select! { Token::Ident(s) => s }
}

/// Parse a head identifier like `R12` into its subscript
fn relation_head() -> impl Parser<Token, u32, Error = Simple<Token>> + Clone {
    ident().try_map(|name, span: Span| {
        let digits = match name.strip_prefix('R') {
            Some(d) if !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()) => d,
            _ => {
                return Err(Simple::custom(
                    span,
                    format!("Expected a relation head like 'R1', found '{}'", name),
                ))
            }
        };
        digits.parse::<u32>().map_err(|_| {
            Simple::custom(
                span.clone(),
                format!("Relation subscript in '{}' is out of range", name),
            )
        })
    })
}

// ============================================================================
// Expressions
// ============================================================================

/// Parse a body expression
///
/// Precedence, loosest first: `or`, `and`, `not`, comparison, `+`/`-`.
/// Comparison does not chain: `a < b < c` is not an expression.
fn expr() -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    recursive(|expr| {
        let int = select! { Token::Int(s) => s }.try_map(|s: String, span: Span| {
            s.parse::<i64>()
                .map(Expr::Int)
                .map_err(|_| Simple::custom(span, format!("Integer literal '{}' is out of range", s)))
        });

        let real = select! { Token::Real(s) => s }.try_map(|s: String, span: Span| {
            s.parse::<f64>()
                .map(Expr::Real)
                .map_err(|_| Simple::custom(span, format!("Malformed numeric literal '{}'", s)))
        });

        // A call must be tried before a bare parameter; both start with an
        // identifier
        let call = ident()
            .then(
                expr.clone()
                    .separated_by(just(Token::Comma))
                    .at_least(1)
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .map(|(name, args)| Expr::Call(name, args));

        let param = ident().map(Expr::Param);

        let paren = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen));

        let atom = choice((int, real, call, param, paren));

        let arith_op = choice((
            just(Token::Plus).to(ArithOp::Add),
            just(Token::Minus).to(ArithOp::Sub),
        ));
        let arith = atom
            .clone()
            .then(arith_op.then(atom).repeated())
            .foldl(|lhs, (op, rhs)| Expr::Arith(op, Box::new(lhs), Box::new(rhs)));

        let cmp_op = choice((
            just(Token::Le).to(CmpOp::Le),
            just(Token::Ge).to(CmpOp::Ge),
            just(Token::Ne).to(CmpOp::Ne),
            just(Token::Lt).to(CmpOp::Lt),
            just(Token::Gt).to(CmpOp::Gt),
            just(Token::Eq).to(CmpOp::Eq),
        ));
        let cmp = arith
            .clone()
            .then(cmp_op.then(arith).or_not())
            .map(|(lhs, rest)| match rest {
                Some((op, rhs)) => Expr::Cmp(op, Box::new(lhs), Box::new(rhs)),
                None => lhs,
            });

        let not = just(Token::Not)
            .repeated()
            .then(cmp)
            .foldr(|_, operand| Expr::Not(Box::new(operand)));

        let and = not
            .clone()
            .then(just(Token::And).ignore_then(not).repeated())
            .foldl(|lhs, rhs| Expr::And(Box::new(lhs), Box::new(rhs)));

        and.clone()
            .then(just(Token::Or).ignore_then(and).repeated())
            .foldl(|lhs, rhs| Expr::Or(Box::new(lhs), Box::new(rhs)))
    })
}

// Unit tests moved to tests/unit_definitions.rs
