//! Unit tests for relation definitions and their grammar

use attlog::ast::{Body, CmpOp, Expr};
use attlog::lexer::{lexer, Token};
use attlog::{parse_definition, Error, ErrorKind, Relation};
use chumsky::Parser;

// ============================================================================
// Lexer tests
// ============================================================================

#[test]
fn test_lex_definition() {
    let input = "R1(h1) <=> h1 > 11";
    let result = lexer().parse(input);
    assert!(result.is_ok());
    let tokens: Vec<_> = result.unwrap().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Ident("R1".to_string()),
            Token::LParen,
            Token::Ident("h1".to_string()),
            Token::RParen,
            Token::Iff,
            Token::Ident("h1".to_string()),
            Token::Gt,
            Token::Int("11".to_string()),
        ]
    );
}

#[test]
fn test_lex_longest_operator_wins() {
    // `<=>` must not lex as `<=` followed by `>`
    let input = "<=> <= >= != < > =";
    let result = lexer().parse(input);
    assert!(result.is_ok());
    let tokens: Vec<_> = result.unwrap().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Iff,
            Token::Le,
            Token::Ge,
            Token::Ne,
            Token::Lt,
            Token::Gt,
            Token::Eq,
        ]
    );
}

#[test]
fn test_lex_numbers_and_keywords() {
    let input = "3 and 3.5 or not x3";
    let result = lexer().parse(input);
    assert!(result.is_ok());
    let tokens: Vec<_> = result.unwrap().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Int("3".to_string()),
            Token::And,
            Token::Real("3.5".to_string()),
            Token::Or,
            Token::Not,
            Token::Ident("x3".to_string()),
        ]
    );
}

// ============================================================================
// Parser tests
// ============================================================================

#[test]
fn test_parse_simple_definition() {
    let result = parse_definition("R1(h1) <=> h1 > 11");
    assert!(result.is_ok(), "Parse error: {:?}", result);
    let definition = result.unwrap();
    assert_eq!(definition.subscript, 1);
    assert_eq!(definition.params, vec!["h1".to_string()]);
    assert_eq!(
        definition.body,
        Body::Parsed(Expr::Cmp(
            CmpOp::Gt,
            Box::new(Expr::Param("h1".to_string())),
            Box::new(Expr::Int(11)),
        ))
    );
}

#[test]
fn test_parse_whitespace_between_tokens() {
    // Whitespace between tokens never changes the parse
    let tight = parse_definition("R1(h1,m1)<=>h1>m1").unwrap();
    let spaced = parse_definition("R1 ( h1 , m1 )  <=>  h1 > m1").unwrap();
    assert_eq!(tight, spaced);
}

#[test]
fn test_parse_whitespace_inside_atoms() {
    // Acceptance is decided on the stripped text, so spacing may fall
    // anywhere, even inside the head's atoms
    let spread = parse_definition("R 1 ( h 1 , m 1 ) <=> h1 > m1").unwrap();
    let tight = parse_definition("R1(h1,m1) <=> h1 > m1").unwrap();
    assert_eq!(spread, tight);
    assert_eq!(spread.params, vec!["h1".to_string(), "m1".to_string()]);
}

#[test]
fn test_parse_empty_body() {
    // A definition may stop at `<=>`; the body is simply absent
    let definition = parse_definition("R2(x, y) <=>").unwrap();
    assert_eq!(definition.subscript, 2);
    assert_eq!(definition.params.len(), 2);
    assert_eq!(definition.body, Body::Empty);
}

#[test]
fn test_parse_keeps_foreign_body_text() {
    // Anything right of the connective is payload, not grammar
    let definition = parse_definition("R1(x) <=> x approaches infinity").unwrap();
    assert_eq!(definition.subscript, 1);
    assert_eq!(definition.body, Body::Raw("x approaches infinity".to_string()));

    // Rendering keeps the text as written
    assert_eq!(definition.to_string(), "R1(x) <=> x approaches infinity");
}

#[test]
fn test_parse_precedence() {
    // `or` binds loosest: a and b or c = (a and b) or c
    let definition = parse_definition("R1(a, b, c) <=> a = 1 and b = 1 or c = 1").unwrap();
    match definition.body.expr() {
        Some(Expr::Or(lhs, _)) => match lhs.as_ref() {
            Expr::And(_, _) => {}
            other => panic!("Expected `and` under `or`, found {:?}", other),
        },
        other => panic!("Expected `or` at the top, found {:?}", other),
    }
}

#[test]
fn test_parse_arithmetic_in_comparison() {
    let definition = parse_definition("R1(a, b) <=> a + 1 <= b - 1").unwrap();
    match definition.body.expr() {
        Some(Expr::Cmp(CmpOp::Le, lhs, rhs)) => {
            assert!(matches!(lhs.as_ref(), Expr::Arith(_, _, _)));
            assert!(matches!(rhs.as_ref(), Expr::Arith(_, _, _)));
        }
        other => panic!("Expected a comparison, found {:?}", other),
    }
}

#[test]
fn test_parse_call() {
    let definition = parse_definition("R3(x) <=> even(x + 1)").unwrap();
    match definition.body.expr() {
        Some(Expr::Call(name, args)) => {
            assert_eq!(name, "even");
            assert_eq!(args.len(), 1);
        }
        other => panic!("Expected a call, found {:?}", other),
    }
}

#[test]
fn test_parse_keeps_chained_comparison_opaque() {
    // `a < b < c` is not an expression; the text is kept, not rejected
    let definition = parse_definition("R1(a, b, c) <=> a < b < c").unwrap();
    assert_eq!(definition.body, Body::Raw("a < b < c".to_string()));
}

#[test]
fn test_parse_rejects_malformed_head() {
    // Head must be `R` followed by digits
    assert!(parse_definition("S1(x) <=> x > 1").is_err());
    assert!(parse_definition("R(x) <=> x > 1").is_err());
    assert!(parse_definition("Rx(x) <=> x > 1").is_err());
}

#[test]
fn test_parse_rejects_missing_iff() {
    assert!(parse_definition("R1(x) x > 1").is_err());
}

#[test]
fn test_parse_rejects_empty_parameter_list() {
    assert!(parse_definition("R1() <=> 1 = 1").is_err());
}

#[test]
fn test_parse_error_reports_source() {
    let result = parse_definition("R1(x,) <=> x > 1");
    match result {
        Err(Error::InvalidDefinition { definition, details }) => {
            assert_eq!(definition, "R1(x,) <=> x > 1");
            assert!(!details.is_empty());
        }
        other => panic!("Expected InvalidDefinition, found {:?}", other),
    }
}

#[test]
fn test_parse_error_reports_unlexable_head() {
    // A character outside the language fails at the lexer and still renders
    // a labeled report
    let result = parse_definition("R1(#) <=> x > 1");
    match result {
        Err(Error::InvalidDefinition { definition, details }) => {
            assert_eq!(definition, "R1(#) <=> x > 1");
            assert!(!details.is_empty());
        }
        other => panic!("Expected InvalidDefinition, found {:?}", other),
    }
}

// ============================================================================
// Relation tests
// ============================================================================

#[test]
fn test_is_valid_definition() {
    assert!(Relation::is_valid_definition("R1(h1) <=> h1 > 11"));
    assert!(Relation::is_valid_definition("R2(x, y) <=>"));
    assert!(Relation::is_valid_definition("R10(a, b) <=> a = b"));

    // The verdict ignores spacing and never reads past the connective
    assert!(Relation::is_valid_definition("R 1(h 1) <=> h1 > 11"));
    assert!(Relation::is_valid_definition("R1(x) <=> x >"));
    assert!(Relation::is_valid_definition("R1(x) <=> x approaches infinity"));

    // Duplicate argument names are rejected even though the grammar accepts
    // the shape, and spacing never hides the duplication
    assert!(!Relation::is_valid_definition("R1(a, a) <=> a > 1"));
    assert!(!Relation::is_valid_definition("R1(h 1, h1) <=> h1 > 1"));
    assert!(!Relation::is_valid_definition("not a definition"));
    assert!(!Relation::is_valid_definition("R1(x) x > 1"));
}

#[test]
fn test_relation_new() {
    let relation = Relation::new("R1(h1) <=> h1 > 11", &["hour"], 1).unwrap();
    assert_eq!(relation.subscript(), 1);
    assert_eq!(relation.arity(), 1);
    assert_eq!(relation.domain(), &["hour".to_string()]);
    assert_eq!(relation.params(), &["h1".to_string()]);
    assert!(matches!(relation.body(), Body::Parsed(_)));
}

#[test]
fn test_relation_subscript_mismatch() {
    let result = Relation::new("R1(h1) <=> h1 > 11", &["hour"], 2);
    match result {
        Err(Error::SubscriptMismatch { declared, .. }) => assert_eq!(declared, 2),
        other => panic!("Expected SubscriptMismatch, found {:?}", other),
    }
}

#[test]
fn test_relation_arity_mismatch() {
    let result = Relation::new("R1(h1) <=> h1 > 11", &["hour", "minute"], 1);
    match result {
        Err(Error::DefinitionArity {
            parameters, domain, ..
        }) => {
            assert_eq!(parameters, 1);
            assert_eq!(domain, 2);
        }
        other => panic!("Expected DefinitionArity, found {:?}", other),
    }
}

#[test]
fn test_relation_duplicate_argument() {
    let result = Relation::new("R1(a, a) <=> a > 1", &["hour", "hour"], 1);
    match result {
        Err(Error::DuplicateArgument { argument, .. }) => assert_eq!(argument, "a"),
        other => panic!("Expected DuplicateArgument, found {:?}", other),
    }
}

#[test]
fn test_relation_set_definition() {
    let mut relation = Relation::new("R1(h1) <=> h1 > 11", &["hour"], 1).unwrap();

    // A compatible replacement takes effect
    relation.set_definition("R1(h1) <=> h1 <= 11").unwrap();
    assert_eq!(relation.definition(), "R1(h1) <=> h1 <= 11");

    // Replacements are validated against the existing domain and subscript
    assert!(relation.set_definition("R2(h1) <=> h1 > 11").is_err());
    assert!(relation.set_definition("R1(h1, m1) <=> h1 > m1").is_err());
    assert_eq!(relation.definition(), "R1(h1) <=> h1 <= 11");
}

#[test]
fn test_relation_set_domain() {
    let mut relation = Relation::new("R1(a, b) <=> a > b", &["hour", "minute"], 1).unwrap();

    relation.set_domain(&["minute", "minute"]).unwrap();
    assert_eq!(relation.domain_str(), "minute X minute");

    // Length must still match the parameter count
    assert!(relation.set_domain(&["hour"]).is_err());
    assert_eq!(relation.domain_str(), "minute X minute");
}

#[test]
fn test_relation_display() {
    let relation = Relation::new("R1(h1, m1) <=> h1 > m1", &["hour", "minute"], 1).unwrap();
    assert_eq!(
        relation.to_string(),
        "R1 is a subset of hour X minute, defined as follows: R1(h1, m1) <=> h1 > m1"
    );
}

#[test]
fn test_relation_equality() {
    let a = Relation::new("R1(h1) <=> h1 > 11", &["hour"], 1).unwrap();
    let b = Relation::new("R1(h1) <=> h1 > 11", &["hour"], 1).unwrap();
    let c = Relation::new("R1(h1) <=> h1 > 12", &["hour"], 1).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_error_kinds() {
    let parse = Relation::new("R1(a, a) <=> a > 1", &["x", "y"], 1).unwrap_err();
    assert_eq!(parse.kind(), ErrorKind::Parse);

    let mismatch = Relation::new("R1(h1) <=> h1 > 11", &["hour"], 9).unwrap_err();
    assert_eq!(mismatch.kind(), ErrorKind::Parse);
}
