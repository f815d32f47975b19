//! Unit tests for the expression parser

use scical_engine::ast::{BinaryOperator, Node};
use scical_engine::parser::Parser;
use scical_engine::{Error, Registry};
use std::sync::OnceLock;

mod test_support;
use test_support::eval;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry::new().unwrap_or_else(|e| panic!("registry: {}", e)))
}

/// Helper to parse expression and return the tree
fn parse(expr: &str) -> Result<Node, Error> {
    let mut parser = Parser::new(expr, registry());
    parser.parse()
}

fn source(expr: &str) -> String {
    parse(expr)
        .unwrap_or_else(|e| panic!("parsing '{}' failed: {}", expr, e))
        .render_source()
}

#[test]
fn test_parse_arithmetic() {
    assert_eq!(source("1+2*3"), "1 + (2 * 3)");
    assert_eq!(source("(1+2)*3"), "(1 + 2) * 3");
    assert_eq!(source("1-2-3"), "(1 - 2) - 3");
    assert_eq!(source("8/4/2"), "(8 / 4) / 2");
    assert_eq!(source("7//2"), "7 // 2");
}

#[test]
fn test_power_spellings_agree() {
    assert_eq!(eval("2^3^4"), eval("2**3**4"));
    assert_eq!(eval("2^3^4"), eval("2^(3^4)"));
    assert_ne!(eval("2^3^4"), eval("(2^3)^4"));
}

#[test]
fn test_implicit_multiplication_precedence() {
    assert_eq!(eval("2km/3h"), eval("(2*km)/(3*h)"));
    assert_ne!(eval("2km/3h"), eval("2*(km/3)*h"));
    assert_eq!(source("2km/3h"), "(2 * km) / (3 * h)");
}

#[test]
fn test_implicit_multiplication_chains() {
    assert_eq!(source("2 kg m"), "(2 * kg) * m");
    assert_eq!(source("2 pi"), "2 * pi");
    assert_eq!(source("5 m^2 / 2 s"), "(5 * (m ^ 2)) / (2 * s)");
}

#[test]
fn test_call_is_not_implicit_factor() {
    let ast = parse("2 sin(0)").unwrap();
    match ast {
        Node::Binary {
            operator: BinaryOperator::Mul,
            right,
            ..
        } => assert!(matches!(*right, Node::Call { .. })),
        other => panic!("Expected product, got {:?}", other),
    }
}

#[test]
fn test_function_aliases_keep_spelling() {
    assert_eq!(source("sqrt(4)"), "sqrt(4)");
    assert_eq!(source("log(8, 2)"), "log(8, 2)");
}

#[test]
fn test_sin_arity() {
    assert_eq!(
        parse("sin(1, 2)").unwrap_err(),
        Error::WrongNumberOfArguments {
            name: "sin".into(),
            given: 2,
            min: 1,
            max: 1,
        }
    );
    assert!(matches!(
        parse("log()"),
        Err(Error::WrongNumberOfArguments { given: 0, min: 1, max: 2, .. })
    ));
    assert_eq!(parse("frobnicate(1)").unwrap_err(), Error::UnknownFunction("frobnicate".into()));
}

#[test]
fn test_matrix_shape_is_checked_while_parsing() {
    assert!(matches!(
        parse("[1, 2; 3, 4, 5]"),
        Err(Error::NonRectangularMatrix { row: 2, expected: 2, found: 3 })
    ));
}

#[test]
fn test_conversion_targets_accept_units_only() {
    assert!(parse("1in to cm").is_ok());
    assert!(parse("1 J to kg m^2/s^2").is_err());
    assert!(parse("1 J to kg*m^2/s^2").is_ok());
    assert_eq!(parse("1 m to x").unwrap_err(), Error::UnknownUnit("x".into()));
}

#[test]
fn test_parse_errors_carry_position() {
    match parse("1 + (2 * 3") {
        Err(Error::Parse { position, .. }) => assert_eq!(position, 10),
        other => panic!("Expected parse error, got {:?}", other),
    }
}
