//! Property-based tests using QuickCheck

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use scical_engine::ast::{BinaryOperator, UnaryOperator};
use scical_engine::{Bindings, Evaluate, FormatConfig, Node, NumeralSystem, Value};

mod test_support;
use test_support::engine;

/// A random expression tree over small exact literals.
#[derive(Debug, Clone)]
struct Tree(Node);

fn literal(g: &mut Gen) -> Node {
    let numer = i64::from(i8::arbitrary(g) % 20);
    if bool::arbitrary(g) {
        Node::literal(Value::integer(numer))
    } else {
        let denom = i64::from(u8::arbitrary(g) % 9) + 1;
        Node::literal(Value::fraction(numer, denom))
    }
}

fn tree(g: &mut Gen, depth: usize) -> Node {
    if depth == 0 {
        return literal(g);
    }
    match u8::arbitrary(g) % 7 {
        0 => literal(g),
        1 => Node::unary(UnaryOperator::Minus, tree(g, depth - 1)),
        2 => {
            // Small exponents keep the values small
            let exponent = Node::literal(Value::integer(i64::from(u8::arbitrary(g) % 4)));
            Node::binary(BinaryOperator::Pow, tree(g, depth - 1), exponent)
        }
        n => {
            let operator = match n {
                3 => BinaryOperator::Add,
                4 => BinaryOperator::Sub,
                5 => BinaryOperator::Mul,
                _ => BinaryOperator::Div,
            };
            Node::binary(operator, tree(g, depth - 1), tree(g, depth - 1))
        }
    }
}

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(4);
        Tree(tree(g, depth))
    }
}

fn quickcheck() -> QuickCheck {
    QuickCheck::new().tests(200).gen(Gen::new(4))
}

/// Property: rendering a tree and parsing it back evaluates to the same value
#[test]
fn prop_render_parse_round_trip() {
    fn prop(tree: Tree) -> TestResult {
        let bindings = Bindings::new();
        let expected = tree.0.evaluate(&bindings);
        let source = tree.0.render_source();
        let reparsed = match engine().parse(&source) {
            Ok(node) => node,
            Err(err) => return TestResult::error(format!("'{}' failed to parse: {}", source, err)),
        };
        TestResult::from_bool(reparsed.evaluate(&bindings) == expected)
    }
    quickcheck().quickcheck(prop as fn(Tree) -> TestResult);
}

/// Property: formatting the same value twice gives the same text
#[test]
fn prop_format_is_idempotent() {
    fn prop(tree: Tree) -> TestResult {
        let Ok(value) = tree.0.evaluate(&Bindings::new()) else {
            return TestResult::discard();
        };
        let config = FormatConfig::default();
        TestResult::from_bool(engine().format(&value, &config) == engine().format(&value, &config))
    }
    quickcheck().quickcheck(prop as fn(Tree) -> TestResult);
}

/// Property: roman numerals read back to the number they were made from
#[test]
fn prop_roman_round_trip() {
    fn prop(n: u16) -> TestResult {
        let n = i64::from(n % 4999) + 1;
        let config = FormatConfig {
            numeral_system: NumeralSystem::Roman,
            ..FormatConfig::default()
        };
        let Ok(text) = engine().format(&Value::integer(n), &config) else {
            return TestResult::failed();
        };
        let parsed = engine().evaluate(&format!("0r{}", text), &Bindings::new());
        TestResult::from_bool(parsed == Ok(Value::integer(n)))
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(u16) -> TestResult);
}

/// Property: hexadecimal output reads back to the same integer
#[test]
fn prop_hexadecimal_round_trip() {
    fn prop(n: i64) -> TestResult {
        let config = FormatConfig {
            numeral_system: NumeralSystem::Hexadecimal,
            ..FormatConfig::default()
        };
        let Ok(text) = engine().format(&Value::integer(n), &config) else {
            return TestResult::failed();
        };
        let parsed = engine().evaluate(&text, &Bindings::new());
        TestResult::from_bool(parsed == Ok(Value::integer(n)))
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(i64) -> TestResult);
}

/// Property: addition is commutative for exact values
#[test]
fn prop_addition_commutative() {
    fn prop(a: Tree, b: Tree) -> TestResult {
        let bindings = Bindings::new();
        let (Ok(x), Ok(y)) = (a.0.evaluate(&bindings), b.0.evaluate(&bindings)) else {
            return TestResult::discard();
        };
        let left = scical_engine::ops::add(x.clone(), y.clone());
        let right = scical_engine::ops::add(y, x);
        TestResult::from_bool(left == right)
    }
    quickcheck().quickcheck(prop as fn(Tree, Tree) -> TestResult);
}
