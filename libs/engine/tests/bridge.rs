//! Quantities through the whole pipeline: unit arithmetic, conversion and
//! equality across units.

use num_rational::BigRational;
use scical_engine::{DomainError, Engine, Error, FormatConfig, Value};

mod test_support;
use test_support::{approximate, as_f64, eval, eval_err, show, show_with};

fn unit_of(value: &Value) -> String {
    match value {
        Value::Quantity(q) => q.unit.to_string(),
        other => panic!("Expected quantity, got {:?}", other),
    }
}

#[test]
fn test_inch_to_centimetre() {
    let value = eval("1in to cm");
    assert_eq!(unit_of(&value), "cm");
    assert!((as_f64(&value) - 2.54).abs() < 1e-12);
    assert_eq!(show_with("1in to cm", &approximate()), "2.54 cm");
}

#[test]
fn test_equality_across_units() {
    assert_eq!(eval("1cm = 1in"), Value::Boolean(false));
    assert_eq!(eval("1in = 2.54cm"), Value::Boolean(true));
    assert_eq!(eval("1 km = 1000 m"), Value::Boolean(true));
    // Different dimensions are never equal
    assert_eq!(eval("1 m = 1 s"), Value::Boolean(false));
}

#[test]
fn test_sums_use_left_unit() {
    let value = eval("2 km + 500 m");
    assert_eq!(unit_of(&value), "km");
    assert_eq!(show_with("2 km + 500 m", &approximate()), "2.5 km");
}

#[test]
fn test_incompatible_sum() {
    assert!(matches!(
        eval_err("1 m + 1 s"),
        Error::Domain(DomainError::IncompatibleUnits { .. })
    ));
}

#[test]
fn test_units_cancel() {
    assert_eq!(eval("6 m / 3 m"), Value::integer(2));
    assert_eq!(eval("(4 m^2)^(1/2)"), eval("2 m"));
}

#[test]
fn test_speed_conversion() {
    let value = eval("36 km/h to m/s");
    assert_eq!(unit_of(&value), "m/s");
    assert_eq!(value, eval("10 m/s"));
}

#[test]
fn test_conversion_needs_compatible_units() {
    assert!(matches!(
        eval_err("1 m to s"),
        Error::Domain(DomainError::IncompatibleUnits { .. })
    ));
}

#[test]
fn test_unit_roots_must_stay_integral() {
    assert!(matches!(
        eval_err("(2 m)^(1/3)"),
        Error::Domain(DomainError::UnitExponent(_))
    ));
}

#[test]
fn test_constants_carry_units() {
    assert_eq!(unit_of(&eval("2 c")), "m/s");
    assert_eq!(show("2 c"), "599584916 m/s");
}

#[test]
fn test_currencies() {
    assert_eq!(unit_of(&eval("3 €")), "EUR");

    let mut engine = Engine::new().unwrap();
    assert!(matches!(engine.parse("5 $"), Err(Error::UnknownUnit(_))));
    engine
        .define_currency("USD", BigRational::new(4.into(), 5.into()))
        .unwrap();
    let value = engine
        .evaluate("5 $ to EUR", &Default::default())
        .unwrap();
    assert_eq!(value, engine.evaluate("4 EUR", &Default::default()).unwrap());
    let shown = engine.calculate("10 $ + 2 $", &FormatConfig::default()).unwrap();
    assert_eq!(shown.display, "12 USD");
}

#[test]
fn test_equations_with_units_are_solved() {
    for (input, expected) in [
        ("x m = 3 cm", Value::fraction(3, 100)),
        ("x m = 3 m", Value::integer(3)),
        ("2 x cm = 1 in", Value::fraction(127, 100)),
        ("x cm = 0", Value::zero()),
    ] {
        match eval(input) {
            Value::Solutions(s) => {
                assert_eq!(s.variable, "x", "{}", input);
                assert_eq!(s.values, vec![expected], "{}", input);
            }
            other => panic!("Expected solutions for '{}', got {:?}", input, other),
        }
    }
    assert_eq!(show("x m = 3 cm"), "x = 3/100");
}

#[test]
fn test_zero_equals_zero_in_any_unit() {
    assert_eq!(eval("0 m = 0"), Value::Boolean(true));
    assert_eq!(eval("0 = 0 s"), Value::Boolean(true));
    assert_eq!(eval("1 m = 0"), Value::Boolean(false));
}
