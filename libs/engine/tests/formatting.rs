//! Result formatting through the engine

use scical_engine::{
    Error, FormatConfig, Hint, Markup, Mode, NumeralSystem, UnitDisplay, Value,
};

mod test_support;
use test_support::{approximate, engine, show, show_with};

fn with_system(numeral_system: NumeralSystem) -> FormatConfig {
    FormatConfig {
        numeral_system,
        ..FormatConfig::default()
    }
}

fn html() -> FormatConfig {
    FormatConfig {
        markup: Markup::Html,
        ..FormatConfig::default()
    }
}

// ============================================
// Exact mode
// ============================================

#[test]
fn test_exact_numbers() {
    assert_eq!(show("2^64"), "18446744073709551616");
    assert_eq!(show("1/3"), "⅓");
    assert_eq!(show("2/7"), "2/7");
    assert_eq!(show("-3/4"), "-¾");
    assert_eq!(show("sqrt(2)"), "√2");
    assert_eq!(show("pi"), "π");
}

#[test]
fn test_floats_are_rounded_in_exact_mode() {
    assert_eq!(show("0.1 + 0.2"), "0.3");
    assert_eq!(show("1.0/3"), "0.33333333");
    assert_eq!(show("1.5e-7"), "1.5e-7");
    assert_eq!(show("123456789.0"), "1.2345679e8");
}

#[test]
fn test_symbolic_results() {
    assert_eq!(show("x + x"), "2·x");
    assert_eq!(show("x^2"), "x^2");
    assert_eq!(show("1/x"), "1/x");
    assert_eq!(show("x - 1"), "x - 1");
}

#[test]
fn test_special_values() {
    assert_eq!(show("1/0"), "z∞");
    assert_eq!(show("1 = 1"), "true");
    assert_eq!(show("[1, 2; 3, 4]"), "[1, 2; 3, 4]");
    assert_eq!(show("x^2 = 4"), "x = -2\nx = 2");
}

#[test]
fn test_formatting_is_idempotent() {
    let config = FormatConfig::default();
    for input in ["1/3", "x^2 + 2x", "2 km/h", "sqrt(8)", "[½, 2]"] {
        let value = engine().evaluate(input, &Default::default()).unwrap();
        let first = engine().format(&value, &config).unwrap();
        let second = engine().format(&value, &config).unwrap();
        assert_eq!(first, second, "formatting {:?} changed", input);
    }
}

// ============================================
// Approximate mode
// ============================================

#[test]
fn test_approximate_numbers() {
    let config = approximate();
    assert_eq!(show_with("pi", &config), "3.1415927");
    assert_eq!(show_with("1/3", &config), "0.33333333");
    assert_eq!(show_with("2^64", &config), "18446744073709551616");
    let config = FormatConfig {
        digits: 3,
        ..approximate()
    };
    assert_eq!(show_with("e", &config), "2.72");
}

// ============================================
// Numeral systems
// ============================================

#[test]
fn test_positional_systems() {
    assert_eq!(show_with("255", &with_system(NumeralSystem::Hexadecimal)), "0xFF");
    assert_eq!(show_with("8", &with_system(NumeralSystem::Octal)), "0o10");
    assert_eq!(show_with("5", &with_system(NumeralSystem::Binary)), "0b101");
    assert_eq!(show_with("1/2", &with_system(NumeralSystem::Binary)), "0b0.1");
}

#[test]
fn test_roman_numerals() {
    let roman = with_system(NumeralSystem::Roman);
    assert_eq!(show_with("14", &roman), "XIV");
    assert_eq!(show_with("0", &roman), "N");
    assert_eq!(show_with("0rMMXXVI", &roman), "MMXXVI");
    assert!(matches!(
        engine().format(&Value::integer(5000), &roman),
        Err(Error::Format(_))
    ));
    assert!(matches!(
        engine().format(&Value::fraction(1, 2), &roman),
        Err(Error::Format(_))
    ));
}

#[test]
fn test_format_errors_become_display_text() {
    let roman = with_system(NumeralSystem::Roman);
    let calc = engine().calculate("5000", &roman).unwrap();
    assert_eq!(calc.value, Value::integer(5000));
    assert!(calc.display.contains("4999"), "got {:?}", calc.display);
}

// ============================================
// Markup
// ============================================

#[test]
fn test_html_markup() {
    let config = html();
    assert_eq!(show_with("x^2", &config), "x<sup>2</sup>");
    assert_eq!(show_with("1.5e-7", &config), "1.5·10<sup>-7</sup>");
    assert_eq!(show_with("2/7", &config), "<sup>2</sup>&frasl;<sub>7</sub>");
    assert_eq!(show_with("x^2 = 4", &config), "x = -2<br>x = 2");
}

#[test]
fn test_nested_exponents_stay_inline() {
    assert_eq!(show_with("x^(x^2)", &html()), "x<sup>x^2</sup>");
}

// ============================================
// Units
// ============================================

#[test]
fn test_unit_display() {
    assert_eq!(show("3 m/s^2"), "3 m/s^2");
    assert_eq!(show_with("3 m/s^2", &html()), "3 m/s<sup>2</sup>");
    // Units without a numerator use negative exponents after a magnitude
    assert_eq!(show("1/(2 m)"), "½ m^-1");
    assert_eq!(show("4/s^2"), "4 s^-2");
    assert!(show_with("1/(2 m)", &html()).ends_with(" m<sup>-1</sup>"));
    assert_eq!(show("1/m"), "1/m");

    let best = FormatConfig {
        unit_display: UnitDisplay::ToBest,
        ..FormatConfig::default()
    };
    assert_eq!(show_with("2 kg*m/s^2", &best), "2 N");

    let base = FormatConfig {
        unit_display: UnitDisplay::ToBase,
        ..FormatConfig::default()
    };
    assert_eq!(show_with("3 kN", &base), "3000 m·kg/s^2");
}

// ============================================
// Hints
// ============================================

#[test]
fn test_hints() {
    let config = FormatConfig::default();
    let calc = engine().calculate("1/0", &config).unwrap();
    assert_eq!(calc.hints, vec![Hint::ComplexInfinity]);

    let calc = engine().calculate("x^3 = 2", &config).unwrap();
    assert_eq!(calc.hints, vec![Hint::NumericalSolution]);

    let calc = engine().calculate("exp(x) = -1", &config).unwrap();
    assert_eq!(calc.hints, vec![Hint::UnsolvedEquality]);

    let calc = engine().calculate("sin(0.5)", &FormatConfig { digits: 20, ..config }).unwrap();
    assert_eq!(calc.hints, vec![Hint::LimitedPrecision]);

    let calc = engine().calculate("2 + 2", &FormatConfig { mode: Mode::Approximate, ..config }).unwrap();
    assert!(calc.hints.is_empty());
}
