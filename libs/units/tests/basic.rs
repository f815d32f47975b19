use num_bigint::BigInt;
use num_rational::BigRational;
use scical_units::{rational_from_decimal, Error, UnitRegistry};

fn registry() -> UnitRegistry {
    UnitRegistry::builtin().unwrap()
}

fn ratio(text: &str) -> BigRational {
    rational_from_decimal(text).unwrap()
}

#[test]
fn validate_rejects_invalid_syntax() {
    assert!(scical_units::validate("m//s").is_err());
    assert!(scical_units::validate("kg/(m.s2").is_err());
    assert!(scical_units::validate("m..s").is_err());
    assert!(scical_units::validate("kg.m.s-2").is_ok());
}

#[test]
fn inch_to_centimetre_is_exact() {
    let reg = registry();
    let inch = reg.resolve("in").unwrap();
    let cm = reg.resolve("cm").unwrap();
    let v = reg.convert(&BigRational::from_integer(BigInt::from(1)), &inch, &cm).unwrap();
    assert_eq!(v, ratio("2.54"));
}

#[test]
fn converts_minutes_to_seconds() {
    let reg = registry();
    let v = reg
        .convert(&ratio("1"), &reg.resolve("min").unwrap(), &reg.resolve("s").unwrap())
        .unwrap();
    assert_eq!(v, ratio("60"));
}

#[test]
fn deciliter_to_liter() {
    let reg = registry();
    let v = reg
        .convert(&ratio("1"), &reg.resolve("dL").unwrap(), &reg.resolve("L").unwrap())
        .unwrap();
    assert_eq!(v, ratio("0.1"));
}

#[test]
fn psi_in_pascal() {
    let reg = registry();
    let (factor, unit) = reg.to_best(&reg.resolve("psi").unwrap()).unwrap();
    assert_eq!(unit.to_string(), "Pa");
    assert_eq!(factor.value, ratio("4.4482216152605/0.00064516"));
}

#[test]
fn incompatible_units_report_both_sides() {
    let reg = registry();
    let err = reg
        .convert(&ratio("1"), &reg.resolve("m").unwrap(), &reg.resolve("s").unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        Error::Incompatible {
            from: "m".into(),
            to: "s".into()
        }
    );
}

#[test]
fn gas_constant_unit_definition() {
    let reg = registry();
    let (scalar, unit) = reg.evaluate_definition("J/(mol.K)").unwrap();
    assert_eq!(scalar, ratio("1"));
    assert_eq!(unit.to_string(), "J/(mol·K)");
    let (_, base) = reg.to_base(&unit).unwrap();
    assert_eq!(base.to_string(), "m^2·kg/(s^2·K·mol)");
}

#[test]
fn integer_atoms_become_scalars() {
    let reg = registry();
    let (scalar, unit) = reg.evaluate_definition("10.m").unwrap();
    assert_eq!(scalar, ratio("10"));
    assert_eq!(unit.to_string(), "m");
}

#[test]
fn square_root_of_area() {
    let reg = registry();
    let area = reg.resolve("m").unwrap().powi(2);
    assert_eq!(area.pow_ratio(1, 2).unwrap().to_string(), "m");
    assert!(matches!(
        area.pow_ratio(1, 3),
        Err(Error::FractionalExponent { .. })
    ));
}
