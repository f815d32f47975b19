//! Quantities: a magnitude paired with a unit.
//!
//! Arithmetic on quantities forwards to the numeric engine for the magnitude
//! and to the unit system for the unit. Sums need compatible units and are
//! expressed in the unit of the left operand; products and quotients combine
//! units; powers need a real, dimensionless exponent.

use crate::error::{DomainError, Error, Result};
use crate::numeric::{compare, Value};
use crate::ops;
use num_traits::ToPrimitive;
use scical_units::{Factor, Unit};
use tracing::trace;

/// Precision of magnitudes scaled by a unit factor that is not exact (`deg`).
pub const INEXACT_FACTOR_PRECISION: u32 = 40;

/// A magnitude with a unit. The magnitude is never itself a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub magnitude: Value,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: Value, unit: Unit) -> Self {
        match magnitude {
            Value::Quantity(inner) => Quantity {
                magnitude: inner.magnitude,
                unit: inner.unit.mul(&unit),
            },
            magnitude => Quantity { magnitude, unit },
        }
    }

    /// `magnitude · unit` as a value: a plain value once the unit has cancelled.
    pub fn value(magnitude: Value, unit: Unit) -> Value {
        let quantity = Quantity::new(magnitude, unit);
        if quantity.unit.is_one() {
            quantity.magnitude
        } else {
            Value::Quantity(Box::new(quantity))
        }
    }

    fn of(value: Value) -> Quantity {
        match value {
            Value::Quantity(q) => *q,
            other => Quantity {
                magnitude: other,
                unit: Unit::one(),
            },
        }
    }

    /// The same quantity expressed in `target`.
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity> {
        let factor = self.unit.conversion_factor(target)?;
        Ok(Quantity {
            magnitude: scale(self.magnitude.clone(), &factor)?,
            unit: target.clone(),
        })
    }

    /// Rewrite with the factor and unit returned by a unit normalization.
    pub fn rescale(&self, (factor, unit): (Factor, Unit)) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: scale(self.magnitude.clone(), &factor)?,
            unit,
        })
    }
}

/// `magnitude · factor`, as a float when the factor is not exact.
pub fn scale(magnitude: Value, factor: &Factor) -> Result<Value> {
    if factor.is_one() {
        return Ok(magnitude);
    }
    let factor = if factor.exact {
        Value::rational(factor.value.clone())
    } else {
        Value::float(factor.value.clone(), INEXACT_FACTOR_PRECISION)
    };
    ops::mul(magnitude, factor)
}

/// A quantity with a dimensionless unit as a plain value (`cm/in = 50/127`).
pub fn to_dimensionless(value: Value) -> Result<Value> {
    match value {
        Value::Quantity(q) => {
            if !q.unit.is_dimensionless() {
                return Err(DomainError::IncompatibleUnits {
                    from: q.unit.to_string(),
                    to: "1".into(),
                }
                .into());
            }
            scale(q.magnitude, &q.unit.factor())
        }
        other => Ok(other),
    }
}

pub fn add(a: Value, b: Value) -> Result<Value> {
    let (a, b) = (Quantity::of(a), Quantity::of(b));
    let factor = b.unit.conversion_factor(&a.unit)?;
    let magnitude = ops::add(a.magnitude, scale(b.magnitude, &factor)?)?;
    Ok(Quantity::value(magnitude, a.unit))
}

pub fn sub(a: Value, b: Value) -> Result<Value> {
    let (a, b) = (Quantity::of(a), Quantity::of(b));
    let factor = b.unit.conversion_factor(&a.unit)?;
    let magnitude = ops::sub(a.magnitude, scale(b.magnitude, &factor)?)?;
    Ok(Quantity::value(magnitude, a.unit))
}

pub fn mul(a: Value, b: Value) -> Result<Value> {
    let (a, b) = (Quantity::of(a), Quantity::of(b));
    let magnitude = ops::mul(a.magnitude, b.magnitude)?;
    Ok(Quantity::value(magnitude, a.unit.mul(&b.unit)))
}

pub fn div(a: Value, b: Value) -> Result<Value> {
    let (a, b) = (Quantity::of(a), Quantity::of(b));
    let magnitude = ops::div(a.magnitude, b.magnitude)?;
    Ok(Quantity::value(magnitude, a.unit.div(&b.unit)))
}

pub fn neg(a: Value) -> Result<Value> {
    let a = Quantity::of(a);
    Ok(Quantity::value(ops::neg(a.magnitude)?, a.unit))
}

fn unevaluated(base: Value, exp: Value) -> Value {
    trace!("leaving power of a quantity unevaluated");
    Value::Power(Box::new(base), Box::new(exp))
}

/// `base^exp` where either side may carry a unit.
pub fn pow(base: Value, exp: Value) -> Result<Value> {
    let exp = match exp {
        Value::Quantity(q) if q.unit.is_dimensionless() => to_dimensionless(Value::Quantity(q))?,
        Value::Quantity(q) => return Ok(unevaluated(base, Value::Quantity(q))),
        other => other,
    };
    let Value::Quantity(q) = base else {
        return ops::pow(base, exp);
    };

    let Some(ratio) = exp.number_value() else {
        return Ok(unevaluated(Value::Quantity(q), exp));
    };
    let unit = if ratio.is_integer() {
        let n = ratio
            .to_integer()
            .to_i32()
            .ok_or_else(|| DomainError::Overflow(format!("unit power {}", ratio)))?;
        q.unit.powi(n)
    } else {
        match (ratio.numer().to_i64(), ratio.denom().to_i64()) {
            (Some(numer), Some(denom)) => q.unit.pow_ratio(numer, denom)?,
            _ => {
                return Err(DomainError::UnitExponent(format!(
                    "cannot raise {} to the power {}",
                    q.unit, exp
                ))
                .into())
            }
        }
    };
    let magnitude = ops::pow(q.magnitude, exp)?;
    Ok(Quantity::value(magnitude, unit))
}

/// Whether the magnitude of `value` is known to be zero, whatever its unit.
pub fn is_zero(value: &Value) -> bool {
    let magnitude = match value {
        Value::Quantity(q) => &q.magnitude,
        other => other,
    };
    compare::equals(magnitude, &Value::zero()) == Some(true)
}

/// Convert any value to `target`. The result is always a quantity.
pub fn convert(value: Value, target: &Unit) -> Result<Value> {
    match value {
        Value::Boolean(_) | Value::Solutions(_) | Value::UnsolvedEquality(..) => {
            Err(Error::Domain(DomainError::Unsupported(format!(
                "cannot convert a {} to {}",
                value.kind(),
                target
            ))))
        }
        value => {
            let converted = Quantity::of(value).convert_to(target)?;
            Ok(Value::Quantity(Box::new(converted)))
        }
    }
}

/// Equality where at least one side is a quantity. Incompatible units are
/// unequal; a zero magnitude equals zero in any unit.
pub fn equals(a: &Value, b: &Value) -> Option<bool> {
    let (a, b) = (Quantity::of(a.clone()), Quantity::of(b.clone()));
    let zero = Value::zero();
    if compare::equals(&b.magnitude, &zero) == Some(true) {
        return compare::equals(&a.magnitude, &zero);
    }
    if compare::equals(&a.magnitude, &zero) == Some(true) {
        return compare::equals(&b.magnitude, &zero);
    }
    let Ok(factor) = b.unit.conversion_factor(&a.unit) else {
        return Some(false);
    };
    let scaled = scale(b.magnitude, &factor).ok()?;
    ops::equals(&a.magnitude, &scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scical_units::UnitRegistry;

    fn unit(name: &str) -> Unit {
        UnitRegistry::builtin().unwrap().resolve(name).unwrap()
    }

    fn q(n: i64, name: &str) -> Value {
        Quantity::value(Value::integer(n), unit(name))
    }

    #[test]
    fn sums_use_the_left_unit() {
        let sum = add(q(1, "m"), q(50, "cm")).unwrap();
        match sum {
            Value::Quantity(q) => {
                assert_eq!(q.magnitude, Value::fraction(3, 2));
                assert_eq!(q.unit.to_string(), "m");
            }
            other => panic!("expected a quantity, got {:?}", other),
        }
    }

    #[test]
    fn incompatible_sums_fail() {
        let err = add(q(1, "m"), q(1, "s")).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::IncompatibleUnits { .. })));
        let err = add(Value::one(), q(1, "m")).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::IncompatibleUnits { .. })));
    }

    #[test]
    fn cancelled_units_vanish() {
        let ratio = div(q(6, "m"), q(3, "m")).unwrap();
        assert_eq!(ratio, Value::integer(2));
    }

    #[test]
    fn powers_of_units() {
        let area = pow(q(3, "m"), Value::integer(2)).unwrap();
        match &area {
            Value::Quantity(q) => assert_eq!(q.unit.to_string(), "m^2"),
            other => panic!("expected a quantity, got {:?}", other),
        }
        let side = pow(area, Value::fraction(1, 2)).unwrap();
        assert_eq!(side, q(3, "m"));
        let err = pow(q(2, "m"), Value::fraction(1, 2)).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnitExponent(_))));
    }

    #[test]
    fn symbolic_exponents_stay_unevaluated() {
        let power = pow(q(2, "m"), Value::symbol("x")).unwrap();
        assert!(matches!(power, Value::Power(..)));
    }

    #[test]
    fn conversion_is_exact() {
        let converted = convert(q(1, "in"), &unit("cm")).unwrap();
        match converted {
            Value::Quantity(q) => assert_eq!(q.magnitude, Value::fraction(127, 50)),
            other => panic!("expected a quantity, got {:?}", other),
        }
    }

    #[test]
    fn equality_across_units() {
        assert_eq!(equals(&q(1, "cm"), &q(1, "in")), Some(false));
        assert_eq!(equals(&q(100, "cm"), &q(1, "m")), Some(true));
        assert_eq!(equals(&q(1, "m"), &q(1, "s")), Some(false));
        assert_eq!(equals(&q(0, "m"), &Value::zero()), Some(true));
    }
}
