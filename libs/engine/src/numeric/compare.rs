//! Equality of values under a precision-aware tolerance.

use super::approx;
use super::arith::as_gaussian;
use super::float::{pow10, F64_PRECISION};
use super::value::Value;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Digits used to compare exact symbolic values numerically.
const COMPARISON_DIGITS: u32 = 30;

/// Whether two scalar or matrix values are equal.
///
/// Exact numbers compare exactly. Once a float is involved, values are
/// equal when their relative difference is below `10^-(p-1)`, `p` being the
/// smaller precision involved. `None` when either side has unbound symbols
/// that keep the answer open.
pub fn equals(a: &Value, b: &Value) -> Option<bool> {
    if a == b {
        return Some(true);
    }
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => return Some(x == y),
        (Value::Matrix(x), Value::Matrix(y)) => {
            if x.rows() != y.rows() || x.cols() != y.cols() {
                return Some(false);
            }
            for (p, q) in x.cells().iter().zip(y.cells()) {
                if !equals(p, q)? {
                    return Some(false);
                }
            }
            return Some(true);
        }
        (Value::Matrix(_) | Value::Boolean(_), _) | (_, Value::Matrix(_) | Value::Boolean(_)) => {
            return Some(false)
        }
        _ => {}
    }
    if let (Some(x), Some(y)) = (a.as_rational(), b.as_rational()) {
        return Some(x == y);
    }
    if a.contains_symbol() || b.contains_symbol() {
        return None;
    }
    if a.is_infinite() || b.is_infinite() {
        return Some(false);
    }

    let x = as_gaussian(&approx::approximate(a, COMPARISON_DIGITS).ok()?)?;
    let y = as_gaussian(&approx::approximate(b, COMPARISON_DIGITS).ok()?)?;
    let precision = [a.precision(), b.precision()]
        .into_iter()
        .flatten()
        .min()
        .map_or(COMPARISON_DIGITS, |p| p.min(precision_cap(a, b)));
    let tolerance = pow10(1 - i64::from(precision.max(1)));
    Some(
        close(&x.re_value(), &y.re_value(), &tolerance)?
            && close(&x.im_value(), &y.im_value(), &tolerance)?,
    )
}

/// f64-derived values never carry more than 15 digits; the result of an
/// elementary function evaluated symbolically is one.
fn precision_cap(a: &Value, b: &Value) -> u32 {
    let mut derived = false;
    for value in [a, b] {
        value.visit(&mut |v: &Value| {
            derived |= matches!(v, Value::Float(f) if f.precision() <= F64_PRECISION)
                || matches!(v, Value::Apply(..));
        });
    }
    if derived {
        F64_PRECISION
    } else {
        u32::MAX
    }
}

fn close(x: &Value, y: &Value, tolerance: &BigRational) -> Option<bool> {
    let (x, y) = (x.number_value()?, y.number_value()?);
    let diff = (&x - &y).abs();
    if x.is_zero() || y.is_zero() {
        return Some(diff <= *tolerance);
    }
    let scale = if x.abs() > y.abs() { x.abs() } else { y.abs() };
    Some(diff <= tolerance * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::arith;

    fn float(x: f64) -> Value {
        Value::from_f64(x).unwrap()
    }

    #[test]
    fn exact_numbers() {
        assert_eq!(equals(&Value::fraction(1, 2), &Value::fraction(2, 4)), Some(true));
        assert_eq!(equals(&Value::integer(1), &Value::integer(2)), Some(false));
    }

    #[test]
    fn floats_within_tolerance() {
        assert_eq!(equals(&float(0.1 + 0.2), &float(0.3)), Some(true));
        assert_eq!(equals(&float(0.3), &Value::fraction(3, 10)), Some(true));
        assert_eq!(equals(&float(0.3001), &Value::fraction(3, 10)), Some(false));
    }

    #[test]
    fn symbolic_values_compare_numerically() {
        let root = arith::pow(Value::integer(2), Value::fraction(1, 2)).unwrap();
        assert_eq!(equals(&root, &float(std::f64::consts::SQRT_2)), Some(true));
        assert_eq!(equals(&root, &Value::integer(1)), Some(false));
    }

    #[test]
    fn symbols_leave_the_answer_open() {
        assert_eq!(equals(&Value::symbol("x"), &Value::integer(1)), None);
        assert_eq!(equals(&Value::symbol("x"), &Value::symbol("x")), Some(true));
    }
}
