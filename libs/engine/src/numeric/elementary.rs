//! Elementary functions: exact special values, numeric evaluation, and
//! symbolic application otherwise.

use super::approx;
use super::arith::{self, as_gaussian};
use super::float::F64_PRECISION;
use super::value::{Constant, Sign, Value};
use crate::error::{DomainError, Result};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::f64::consts::{FRAC_PI_2, PI};

/// Largest argument accepted by the factorial.
const MAX_FACTORIAL: u32 = 20_000;

/// Evaluate a real function at real arguments. `None` outside its domain.
pub fn eval_f64(name: &str, x: f64) -> Option<f64> {
    let y = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "cot" => 1.0 / x.tan(),
        "sec" => 1.0 / x.cos(),
        "cosec" => 1.0 / x.sin(),
        "arcsin" if x.abs() <= 1.0 => x.asin(),
        "arccos" if x.abs() <= 1.0 => x.acos(),
        "arctan" => x.atan(),
        "arccot" if x == 0.0 => FRAC_PI_2,
        "arccot" => (1.0 / x).atan(),
        "arcsec" if x.abs() >= 1.0 => (1.0 / x).acos(),
        "arccosec" if x.abs() >= 1.0 => (1.0 / x).asin(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "coth" => 1.0 / x.tanh(),
        "sech" => 1.0 / x.cosh(),
        "cosech" => 1.0 / x.sinh(),
        "arsinh" => x.asinh(),
        "arcosh" if x >= 1.0 => x.acosh(),
        "artanh" if x.abs() < 1.0 => x.atanh(),
        "arcoth" if x.abs() > 1.0 => (1.0 / x).atanh(),
        "arsech" if x > 0.0 && x <= 1.0 => (1.0 / x).acosh(),
        "arcosech" if x != 0.0 => (1.0 / x).asinh(),
        "exp" => x.exp(),
        "ln" if x > 0.0 => x.ln(),
        "erf" => libm::erf(x),
        "erfc" => libm::erfc(x),
        "abs" => x.abs(),
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        "factorial" if x >= 0.0 && x.fract() == 0.0 && x <= 170.0 => {
            (1..=x as u32).map(f64::from).product()
        }
        _ => return None,
    };
    y.is_finite().then_some(y)
}

/// Apply a one-argument function to an evaluated scalar.
pub fn apply(name: &'static str, arg: Value) -> Result<Value> {
    if let Some(value) = special_value(name, &arg)? {
        return Ok(value);
    }
    if arg.has_float() && arg.is_symbol_free() {
        return numeric(name, &arg);
    }
    Ok(Value::Apply(name, vec![arg]))
}

fn numeric(name: &'static str, arg: &Value) -> Result<Value> {
    let precision = arg.precision().unwrap_or(F64_PRECISION).min(F64_PRECISION);
    let undefined = || DomainError::OutOfDomain {
        function: name.to_string(),
        message: format!("undefined at {}", arg),
    };
    if let Some(x) = approx::to_f64(arg) {
        let y = eval_f64(name, x).ok_or_else(undefined)?;
        return arith::float_value(y, precision);
    }
    let (re, im) = approx::to_complex_f64(arg).ok_or_else(undefined)?;
    let z = approx::eval_complex(name, Complex64::new(re, im)).ok_or_else(undefined)?;
    arith::complex_value(z.re, z.im, precision)
}

/// `log(x, base)`, exact when `x` is a power of `base`.
pub fn log(x: Value, base: Value) -> Result<Value> {
    if let (Some(x), Some(b)) = (x.as_rational(), base.as_rational()) {
        if let Some(k) = exact_log(&x, &b) {
            return Ok(Value::Integer(k));
        }
    }
    let numerator = apply("ln", x)?;
    let denominator = apply("ln", base)?;
    arith::div(numerator, denominator)
}

fn exact_log(x: &BigRational, base: &BigRational) -> Option<BigInt> {
    if !x.is_positive() || !base.is_positive() || base.is_one() {
        return None;
    }
    let estimate = (approx::rational_ln(x)? / approx::rational_ln(base)?).round();
    if !estimate.is_finite() || estimate.abs() > 10_000.0 {
        return None;
    }
    let k = estimate as i32;
    (scical_units::rational_powi(base, k) == *x).then(|| BigInt::from(k))
}

pub fn factorial(arg: Value) -> Result<Value> {
    let n = match &arg {
        Value::Integer(n) => n.clone(),
        Value::Float(f) if f.value().is_integer() => f.value().to_integer(),
        Value::Rational(_) | Value::Float(_) => {
            return Err(DomainError::NotAnInteger(arg.to_string()).into())
        }
        Value::Infinity(Sign::Positive) => return Ok(arg),
        _ if arg.contains_symbol() => return Ok(Value::Apply("factorial", vec![arg])),
        _ => return Err(DomainError::NotAnInteger(arg.to_string()).into()),
    };
    if n.is_negative() {
        return Err(DomainError::OutOfDomain {
            function: "factorial".into(),
            message: "negative argument".into(),
        }
        .into());
    }
    let n = n
        .to_u32()
        .filter(|n| *n <= MAX_FACTORIAL)
        .ok_or_else(|| DomainError::Overflow(format!("{}!", n)))?;
    let product = (2..=n).fold(BigInt::one(), |acc, k| acc * k);
    Ok(Value::Integer(product))
}

/// `floor` and `ceil`.
pub fn round(name: &'static str, arg: Value) -> Result<Value> {
    let up = name == "ceil";
    let pick = |r: &BigRational| if up { r.ceil() } else { r.floor() };
    match &arg {
        Value::Integer(_) | Value::Infinity(_) | Value::ComplexInfinity => Ok(arg),
        Value::Rational(r) => Ok(Value::Integer(pick(r).to_integer())),
        Value::Float(f) => Ok(Value::Integer(pick(f.value()).to_integer())),
        _ if arg.is_symbol_free() && !arg.contains(&Value::ImaginaryUnit) => {
            let approximated = approx::approximate(&arg, 60)?;
            match approximated.number_value() {
                Some(r) => Ok(Value::Integer(pick(&r).to_integer())),
                None => Ok(Value::Apply(name, vec![arg])),
            }
        }
        _ => Ok(Value::Apply(name, vec![arg])),
    }
}

pub fn abs(arg: Value) -> Result<Value> {
    if let Some((value, precision)) = arith::number_parts(&arg) {
        return Ok(arith::make_number(value.abs(), precision));
    }
    match &arg {
        Value::Infinity(_) | Value::ComplexInfinity => return Ok(Value::Infinity(Sign::Positive)),
        Value::Constant(_) => return Ok(arg),
        _ => {}
    }
    if let Some(z) = as_gaussian(&arg) {
        let square = arith::add(
            arith::mul(z.re_value(), z.re_value())?,
            arith::mul(z.im_value(), z.im_value())?,
        )?;
        return arith::pow(square, Value::fraction(1, 2));
    }
    if arg.is_symbol_free() {
        if let Some((re, im)) = approx::to_complex_f64(&arg) {
            if im == 0.0 {
                return if re < 0.0 { arith::neg(arg) } else { Ok(arg) };
            }
        }
    }
    Ok(Value::Apply("abs", vec![arg]))
}

/// `arg` as a rational multiple of π: `0`, `π`, `r·π`.
fn pi_multiple(arg: &Value) -> Option<BigRational> {
    match arg {
        Value::Integer(n) if n.is_zero() => Some(BigRational::zero()),
        Value::Constant(Constant::Pi) => Some(BigRational::one()),
        Value::Product(factors) if factors.len() == 2 => {
            match (factors[0].as_rational(), &factors[1]) {
                (Some(r), Value::Constant(Constant::Pi)) => Some(r),
                _ => None,
            }
        }
        _ => None,
    }
}

/// `sin(m·π/12)` for the multiples with a closed form.
fn sin_twelfths(m: i64) -> Option<Value> {
    let m = m.rem_euclid(24);
    if m >= 12 {
        return arith::neg(sin_twelfths(m - 12)?).ok();
    }
    let m = if m > 6 { 12 - m } else { m };
    let half = Value::fraction(1, 2);
    let half_root = |n: i64| {
        arith::mul(
            half.clone(),
            arith::pow(Value::integer(n), Value::fraction(1, 2))?,
        )
    };
    match m {
        0 => Some(Value::zero()),
        2 => Some(half.clone()),
        3 => half_root(2).ok(),
        4 => half_root(3).ok(),
        6 => Some(Value::one()),
        _ => None,
    }
}

fn trig_special(name: &str, arg: &Value) -> Result<Option<Value>> {
    let Some(k) = pi_multiple(arg) else {
        return Ok(None);
    };
    let twelfths = k * BigRational::from_integer(BigInt::from(12));
    if !twelfths.is_integer() {
        return Ok(None);
    }
    let Some(m) = twelfths.to_integer().mod_floor(&BigInt::from(24)).to_i64() else {
        return Ok(None);
    };
    let (Some(sin), Some(cos)) = (sin_twelfths(m), sin_twelfths(m + 6)) else {
        return Ok(None);
    };
    let value = match name {
        "sin" => sin,
        "cos" => cos,
        "tan" => arith::div(sin, cos)?,
        "cot" => arith::div(cos, sin)?,
        "sec" => arith::div(Value::one(), cos)?,
        "cosec" => arith::div(Value::one(), sin)?,
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn pi_times(numer: i64, denom: i64) -> Result<Value> {
    arith::mul(Value::fraction(numer, denom), Value::Constant(Constant::Pi))
}

fn special_value(name: &str, arg: &Value) -> Result<Option<Value>> {
    if let Some(value) = trig_special(name, arg)? {
        return Ok(Some(value));
    }
    let r = arg.as_rational();
    let is = |n: i64, d: i64| r.as_ref() == Some(&BigRational::new(BigInt::from(n), BigInt::from(d)));
    let value = match name {
        "arcsin" if is(0, 1) => Value::zero(),
        "arcsin" if is(1, 2) => pi_times(1, 6)?,
        "arcsin" if is(1, 1) => pi_times(1, 2)?,
        "arcsin" if is(-1, 1) => pi_times(-1, 2)?,
        "arccos" if is(1, 1) => Value::zero(),
        "arccos" if is(1, 2) => pi_times(1, 3)?,
        "arccos" if is(0, 1) => pi_times(1, 2)?,
        "arccos" if is(-1, 1) => Value::Constant(Constant::Pi),
        "arctan" if is(0, 1) => Value::zero(),
        "arctan" if is(1, 1) => pi_times(1, 4)?,
        "arctan" if is(-1, 1) => pi_times(-1, 4)?,
        "arccot" if is(0, 1) => pi_times(1, 2)?,
        "arccot" if is(1, 1) => pi_times(1, 4)?,
        "sinh" | "tanh" | "arsinh" | "artanh" if is(0, 1) => Value::zero(),
        "cosh" | "sech" if is(0, 1) => Value::one(),
        "arcosh" if is(1, 1) => Value::zero(),
        "exp" if !arg.has_float() => arith::pow(Value::Constant(Constant::E), arg.clone())?,
        "ln" => match arg {
            Value::Integer(n) if n.is_one() => Value::zero(),
            Value::Integer(n) if n.is_zero() => Value::ComplexInfinity,
            Value::Constant(Constant::E) => Value::one(),
            Value::Power(base, exp) if **base == Value::Constant(Constant::E) => (**exp).clone(),
            Value::Infinity(Sign::Positive) => arg.clone(),
            _ => return Ok(None),
        },
        "erf" if is(0, 1) => Value::zero(),
        "erfc" if is(0, 1) => Value::one(),
        "erf" | "erfc" => match arg {
            Value::Infinity(sign) => {
                let erf = if *sign == Sign::Positive { 1 } else { -1 };
                Value::integer(if name == "erf" { erf } else { 1 - erf })
            }
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi() -> Value {
        Value::Constant(Constant::Pi)
    }

    #[test]
    fn exact_trigonometry() {
        assert_eq!(apply("sin", Value::zero()).unwrap(), Value::zero());
        assert_eq!(apply("cos", pi()).unwrap(), Value::minus_one());
        let sixth = arith::div(pi(), Value::integer(6)).unwrap();
        assert_eq!(apply("sin", sixth).unwrap(), Value::fraction(1, 2));
        let half = arith::div(pi(), Value::integer(2)).unwrap();
        assert_eq!(apply("tan", half).unwrap(), Value::ComplexInfinity);
    }

    #[test]
    fn unreduced_calls_stay_symbolic() {
        assert_eq!(
            apply("sin", Value::integer(2)).unwrap(),
            Value::Apply("sin", vec![Value::integer(2)])
        );
    }

    #[test]
    fn float_arguments_are_evaluated() {
        let v = apply("sin", Value::from_f64(0.5).unwrap()).unwrap();
        let expected = 0.5f64.sin();
        assert!((approx::to_f64(&v).unwrap() - expected).abs() < 1e-12);
        assert!(apply("ln", Value::from_f64(-1.0).unwrap()).is_err());
    }

    #[test]
    fn logarithms() {
        assert_eq!(log(Value::integer(8), Value::integer(2)).unwrap(), Value::integer(3));
        assert_eq!(apply("ln", Value::Constant(Constant::E)).unwrap(), Value::one());
        assert_eq!(apply("ln", Value::one()).unwrap(), Value::zero());
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(Value::integer(5)).unwrap(), Value::integer(120));
        assert_eq!(factorial(Value::from_f64(4.0).unwrap()).unwrap(), Value::integer(24));
        assert!(factorial(Value::fraction(1, 2)).is_err());
        assert!(factorial(Value::integer(-1)).is_err());
    }
}
