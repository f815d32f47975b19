//! Numeric approximation of symbolic values.

use super::arith;
use super::elementary;
use super::float::{
    decimal_exponent, pow10, rational_to_f64, Float, CONSTANT_PRECISION, E_DIGITS,
    F64_PRECISION, PI_DIGITS,
};
use super::value::{Constant, Solutions, Value};
use crate::bridge::Quantity;
use crate::error::Result;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::f64::consts::{E, LN_10, PI};

fn constant_value(constant: Constant, digits: u32) -> Value {
    let text = match constant {
        Constant::Pi => PI_DIGITS,
        Constant::E => E_DIGITS,
    };
    match scical_units::rational_from_decimal(text) {
        Some(value) => Value::float(value, digits.min(CONSTANT_PRECISION)),
        None => Value::Constant(constant),
    }
}

/// Replace constants, rationals, roots and function applications by floats
/// carrying at least `digits` significant digits. Integers and symbols stay.
pub fn approximate(value: &Value, digits: u32) -> Result<Value> {
    let working = digits.max(F64_PRECISION);
    Ok(match value {
        Value::Rational(r) => Value::Float(Float::new(r.clone(), working)),
        Value::Constant(c) => constant_value(*c, working),
        Value::Sum(terms) => arith::make_sum(approximate_all(terms, digits)?)?,
        Value::Product(factors) => arith::make_product(approximate_all(factors, digits)?)?,
        Value::Power(base, exp) => {
            arith::make_power(approximate(base, digits)?, approximate(exp, digits)?)?
        }
        Value::Apply(name, args) => {
            let mut args = approximate_all(args, digits)?;
            match (args.pop(), args.is_empty()) {
                (Some(arg), true) => reapply(name, arg)?,
                _ => value.clone(),
            }
        }
        Value::Quantity(q) => Value::Quantity(Box::new(Quantity {
            magnitude: approximate(&q.magnitude, digits)?,
            unit: q.unit.clone(),
        })),
        Value::Matrix(m) => Value::Matrix(m.try_map(|cell| approximate(cell, digits))?),
        Value::Solutions(s) => Value::Solutions(Solutions {
            variable: s.variable.clone(),
            values: approximate_all(&s.values, digits)?,
            numerical: s.numerical,
        }),
        Value::UnsolvedEquality(lhs, rhs) => Value::UnsolvedEquality(
            Box::new(approximate(lhs, digits)?),
            Box::new(approximate(rhs, digits)?),
        ),
        _ => value.clone(),
    })
}

fn approximate_all(values: &[Value], digits: u32) -> Result<Vec<Value>> {
    values.iter().map(|v| approximate(v, digits)).collect()
}

fn reapply(name: &'static str, arg: Value) -> Result<Value> {
    match name {
        "factorial" => elementary::factorial(arg),
        "floor" | "ceil" => elementary::round(name, arg),
        "abs" => elementary::abs(arg),
        _ => elementary::apply(name, arg),
    }
}

/// Natural logarithm of a positive rational of any magnitude.
pub fn rational_ln(value: &BigRational) -> Option<f64> {
    if !value.is_positive() {
        return None;
    }
    let exp = decimal_exponent(value);
    let mantissa = rational_to_f64(&(value / pow10(exp)));
    let ln = mantissa.ln() + exp as f64 * LN_10;
    ln.is_finite().then_some(ln)
}

/// Evaluate a function at a complex argument. Real arguments stay on the
/// real line and give `None` outside the function's real domain.
pub fn eval_complex(name: &str, z: Complex64) -> Option<Complex64> {
    if z.im == 0.0 {
        return elementary::eval_f64(name, z.re).map(|y| Complex64::new(y, 0.0));
    }
    let one = Complex64::new(1.0, 0.0);
    let w = match name {
        "sin" => z.sin(),
        "cos" => z.cos(),
        "tan" => z.tan(),
        "cot" => one / z.tan(),
        "sec" => one / z.cos(),
        "cosec" => one / z.sin(),
        "arcsin" => z.asin(),
        "arccos" => z.acos(),
        "arctan" => z.atan(),
        "arccot" => (one / z).atan(),
        "arcsec" => (one / z).acos(),
        "arccosec" => (one / z).asin(),
        "sinh" => z.sinh(),
        "cosh" => z.cosh(),
        "tanh" => z.tanh(),
        "coth" => one / z.tanh(),
        "sech" => one / z.cosh(),
        "cosech" => one / z.sinh(),
        "arsinh" => z.asinh(),
        "arcosh" => z.acosh(),
        "artanh" => z.atanh(),
        "arcoth" => (one / z).atanh(),
        "arsech" => (one / z).acosh(),
        "arcosech" => (one / z).asinh(),
        "exp" => z.exp(),
        "ln" => z.ln(),
        "abs" => Complex64::new(z.norm(), 0.0),
        _ => return None,
    };
    (w.re.is_finite() && w.im.is_finite()).then_some(w)
}

/// Evaluate a symbolic value in `f64` complex arithmetic, looking unbound
/// symbols up in `env`.
pub fn complex_eval(value: &Value, env: &dyn Fn(&str) -> Option<Complex64>) -> Option<Complex64> {
    let z = match value {
        Value::Integer(_) | Value::Rational(_) | Value::Float(_) => {
            Complex64::new(rational_to_f64(&value.number_value()?), 0.0)
        }
        Value::Constant(Constant::Pi) => Complex64::new(PI, 0.0),
        Value::Constant(Constant::E) => Complex64::new(E, 0.0),
        Value::ImaginaryUnit => Complex64::new(0.0, 1.0),
        Value::Symbol(name) => env(name)?,
        Value::Sum(terms) => terms.iter().try_fold(Complex64::zero(), |acc, term| {
            Some(acc + complex_eval(term, env)?)
        })?,
        Value::Product(factors) => factors
            .iter()
            .try_fold(Complex64::new(1.0, 0.0), |acc, factor| {
                Some(acc * complex_eval(factor, env)?)
            })?,
        Value::Power(base, exp) => {
            let b = complex_eval(base, env)?;
            match exp.as_integer().and_then(|n| i32::try_from(n).ok()) {
                Some(n) => b.powi(n),
                None => {
                    let e = complex_eval(exp, env)?;
                    if b.im == 0.0 && b.re > 0.0 && e.im == 0.0 {
                        Complex64::new(b.re.powf(e.re), 0.0)
                    } else {
                        b.powc(e)
                    }
                }
            }
        }
        Value::Apply(name, args) => match args.as_slice() {
            [arg] => match *name {
                "factorial" => {
                    let x = complex_eval(arg, env)?;
                    if x.im != 0.0 {
                        return None;
                    }
                    Complex64::new(elementary::eval_f64("factorial", x.re)?, 0.0)
                }
                _ => eval_complex(name, complex_eval(arg, env)?)?,
            },
            _ => return None,
        },
        _ => return None,
    };
    (z.re.is_finite() && z.im.is_finite()).then_some(z)
}

/// `(re, im)` of a symbol-free value, if it is a finite number.
pub fn to_complex_f64(value: &Value) -> Option<(f64, f64)> {
    complex_eval(value, &|_| None).map(|z| (z.re, z.im))
}

/// A symbol-free value as a real `f64`.
pub fn to_f64(value: &Value) -> Option<f64> {
    match to_complex_f64(value)? {
        (re, im) if im == 0.0 => Some(re),
        _ => None,
    }
}

/// Evaluate `value` with `variable` bound to `x`.
pub fn eval_at(value: &Value, variable: &str, x: f64) -> Option<f64> {
    let z = complex_eval(value, &|name| (name == variable).then(|| Complex64::new(x, 0.0)))?;
    (z.im.abs() <= 1e-12 * z.re.abs().max(1.0)).then_some(z.re)
}
