//! Solving `lhs = rhs` for one variable.

use super::approx;
use super::arith::{add, div, make_product, mul, neg, pow, sub};
use super::value::{Solutions, Value};
use crate::error::Result;
use tracing::debug;

/// Powers of sums above this degree are not expanded.
const MAX_EXPANDED_DEGREE: u32 = 8;

const SECANT_ITERATIONS: usize = 100;
const SECANT_TOLERANCE: f64 = 1e-9;

/// Coefficients `c0, c1, …` of `value` as a polynomial in `variable`, or
/// `None` when `value` is not a polynomial in it.
pub fn as_polynomial(value: &Value, variable: &str) -> Option<Vec<Value>> {
    let target = Value::symbol(variable);
    if !value.contains(&target) {
        return Some(vec![value.clone()]);
    }
    let poly = match value {
        Value::Symbol(_) => vec![Value::zero(), Value::one()],
        Value::Sum(terms) => {
            let mut acc = vec![Value::zero()];
            for term in terms {
                acc = poly_add(acc, as_polynomial(term, variable)?).ok()?;
            }
            acc
        }
        Value::Product(factors) => {
            let mut acc = vec![Value::one()];
            for factor in factors {
                acc = poly_mul(&acc, &as_polynomial(factor, variable)?).ok()?;
            }
            acc
        }
        Value::Power(base, exp) => {
            let n = exp
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| (1..=MAX_EXPANDED_DEGREE).contains(n))?;
            let base = as_polynomial(base, variable)?;
            let mut acc = vec![Value::one()];
            for _ in 0..n {
                acc = poly_mul(&acc, &base).ok()?;
            }
            acc
        }
        _ => return None,
    };
    Some(trim(poly))
}

fn trim(mut poly: Vec<Value>) -> Vec<Value> {
    while poly.len() > 1 && poly.last().is_some_and(Value::is_exact_zero) {
        poly.pop();
    }
    poly
}

fn poly_add(a: Vec<Value>, b: Vec<Value>) -> Result<Vec<Value>> {
    let (mut long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (i, coefficient) in short.into_iter().enumerate() {
        long[i] = add(long[i].clone(), coefficient)?;
    }
    Ok(long)
}

fn poly_mul(a: &[Value], b: &[Value]) -> Result<Vec<Value>> {
    let mut out = vec![Value::zero(); a.len() + b.len() - 1];
    for (i, p) in a.iter().enumerate() {
        for (j, q) in b.iter().enumerate() {
            out[i + j] = add(out[i + j].clone(), mul(p.clone(), q.clone())?)?;
        }
    }
    Ok(out)
}

/// Solve `lhs = rhs` for `variable`. Returns `Solutions`, or the simplified
/// equality `lhs - rhs = 0` when no solution is found.
pub fn solve(lhs: &Value, rhs: &Value, variable: &str) -> Result<Value> {
    let target = Value::symbol(variable);
    for (side, other) in [(lhs, rhs), (rhs, lhs)] {
        if *side == target && !other.contains(&target) {
            return Ok(solutions(variable, vec![other.clone()], false));
        }
    }

    let difference = sub(lhs.clone(), rhs.clone())?;
    let unsolved = || Value::UnsolvedEquality(Box::new(difference.clone()), Box::new(Value::zero()));
    if !difference.contains(&target) {
        return Ok(unsolved());
    }

    if let Some(coefficients) = as_polynomial(&difference, variable) {
        let degree = coefficients.len() - 1;
        debug!(degree, "solving polynomial equation");
        match coefficients.as_slice() {
            [c0, c1] => {
                let root = neg(div(c0.clone(), c1.clone())?)?;
                return Ok(solutions(variable, vec![root], false));
            }
            [c, b, a] => {
                let roots = quadratic_roots(a, b, c)?;
                return Ok(solutions(variable, roots, false));
            }
            _ => {}
        }
    }

    let mut other_symbols = false;
    difference.visit(&mut |v: &Value| {
        other_symbols |= matches!(v, Value::Symbol(name) if name != variable);
    });
    if other_symbols {
        return Ok(unsolved());
    }

    debug!("solving numerically with the secant method");
    match secant(&difference, variable) {
        Some(root) => match Value::from_f64(root) {
            Some(value) => Ok(solutions(variable, vec![value], true)),
            None => Ok(unsolved()),
        },
        None => {
            debug!("no numerical solution found");
            Ok(unsolved())
        }
    }
}

fn solutions(variable: &str, values: Vec<Value>, numerical: bool) -> Value {
    match Solutions::new(variable, values, numerical) {
        Some(solutions) => Value::Solutions(solutions),
        None => Value::Boolean(false),
    }
}

/// Roots of `a·x² + b·x + c`, the one with the negative root first.
fn quadratic_roots(a: &Value, b: &Value, c: &Value) -> Result<Vec<Value>> {
    let four_ac = make_product(vec![Value::integer(4), a.clone(), c.clone()])?;
    let discriminant = sub(mul(b.clone(), b.clone())?, four_ac)?;
    let two_a = mul(Value::integer(2), a.clone())?;
    let minus_b = neg(b.clone())?;
    if discriminant.is_exact_zero() {
        return Ok(vec![div(minus_b, two_a)?]);
    }
    let root = pow(discriminant, Value::fraction(1, 2))?;
    Ok(vec![
        div(sub(minus_b.clone(), root.clone())?, two_a.clone())?,
        div(add(minus_b, root)?, two_a)?,
    ])
}

fn secant(f: &Value, variable: &str) -> Option<f64> {
    let eval = |x: f64| approx::eval_at(f, variable, x);
    let (mut x0, mut x1) = (1.0, 1.1);
    let (mut f0, mut f1) = (eval(x0)?, eval(x1)?);
    if f0.abs() < SECANT_TOLERANCE {
        return Some(x0);
    }
    for _ in 0..SECANT_ITERATIONS {
        if f1.abs() < SECANT_TOLERANCE {
            return Some(x1);
        }
        let slope = f1 - f0;
        if slope == 0.0 || !slope.is_finite() {
            return None;
        }
        let x2 = x1 - f1 * (x1 - x0) / slope;
        x0 = x1;
        f0 = f1;
        x1 = x2;
        f1 = eval(x1)?;
    }
    (f1.abs() < SECANT_TOLERANCE).then_some(x1)
}

/// Whether the solutions came from a numerical search.
pub fn is_numerical(value: &Value) -> bool {
    matches!(value, Value::Solutions(s) if s.numerical)
}
