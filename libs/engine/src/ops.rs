//! Operator dispatch over every value shape: matrices, quantities and
//! scalars. Expression tree nodes call these and nothing else.

use crate::bridge;
use crate::error::{DomainError, Result};
use crate::numeric::{arith, compare, elementary, Value};

fn unsupported(message: &str) -> crate::error::Error {
    DomainError::Unsupported(message.to_string()).into()
}

pub fn add(a: Value, b: Value) -> Result<Value> {
    match (&a, &b) {
        (Value::Matrix(x), Value::Matrix(y)) => Ok(Value::Matrix(x.add(y)?)),
        (Value::Matrix(_), _) | (_, Value::Matrix(_)) => {
            Err(unsupported("cannot add a matrix and a scalar"))
        }
        (Value::Quantity(_), _) | (_, Value::Quantity(_)) => bridge::add(a, b),
        _ => arith::add(a, b),
    }
}

pub fn sub(a: Value, b: Value) -> Result<Value> {
    match (&a, &b) {
        (Value::Matrix(x), Value::Matrix(y)) => Ok(Value::Matrix(x.add(&y.neg()?)?)),
        (Value::Matrix(_), _) | (_, Value::Matrix(_)) => {
            Err(unsupported("cannot subtract a matrix and a scalar"))
        }
        (Value::Quantity(_), _) | (_, Value::Quantity(_)) => bridge::sub(a, b),
        _ => arith::sub(a, b),
    }
}

pub fn mul(a: Value, b: Value) -> Result<Value> {
    match (&a, &b) {
        (Value::Matrix(x), Value::Matrix(y)) => Ok(Value::Matrix(x.matmul(y)?)),
        (Value::Matrix(x), _) => Ok(Value::Matrix(x.scale(&b, false)?)),
        (_, Value::Matrix(y)) => Ok(Value::Matrix(y.scale(&a, true)?)),
        (Value::Quantity(_), _) | (_, Value::Quantity(_)) => bridge::mul(a, b),
        _ => arith::mul(a, b),
    }
}

pub fn div(a: Value, b: Value) -> Result<Value> {
    match (&a, &b) {
        (Value::Matrix(x), Value::Matrix(y)) => Ok(Value::Matrix(x.matmul(&y.inverse()?)?)),
        (Value::Matrix(x), _) => Ok(Value::Matrix(
            x.try_map(|cell| div(cell.clone(), b.clone()))?,
        )),
        (_, Value::Matrix(y)) => Ok(Value::Matrix(y.inverse()?.scale(&a, true)?)),
        (Value::Quantity(_), _) | (_, Value::Quantity(_)) => bridge::div(a, b),
        _ => arith::div(a, b),
    }
}

fn floor(value: Value) -> Result<Value> {
    match value {
        Value::Quantity(q) => Ok(bridge::Quantity::value(floor(q.magnitude)?, q.unit)),
        Value::Matrix(m) => Ok(Value::Matrix(m.try_map(|cell| floor(cell.clone()))?)),
        other => elementary::round("floor", other),
    }
}

/// Floor division `a // b`; a quantity quotient keeps its unit unless the
/// unit is dimensionless, in which case it is reduced to a number first.
pub fn int_div(a: Value, b: Value) -> Result<Value> {
    let quotient = match div(a, b)? {
        Value::Quantity(q) if q.unit.is_dimensionless() => {
            bridge::to_dimensionless(Value::Quantity(q))?
        }
        other => other,
    };
    floor(quotient)
}

pub fn pow(base: Value, exp: Value) -> Result<Value> {
    match (&base, &exp) {
        (Value::Matrix(m), Value::Integer(n)) => Ok(Value::Matrix(m.powi(n)?)),
        (Value::Matrix(_), _) => Err(unsupported("matrices can only be raised to integer powers")),
        (_, Value::Matrix(_)) => Err(unsupported("a matrix cannot be used as an exponent")),
        (Value::Quantity(_), _) | (_, Value::Quantity(_)) => bridge::pow(base, exp),
        _ => arith::pow(base, exp),
    }
}

pub fn neg(a: Value) -> Result<Value> {
    match a {
        Value::Matrix(m) => Ok(Value::Matrix(m.neg()?)),
        Value::Quantity(_) => bridge::neg(a),
        other => arith::neg(other),
    }
}

pub fn factorial(a: Value) -> Result<Value> {
    match a {
        Value::Matrix(_) => Err(unsupported("the factorial of a matrix is not defined")),
        Value::Quantity(_) => elementary::factorial(bridge::to_dimensionless(a)?),
        other => elementary::factorial(other),
    }
}

/// Equality of any two values; `None` when it cannot be decided.
pub fn equals(a: &Value, b: &Value) -> Option<bool> {
    match (a, b) {
        (Value::Quantity(_), _) | (_, Value::Quantity(_)) => bridge::equals(a, b),
        _ => compare::equals(a, b),
    }
}
