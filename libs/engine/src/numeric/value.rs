//! The value model produced by evaluation.

use super::float::Float;
use super::matrix::Matrix;
use crate::bridge::Quantity;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// Named exact constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn symbol(self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn flip(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Solutions of an equation for one variable. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Solutions {
    pub variable: String,
    pub values: Vec<Value>,
    /// Found by a numerical search rather than exactly.
    pub numerical: bool,
}

impl Solutions {
    pub fn new(variable: impl Into<String>, values: Vec<Value>, numerical: bool) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            variable: variable.into(),
            values,
            numerical,
        })
    }
}

/// Result of evaluating an expression tree.
///
/// `Sum`, `Product` and `Power` only ever hold normalized operands: they are
/// built by the constructors in `numeric::arith`. A `Product` keeps its
/// numeric coefficient, if any, as the first factor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(BigInt),
    /// Denominator is always greater than one.
    Rational(BigRational),
    Float(Float),
    Constant(Constant),
    ImaginaryUnit,
    Infinity(Sign),
    ComplexInfinity,
    Boolean(bool),
    /// Unbound variable.
    Symbol(String),
    Sum(Vec<Value>),
    Product(Vec<Value>),
    Power(Box<Value>, Box<Value>),
    /// A function that could not be reduced, e.g. `sin(2)`.
    Apply(&'static str, Vec<Value>),
    Quantity(Box<Quantity>),
    Matrix(Matrix),
    Solutions(Solutions),
    UnsolvedEquality(Box<Value>, Box<Value>),
}

impl Value {
    pub fn integer(n: impl Into<BigInt>) -> Value {
        Value::Integer(n.into())
    }

    pub fn zero() -> Value {
        Value::Integer(BigInt::zero())
    }

    pub fn one() -> Value {
        Value::Integer(BigInt::one())
    }

    pub fn minus_one() -> Value {
        Value::Integer(-BigInt::one())
    }

    /// A rational, collapsed to an integer when the denominator is one.
    pub fn rational(value: BigRational) -> Value {
        if value.is_integer() {
            Value::Integer(value.to_integer())
        } else {
            Value::Rational(value)
        }
    }

    pub fn fraction(numer: i64, denom: i64) -> Value {
        Value::rational(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// A float, collapsed to exact zero when its value is zero.
    pub fn float(value: BigRational, precision: u32) -> Value {
        if value.is_zero() {
            Value::zero()
        } else {
            Value::Float(Float::new(value, precision))
        }
    }

    pub fn from_f64(x: f64) -> Option<Value> {
        let float = Float::from_f64(x)?;
        if float.is_zero() {
            Some(Value::zero())
        } else {
            Some(Value::Float(float))
        }
    }

    pub fn symbol(name: impl Into<String>) -> Value {
        Value::Symbol(name.into())
    }

    /// Integer, rational or float.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Rational(_) | Value::Float(_))
    }

    pub fn is_exact_zero(&self) -> bool {
        matches!(self, Value::Integer(n) if n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Value::Integer(n) if n.is_one())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Value::Infinity(_) | Value::ComplexInfinity)
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// The exact value of an integer or rational.
    pub fn as_rational(&self) -> Option<BigRational> {
        match self {
            Value::Integer(n) => Some(BigRational::from_integer(n.clone())),
            Value::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// The value of any number, exact or not.
    pub fn number_value(&self) -> Option<BigRational> {
        match self {
            Value::Float(f) => Some(f.value().clone()),
            other => other.as_rational(),
        }
    }

    pub fn is_negative_number(&self) -> bool {
        self.number_value().is_some_and(|v| v.is_negative())
    }

    /// Smallest precision of any float inside this value.
    pub fn precision(&self) -> Option<u32> {
        let mut lowest: Option<u32> = None;
        self.visit(&mut |v: &Value| {
            if let Value::Float(f) = v {
                lowest = Some(lowest.map_or(f.precision(), |p| p.min(f.precision())));
            }
        });
        lowest
    }

    pub fn has_float(&self) -> bool {
        self.precision().is_some()
    }

    pub fn contains_symbol(&self) -> bool {
        let mut found = false;
        self.visit(&mut |v: &Value| found |= matches!(v, Value::Symbol(_)));
        found
    }

    pub fn contains(&self, target: &Value) -> bool {
        let mut found = false;
        self.visit(&mut |v: &Value| found |= v == target);
        found
    }

    pub fn is_symbol_free(&self) -> bool {
        !self.contains_symbol()
    }

    /// Pre-order walk over this value and everything nested in it.
    pub fn visit(&self, f: &mut dyn FnMut(&Value)) {
        f(self);
        match self {
            Value::Sum(items) | Value::Product(items) | Value::Apply(_, items) => {
                items.iter().for_each(|item| item.visit(f))
            }
            Value::Power(base, exp) | Value::UnsolvedEquality(base, exp) => {
                base.visit(f);
                exp.visit(f);
            }
            Value::Quantity(q) => q.magnitude.visit(f),
            Value::Matrix(m) => m.cells().iter().for_each(|cell| cell.visit(f)),
            Value::Solutions(s) => s.values.iter().for_each(|value| value.visit(f)),
            _ => {}
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Rational(_) => "rational",
            Value::Float(_) => "float",
            Value::Constant(_) => "constant",
            Value::ImaginaryUnit => "imaginary",
            Value::Infinity(_) => "infinity",
            Value::ComplexInfinity => "complex-infinity",
            Value::Boolean(_) => "boolean",
            Value::Symbol(_) => "symbol",
            Value::Sum(_) => "sum",
            Value::Product(_) => "product",
            Value::Power(..) => "power",
            Value::Apply(..) => "apply",
            Value::Quantity(_) => "quantity",
            Value::Matrix(_) => "matrix",
            Value::Solutions(_) => "solutions",
            Value::UnsolvedEquality(..) => "unsolved-equality",
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Compact canonical text, used for logging and for ordering terms.
/// The result formatter produces the user-facing rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Value::Float(x) => write!(f, "{}", x.to_f64()),
            Value::Constant(c) => f.write_str(c.symbol()),
            Value::ImaginaryUnit => f.write_str("i"),
            Value::Infinity(Sign::Positive) => f.write_str("∞"),
            Value::Infinity(Sign::Negative) => f.write_str("-∞"),
            Value::ComplexInfinity => f.write_str("z∞"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Symbol(name) => f.write_str(name),
            Value::Sum(terms) => {
                f.write_str("(")?;
                write_list(f, terms, " + ")?;
                f.write_str(")")
            }
            Value::Product(factors) => write_list(f, factors, "·"),
            Value::Power(base, exp) => write!(f, "({})^({})", base, exp),
            Value::Apply(name, args) => {
                write!(f, "{}(", name)?;
                write_list(f, args, ", ")?;
                f.write_str(")")
            }
            Value::Quantity(q) => write!(f, "{} {}", q.magnitude, q.unit),
            Value::Matrix(m) => {
                f.write_str("[")?;
                for row in 0..m.rows() {
                    if row > 0 {
                        f.write_str("; ")?;
                    }
                    write_list(f, m.row(row), ", ")?;
                }
                f.write_str("]")
            }
            Value::Solutions(s) => {
                for (i, value) in s.values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", s.variable, value)?;
                }
                Ok(())
            }
            Value::UnsolvedEquality(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rationals_collapse_to_integers() {
        assert_eq!(Value::fraction(4, 2), Value::integer(2));
        assert!(matches!(Value::fraction(1, 2), Value::Rational(_)));
    }

    #[test]
    fn zero_floats_become_exact() {
        assert_eq!(Value::from_f64(0.0), Some(Value::zero()));
        assert!(matches!(Value::from_f64(0.5), Some(Value::Float(_))));
    }

    #[test]
    fn precision_is_the_smallest_float() {
        let sum = Value::Sum(vec![
            Value::from_f64(1.5).unwrap(),
            Value::Symbol("x".into()),
        ]);
        assert_eq!(sum.precision(), Some(15));
        assert!(sum.contains_symbol());
        assert_eq!(Value::integer(3).precision(), None);
    }
}
