//! Canonical ordering of sum terms and product factors.

use super::value::Value;
use std::cmp::Ordering;

/// Total degree in unbound symbols; `x^2·y` has degree 3.
pub fn degree(value: &Value) -> i64 {
    match value {
        Value::Symbol(_) => 1,
        Value::Power(base, exp) => match (base.as_ref(), exp.as_integer()) {
            (Value::Symbol(_), Some(n)) => i64::try_from(n).unwrap_or(0),
            _ => 0,
        },
        Value::Product(factors) => factors.iter().map(degree).sum(),
        _ => 0,
    }
}

fn sum_class(value: &Value) -> u8 {
    if value.contains_symbol() {
        0
    } else if value.contains(&Value::ImaginaryUnit) {
        3
    } else if value.is_number() {
        2
    } else {
        1
    }
}

/// Symbolic terms by falling degree, then other terms, the constant, and
/// imaginary parts last: `x^2 + 2·x + 1`, `√2 + 1`, `2 + 3·i`.
pub fn sum_order(a: &Value, b: &Value) -> Ordering {
    sum_class(a)
        .cmp(&sum_class(b))
        .then_with(|| degree(b).cmp(&degree(a)))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

fn factor_class(value: &Value) -> u8 {
    let base = match value {
        Value::Power(base, _) => base.as_ref(),
        other => other,
    };
    match base {
        _ if base.is_number() => 2,
        Value::ImaginaryUnit => 0,
        Value::Infinity(_) | Value::ComplexInfinity => 1,
        Value::Constant(_) => 3,
        Value::Symbol(_) => 4,
        Value::Apply(..) => 5,
        Value::Sum(_) => 6,
        _ => 7,
    }
}

/// Order of non-coefficient factors: `i`, infinities, number roots,
/// constants, symbols, applied functions, then sums.
pub fn product_order(a: &Value, b: &Value) -> Ordering {
    factor_class(a)
        .cmp(&factor_class(b))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_terms_fall_in_degree() {
        let x = Value::symbol("x");
        let x2 = Value::Power(Box::new(x.clone()), Box::new(Value::integer(2)));
        let mut terms = vec![Value::one(), x.clone(), x2.clone()];
        terms.sort_by(sum_order);
        assert_eq!(terms, vec![x2, x, Value::one()]);
    }

    #[test]
    fn imaginary_unit_leads_products() {
        let mut factors = vec![Value::symbol("x"), Value::ImaginaryUnit];
        factors.sort_by(product_order);
        assert_eq!(factors[0], Value::ImaginaryUnit);
    }
}
