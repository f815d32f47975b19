//! Decimal rendering of floats rounded to a number of significant digits.

use crate::numeric::float::significant_digits;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Decimal exponents below this use scientific notation.
const MIN_POSITIONAL_EXPONENT: i64 = -5;

/// A rounded decimal: `mantissa` or `mantissa · 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub negative: bool,
    /// Digits with an optional decimal point, trailing fraction zeros removed.
    pub mantissa: String,
    pub exponent: Option<i64>,
}

impl Decimal {
    /// Round `value` to `digits` significant figures.
    pub fn new(value: &BigRational, digits: u32) -> Self {
        let digits = digits.max(1);
        if value.is_zero() {
            return Self {
                negative: false,
                mantissa: "0".into(),
                exponent: None,
            };
        }
        let (mantissa, exp) = significant_digits(value, digits);
        let all = mantissa.to_string();
        let significant = match all.trim_end_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };

        let (mantissa, exponent) = if exp < MIN_POSITIONAL_EXPONENT || exp >= i64::from(digits) {
            (with_point(significant, 1), Some(exp))
        } else if exp >= 0 {
            let int_len = (exp + 1) as usize;
            let padded = format!("{:0<width$}", significant, width = int_len);
            (with_point(&padded, int_len), None)
        } else {
            let zeros = "0".repeat((-exp - 1) as usize);
            (format!("0.{}{}", zeros, significant), None)
        };

        Self {
            negative: value.is_negative(),
            mantissa,
            exponent,
        }
    }

    pub fn is_scientific(&self) -> bool {
        self.exponent.is_some()
    }
}

/// `digits` with a decimal point after `int_len` digits, if any remain.
fn with_point(digits: &str, int_len: usize) -> String {
    if digits.len() <= int_len {
        digits.to_string()
    } else {
        format!("{}.{}", &digits[..int_len], &digits[int_len..])
    }
}
