//! Decimal floating-point numbers stored as exact rationals.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

/// Precision given to decimal literals typed by the user.
pub const LITERAL_PRECISION: u32 = 100;

/// Precision of values computed through `f64`.
pub const F64_PRECISION: u32 = 15;

/// Extra significant digits kept beyond a float's precision.
const GUARD_DIGITS: u32 = 3;

pub const PI_DIGITS: &str = "3.14159265358979323846264338327950288419716939937510582097494";
pub const E_DIGITS: &str = "2.71828182845904523536028747135266249775724709369995957496697";

/// Digits available for the named constants.
pub const CONSTANT_PRECISION: u32 = 60;

/// A floating-point number with a precision in significant decimal digits.
///
/// The stored value is always a finite decimal rounded to `precision` plus a
/// few guard digits, which keeps arithmetic on floats bounded in size.
#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    value: BigRational,
    precision: u32,
}

impl Float {
    pub fn new(value: BigRational, precision: u32) -> Self {
        let precision = precision.max(1);
        Self {
            value: round_significant(&value, precision + GUARD_DIGITS),
            precision,
        }
    }

    /// A float from an `f64`, using its shortest decimal representation.
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        let value = scical_units::rational_from_decimal(&format!("{:e}", x))?;
        Some(Self::new(value, F64_PRECISION))
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn to_f64(&self) -> f64 {
        rational_to_f64(&self.value)
    }
}

pub fn rational_to_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// `10^exp` as a rational.
pub fn pow10(exp: i64) -> BigRational {
    let magnitude = BigInt::from(10).pow(exp.unsigned_abs() as u32);
    if exp < 0 {
        BigRational::new(BigInt::from(1), magnitude)
    } else {
        BigRational::from_integer(magnitude)
    }
}

fn digit_count(n: &BigInt) -> i64 {
    n.abs().to_str_radix(10).len() as i64
}

/// `floor(log10(|value|))` for a non-zero value.
pub fn decimal_exponent(value: &BigRational) -> i64 {
    let exp = digit_count(value.numer()) - digit_count(value.denom());
    if value.abs() < pow10(exp) {
        exp - 1
    } else {
        exp
    }
}

/// Round to `digits` significant decimal digits, half away from zero.
pub fn round_significant(value: &BigRational, digits: u32) -> BigRational {
    if value.is_zero() {
        return value.clone();
    }
    let shift = i64::from(digits) - 1 - decimal_exponent(value);
    let scale = pow10(shift);
    (value * &scale).round() / scale
}

/// The digits of `value` rounded to `digits` significant figures, as an
/// integer mantissa and its decimal exponent: `value ≈ mantissa · 10^(exp - digits + 1)`.
///
/// Rounding may carry into an extra digit (`9.99 → 10.0`), in which case the
/// exponent is bumped so the mantissa keeps exactly `digits` digits.
pub fn significant_digits(value: &BigRational, digits: u32) -> (BigInt, i64) {
    if value.is_zero() {
        return (BigInt::zero(), 0);
    }
    let mut exp = decimal_exponent(value);
    let shift = i64::from(digits) - 1 - exp;
    let mut mantissa = (value.abs() * pow10(shift)).round().to_integer();
    if digit_count(&mantissa) > i64::from(digits) {
        mantissa /= 10;
        exp += 1;
    }
    (mantissa, exp)
}
