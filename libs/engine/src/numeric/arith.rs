//! Normalizing arithmetic on scalar values.
//!
//! `make_sum`, `make_product` and `make_power` are the only places that build
//! `Value::Sum`, `Value::Product` and `Value::Power`, so every symbolic value
//! is kept in one canonical shape: nested sums and products are flattened,
//! numbers are folded into a single constant or coefficient, like terms are
//! collected and equal bases share one exponent.

use super::approx;
use super::elementary;
use super::float::{rational_to_f64, round_significant, Float, F64_PRECISION};
use super::order::{product_order, sum_order};
use super::value::{Constant, Sign, Value};
use crate::error::{DomainError, Result};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use scical_units::rational_powi;

/// Exact powers whose result would exceed this many bits are refused.
const MAX_POWER_BITS: u64 = 1 << 22;

/// Roots of higher degree are left symbolic.
const MAX_ROOT_DEGREE: u32 = 64;

/// Perfect-power factors are searched for up to this divisor.
const TRIAL_DIVISOR_LIMIT: u32 = 1000;

/// Integer powers of complex sums above this are left symbolic.
const MAX_COMPLEX_POWER: u32 = 1024;

pub(crate) fn number_parts(value: &Value) -> Option<(BigRational, Option<u32>)> {
    match value {
        Value::Integer(n) => Some((BigRational::from_integer(n.clone()), None)),
        Value::Rational(r) => Some((r.clone(), None)),
        Value::Float(f) => Some((f.value().clone(), Some(f.precision()))),
        _ => None,
    }
}

/// An exact number when `precision` is `None`, a float otherwise.
pub(crate) fn make_number(value: BigRational, precision: Option<u32>) -> Value {
    match precision {
        None => Value::rational(value),
        Some(p) => Value::float(value, p),
    }
}

fn join_precision(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// A float computed through `f64`.
pub(crate) fn float_value(x: f64, precision: u32) -> Result<Value> {
    let float = Float::from_f64(x)
        .ok_or_else(|| DomainError::Overflow(format!("{} is not a finite number", x)))?;
    Ok(Value::float(float.value().clone(), precision.min(F64_PRECISION)))
}

/// A possibly complex value computed through `f64`.
pub(crate) fn complex_value(re: f64, im: f64, precision: u32) -> Result<Value> {
    let im = if im.abs() <= 1e-15 * re.abs() { 0.0 } else { im };
    let parts = |x: f64| -> Result<BigRational> {
        Ok(if x == 0.0 {
            BigRational::zero()
        } else {
            Float::from_f64(x)
                .ok_or_else(|| DomainError::Overflow(format!("{} is not a finite number", x)))?
                .value()
                .clone()
        })
    };
    Ok(Gaussian {
        re: parts(re)?,
        im: parts(im)?,
        precision: Some(precision.min(F64_PRECISION)),
    }
    .into_value())
}

#[derive(Clone, Debug)]
struct Number {
    value: BigRational,
    precision: Option<u32>,
}

impl Number {
    fn of(value: &Value) -> Option<Number> {
        number_parts(value).map(|(value, precision)| Number { value, precision })
    }

    fn one() -> Number {
        Number {
            value: BigRational::one(),
            precision: None,
        }
    }

    fn zero() -> Number {
        Number {
            value: BigRational::zero(),
            precision: None,
        }
    }

    fn add(&self, other: &Number) -> Number {
        Number {
            value: &self.value + &other.value,
            precision: join_precision(self.precision, other.precision),
        }
    }

    fn mul(&self, other: &Number) -> Number {
        Number {
            value: &self.value * &other.value,
            precision: join_precision(self.precision, other.precision),
        }
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn is_one(&self) -> bool {
        self.precision.is_none() && self.value.is_one()
    }

    fn into_value(self) -> Value {
        make_number(self.value, self.precision)
    }
}

/// A number of the form `re + im·i`.
#[derive(Clone, Debug)]
pub(crate) struct Gaussian {
    re: BigRational,
    im: BigRational,
    precision: Option<u32>,
}

impl Gaussian {
    pub(crate) fn re_value(&self) -> Value {
        make_number(self.re.clone(), self.precision)
    }

    pub(crate) fn im_value(&self) -> Value {
        make_number(self.im.clone(), self.precision)
    }

    pub(crate) fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    fn add(&self, other: &Gaussian) -> Gaussian {
        Gaussian {
            re: &self.re + &other.re,
            im: &self.im + &other.im,
            precision: join_precision(self.precision, other.precision),
        }
    }

    fn mul(&self, other: &Gaussian) -> Gaussian {
        let precision = join_precision(self.precision, other.precision);
        let round = |x: BigRational| match precision {
            Some(p) => round_significant(&x, p + 3),
            None => x,
        };
        Gaussian {
            re: round(&self.re * &other.re - &self.im * &other.im),
            im: round(&self.re * &other.im + &self.im * &other.re),
            precision,
        }
    }

    fn recip(&self) -> Option<Gaussian> {
        let norm = &self.re * &self.re + &self.im * &self.im;
        if norm.is_zero() {
            return None;
        }
        Some(Gaussian {
            re: &self.re / &norm,
            im: -&self.im / &norm,
            precision: self.precision,
        })
    }

    fn powi(&self, mut n: u32) -> Gaussian {
        let mut result = Gaussian {
            re: BigRational::one(),
            im: BigRational::zero(),
            precision: None,
        };
        let mut base = self.clone();
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            n >>= 1;
        }
        result
    }

    /// Canonical value, built without re-normalizing.
    pub(crate) fn into_value(self) -> Value {
        let re = self.re_value();
        let im = self.im_value();
        if im.is_exact_zero() {
            return re;
        }
        let imaginary = if im.is_one() {
            Value::ImaginaryUnit
        } else {
            Value::Product(vec![im, Value::ImaginaryUnit])
        };
        if re.is_exact_zero() {
            imaginary
        } else {
            Value::Sum(vec![re, imaginary])
        }
    }
}

/// Numbers, `i`, `c·i` and sums of those.
pub(crate) fn as_gaussian(value: &Value) -> Option<Gaussian> {
    if let Some((re, precision)) = number_parts(value) {
        return Some(Gaussian {
            re,
            im: BigRational::zero(),
            precision,
        });
    }
    match value {
        Value::ImaginaryUnit => Some(Gaussian {
            re: BigRational::zero(),
            im: BigRational::one(),
            precision: None,
        }),
        Value::Product(factors) if factors.len() == 2 && factors[1] == Value::ImaginaryUnit => {
            let (im, precision) = number_parts(&factors[0])?;
            Some(Gaussian {
                re: BigRational::zero(),
                im,
                precision,
            })
        }
        Value::Sum(terms) => terms.iter().try_fold(
            Gaussian {
                re: BigRational::zero(),
                im: BigRational::zero(),
                precision: None,
            },
            |acc, term| Some(acc.add(&as_gaussian(term)?)),
        ),
        _ => None,
    }
}

fn check_scalar(value: &Value) -> Result<()> {
    match value {
        Value::Quantity(_)
        | Value::Matrix(_)
        | Value::Boolean(_)
        | Value::Solutions(_)
        | Value::UnsolvedEquality(..) => Err(DomainError::Unsupported(format!(
            "arithmetic is not defined for a {}",
            value.kind()
        ))
        .into()),
        _ => Ok(()),
    }
}

fn raw_power(base: Value, exp: Value) -> Value {
    Value::Power(Box::new(base), Box::new(exp))
}

/// `coefficient · factors` without re-normalizing; `factors` must be sorted.
fn raw_product(coefficient: Value, mut factors: Vec<Value>) -> Value {
    if factors.is_empty() {
        return coefficient;
    }
    if coefficient.is_one() {
        if factors.len() == 1 {
            return factors.remove(0);
        }
        return Value::Product(factors);
    }
    let mut all = Vec::with_capacity(factors.len() + 1);
    all.push(coefficient);
    all.extend(factors);
    Value::Product(all)
}

fn add_infinities(acc: Option<Value>, next: Value) -> Result<Value> {
    match (acc, next) {
        (None, next) => Ok(next),
        (Some(Value::Infinity(a)), Value::Infinity(b)) if a == b => Ok(Value::Infinity(a)),
        (Some(Value::Infinity(_)), Value::Infinity(_)) => {
            Err(DomainError::Indeterminate("∞ - ∞".into()).into())
        }
        _ => Err(DomainError::Indeterminate("sum of infinities".into()).into()),
    }
}

fn split_coefficient(term: Value) -> (Number, Value) {
    if let Value::Product(factors) = &term {
        if let Some(coefficient) = factors.first().and_then(Number::of) {
            let mut rest = factors[1..].to_vec();
            let key = if rest.len() == 1 {
                rest.remove(0)
            } else {
                Value::Product(rest)
            };
            return (coefficient, key);
        }
    }
    (Number::one(), term)
}

fn with_coefficient(coefficient: Number, key: Value) -> Value {
    if coefficient.is_one() {
        return key;
    }
    let coefficient = coefficient.into_value();
    match key {
        Value::Product(factors) => {
            let mut all = Vec::with_capacity(factors.len() + 1);
            all.push(coefficient);
            all.extend(factors);
            Value::Product(all)
        }
        other => Value::Product(vec![coefficient, other]),
    }
}

/// Sum of `terms` in canonical form.
pub fn make_sum(terms: Vec<Value>) -> Result<Value> {
    let mut flat = Vec::with_capacity(terms.len());
    for term in terms {
        check_scalar(&term)?;
        match term {
            Value::Sum(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    let mut constant = Number::zero();
    let mut infinity = None;
    let mut groups: Vec<(Value, Number)> = Vec::new();
    for term in flat {
        if let Some(n) = Number::of(&term) {
            constant = constant.add(&n);
            continue;
        }
        if term.is_infinite() {
            infinity = Some(add_infinities(infinity, term)?);
            continue;
        }
        let (coefficient, key) = split_coefficient(term);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = slot.1.add(&coefficient),
            None => groups.push((key, coefficient)),
        }
    }
    if let Some(infinity) = infinity {
        return Ok(infinity);
    }

    let mut out: Vec<Value> = groups
        .into_iter()
        .filter(|(_, coefficient)| !coefficient.is_zero())
        .map(|(key, coefficient)| with_coefficient(coefficient, key))
        .collect();
    let constant = constant.into_value();
    if !constant.is_exact_zero() {
        out.push(constant);
    }
    out.sort_by(sum_order);
    Ok(match out.len() {
        0 => Value::zero(),
        1 => out.remove(0),
        _ => Value::Sum(out),
    })
}

fn split_power(value: Value) -> (Value, Value) {
    match value {
        Value::Power(base, exp) => (*base, *exp),
        other => (other, Value::one()),
    }
}

fn multiply_infinities(acc: Option<Value>, next: Value) -> Value {
    match (acc, next) {
        (None, next) => next,
        (Some(Value::Infinity(a)), Value::Infinity(b)) => {
            Value::Infinity(if a == b { Sign::Positive } else { Sign::Negative })
        }
        _ => Value::ComplexInfinity,
    }
}

fn scale_infinity(infinity: Value, coefficient: Number, rest: Vec<Value>) -> Value {
    let Value::Infinity(mut sign) = infinity else {
        return Value::ComplexInfinity;
    };
    if coefficient.value.is_negative() {
        sign = sign.flip();
    }
    if rest.is_empty() {
        return Value::Infinity(sign);
    }
    let rest_value = raw_product(Value::one(), rest.clone());
    if rest_value.is_symbol_free() {
        if let Some((re, im)) = approx::to_complex_f64(&rest_value) {
            if im != 0.0 {
                return Value::ComplexInfinity;
            }
            if re < 0.0 {
                sign = sign.flip();
            }
            return Value::Infinity(sign);
        }
    }
    let mut factors = vec![Value::Infinity(sign)];
    factors.extend(rest);
    factors.sort_by(product_order);
    Value::Product(factors)
}

/// Product of `factors` in canonical form.
pub fn make_product(factors: Vec<Value>) -> Result<Value> {
    let mut flat = Vec::with_capacity(factors.len());
    for factor in factors {
        check_scalar(&factor)?;
        match factor {
            Value::Product(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    let mut coefficient = Number::one();
    let mut infinity = None;
    let mut zero = false;
    let mut groups: Vec<(Value, Value)> = Vec::new();
    for factor in flat {
        if let Some(n) = Number::of(&factor) {
            if n.is_zero() {
                zero = true;
            } else {
                coefficient = coefficient.mul(&n);
            }
            continue;
        }
        if factor.is_infinite() {
            infinity = Some(multiply_infinities(infinity, factor));
            continue;
        }
        let (base, exp) = split_power(factor);
        match groups.iter_mut().find(|(b, _)| *b == base) {
            Some(slot) => slot.1 = add(slot.1.clone(), exp)?,
            None => groups.push((base, exp)),
        }
    }
    if zero {
        if infinity.is_some() {
            return Err(DomainError::Indeterminate("0·∞".into()).into());
        }
        return Ok(Value::zero());
    }

    let mut rest = Vec::new();
    for (base, exp) in groups {
        let powered = make_power(base, exp)?;
        let parts = match powered {
            Value::Product(inner) => inner,
            other => vec![other],
        };
        for part in parts {
            if let Some(n) = Number::of(&part) {
                if n.is_zero() {
                    return Ok(Value::zero());
                }
                coefficient = coefficient.mul(&n);
            } else if part.is_infinite() {
                infinity = Some(multiply_infinities(infinity, part));
            } else {
                rest.push(part);
            }
        }
    }
    rest.sort_by(product_order);

    if let Some(infinity) = infinity {
        return Ok(scale_infinity(infinity, coefficient, rest));
    }

    // A numeric coefficient distributes over a single sum: 2·(x + 1) = 2·x + 2.
    if !coefficient.is_one() && rest.len() == 1 {
        if let Value::Sum(terms) = &rest[0] {
            let scale = coefficient.into_value();
            let scaled = terms
                .iter()
                .map(|term| make_product(vec![scale.clone(), term.clone()]))
                .collect::<Result<Vec<_>>>()?;
            return make_sum(scaled);
        }
    }
    Ok(raw_product(coefficient.into_value(), rest))
}

fn rational_integer_power(base: &BigRational, exp: &BigInt) -> Result<BigRational> {
    if base.is_one() || base.is_zero() {
        return Ok(base.clone());
    }
    if *base == -BigRational::one() {
        return Ok(if exp.is_even() {
            BigRational::one()
        } else {
            base.clone()
        });
    }
    let overflow = || DomainError::Overflow(format!("exponent {} is too large", exp));
    let n = exp.to_i32().ok_or_else(overflow)?;
    let bits = base.numer().bits() + base.denom().bits();
    if bits.saturating_mul(u64::from(n.unsigned_abs())) > MAX_POWER_BITS {
        return Err(overflow().into());
    }
    Ok(rational_powi(base, n))
}

/// `base^(1/q) = coefficient · radicand^(1/q)` for a positive rational, with
/// the largest perfect `q`-th power moved out of the radicand.
fn extract_root(base: &BigRational, q: u32) -> Result<(BigRational, BigInt)> {
    let (numer, denom) = (base.numer(), base.denom());
    if denom.bits().saturating_mul(u64::from(q)) > MAX_POWER_BITS {
        return Err(DomainError::Overflow(format!("root of {}", base)).into());
    }
    // Rationalize: (a/d)^(1/q) = (a·d^(q-1))^(1/q) / d
    let mut radicand = numer * denom.pow(q - 1);
    let root = radicand.nth_root(q);
    if root.pow(q) == radicand {
        return Ok((BigRational::new(root, denom.clone()), BigInt::one()));
    }
    let mut outside = BigInt::one();
    for t in 2..=TRIAL_DIVISOR_LIMIT {
        let power = BigInt::from(t).pow(q);
        if power > radicand {
            break;
        }
        while (&radicand % &power).is_zero() {
            radicand /= &power;
            outside *= t;
        }
    }
    Ok((BigRational::new(outside, denom.clone()), radicand))
}

/// An exact number raised to a non-integer rational exponent.
fn exact_root_power(base: &BigRational, exp: &BigRational) -> Result<Value> {
    let Some(q) = exp.denom().to_u32().filter(|q| *q <= MAX_ROOT_DEGREE) else {
        return Ok(raw_power(
            Value::rational(base.clone()),
            Value::rational(exp.clone()),
        ));
    };
    let whole = exp.floor().to_integer();
    let remainder = exp.numer() - &whole * exp.denom();
    let r = remainder
        .to_i32()
        .ok_or_else(|| DomainError::Overflow(format!("exponent {}", exp)))?;
    let fraction = Value::rational(BigRational::new(BigInt::from(r), BigInt::from(q)));

    let outer = rational_integer_power(base, &whole)?;
    let (root, radicand) = extract_root(&base.abs(), q)?;
    let coefficient = outer * rational_powi(&root, r);

    let mut factors = Vec::new();
    if base.is_negative() {
        factors.push(if q == 2 {
            Value::ImaginaryUnit
        } else {
            raw_power(Value::minus_one(), fraction.clone())
        });
    }
    if !radicand.is_one() {
        factors.push(raw_power(Value::Integer(radicand), fraction));
    }
    factors.sort_by(product_order);
    Ok(raw_product(Value::rational(coefficient), factors))
}

fn number_power(base: &Value, exp: &Value) -> Result<Value> {
    let (Some((b, base_precision)), Some((e, exp_precision))) =
        (number_parts(base), number_parts(exp))
    else {
        return Ok(raw_power(base.clone(), exp.clone()));
    };
    if b.is_zero() {
        return Ok(if e.is_positive() {
            Value::zero()
        } else {
            Value::ComplexInfinity
        });
    }
    if exp_precision.is_none() && e.is_integer() {
        let value = rational_integer_power(&b, &e.to_integer())?;
        return Ok(make_number(value, base_precision));
    }
    if base_precision.is_none() && exp_precision.is_none() {
        return exact_root_power(&b, &e);
    }

    let precision = join_precision(base_precision, exp_precision)
        .unwrap_or(F64_PRECISION)
        .min(F64_PRECISION);
    let (x, y) = (rational_to_f64(&b), rational_to_f64(&e));
    if x < 0.0 && y.fract() != 0.0 {
        let z = Complex64::new(x, 0.0).powf(y);
        return complex_value(z.re, z.im, precision);
    }
    float_value(x.powf(y), precision)
}

fn imaginary_power(n: &BigInt) -> Value {
    match n.mod_floor(&BigInt::from(4)).to_u8() {
        Some(0) => Value::one(),
        Some(1) => Value::ImaginaryUnit,
        Some(2) => Value::minus_one(),
        _ => Value::Product(vec![Value::minus_one(), Value::ImaginaryUnit]),
    }
}

fn gaussian_power(z: Gaussian, n: &BigInt) -> Value {
    let Some(k) = n.abs().to_u32().filter(|k| *k <= MAX_COMPLEX_POWER) else {
        return raw_power(z.into_value(), Value::Integer(n.clone()));
    };
    let base = if n.is_negative() {
        match z.recip() {
            Some(r) => r,
            None => return Value::ComplexInfinity,
        }
    } else {
        z
    };
    base.powi(k).into_value()
}

fn infinite_exponent(base: Value, exp: Value) -> Result<Value> {
    let Some(b) = base.number_value() else {
        return Ok(raw_power(base, exp));
    };
    let positive = match exp {
        Value::Infinity(sign) => sign == Sign::Positive,
        _ => return Err(DomainError::Indeterminate(format!("{}^z∞", base)).into()),
    };
    let magnitude = b.abs();
    if magnitude.is_one() {
        return Err(DomainError::Indeterminate(format!("{}^∞", base)).into());
    }
    if (magnitude > BigRational::one()) != positive {
        return Ok(Value::zero());
    }
    Ok(if b.is_negative() {
        Value::ComplexInfinity
    } else {
        Value::Infinity(Sign::Positive)
    })
}

fn infinite_base(base: Value, exp: Value) -> Value {
    let Some(e) = exp.number_value() else {
        return raw_power(base, exp);
    };
    if e.is_negative() {
        return Value::zero();
    }
    match (base, exp.as_integer()) {
        (Value::Infinity(Sign::Negative), Some(n)) if n.is_even() => Value::Infinity(Sign::Positive),
        (Value::Infinity(Sign::Negative), Some(_)) => Value::Infinity(Sign::Negative),
        (Value::Infinity(Sign::Negative), None) => Value::ComplexInfinity,
        (other, _) => other,
    }
}

fn numeric_power(base: &Value, exp: &Value) -> Result<Value> {
    let precision = join_precision(base.precision(), exp.precision())
        .unwrap_or(F64_PRECISION)
        .min(F64_PRECISION);
    match (approx::to_complex_f64(base), approx::to_complex_f64(exp)) {
        (Some((br, bi)), Some((er, ei))) => {
            let z = Complex64::new(br, bi).powc(Complex64::new(er, ei));
            complex_value(z.re, z.im, precision)
        }
        _ => Ok(raw_power(base.clone(), exp.clone())),
    }
}

/// `base^exp` in canonical form.
pub fn make_power(base: Value, exp: Value) -> Result<Value> {
    check_scalar(&base)?;
    check_scalar(&exp)?;
    if exp.is_exact_zero() {
        return Ok(Value::one());
    }
    if exp.is_one() {
        return Ok(base);
    }
    if exp.is_infinite() {
        return infinite_exponent(base, exp);
    }
    if base.is_one() {
        return Ok(base);
    }
    if base.is_infinite() {
        return Ok(infinite_base(base, exp));
    }
    if base.is_number() && exp.is_number() {
        return number_power(&base, &exp);
    }
    if let Value::Integer(n) = &exp {
        match base {
            Value::ImaginaryUnit => return Ok(imaginary_power(n)),
            Value::Power(inner, inner_exp) => {
                let combined = mul(*inner_exp, exp.clone())?;
                return make_power(*inner, combined);
            }
            Value::Product(factors) => {
                let powered = factors
                    .into_iter()
                    .map(|factor| make_power(factor, exp.clone()))
                    .collect::<Result<Vec<_>>>()?;
                return make_product(powered);
            }
            Value::Sum(_) => {
                if let Some(z) = as_gaussian(&base).filter(|z| !z.is_real()) {
                    return Ok(gaussian_power(z, n));
                }
                return Ok(raw_power(base, exp));
            }
            other => return finish_power(other, exp),
        }
    }
    finish_power(base, exp)
}

fn finish_power(base: Value, exp: Value) -> Result<Value> {
    if let (Value::Constant(Constant::E), Value::Apply("ln", args)) = (&base, &exp) {
        if let [inner] = args.as_slice() {
            return Ok(inner.clone());
        }
    }
    if (base.has_float() || exp.has_float()) && base.is_symbol_free() && exp.is_symbol_free() {
        return numeric_power(&base, &exp);
    }
    Ok(raw_power(base, exp))
}

pub fn add(a: Value, b: Value) -> Result<Value> {
    make_sum(vec![a, b])
}

pub fn neg(a: Value) -> Result<Value> {
    mul(Value::minus_one(), a)
}

pub fn sub(a: Value, b: Value) -> Result<Value> {
    add(a, neg(b)?)
}

pub fn mul(a: Value, b: Value) -> Result<Value> {
    if matches!(a, Value::Sum(_)) || matches!(b, Value::Sum(_)) {
        if let (Some(x), Some(y)) = (as_gaussian(&a), as_gaussian(&b)) {
            if !x.is_real() || !y.is_real() {
                return Ok(x.mul(&y).into_value());
            }
        }
    }
    make_product(vec![a, b])
}

pub fn div(a: Value, b: Value) -> Result<Value> {
    if b.is_exact_zero() {
        if a.is_exact_zero() {
            return Err(DomainError::Indeterminate("0/0".into()).into());
        }
        return Ok(Value::ComplexInfinity);
    }
    if a.is_infinite() && b.is_infinite() {
        return Err(DomainError::Indeterminate("∞/∞".into()).into());
    }
    mul(a, make_power(b, Value::minus_one())?)
}

pub fn pow(base: Value, exp: Value) -> Result<Value> {
    make_power(base, exp)
}

/// Floor division, always an integer for numeric operands.
pub fn floor_div(a: Value, b: Value) -> Result<Value> {
    elementary::round("floor", div(a, b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Value {
        Value::symbol("x")
    }

    fn int(n: i64) -> Value {
        Value::integer(n)
    }

    #[test]
    fn exact_rational_arithmetic() {
        assert_eq!(add(Value::fraction(1, 2), Value::fraction(1, 3)).unwrap(), Value::fraction(5, 6));
        assert_eq!(div(int(6), int(4)).unwrap(), Value::fraction(3, 2));
        assert_eq!(floor_div(int(7), int(2)).unwrap(), int(3));
        assert_eq!(floor_div(int(-7), int(2)).unwrap(), int(-4));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(div(int(1), int(0)).unwrap(), Value::ComplexInfinity);
        assert!(div(int(0), int(0)).is_err());
    }

    #[test]
    fn like_terms_collect() {
        assert_eq!(
            add(x(), x()).unwrap(),
            Value::Product(vec![int(2), x()])
        );
        assert_eq!(sub(x(), x()).unwrap(), Value::zero());
        assert_eq!(
            mul(x(), x()).unwrap(),
            Value::Power(Box::new(x()), Box::new(int(2)))
        );
    }

    #[test]
    fn coefficients_distribute_over_sums() {
        let sum = add(x(), int(1)).unwrap();
        let doubled = mul(int(2), sum).unwrap();
        assert_eq!(
            doubled,
            Value::Sum(vec![Value::Product(vec![int(2), x()]), int(2)])
        );
    }

    #[test]
    fn exact_roots() {
        assert_eq!(pow(int(4), Value::fraction(1, 2)).unwrap(), int(2));
        assert_eq!(
            pow(int(-4), Value::fraction(1, 2)).unwrap(),
            Value::Product(vec![int(2), Value::ImaginaryUnit])
        );
        assert_eq!(
            pow(int(8), Value::fraction(1, 2)).unwrap(),
            Value::Product(vec![
                int(2),
                Value::Power(Box::new(int(2)), Box::new(Value::fraction(1, 2)))
            ])
        );
        assert_eq!(
            pow(Value::fraction(1, 4), Value::fraction(1, 2)).unwrap(),
            Value::fraction(1, 2)
        );
    }

    #[test]
    fn roots_multiply_back() {
        let root = pow(int(2), Value::fraction(1, 2)).unwrap();
        assert_eq!(mul(root.clone(), root).unwrap(), int(2));
    }

    #[test]
    fn imaginary_unit_squares_to_minus_one() {
        assert_eq!(mul(Value::ImaginaryUnit, Value::ImaginaryUnit).unwrap(), int(-1));
        let z = add(int(1), Value::ImaginaryUnit).unwrap();
        assert_eq!(
            mul(z.clone(), z).unwrap(),
            Value::Product(vec![int(2), Value::ImaginaryUnit])
        );
    }

    #[test]
    fn complex_reciprocal() {
        let z = add(int(1), Value::ImaginaryUnit).unwrap();
        let r = div(int(1), z).unwrap();
        assert_eq!(
            r,
            Value::Sum(vec![
                Value::fraction(1, 2),
                Value::Product(vec![Value::fraction(-1, 2), Value::ImaginaryUnit])
            ])
        );
    }

    #[test]
    fn infinities() {
        let inf = Value::Infinity(Sign::Positive);
        assert_eq!(add(inf.clone(), int(1)).unwrap(), inf);
        assert!(sub(inf.clone(), inf.clone()).is_err());
        assert!(mul(int(0), inf.clone()).is_err());
        assert_eq!(
            mul(int(-2), inf.clone()).unwrap(),
            Value::Infinity(Sign::Negative)
        );
        assert_eq!(div(int(1), inf).unwrap(), int(0));
    }

    #[test]
    fn float_contagion() {
        let v = add(Value::from_f64(0.5).unwrap(), Value::fraction(1, 4)).unwrap();
        assert!(matches!(v, Value::Float(_)));
        let v = pow(int(2), Value::from_f64(0.5).unwrap()).unwrap();
        assert!((approx::to_f64(&v).unwrap() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn huge_powers_overflow() {
        assert!(pow(int(10), int(100_000_000)).is_err());
        assert_eq!(pow(int(-1), int(100_000_000_001)).unwrap(), int(-1));
    }
}
