//! Units as products of atoms raised to integer powers.

use crate::dimension::DimensionVector;
use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A single named unit, e.g. `km` or `J`.
///
/// `factor` is the value of one of this unit expressed in coherent SI base
/// units. `exact` is false when the factor is a truncated irrational number
/// (e.g. degrees of arc).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitAtom {
    pub symbol: String,
    pub factor: BigRational,
    pub dimension: DimensionVector,
    pub exact: bool,
}

impl UnitAtom {
    pub fn new(symbol: impl Into<String>, factor: BigRational, dimension: DimensionVector) -> Self {
        Self {
            symbol: symbol.into(),
            factor,
            dimension,
            exact: true,
        }
    }
}

/// A conversion factor between two units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factor {
    pub value: BigRational,
    pub exact: bool,
}

impl Factor {
    pub fn one() -> Self {
        Self {
            value: BigRational::one(),
            exact: true,
        }
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }
}

/// A product of unit atoms with non-zero integer exponents.
///
/// Atoms with the same symbol are merged; an empty product is the
/// dimensionless unit `1`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Unit {
    terms: SmallVec<[(Arc<UnitAtom>, i32); 4]>,
}

impl Unit {
    pub fn one() -> Self {
        Self::default()
    }

    pub fn from_atom(atom: Arc<UnitAtom>) -> Self {
        let mut terms = SmallVec::new();
        terms.push((atom, 1));
        Self { terms }
    }

    pub fn is_one(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[(Arc<UnitAtom>, i32)] {
        &self.terms
    }

    pub fn dimension(&self) -> DimensionVector {
        self.terms
            .iter()
            .fold(DimensionVector::ZERO, |acc, (atom, exp)| {
                acc.add(&atom.dimension.scale(*exp))
            })
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension().is_dimensionless()
    }

    pub fn is_exact(&self) -> bool {
        self.terms.iter().all(|(atom, _)| atom.exact)
    }

    /// Value of this unit in coherent SI base units.
    pub fn factor(&self) -> Factor {
        let value = self
            .terms
            .iter()
            .fold(BigRational::one(), |acc, (atom, exp)| {
                acc * rational_powi(&atom.factor, *exp)
            });
        Factor {
            value,
            exact: self.is_exact(),
        }
    }

    pub fn mul(&self, other: &Unit) -> Unit {
        let mut terms = self.terms.clone();
        for (atom, exp) in other.terms.iter() {
            match terms.iter_mut().find(|(a, _)| a.symbol == atom.symbol) {
                Some(slot) => slot.1 += exp,
                None => terms.push((atom.clone(), *exp)),
            }
        }
        terms.retain(|(_, exp)| *exp != 0);
        Unit { terms }
    }

    pub fn div(&self, other: &Unit) -> Unit {
        self.mul(&other.powi(-1))
    }

    pub fn powi(&self, exponent: i32) -> Unit {
        if exponent == 0 {
            return Unit::one();
        }
        Unit {
            terms: self
                .terms
                .iter()
                .map(|(atom, exp)| (atom.clone(), exp * exponent))
                .collect(),
        }
    }

    /// Raise to `numer/denom`; every resulting exponent must be an integer.
    pub fn pow_ratio(&self, numer: i64, denom: i64) -> Result<Unit> {
        if denom == 0 {
            return Err(Error::FractionalExponent {
                unit: self.to_string(),
                exponent: format!("{}/{}", numer, denom),
            });
        }
        let mut terms = SmallVec::new();
        for (atom, exp) in self.terms.iter() {
            let scaled = i64::from(*exp) * numer;
            if scaled % denom != 0 {
                return Err(Error::FractionalExponent {
                    unit: self.to_string(),
                    exponent: format!("{}/{}", numer, denom),
                });
            }
            let value = i32::try_from(scaled / denom).map_err(|_| Error::FractionalExponent {
                unit: self.to_string(),
                exponent: format!("{}/{}", numer, denom),
            })?;
            if value != 0 {
                terms.push((atom.clone(), value));
            }
        }
        Ok(Unit { terms })
    }

    /// Factor that converts a magnitude in `self` to a magnitude in `to`.
    pub fn conversion_factor(&self, to: &Unit) -> Result<Factor> {
        if self.dimension() != to.dimension() {
            return Err(Error::Incompatible {
                from: self.to_string(),
                to: to.to_string(),
            });
        }
        let from = self.factor();
        let target = to.factor();
        Ok(Factor {
            value: from.value / target.value,
            exact: from.exact && target.exact,
        })
    }

    pub fn convertible(&self, to: &Unit) -> bool {
        self.dimension() == to.dimension()
    }

    /// Terms with positive exponents, in insertion order.
    pub fn numerator(&self) -> impl Iterator<Item = (&str, i32)> {
        self.terms
            .iter()
            .filter(|(_, exp)| *exp > 0)
            .map(|(atom, exp)| (atom.symbol.as_str(), *exp))
    }

    /// Terms with negative exponents, reported with the sign flipped.
    pub fn denominator(&self) -> impl Iterator<Item = (&str, i32)> {
        self.terms
            .iter()
            .filter(|(_, exp)| *exp < 0)
            .map(|(atom, exp)| (atom.symbol.as_str(), -*exp))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_group(f: &mut fmt::Formatter<'_>, terms: &[(&str, i32)]) -> fmt::Result {
            for (i, (symbol, exp)) in terms.iter().enumerate() {
                if i > 0 {
                    f.write_str("·")?;
                }
                f.write_str(symbol)?;
                if *exp != 1 {
                    write!(f, "^{}", exp)?;
                }
            }
            Ok(())
        }

        let numerator: Vec<_> = self.numerator().collect();
        let denominator: Vec<_> = self.denominator().collect();

        if numerator.is_empty() {
            f.write_str("1")?;
        } else {
            write_group(f, &numerator)?;
        }
        match denominator.len() {
            0 => Ok(()),
            1 => {
                f.write_str("/")?;
                write_group(f, &denominator)
            }
            _ => {
                f.write_str("/(")?;
                write_group(f, &denominator)?;
                f.write_str(")")
            }
        }
    }
}

pub fn rational_powi(base: &BigRational, exp: i32) -> BigRational {
    let magnitude = num_traits::pow::pow(base.clone(), exp.unsigned_abs() as usize);
    if exp < 0 && !magnitude.is_zero() {
        magnitude.recip()
    } else {
        magnitude
    }
}

/// Parse an exact decimal such as `0.0254`, `6.626070040e-34` or a
/// fraction such as `101325/760` into a rational.
pub fn rational_from_decimal(text: &str) -> Option<BigRational> {
    if let Some((numer, denom)) = text.split_once('/') {
        let numer = rational_from_decimal(numer)?;
        let denom = rational_from_decimal(denom)?;
        if denom.is_zero() {
            return None;
        }
        return Some(numer / denom);
    }

    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(idx) => (&text[..idx], text[idx + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", int_part, frac_part);
    let numer: BigInt = if digits.is_empty() {
        BigInt::zero()
    } else {
        digits.parse().ok()?
    };
    let scale = exponent - i32::try_from(frac_part.len()).ok()?;
    let ten = BigRational::from_integer(BigInt::from(10));
    let value = BigRational::from_integer(numer) * rational_powi(&ten, scale);
    Some(if negative { -value } else { value })
}
