//! Physical dimensions as integer exponent vectors.

use std::fmt;

/// The base dimensions tracked by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    LuminousIntensity,
    Currency,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; DIMENSIONS] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
        BaseDimension::Currency,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Symbol of the coherent base unit for this dimension.
    pub fn base_symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "kg",
            BaseDimension::Time => "s",
            BaseDimension::Current => "A",
            BaseDimension::Temperature => "K",
            BaseDimension::Amount => "mol",
            BaseDimension::LuminousIntensity => "cd",
            BaseDimension::Currency => "EUR",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::Current => "I",
            BaseDimension::Temperature => "Θ",
            BaseDimension::Amount => "N",
            BaseDimension::LuminousIntensity => "J",
            BaseDimension::Currency => "¤",
        }
    }
}

pub const DIMENSIONS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionVector(pub [i32; DIMENSIONS]);

impl DimensionVector {
    pub const ZERO: DimensionVector = DimensionVector([0; DIMENSIONS]);

    pub fn of(base: BaseDimension) -> Self {
        let mut dim = Self::ZERO;
        dim.0[base.index()] = 1;
        dim
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn add(&self, other: &DimensionVector) -> DimensionVector {
        let mut out = *self;
        for (slot, value) in out.0.iter_mut().zip(other.0.iter()) {
            *slot += value;
        }
        out
    }

    pub fn scale(&self, factor: i32) -> DimensionVector {
        let mut out = *self;
        for slot in out.0.iter_mut() {
            *slot *= factor;
        }
        out
    }

    /// Iterate the non-zero exponents together with their base dimension.
    pub fn components(&self) -> impl Iterator<Item = (BaseDimension, i32)> + '_ {
        BaseDimension::ALL
            .iter()
            .map(move |base| (*base, self.0[base.index()]))
            .filter(|(_, exp)| *exp != 0)
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        let mut first = true;
        for (base, exp) in self.components() {
            if !first {
                f.write_str("·")?;
            }
            first = false;
            f.write_str(base.short_name())?;
            if exp != 1 {
                write!(f, "^{}", exp)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_dimension() {
        let length = DimensionVector::of(BaseDimension::Length);
        let time = DimensionVector::of(BaseDimension::Time);
        let velocity = length.add(&time.scale(-1));
        assert_eq!(velocity.0[0], 1);
        assert_eq!(velocity.0[2], -1);
        assert_eq!(velocity.to_string(), "L·T^-1");
        assert!(velocity.add(&velocity.scale(-1)).is_dimensionless());
    }
}
