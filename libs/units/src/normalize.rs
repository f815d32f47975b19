use crate::db::UnitRegistry;
use crate::dimension::{BaseDimension, DimensionVector};
use crate::error::Result;
use crate::unit::{Factor, Unit};

/// Named coherent units preferred when simplifying, in order of preference.
const PREFERRED: &[&str] = &["N", "J", "W", "Pa", "Hz", "C", "V", "Ω", "F", "S", "Wb", "T", "H"];

impl UnitRegistry {
    /// The coherent SI base unit for a dimension (`kg·m/s^2` for force).
    pub fn base_unit(&self, dim: DimensionVector) -> Result<Unit> {
        let mut unit = Unit::one();
        for (base, exp) in dim.components() {
            unit = unit.mul(&self.resolve(base.base_symbol())?.powi(exp));
        }
        Ok(unit)
    }

    /// A single named coherent unit with this dimension, if there is one.
    pub fn best_unit(&self, dim: DimensionVector) -> Option<Unit> {
        if dim.is_dimensionless() {
            return Some(Unit::one());
        }
        if let Some(base) = single_base(dim) {
            return self.resolve(base.base_symbol()).ok();
        }
        PREFERRED
            .iter()
            .filter_map(|symbol| self.resolve(symbol).ok())
            .find(|unit| unit.dimension() == dim)
    }

    /// Rewrite `unit` in base units. Returns the factor that converts a
    /// magnitude in `unit` into the new unit.
    pub fn to_base(&self, unit: &Unit) -> Result<(Factor, Unit)> {
        let target = self.base_unit(unit.dimension())?;
        let factor = unit.conversion_factor(&target)?;
        Ok((factor, target))
    }

    /// Rewrite `unit` in the best named unit, falling back to base units.
    pub fn to_best(&self, unit: &Unit) -> Result<(Factor, Unit)> {
        match self.best_unit(unit.dimension()) {
            Some(target) => {
                let factor = unit.conversion_factor(&target)?;
                Ok((factor, target))
            }
            None => self.to_base(unit),
        }
    }
}

fn single_base(dim: DimensionVector) -> Option<BaseDimension> {
    let mut components = dim.components();
    match (components.next(), components.next()) {
        (Some((base, 1)), None) => Some(base),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::rational_from_decimal;

    #[test]
    fn base_units_for_force() {
        let reg = UnitRegistry::builtin().unwrap();
        let newton = reg.resolve("kN").unwrap();
        let (factor, unit) = reg.to_base(&newton).unwrap();
        assert_eq!(unit.to_string(), "m·kg/s^2");
        assert_eq!(factor.value, rational_from_decimal("1000").unwrap());
    }

    #[test]
    fn best_unit_prefers_named_units() {
        let reg = UnitRegistry::builtin().unwrap();
        let (_, unit) = reg.evaluate_definition("kg.m2.s-2").unwrap();
        let (factor, best) = reg.to_best(&unit).unwrap();
        assert_eq!(best.to_string(), "J");
        assert!(factor.is_one());

        let (_, speed) = reg.evaluate_definition("km/h").unwrap();
        let (factor, best) = reg.to_best(&speed).unwrap();
        assert_eq!(best.to_string(), "m/s");
        assert_eq!(factor.value, rational_from_decimal("1000/3600").unwrap());
    }

    #[test]
    fn dimensionless_ratios_collapse() {
        let reg = UnitRegistry::builtin().unwrap();
        let (_, ratio) = reg.evaluate_definition("cm/in").unwrap();
        let (factor, best) = reg.to_best(&ratio).unwrap();
        assert!(best.is_one());
        assert_eq!(factor.value, rational_from_decimal("0.01/0.0254").unwrap());
    }
}
