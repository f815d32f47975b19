//! The unit database: built-in definitions, prefixes and name resolution.

use crate::ast::{Atom, Term, UnitExpr};
use crate::dimension::{BaseDimension, DimensionVector};
use crate::error::{Error, Result};
use crate::parser;
use crate::unit::{rational_from_decimal, rational_powi, Unit, UnitAtom};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use phf::phf_map;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Metric prefixes by symbol: canonical symbol and power of ten.
static PREFIX_SYMBOLS: phf::Map<&'static str, (&'static str, i32)> = phf_map! {
    "Q" => ("Q", 30),
    "R" => ("R", 27),
    "Y" => ("Y", 24),
    "Z" => ("Z", 21),
    "E" => ("E", 18),
    "P" => ("P", 15),
    "T" => ("T", 12),
    "G" => ("G", 9),
    "M" => ("M", 6),
    "k" => ("k", 3),
    "h" => ("h", 2),
    "da" => ("da", 1),
    "d" => ("d", -1),
    "c" => ("c", -2),
    "m" => ("m", -3),
    "µ" => ("µ", -6),
    "μ" => ("µ", -6),
    "u" => ("µ", -6),
    "n" => ("n", -9),
    "p" => ("p", -12),
    "f" => ("f", -15),
    "a" => ("a", -18),
    "z" => ("z", -21),
    "y" => ("y", -24),
    "r" => ("r", -27),
    "q" => ("q", -30),
};

/// Metric prefixes by long name, mapped to their canonical symbol.
static PREFIX_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "quetta" => "Q",
    "ronna" => "R",
    "yotta" => "Y",
    "zetta" => "Z",
    "exa" => "E",
    "peta" => "P",
    "tera" => "T",
    "giga" => "G",
    "mega" => "M",
    "kilo" => "k",
    "hecto" => "h",
    "deca" => "da",
    "deka" => "da",
    "deci" => "d",
    "centi" => "c",
    "milli" => "m",
    "micro" => "µ",
    "nano" => "n",
    "pico" => "p",
    "femto" => "f",
    "atto" => "a",
    "zepto" => "z",
    "yocto" => "y",
    "ronto" => "r",
    "quecto" => "q",
};

/// Currency glyphs accepted in expressions, mapped to ISO 4217 codes.
static CURRENCY_GLYPHS: phf::Map<char, &'static str> = phf_map! {
    '€' => "EUR",
    '$' => "USD",
    '£' => "GBP",
    '¥' => "JPY",
};

/// ISO code for a currency glyph such as `€`.
pub fn currency_code(glyph: char) -> Option<&'static str> {
    CURRENCY_GLYPHS.get(&glyph).copied()
}

pub fn is_currency_glyph(c: char) -> bool {
    CURRENCY_GLYPHS.contains_key(&c)
}

struct BaseDef {
    symbol: &'static str,
    names: &'static [&'static str],
    base: BaseDimension,
    factor: &'static str,
    prefixable: bool,
}

/// A derived unit: `factor` times the unit expression `unit`.
struct UnitDef {
    symbol: &'static str,
    names: &'static [&'static str],
    factor: &'static str,
    unit: &'static str,
    prefixable: bool,
    exact: bool,
}

const fn def(
    symbol: &'static str,
    names: &'static [&'static str],
    factor: &'static str,
    unit: &'static str,
    prefixable: bool,
) -> UnitDef {
    UnitDef {
        symbol,
        names,
        factor,
        unit,
        prefixable,
        exact: true,
    }
}

const fn inexact(mut unit: UnitDef) -> UnitDef {
    unit.exact = false;
    unit
}

static BASE_UNITS: &[BaseDef] = &[
    BaseDef { symbol: "m", names: &["meter", "metre"], base: BaseDimension::Length, factor: "1", prefixable: true },
    BaseDef { symbol: "g", names: &["gram", "gramme"], base: BaseDimension::Mass, factor: "0.001", prefixable: true },
    BaseDef { symbol: "s", names: &["second", "sec"], base: BaseDimension::Time, factor: "1", prefixable: true },
    BaseDef { symbol: "A", names: &["ampere", "amp"], base: BaseDimension::Current, factor: "1", prefixable: true },
    BaseDef { symbol: "K", names: &["kelvin"], base: BaseDimension::Temperature, factor: "1", prefixable: true },
    BaseDef { symbol: "mol", names: &["mole"], base: BaseDimension::Amount, factor: "1", prefixable: true },
    BaseDef { symbol: "cd", names: &["candela"], base: BaseDimension::LuminousIntensity, factor: "1", prefixable: true },
    BaseDef { symbol: "EUR", names: &["euro"], base: BaseDimension::Currency, factor: "1", prefixable: false },
];

/// π/180 truncated to 40 significant digits.
const DEGREE: &str = "0.01745329251994329576923690768488612713443";

// Order matters: a definition may only refer to units defined above it.
static DERIVED_UNITS: &[UnitDef] = &[
    // Dimensionless
    def("rad", &["radian"], "1", "1", true),
    def("sr", &["steradian"], "1", "1", true),
    inexact(def("deg", &["degree", "°"], DEGREE, "rad", false)),
    inexact(def("arcmin", &["arcminute"], "1/60", "deg", false)),
    inexact(def("arcsec", &["arcsecond"], "1/3600", "deg", false)),
    // Coherent SI derived units
    def("Hz", &["hertz"], "1", "s-1", true),
    def("N", &["newton"], "1", "kg.m.s-2", true),
    def("Pa", &["pascal"], "1", "N.m-2", true),
    def("J", &["joule"], "1", "N.m", true),
    def("W", &["watt"], "1", "J/s", true),
    def("C", &["coulomb"], "1", "A.s", true),
    def("V", &["volt"], "1", "W/A", true),
    def("Ω", &["ohm"], "1", "V/A", true),
    def("S", &["siemens"], "1", "A/V", true),
    def("F", &["farad"], "1", "C/V", true),
    def("Wb", &["weber"], "1", "V.s", true),
    def("T", &["tesla"], "1", "Wb.m-2", true),
    def("H", &["henry"], "1", "Wb/A", true),
    def("lm", &["lumen"], "1", "cd.sr", true),
    def("lx", &["lux"], "1", "lm.m-2", true),
    def("Bq", &["becquerel"], "1", "s-1", true),
    def("Gy", &["gray"], "1", "J/kg", true),
    def("Sv", &["sievert"], "1", "J/kg", true),
    // Time
    def("min", &["minute"], "60", "s", false),
    def("h", &["hour", "hr"], "3600", "s", false),
    def("d", &["day"], "86400", "s", false),
    def("wk", &["week"], "7", "d", false),
    def("yr", &["year", "julian_year"], "365.25", "d", true),
    // Length
    def("in", &["inch", "inches"], "0.0254", "m", false),
    def("ft", &["foot", "feet"], "12", "in", false),
    def("yd", &["yard"], "3", "ft", false),
    def("mi", &["mile"], "1760", "yd", false),
    def("nmi", &["nautical_mile"], "1852", "m", false),
    def("Å", &["angstrom", "ångström"], "1e-10", "m", false),
    def("au", &["astronomical_unit"], "149597870700", "m", false),
    def("ly", &["lightyear", "light_year"], "9460730472580800", "m", true),
    def("pc", &["parsec"], "30856775814913673", "m", true),
    // Area and volume
    def("ha", &["hectare"], "10000", "m2", false),
    def("acre", &[], "4046.8564224", "m2", false),
    def("L", &["liter", "litre"], "1", "dm3", true),
    def("l", &[], "1", "L", true),
    def("gal", &["gallon"], "3.785411784", "L", false),
    // Mass
    def("t", &["tonne"], "1000", "kg", true),
    def("u", &["dalton", "Da", "atomic_mass_unit"], "1.66053904e-27", "kg", false),
    def("lb", &["pound"], "0.45359237", "kg", false),
    def("oz", &["ounce"], "1/16", "lb", false),
    def("st", &["stone"], "14", "lb", false),
    // Speed
    def("mph", &[], "1", "mi/h", false),
    def("kn", &["knot"], "1852", "m/h", false),
    // Force, energy, power
    def("dyn", &["dyne"], "1e-5", "N", false),
    def("lbf", &["pound_force"], "4.4482216152605", "N", false),
    def("erg", &[], "1e-7", "J", false),
    def("eV", &["electronvolt"], "1.6021766208e-19", "J", true),
    def("cal", &["calorie"], "4.184", "J", true),
    def("Wh", &["watthour"], "3600", "J", true),
    def("hp", &["horsepower"], "745.69987158227022", "W", false),
    // Pressure
    def("bar", &[], "100000", "Pa", true),
    def("atm", &["atmosphere"], "101325", "Pa", false),
    def("Torr", &["torr"], "101325/760", "Pa", false),
    def("mmHg", &[], "133.322387415", "Pa", false),
    def("psi", &[], "1", "lbf.in-2", false),
];

/// Registry of every unit that can be referenced by name.
#[derive(Clone, Debug)]
pub struct UnitRegistry {
    atoms: HashMap<String, Arc<UnitAtom>>,
    aliases: HashMap<String, String>,
    prefixable: HashSet<String>,
}

impl UnitRegistry {
    /// A registry with no units at all.
    pub fn empty() -> Self {
        Self {
            atoms: HashMap::new(),
            aliases: HashMap::new(),
            prefixable: HashSet::new(),
        }
    }

    /// The built-in SI, imperial and euro units.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::empty();
        for base in BASE_UNITS {
            let factor = rational_from_decimal(base.factor)
                .ok_or_else(|| Error::Db(format!("invalid factor for '{}'", base.symbol)))?;
            let atom = UnitAtom::new(base.symbol, factor, DimensionVector::of(base.base));
            registry.insert(atom, base.names, base.prefixable)?;
        }
        for unit in DERIVED_UNITS {
            registry.define_with(unit.symbol, unit.names, unit.factor, unit.unit, unit.prefixable, unit.exact)?;
        }
        Ok(registry)
    }

    /// Define a unit as `factor` times a unit expression over known units.
    pub fn define(
        &mut self,
        symbol: &str,
        names: &[&str],
        factor: &str,
        definition: &str,
        prefixable: bool,
    ) -> Result<()> {
        self.define_with(symbol, names, factor, definition, prefixable, true)
    }

    fn define_with(
        &mut self,
        symbol: &str,
        names: &[&str],
        factor: &str,
        definition: &str,
        prefixable: bool,
        exact: bool,
    ) -> Result<()> {
        let scale = rational_from_decimal(factor)
            .ok_or_else(|| Error::Db(format!("invalid factor '{}' for '{}'", factor, symbol)))?;
        let (integer_factor, unit) = self.evaluate_definition(definition)?;
        let reference = unit.factor();
        let mut atom = UnitAtom::new(symbol, scale * integer_factor * reference.value, unit.dimension());
        atom.exact = exact && reference.exact;
        self.insert(atom, names, prefixable)
    }

    /// Add or replace a currency whose value is `eur_per_unit` euros.
    pub fn define_currency(&mut self, code: &str, eur_per_unit: BigRational) -> Result<()> {
        if let Some(existing) = self.atoms.get(code) {
            if existing.dimension != DimensionVector::of(BaseDimension::Currency) {
                return Err(Error::DuplicateUnit(code.to_string()));
            }
        }
        let atom = UnitAtom::new(
            code,
            eur_per_unit,
            DimensionVector::of(BaseDimension::Currency),
        );
        self.atoms.insert(code.to_string(), Arc::new(atom));
        Ok(())
    }

    fn insert(&mut self, atom: UnitAtom, names: &[&str], prefixable: bool) -> Result<()> {
        if self.atoms.contains_key(&atom.symbol) {
            return Err(Error::DuplicateUnit(atom.symbol));
        }
        let symbol = atom.symbol.clone();
        for name in names {
            self.aliases.insert((*name).to_string(), symbol.clone());
        }
        if prefixable {
            self.prefixable.insert(symbol.clone());
        }
        self.atoms.insert(symbol, Arc::new(atom));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Resolve a unit name: symbol, long name, prefixed symbol, prefixed long
    /// name, or a simple plural of any of those.
    pub fn resolve(&self, name: &str) -> Result<Unit> {
        self.lookup(name)
            .map(Unit::from_atom)
            .ok_or_else(|| Error::UnknownUnit(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Option<Arc<UnitAtom>> {
        self.lookup_singular(name).or_else(|| {
            name.strip_suffix('s')
                .filter(|s| !s.is_empty())
                .and_then(|s| self.lookup_named(s))
        })
    }

    fn lookup_singular(&self, name: &str) -> Option<Arc<UnitAtom>> {
        if let Some(atom) = self.atoms.get(name) {
            return Some(atom.clone());
        }
        if let Some(atom) = self.lookup_named(name) {
            return Some(atom);
        }
        self.lookup_prefixed_symbol(name)
    }

    /// Long names only, optionally with a long prefix (`kilometre`).
    fn lookup_named(&self, name: &str) -> Option<Arc<UnitAtom>> {
        if let Some(symbol) = self.aliases.get(name) {
            return self.atoms.get(symbol).cloned();
        }
        for (prefix_name, prefix_symbol) in PREFIX_NAMES.entries() {
            let Some(rest) = name.strip_prefix(prefix_name) else {
                continue;
            };
            let Some(symbol) = self.aliases.get(rest) else {
                continue;
            };
            if let Some(atom) = self.prefixed(prefix_symbol, symbol) {
                return Some(atom);
            }
        }
        None
    }

    fn lookup_prefixed_symbol(&self, name: &str) -> Option<Arc<UnitAtom>> {
        // Longest prefix first so that `dam` is deca-metre.
        let boundaries: Vec<usize> = name.char_indices().map(|(i, _)| i).skip(1).take(2).collect();
        for &split in boundaries.iter().rev() {
            let (prefix, rest) = name.split_at(split);
            if PREFIX_SYMBOLS.contains_key(prefix) {
                if let Some(atom) = self.prefixed(prefix, rest) {
                    return Some(atom);
                }
            }
        }
        None
    }

    fn prefixed(&self, prefix: &str, symbol: &str) -> Option<Arc<UnitAtom>> {
        let (canonical, exponent) = *PREFIX_SYMBOLS.get(prefix)?;
        if !self.prefixable.contains(symbol) {
            return None;
        }
        let base = self.atoms.get(symbol)?;
        let ten = BigRational::from_integer(BigInt::from(10));
        let mut atom = UnitAtom::new(
            format!("{}{}", canonical, base.symbol),
            &base.factor * rational_powi(&ten, exponent),
            base.dimension,
        );
        atom.exact = base.exact;
        Some(Arc::new(atom))
    }

    /// Parse and evaluate a dotted definition such as `J/(mol.K)`.
    ///
    /// Integer atoms are returned as a separate scalar factor.
    pub fn evaluate_definition(&self, definition: &str) -> Result<(BigRational, Unit)> {
        let expr = parser::parse(definition)?;
        self.evaluate_expr(&expr)
    }

    fn evaluate_expr(&self, expr: &UnitExpr) -> Result<(BigRational, Unit)> {
        let mut scalar = BigRational::one();
        let mut unit = Unit::one();
        for (term, exp) in &expr.numerator {
            let (s, u) = self.evaluate_term(term)?;
            scalar *= rational_powi(&s, *exp);
            unit = unit.mul(&u.powi(*exp));
        }
        for (term, exp) in &expr.denominator {
            let (s, u) = self.evaluate_term(term)?;
            scalar /= rational_powi(&s, *exp);
            unit = unit.div(&u.powi(*exp));
        }
        Ok((scalar, unit))
    }

    fn evaluate_term(&self, term: &Term) -> Result<(BigRational, Unit)> {
        match term {
            Term::Atom(Atom::Integer(n)) => {
                Ok((BigRational::from_integer(BigInt::from(*n)), Unit::one()))
            }
            Term::Atom(Atom::Symbol(symbol)) => Ok((BigRational::one(), self.resolve(symbol)?)),
            Term::Group(inner) => self.evaluate_expr(inner),
        }
    }

    /// Convert an exact magnitude between two units.
    pub fn convert(&self, value: &BigRational, from: &Unit, to: &Unit) -> Result<BigRational> {
        let factor = from.conversion_factor(to)?;
        Ok(value * factor.value)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.atoms.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> UnitRegistry {
        UnitRegistry::builtin().unwrap()
    }

    #[test]
    fn resolves_symbols_names_and_prefixes() {
        let reg = registry();
        assert_eq!(reg.resolve("km").unwrap().to_string(), "km");
        assert_eq!(reg.resolve("kilometre").unwrap().to_string(), "km");
        assert_eq!(reg.resolve("kilometers").unwrap().to_string(), "km");
        assert_eq!(reg.resolve("us").unwrap().to_string(), "µs");
        assert_eq!(reg.resolve("dam").unwrap().to_string(), "dam");
        assert_eq!(reg.resolve("inches").unwrap().to_string(), "in");
        assert_eq!(reg.resolve("feet").unwrap().to_string(), "ft");
        assert_eq!(reg.resolve("°").unwrap().to_string(), "deg");
        assert_eq!(reg.resolve("kWh").unwrap().to_string(), "kWh");
    }

    #[test]
    fn exact_symbols_win_over_prefix_splits() {
        let reg = registry();
        assert_eq!(reg.resolve("min").unwrap().to_string(), "min");
        assert_eq!(reg.resolve("Pa").unwrap().to_string(), "Pa");
        assert_eq!(reg.resolve("cd").unwrap().to_string(), "cd");
        assert_eq!(reg.resolve("ms").unwrap().to_string(), "ms");
    }

    #[test]
    fn non_prefixable_units_reject_prefixes() {
        let reg = registry();
        assert!(matches!(reg.resolve("kin"), Err(Error::UnknownUnit(_))));
        assert!(matches!(reg.resolve("kEUR"), Err(Error::UnknownUnit(_))));
        assert!(reg.resolve("blargh").is_err());
    }

    #[test]
    fn derived_units_have_exact_factors() {
        let reg = registry();
        let kg = reg.resolve("kg").unwrap();
        assert!(kg.factor().is_one());
        let newton = reg.resolve("N").unwrap();
        let (_, expected) = reg.evaluate_definition("kg.m.s-2").unwrap();
        assert_eq!(newton.dimension(), expected.dimension());
        assert!(newton.factor().is_one());

        let hour = reg.resolve("h").unwrap();
        let second = reg.resolve("s").unwrap();
        let v = reg
            .convert(&BigRational::one(), &hour, &second)
            .unwrap();
        assert_eq!(v, BigRational::from_integer(BigInt::from(3600)));
    }

    #[test]
    fn degrees_are_flagged_inexact() {
        let reg = registry();
        assert!(!reg.resolve("deg").unwrap().is_exact());
        assert!(reg.resolve("rad").unwrap().is_exact());
        assert!(reg.resolve("deg").unwrap().is_dimensionless());
    }

    #[test]
    fn currencies_can_be_added() {
        let mut reg = registry();
        assert!(reg.resolve("USD").is_err());
        let rate = rational_from_decimal("0.9").unwrap();
        reg.define_currency("USD", rate.clone()).unwrap();
        let usd = reg.resolve("USD").unwrap();
        let eur = reg.resolve("EUR").unwrap();
        assert_eq!(reg.convert(&BigRational::one(), &usd, &eur).unwrap(), rate);
        assert!(reg.define_currency("m", rate).is_err());
        assert_eq!(currency_code('€'), Some("EUR"));
        assert_eq!(currency_code('x'), None);
    }

    #[test]
    fn duplicate_definitions_fail() {
        let mut reg = registry();
        assert!(matches!(
            reg.define("m", &[], "1", "m", false),
            Err(Error::DuplicateUnit(_))
        ));
    }
}
