//! The immutable name tables consulted while parsing: units, constants and
//! functions. Built once and passed by reference into the parser.

use crate::constants::{self, FREE_VARIABLE};
use crate::error::{Error, Result};
use crate::functions::{FunctionMetadata, FunctionRegistry};
use crate::numeric::Value;
use num_rational::BigRational;
use scical_units::{Unit, UnitRegistry};
use std::collections::HashMap;
use tracing::debug;

/// What a bare identifier stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Constant(Value),
    /// The free variable: substituted from the caller's bindings, else a symbol.
    Variable,
    Unit(Unit),
}

/// Units, constants and functions known to the engine.
#[derive(Debug, Clone)]
pub struct Registry {
    units: UnitRegistry,
    constants: HashMap<String, Value>,
    functions: FunctionRegistry,
}

impl Registry {
    pub fn new() -> Result<Self> {
        Self::with_units(UnitRegistry::builtin()?)
    }

    /// Build the constant table on top of an existing unit registry.
    pub fn with_units(units: UnitRegistry) -> Result<Self> {
        let mut table = HashMap::new();
        for constant in constants::builtin(&units)? {
            for name in constant.names {
                table.insert((*name).to_string(), constant.value.clone());
            }
        }
        debug!(
            constants = table.len(),
            units = units.symbols().count(),
            "built registry"
        );
        Ok(Self {
            units,
            constants: table,
            functions: FunctionRegistry::new(),
        })
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Constants and variables first, then units.
    pub fn resolve_name(&self, name: &str) -> Result<Binding> {
        if name == FREE_VARIABLE {
            return Ok(Binding::Variable);
        }
        if let Some(value) = self.constants.get(name) {
            return Ok(Binding::Constant(value.clone()));
        }
        match self.units.resolve(name) {
            Ok(unit) => Ok(Binding::Unit(unit)),
            Err(_) => Err(Error::UnknownConstant(name.to_string())),
        }
    }

    pub fn resolve_unit(&self, name: &str) -> Result<Unit> {
        self.units
            .resolve(name)
            .map_err(|_| Error::UnknownUnit(name.to_string()))
    }

    /// The unit behind a currency glyph such as `€`.
    pub fn resolve_currency(&self, glyph: char) -> Result<Unit> {
        let code = scical_units::currency_code(glyph)
            .ok_or_else(|| Error::UnknownUnit(glyph.to_string()))?;
        self.units
            .resolve(code)
            .map_err(|_| Error::UnknownUnit(format!("{} ({})", glyph, code)))
    }

    pub fn function(&self, name: &str) -> Option<&'static FunctionMetadata> {
        self.functions.resolve(name)
    }

    /// Add or update a currency worth `eur_per_unit` euros.
    pub fn define_currency(&mut self, code: &str, eur_per_unit: BigRational) -> Result<()> {
        self.units.define_currency(code, eur_per_unit)?;
        Ok(())
    }
}
