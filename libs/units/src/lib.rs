//! Unit system for the calculator: a database of named units with metric
//! prefixes, unit algebra over integer exponents, and exact conversion
//! factors between compatible units.

#![forbid(unsafe_code)]

mod ast;
mod db;
mod dimension;
mod error;
mod normalize;
mod parser;
mod unit;

pub use ast::{Atom, Term, UnitExpr};
pub use db::{currency_code, is_currency_glyph, UnitRegistry};
pub use dimension::{BaseDimension, DimensionVector, DIMENSIONS};
pub use error::{Error, Result};
pub use parser::{parse, validate};
pub use unit::{rational_from_decimal, rational_powi, Factor, Unit, UnitAtom};
