//! Result formatting
//!
//! Renders an evaluated [`Value`] to display text under a [`FormatConfig`]:
//! exact or approximate numbers, the numeral system, the number of digits,
//! how units are normalized and whether HTML markup is produced.

pub mod decimal;
pub mod markup;
pub mod printer;
pub mod radix;

pub use markup::Markup;
pub use printer::{Context, Printer, Surrounding};

use crate::error::Result;
use crate::numeric::{approx, Value};
use scical_units::UnitRegistry;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Significant digits shown by default.
pub const DEFAULT_DIGITS: u32 = 8;

/// Exact results keep fractions, roots and constants; approximate results
/// are evaluated to floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Exact,
    Approximate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralSystem {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
    Roman,
}

impl NumeralSystem {
    /// The radix of a positional system other than decimal.
    pub fn base(self) -> Option<u32> {
        match self {
            NumeralSystem::Binary => Some(2),
            NumeralSystem::Octal => Some(8),
            NumeralSystem::Hexadecimal => Some(16),
            NumeralSystem::Decimal | NumeralSystem::Roman => None,
        }
    }
}

/// How units of quantities are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitDisplay {
    /// As computed: `km/h`
    #[default]
    AsIs,
    /// Coherent SI base units: `kg·m/s^2`
    ToBase,
    /// A named coherent unit when one exists: `N`
    ToBest,
}

/// Formatting options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub mode: Mode,
    pub numeral_system: NumeralSystem,
    /// Significant digits for decimals, fractional digits for other bases.
    pub digits: u32,
    pub unit_display: UnitDisplay,
    pub markup: Markup,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Exact,
            numeral_system: NumeralSystem::Decimal,
            digits: DEFAULT_DIGITS,
            unit_display: UnitDisplay::AsIs,
            markup: Markup::Plain,
        }
    }
}

/// Render `value`, failing on values the configuration cannot express
/// (a roman numeral outside [−4999, 4999], for example).
pub fn format(value: &Value, config: &FormatConfig, units: &UnitRegistry) -> Result<String> {
    let value = match config.mode {
        Mode::Exact => Cow::Borrowed(value),
        Mode::Approximate => Cow::Owned(approx::approximate(value, config.digits)?),
    };
    Printer::new(config, units).print(&value, Context::TOP)
}

/// Like [`format`], but a failure becomes the error message.
pub fn render(value: &Value, config: &FormatConfig, units: &UnitRegistry) -> String {
    format(value, config, units).unwrap_or_else(|err| {
        debug!(error = %err, "formatting failed");
        err.to_string()
    })
}
