//! Main calculator engine
//!
//! Runs the pipeline: Parse → Expression tree → Evaluation → Formatting

use crate::ast::{Bindings, Evaluate, Node};
use crate::error::Result;
use crate::format::{self, FormatConfig};
use crate::hints::{self, Hint};
use crate::numeric::{solve, Value};
use crate::parser::Parser;
use crate::registry::Registry;
use num_rational::BigRational;
use serde::Serialize;
use tracing::debug;

/// Everything produced for one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub tree: Node,
    pub value: Value,
    /// Formatted result, or the formatting error message.
    pub display: String,
    pub hints: Vec<Hint>,
}

/// Serializable summary of a [`Calculation`], for front ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<'a> {
    pub input: &'a str,
    pub result: &'a str,
    pub hints: Vec<String>,
}

impl Calculation {
    pub fn report<'a>(&'a self, input: &'a str) -> Report<'a> {
        Report {
            input,
            result: &self.display,
            hints: self.hints.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Main calculator engine
///
/// Holds the immutable name tables (units, constants, functions). Every call
/// builds a fresh tree and value; no state is kept between calls.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    /// Create an engine with the builtin units, constants and functions.
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(Registry::new()?))
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Add a currency worth `eur_per_unit` euros.
    pub fn define_currency(&mut self, code: &str, eur_per_unit: BigRational) -> Result<()> {
        self.registry.define_currency(code, eur_per_unit)
    }

    /// Parse an expression into a tree.
    pub fn parse(&self, text: &str) -> Result<Node> {
        Parser::new(text, &self.registry).parse()
    }

    /// Parse and evaluate an expression, substituting `bindings` for variables.
    pub fn evaluate(&self, text: &str, bindings: &Bindings) -> Result<Value> {
        let tree = self.parse(text)?;
        let value = tree.evaluate(bindings)?;
        debug!(kind = value.kind(), "evaluated expression");
        Ok(value)
    }

    /// Format a value with this engine's units.
    pub fn format(&self, value: &Value, config: &FormatConfig) -> Result<String> {
        format::format(value, config, self.registry.units())
    }

    /// Parse, evaluate and format an expression.
    ///
    /// Parse and evaluation errors are returned; a formatting failure becomes
    /// the displayed text so there is still something to show.
    pub fn calculate(&self, text: &str, config: &FormatConfig) -> Result<Calculation> {
        let tree = self.parse(text)?;
        let value = tree.evaluate(&Bindings::new())?;
        debug!(kind = value.kind(), "evaluated expression");

        let display = format::render(&value, config, self.registry.units());
        let hints = hints::hints(&value, config, solve::is_numerical(&value));
        Ok(Calculation {
            tree,
            value,
            display,
            hints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn calculate_simple() {
        let engine = Engine::new().unwrap();
        let calc = engine.calculate("1 + 2", &FormatConfig::default()).unwrap();
        assert_eq!(calc.value, Value::integer(3));
        assert_eq!(calc.display, "3");
        assert!(calc.hints.is_empty());
        assert_eq!(calc.tree.to_string(), "1 + 2");
    }

    #[test]
    fn calculate_reports_division_by_zero() {
        let engine = Engine::new().unwrap();
        let calc = engine.calculate("1/0", &FormatConfig::default()).unwrap();
        assert_eq!(calc.value, Value::ComplexInfinity);
        assert_eq!(calc.hints, vec![Hint::ComplexInfinity]);
    }

    #[test]
    fn parse_errors_propagate() {
        let engine = Engine::new().unwrap();
        assert!(matches!(
            engine.calculate("1 +", &FormatConfig::default()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn evaluate_with_bindings() {
        let engine = Engine::new().unwrap();
        let mut bindings = Bindings::new();
        bindings.insert("x".into(), Value::integer(4));
        assert_eq!(engine.evaluate("x^2 + 1", &bindings).unwrap(), Value::integer(17));
    }

    #[test]
    fn report_carries_hint_text() {
        let engine = Engine::new().unwrap();
        let calc = engine.calculate("1/0", &FormatConfig::default()).unwrap();
        let report = calc.report("1/0");
        assert_eq!(report.result, "z∞");
        assert_eq!(report.hints.len(), 1);
    }

    #[test]
    fn currencies_are_defined_at_runtime() {
        let mut engine = Engine::new().unwrap();
        assert!(matches!(
            engine.parse("3$"),
            Err(Error::UnknownUnit(_))
        ));
        engine
            .define_currency("USD", BigRational::new(9.into(), 10.into()))
            .unwrap();
        assert!(engine.parse("3$").is_ok());
    }
}
