//! Advisory notes shown next to a result.

use crate::format::FormatConfig;
use crate::numeric::Value;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hint {
    ComplexInfinity,
    UnsolvedEquality,
    NumericalSolution,
    LimitedPrecision,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hint::ComplexInfinity => {
                "The result contains z∞ (complex infinity), which most likely means that \
                 some operation in the expression is undefined (for example a division by zero)."
            }
            Hint::UnsolvedEquality => {
                "The equality could not be solved or tested for truth and is returned in \
                 simplified form."
            }
            Hint::NumericalSolution => {
                "The solution was found numerically and may not be the only one."
            }
            Hint::LimitedPrecision => {
                "Part of the result was computed with fewer significant digits than requested."
            }
        })
    }
}

/// Hints for a result, in a stable order without duplicates.
pub fn hints(value: &Value, config: &FormatConfig, numerical: bool) -> Vec<Hint> {
    let mut hints = Vec::new();
    if numerical {
        hints.push(Hint::NumericalSolution);
    }
    if value.contains(&Value::ComplexInfinity) {
        hints.push(Hint::ComplexInfinity);
    }
    if matches!(value, Value::UnsolvedEquality(..)) {
        hints.push(Hint::UnsolvedEquality);
    }
    // f64 fallbacks carry 15 digits whatever was requested.
    if value.precision().is_some_and(|p| p < config.digits) {
        hints.push(Hint::LimitedPrecision);
    }
    hints.sort();
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_infinity_anywhere() {
        let value = Value::Sum(vec![Value::ComplexInfinity, Value::symbol("x")]);
        assert_eq!(
            hints(&value, &FormatConfig::default(), false),
            vec![Hint::ComplexInfinity]
        );
    }

    #[test]
    fn unsolved_and_numerical() {
        let value = Value::UnsolvedEquality(Box::new(Value::symbol("y")), Box::new(Value::zero()));
        assert_eq!(
            hints(&value, &FormatConfig::default(), true),
            vec![Hint::UnsolvedEquality, Hint::NumericalSolution]
        );
    }

    #[test]
    fn precision_below_request() {
        let value = Value::from_f64(0.5).unwrap();
        let mut config = FormatConfig::default();
        assert!(hints(&value, &config, false).is_empty());
        config.digits = 20;
        assert_eq!(hints(&value, &config, false), vec![Hint::LimitedPrecision]);
    }
}
