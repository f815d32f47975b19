//! Error types for the calculator engine

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Parse, evaluation and formatting errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Unknown constant or variable: {0}")]
    UnknownConstant(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Function {name} takes {} arguments, {given} given", arity(*.min, *.max))]
    WrongNumberOfArguments {
        name: String,
        given: usize,
        min: usize,
        max: usize,
    },

    #[error("Matrix row {row} has {found} entries, expected {expected}")]
    NonRectangularMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Format error: {0}")]
    Format(String),
}

fn arity(min: usize, max: usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{} to {}", min, max)
    }
}

/// What a function argument may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Scalar,
    Matrix,
    Unit,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Capability::Scalar => "scalars",
            Capability::Matrix => "matrices or vectors",
            Capability::Unit => "values with units",
        })
    }
}

/// Evaluation errors caused by values outside what an operation supports
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("incompatible units: '{from}' vs '{to}'")]
    IncompatibleUnits { from: String, to: String },

    #[error("function {function} does not accept {capability}")]
    UnsupportedArgument {
        function: String,
        capability: Capability,
    },

    #[error("{0}")]
    UnitExponent(String),

    #[error("indeterminate expression: {0}")]
    Indeterminate(String),

    #[error("{0} is not an integer")]
    NotAnInteger(String),

    #[error("{function}: {message}")]
    OutOfDomain { function: String, message: String },

    #[error("numeric overflow: {0}")]
    Overflow(String),

    #[error("{0}")]
    Unsupported(String),
}

impl Error {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            position,
            message: message.into(),
        }
    }
}

impl From<scical_units::Error> for Error {
    fn from(err: scical_units::Error) -> Self {
        match err {
            scical_units::Error::UnknownUnit(name) => Error::UnknownUnit(name),
            scical_units::Error::Incompatible { from, to } => {
                Error::Domain(DomainError::IncompatibleUnits { from, to })
            }
            scical_units::Error::FractionalExponent { .. } => {
                Error::Domain(DomainError::UnitExponent(err.to_string()))
            }
            other => Error::Domain(DomainError::Unsupported(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message() {
        let err = Error::WrongNumberOfArguments {
            name: "sin".into(),
            given: 2,
            min: 1,
            max: 1,
        };
        assert_eq!(err.to_string(), "Function sin takes 1 arguments, 2 given");

        let err = Error::WrongNumberOfArguments {
            name: "log".into(),
            given: 3,
            min: 1,
            max: 2,
        };
        assert_eq!(err.to_string(), "Function log takes 1 to 2 arguments, 3 given");
    }

    #[test]
    fn unit_errors_map_to_categories() {
        let err: Error = scical_units::Error::UnknownUnit("foo".into()).into();
        assert_eq!(err, Error::UnknownUnit("foo".into()));

        let err: Error = scical_units::Error::Incompatible {
            from: "m".into(),
            to: "s".into(),
        }
        .into();
        assert!(matches!(err, Error::Domain(DomainError::IncompatibleUnits { .. })));
    }
}
