use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid unit syntax at position {pos}: {message}")]
    Syntax { pos: usize, message: &'static str },

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unit '{0}' does not allow metric prefixes")]
    NotPrefixable(String),

    #[error("incompatible units: '{from}' vs '{to}'")]
    Incompatible { from: String, to: String },

    #[error("cannot raise '{unit}' to the power {exponent}: exponents must stay integral")]
    FractionalExponent { unit: String, exponent: String },

    #[error("unit '{0}' is already defined")]
    DuplicateUnit(String),

    #[error("unit database error: {0}")]
    Db(String),
}
