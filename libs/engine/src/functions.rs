//! Function registry for calculator functions
//!
//! Maps function names and aliases to their arity, the kinds of arguments
//! they accept, and their implementation.
//!
//! Uses a compile-time perfect hash map (phf) for O(1) function name lookups with zero runtime allocation.

use crate::bridge::{self, Quantity};
use crate::error::{Capability, DomainError, Error, Result};
use crate::numeric::{elementary, Constant, Value};
use crate::ops;
use phf::phf_map;

/// What a function argument may be besides a plain scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepts {
    pub matrix: bool,
    pub unit: bool,
}

const SCALAR: Accepts = Accepts {
    matrix: false,
    unit: false,
};
const WITH_UNIT: Accepts = Accepts {
    matrix: false,
    unit: true,
};
const ANY: Accepts = Accepts {
    matrix: true,
    unit: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// A one-argument elementary function named by the canonical name.
    Elementary,
    Log,
    Log10,
    Log2,
    Sqrt,
    Abs,
    Round,
    CircleArea,
    CircleCircumference,
    SphereVolume,
    SphereSurface,
}

/// Function metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionMetadata {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub accepts: Accepts,
    kind: Kind,
}

macro_rules! f {
    ($name:literal, $kind:ident) => {
        f!($name, 1, 1, SCALAR, $kind)
    };
    ($name:literal, $min:literal, $max:literal, $accepts:ident, $kind:ident) => {
        FunctionMetadata {
            name: $name,
            min_args: $min,
            max_args: $max,
            accepts: $accepts,
            kind: Kind::$kind,
        }
    };
}

/// Static compile-time function registry using perfect hash map
static FUNCTIONS_BY_NAME: phf::Map<&'static str, FunctionMetadata> = phf_map! {
    // Trigonometric functions
    "sin" => f!("sin", Elementary),
    "cos" => f!("cos", Elementary),
    "tan" => f!("tan", Elementary),
    "cot" => f!("cot", Elementary),
    "sec" => f!("sec", Elementary),
    "cosec" => f!("cosec", Elementary),
    "csc" => f!("cosec", Elementary),

    // Inverse trigonometric functions
    "arcsin" => f!("arcsin", Elementary),
    "asin" => f!("arcsin", Elementary),
    "arccos" => f!("arccos", Elementary),
    "acos" => f!("arccos", Elementary),
    "arctan" => f!("arctan", Elementary),
    "atan" => f!("arctan", Elementary),
    "arccot" => f!("arccot", Elementary),
    "acot" => f!("arccot", Elementary),
    "arcsec" => f!("arcsec", Elementary),
    "asec" => f!("arcsec", Elementary),
    "arccosec" => f!("arccosec", Elementary),
    "acsc" => f!("arccosec", Elementary),
    "arccsc" => f!("arccosec", Elementary),

    // Hyperbolic functions
    "sinh" => f!("sinh", Elementary),
    "cosh" => f!("cosh", Elementary),
    "tanh" => f!("tanh", Elementary),
    "coth" => f!("coth", Elementary),
    "sech" => f!("sech", Elementary),
    "cosech" => f!("cosech", Elementary),
    "csch" => f!("cosech", Elementary),

    // Inverse hyperbolic functions
    "arsinh" => f!("arsinh", Elementary),
    "asinh" => f!("arsinh", Elementary),
    "arcsinh" => f!("arsinh", Elementary),
    "arcosh" => f!("arcosh", Elementary),
    "acosh" => f!("arcosh", Elementary),
    "arccosh" => f!("arcosh", Elementary),
    "artanh" => f!("artanh", Elementary),
    "atanh" => f!("artanh", Elementary),
    "arctanh" => f!("artanh", Elementary),
    "arcoth" => f!("arcoth", Elementary),
    "acoth" => f!("arcoth", Elementary),
    "arccoth" => f!("arcoth", Elementary),
    "arsech" => f!("arsech", Elementary),
    "asech" => f!("arsech", Elementary),
    "arcsech" => f!("arsech", Elementary),
    "arcosech" => f!("arcosech", Elementary),
    "acsch" => f!("arcosech", Elementary),
    "arccsch" => f!("arcosech", Elementary),
    "arccosech" => f!("arcosech", Elementary),

    // Exponentials and logarithms
    "exp" => f!("exp", Elementary),
    "ln" => f!("ln", Elementary),
    "log" => f!("log", 1, 2, SCALAR, Log),
    "log10" => f!("log10", Log10),
    "log2" => f!("log2", Log2),

    // Roots
    "√" => f!("√", 1, 1, ANY, Sqrt),
    "sqrt" => f!("√", 1, 1, ANY, Sqrt),

    // Error function
    "erf" => f!("erf", Elementary),
    "erfc" => f!("erfc", Elementary),

    // Miscellaneous
    "abs" => f!("abs", 1, 1, WITH_UNIT, Abs),
    "floor" => f!("floor", Round),
    "ceil" => f!("ceil", Round),
    "ceiling" => f!("ceil", Round),

    // Geometry
    "circle_area" => f!("circle_area", 1, 1, WITH_UNIT, CircleArea),
    "circle_circumference" => f!("circle_circumference", 1, 1, WITH_UNIT, CircleCircumference),
    "circle_circ" => f!("circle_circumference", 1, 1, WITH_UNIT, CircleCircumference),
    "sphere_volume" => f!("sphere_volume", 1, 1, WITH_UNIT, SphereVolume),
    "sphere_vol" => f!("sphere_volume", 1, 1, WITH_UNIT, SphereVolume),
    "sphere_surface" => f!("sphere_surface", 1, 1, WITH_UNIT, SphereSurface),
    "sphere_surf" => f!("sphere_surface", 1, 1, WITH_UNIT, SphereSurface),
};

impl FunctionMetadata {
    pub fn check_arity(&self, called_as: &str, given: usize) -> Result<()> {
        if given < self.min_args || given > self.max_args {
            return Err(Error::WrongNumberOfArguments {
                name: called_as.to_string(),
                given,
                min: self.min_args,
                max: self.max_args,
            });
        }
        Ok(())
    }

    /// Check an evaluated argument against what this function accepts.
    /// A unit that the function cannot take is dropped when dimensionless.
    fn admit(&self, arg: Value) -> Result<Value> {
        let refuse = |capability| {
            Err(Error::Domain(DomainError::UnsupportedArgument {
                function: self.name.to_string(),
                capability,
            }))
        };
        match arg {
            Value::Matrix(_) if !self.accepts.matrix => refuse(Capability::Matrix),
            Value::Quantity(ref q) if !self.accepts.unit => {
                if q.unit.is_dimensionless() {
                    bridge::to_dimensionless(arg)
                } else {
                    refuse(Capability::Unit)
                }
            }
            Value::Boolean(_) | Value::Solutions(_) | Value::UnsolvedEquality(..) => {
                refuse(Capability::Scalar)
            }
            other => Ok(other),
        }
    }

    /// Apply the function to evaluated arguments.
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        self.check_arity(self.name, args.len())?;
        let mut args = args
            .into_iter()
            .map(|arg| self.admit(arg))
            .collect::<Result<Vec<_>>>()?;
        let base = if args.len() > 1 { args.pop() } else { None };
        let Some(x) = args.pop() else {
            return Err(Error::WrongNumberOfArguments {
                name: self.name.to_string(),
                given: 0,
                min: self.min_args,
                max: self.max_args,
            });
        };

        match self.kind {
            Kind::Elementary => elementary::apply(self.name, x),
            Kind::Log => match base {
                Some(base) => elementary::log(x, base),
                None => elementary::apply("ln", x),
            },
            Kind::Log10 => elementary::log(x, Value::integer(10)),
            Kind::Log2 => elementary::log(x, Value::integer(2)),
            Kind::Sqrt => sqrt(x),
            Kind::Abs => match x {
                Value::Quantity(q) => Ok(Quantity::value(elementary::abs(q.magnitude)?, q.unit)),
                other => elementary::abs(other),
            },
            Kind::Round => elementary::round(self.name, x),
            Kind::CircleArea => scaled_power(Value::one(), x, 2),
            Kind::CircleCircumference => scaled_power(Value::integer(2), x, 1),
            Kind::SphereVolume => scaled_power(Value::fraction(4, 3), x, 3),
            Kind::SphereSurface => scaled_power(Value::integer(4), x, 2),
        }
    }
}

fn sqrt(x: Value) -> Result<Value> {
    match x {
        Value::Matrix(m) => Ok(Value::Matrix(m.try_map(|cell| sqrt(cell.clone()))?)),
        other => ops::pow(other, Value::fraction(1, 2)),
    }
}

/// `coefficient · π · r^n`
fn scaled_power(coefficient: Value, r: Value, n: i64) -> Result<Value> {
    let pi = ops::mul(coefficient, Value::Constant(Constant::Pi))?;
    ops::mul(pi, ops::pow(r, Value::integer(n))?)
}

/// Function registry
///
/// Provides fast function lookups using a compile-time perfect hash map.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionRegistry;

impl FunctionRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a function name or alias.
    pub fn resolve(&self, name: &str) -> Option<&'static FunctionMetadata> {
        FUNCTIONS_BY_NAME.get(name)
    }

    /// Validate the argument count of a call as written.
    pub fn validate_args(&self, name: &str, arg_count: usize) -> Result<&'static FunctionMetadata> {
        let metadata = self
            .resolve(name)
            .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;
        metadata.check_arity(name, arg_count)?;
        Ok(metadata)
    }
}
