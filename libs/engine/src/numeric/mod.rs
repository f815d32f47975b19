//! In-process numeric engine: exact and floating numbers, symbolic sums,
//! products and powers, elementary functions, equality and solving.

pub mod approx;
pub mod arith;
pub mod compare;
pub mod elementary;
pub mod float;
pub mod matrix;
pub mod order;
pub mod solve;
pub mod value;

pub use float::Float;
pub use matrix::Matrix;
pub use value::{Constant, Sign, Solutions, Value};
