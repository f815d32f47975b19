//! Scical Engine - expression engine of a units-aware scientific calculator
//!
//! Turns a line of calculator input into a formatted result:
//! 1. **Lexer/Parser** → expression tree ([`Node`])
//! 2. **Evaluation** → [`Value`] (exact numbers, symbolic forms, quantities, matrices)
//! 3. **Formatter** → display text under a [`FormatConfig`]
//!
//! # Architecture Overview
//!
//! ```text
//! Input String
//!      |
//!   Parser (+ Registry: units, constants, functions) -> Node
//!      |
//! Evaluate (numeric engine, quantity bridge) -> Value
//!      |
//! Format (+ hints) -> String
//! ```
//!
//! # Example
//!
//! ```
//! use scical_engine::{Engine, FormatConfig, Mode};
//!
//! let engine = Engine::new().unwrap();
//! let config = FormatConfig {
//!     mode: Mode::Approximate,
//!     ..FormatConfig::default()
//! };
//! let calc = engine.calculate("1in to cm", &config).unwrap();
//! assert_eq!(calc.display, "2.54 cm");
//! ```

pub mod ast;
pub mod bridge;
pub mod constants;
pub mod engine;
pub mod error;
pub mod format;
pub mod functions;
pub mod hints;
pub mod lexer;
pub mod numeric;
pub mod ops;
pub mod parser;
pub mod registry;
pub mod token;

// Re-export main types
pub use ast::{Bindings, Evaluate, Node};
pub use bridge::Quantity;
pub use engine::{Calculation, Engine, Report};
pub use error::{Capability, DomainError, Error, Result};
pub use format::{FormatConfig, Markup, Mode, NumeralSystem, UnitDisplay};
pub use hints::Hint;
pub use numeric::Value;
pub use registry::Registry;
