#![allow(dead_code)]

use scical_engine::{Bindings, Engine, Error, FormatConfig, Mode, Value};
use std::sync::OnceLock;

static ENGINE: OnceLock<Engine> = OnceLock::new();

pub fn engine() -> &'static Engine {
    ENGINE.get_or_init(|| Engine::new().unwrap_or_else(|e| panic!("failed to build engine: {}", e)))
}

/// Evaluate an expression without bindings
pub fn eval(expr: &str) -> Value {
    engine()
        .evaluate(expr, &Bindings::new())
        .unwrap_or_else(|e| panic!("evaluating '{}' failed: {}", expr, e))
}

pub fn eval_err(expr: &str) -> Error {
    match engine().evaluate(expr, &Bindings::new()) {
        Ok(value) => panic!("expected '{}' to fail, got {}", expr, value),
        Err(err) => err,
    }
}

/// Display text with the given configuration
pub fn show_with(expr: &str, config: &FormatConfig) -> String {
    engine()
        .calculate(expr, config)
        .unwrap_or_else(|e| panic!("calculating '{}' failed: {}", expr, e))
        .display
}

/// Display text with the default (exact) configuration
pub fn show(expr: &str) -> String {
    show_with(expr, &FormatConfig::default())
}

pub fn approximate() -> FormatConfig {
    FormatConfig {
        mode: Mode::Approximate,
        ..FormatConfig::default()
    }
}

/// Approximate numeric value of a result, quantities by magnitude
pub fn as_f64(value: &Value) -> f64 {
    let value = match value {
        Value::Quantity(q) => &q.magnitude,
        other => other,
    };
    scical_engine::numeric::approx::to_f64(value)
        .unwrap_or_else(|| panic!("{} has no numeric value", value))
}
