//! `scical` - command-line scientific calculator
//!
//! Usage:
//!   scical '1in to cm' 'x^2 = 4'
//!   echo '2 km/h to m/s' | scical --mode approximate --json

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scical_engine::{Engine, Markup, Mode, NumeralSystem, UnitDisplay};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(name = "scical")]
#[clap(about = "Units-aware scientific calculator")]
struct Args {
    /// Expressions to calculate; read one per line from stdin when omitted
    expressions: Vec<String>,

    /// TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Exact or approximate results
    #[clap(short, long, value_parser = ["exact", "approximate"])]
    mode: Option<String>,

    /// Numeral system of the output
    #[clap(short, long, value_parser = ["binary", "octal", "decimal", "hexadecimal", "roman"])]
    base: Option<String>,

    /// Significant digits (fractional digits for other bases)
    #[clap(short, long)]
    digits: Option<u32>,

    /// How units are shown
    #[clap(short, long, value_parser = ["as-is", "to-base", "to-best"])]
    units: Option<String>,

    /// Output markup
    #[clap(long, value_parser = ["plain", "html"])]
    markup: Option<String>,

    /// Print one JSON object per input
    #[clap(long)]
    json: bool,

    /// Log level when RUST_LOG is not set
    #[clap(long)]
    log_level: Option<String>,

    /// Log output format
    #[clap(long, value_enum)]
    log_format: Option<LogFormat>,
}

/// Read a lowercase/kebab-case option through the serde names.
fn choice<T: serde::de::DeserializeOwned>(name: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .with_context(|| format!("unknown value '{}'", name))
}

impl Args {
    /// Flags override every other configuration layer.
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        let format = &mut settings.format;
        if let Some(mode) = &self.mode {
            format.mode = choice::<Mode>(mode)?;
        }
        if let Some(base) = &self.base {
            format.numeral_system = choice::<NumeralSystem>(base)?;
        }
        if let Some(digits) = self.digits {
            format.digits = digits;
        }
        if let Some(units) = &self.units {
            format.unit_display = choice::<UnitDisplay>(units)?;
        }
        if let Some(markup) = &self.markup {
            format.markup = choice::<Markup>(markup)?;
        }
        if let Some(level) = &self.log_level {
            settings.log.level = level.clone();
        }
        if let Some(log_format) = self.log_format {
            settings.log.json = log_format == LogFormat::Json;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Failure<'a> {
    input: &'a str,
    error: String,
}

fn build_engine(settings: &Settings) -> Result<Engine> {
    let mut engine = Engine::new().context("failed to build the unit and constant tables")?;
    for (code, rate) in &settings.currencies {
        let eur_per_unit = scical_units::rational_from_decimal(rate)
            .with_context(|| format!("invalid exchange rate '{}' for {}", rate, code))?;
        engine
            .define_currency(code, eur_per_unit)
            .with_context(|| format!("cannot define currency {}", code))?;
        debug!(code = %code, rate = %rate, "defined currency");
    }
    Ok(engine)
}

/// Calculate one input and print it; returns whether it succeeded.
fn run_one(
    engine: &Engine,
    settings: &Settings,
    json: bool,
    input: &str,
    out: &mut impl Write,
) -> Result<bool> {
    let outcome = engine.calculate(input, &settings.format);
    match (&outcome, json) {
        (Ok(calc), true) => writeln!(out, "{}", serde_json::to_string(&calc.report(input))?)?,
        (Ok(calc), false) => {
            writeln!(out, "{}", calc.display)?;
            for hint in &calc.hints {
                writeln!(out, "note: {}", hint)?;
            }
        }
        (Err(err), true) => {
            let failure = Failure {
                input,
                error: err.to_string(),
            };
            writeln!(out, "{}", serde_json::to_string(&failure)?)?;
        }
        (Err(err), false) => eprintln!("error: {}", err),
    }
    Ok(outcome.is_ok())
}

fn run(args: Args) -> Result<bool> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings)?;
    logging::init_logging(&settings.log)?;
    info!(format = ?settings.format, "starting calculator");

    let engine = build_engine(&settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    if args.expressions.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            all_ok &= run_one(&engine, &settings, args.json, input, &mut out)?;
        }
    } else {
        for input in &args.expressions {
            all_ok &= run_one(&engine, &settings, args.json, input, &mut out)?;
        }
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
