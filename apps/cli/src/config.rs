//! Layered configuration: built-in defaults, an optional TOML file, then
//! `SCICAL_*` environment variables. Command-line flags are applied last by
//! the caller.
//!
//! Nested keys use a double underscore in the environment:
//! `SCICAL_FORMAT__MODE=approximate`, `SCICAL_LOG__LEVEL=debug`.

use anyhow::{Context, Result};
use scical_engine::FormatConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const ENV_PREFIX: &str = "SCICAL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the scical crates when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub format: FormatConfig,
    pub log: LoggingConfig,
    /// Extra currencies: ISO code to the value of one unit in euros, as a
    /// decimal string (`USD = "0.92"`).
    pub currencies: BTreeMap<String, String>,
}

impl Settings {
    /// Merge defaults, `file` (when given) and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder().add_source(
            config::Config::try_from(&Settings::default())
                .context("failed to encode default settings")?,
        );
        if let Some(path) = file {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize::<Settings>()
            .context("invalid configuration")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scical_engine::{Mode, NumeralSystem, UnitDisplay};
    use std::fs;

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.format, FormatConfig::default());
        assert_eq!(settings.log.level, "warn");
        assert!(settings.currencies.is_empty());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("scical-settings-{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
[format]
mode = "approximate"
numeral_system = "hexadecimal"
digits = 12
unit_display = "to-best"

[log]
level = "debug"

[currencies]
USD = "0.92"
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.format.mode, Mode::Approximate);
        assert_eq!(settings.format.numeral_system, NumeralSystem::Hexadecimal);
        assert_eq!(settings.format.digits, 12);
        assert_eq!(settings.format.unit_display, UnitDisplay::ToBest);
        assert_eq!(settings.log.level, "debug");
        assert!(!settings.log.json);
        assert_eq!(settings.currencies.get("USD").map(String::as_str), Some("0.92"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("scical-does-not-exist.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }
}
