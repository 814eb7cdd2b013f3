//! Configuration management for cpekit consumers

use cpekit_core::{Cpe, Error, Format, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (CPEKIT_ prefix)
    pub fn merge_env(mut self) -> Self {
        if let Ok(val) = std::env::var("CPEKIT_DEFAULT_FORMAT") {
            match val.parse() {
                Ok(format) => self.output.default_format = format,
                Err(e) => warn!("Ignoring CPEKIT_DEFAULT_FORMAT: {}", e),
            }
        }

        // Logging
        if let Ok(val) = std::env::var("CPEKIT_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("CPEKIT_LOG_FORMAT") {
            self.logging.format = val;
        }

        self
    }

    /// Serialize a record in the configured default binding
    pub fn render(&self, cpe: &Cpe) -> String {
        cpe.generate(self.output.default_format)
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Binding used when a caller does not pick one (uri, wfn, formatted)
    #[serde(default)]
    pub default_format: Format,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn default_format(mut self, format: Format) -> Self {
        self.config.output.default_format = format;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.output.default_format, Format::Uri);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [output]
            default_format = "formatted"

            [logging]
            level = "debug"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.output.default_format, Format::Formatted);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_rejects_unknown_format() {
        let err = Config::from_toml("[output]\ndefault_format = \"xml\"\n").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::from_file("/nonexistent/cpekit.toml").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .default_format(Format::Wfn)
            .log_level("warn")
            .log_format("json")
            .build();

        assert_eq!(config.output.default_format, Format::Wfn);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_merge_env() {
        std::env::set_var("CPEKIT_DEFAULT_FORMAT", "wfn");
        std::env::set_var("CPEKIT_LOG_LEVEL", "trace");
        let config = Config::default().merge_env();
        std::env::remove_var("CPEKIT_DEFAULT_FORMAT");
        std::env::remove_var("CPEKIT_LOG_LEVEL");

        assert_eq!(config.output.default_format, Format::Wfn);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_render_uses_default_format() {
        let cpe = Cpe::parse("cpe:/a:microsoft:internet_explorer:8.0.6001:beta").unwrap();

        let config = Config::default();
        assert_eq!(config.render(&cpe), "cpe:/a:microsoft:internet_explorer:8.0.6001:beta");

        let config = Config::builder().default_format(Format::Formatted).build();
        assert_eq!(
            config.render(&cpe),
            "cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*"
        );
    }
}
