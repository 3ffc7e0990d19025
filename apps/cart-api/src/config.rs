//! Cart API configuration module.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARTWISE_PORT=8080                                                 │
//! │     CARTWISE_LOG_LEVEL=debug                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $CARTWISE_CONFIG, or                                               │
//! │     ~/.config/cart-api/cartwise.toml (Linux)                           │
//! │     ~/Library/Application Support/com.cartwise.cart-api/cartwise.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:3000, 1 MiB bodies, info logs                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cartwise.toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 3000
//! max_body_bytes = 1048576
//!
//! [logging]
//! level = "info,cartwise_api=debug"
//! format = "compact"  # pretty | compact
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CARTWISE_CONFIG";

// =============================================================================
// Server Settings
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address (default: 0.0.0.0).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest request body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, human friendly.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(ConfigError::InvalidConfig(format!(
                "Unknown log format: '{}'. Valid options: pretty, compact",
                other
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// =============================================================================
// Cart API Configuration
// =============================================================================

/// Cart API configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$CARTWISE_CONFIG`, else the
    ///    platform config dir); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    ///
    /// | Variable                  | Field                   |
    /// |---------------------------|-------------------------|
    /// | `CARTWISE_BIND_ADDR`      | `server.bind_addr`      |
    /// | `CARTWISE_PORT`           | `server.port`           |
    /// | `CARTWISE_MAX_BODY_BYTES` | `server.max_body_bytes` |
    /// | `CARTWISE_LOG_LEVEL`      | `logging.level`         |
    /// | `CARTWISE_LOG_FORMAT`     | `logging.format`        |
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("CARTWISE_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("CARTWISE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CARTWISE_PORT".to_string()))?;
        }

        if let Some(limit) = lookup("CARTWISE_MAX_BODY_BYTES") {
            self.server.max_body_bytes = limit
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CARTWISE_MAX_BODY_BYTES".to_string()))?;
        }

        if let Some(level) = lookup("CARTWISE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("CARTWISE_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "server.bind_addr must not be empty".into(),
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.max_body_bytes must be greater than 0".into(),
            ));
        }

        if EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(ConfigError::InvalidValue("logging.level".to_string()));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cartwise", "cart-api")
            .map(|dirs| dirs.config_dir().join("cartwise.toml"))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [logging]
            format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config
            .apply_overrides(lookup(&[
                ("CARTWISE_BIND_ADDR", "127.0.0.1"),
                ("CARTWISE_PORT", "9000"),
                ("CARTWISE_MAX_BODY_BYTES", "2048"),
                ("CARTWISE_LOG_LEVEL", "debug"),
                ("CARTWISE_LOG_FORMAT", "COMPACT"),
            ]))
            .unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.server.max_body_bytes, 2048);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_invalid_env_override() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_overrides(lookup(&[("CARTWISE_PORT", "not-a-port")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for CARTWISE_PORT");

        assert!(config
            .apply_overrides(lookup(&[("CARTWISE_LOG_FORMAT", "xml")]))
            .is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::default();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());

        config.server.max_body_bytes = 1;
        config.server.bind_addr = " ".to_string();
        assert!(config.validate().is_err());

        config.server.bind_addr = "127.0.0.1".to_string();
        config.logging.level = "info,cartwise_api=debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = ApiConfig::from_file(std::path::Path::new("/nonexistent/cartwise.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let config = ApiConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[logging]"));
    }
}
