//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `MIDDLEWARE__*` environment variables
//! (e.g. `MIDDLEWARE__RAISE_ERRORS=true`, `MIDDLEWARE__LOGGING__LEVEL=debug`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::logging::LogFormat;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "MIDDLEWARE";

/// Middleware settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Install the simulated middleware at the head of the chain
    pub simulated: bool,
    /// Abort a tick on the first middleware error instead of logging it
    pub raise_errors: bool,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulated: true,
            raise_errors: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter
    pub level: String,
    /// Output format (pretty, json, compact)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load from a file (if it exists) and environment variables.
    ///
    /// # Errors
    ///
    /// [`MiddlewareError::Config`](crate::error::MiddlewareError::Config) when
    /// the file cannot be parsed or a value has the wrong type.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load from environment variables only.
    pub fn from_env() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MiddlewareError;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.simulated);
        assert!(!config.raise_errors);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("market-middleware-missing-config.toml");
        let _ = fs::remove_file(&path);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_toml() {
        let path = std::env::temp_dir().join(format!(
            "market-middleware-config-{}.toml",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"
simulated = false
raise_errors = true

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = Config::load(&path);
        fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert!(!config.simulated);
        assert!(config.raise_errors);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "market-middleware-partial-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "raise_errors = true\n").unwrap();

        let config = Config::load(&path);
        fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert!(config.simulated);
        assert!(config.raise_errors);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let path = std::env::temp_dir().join(format!(
            "market-middleware-invalid-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "simulated = \"sometimes\"\n").unwrap();

        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, MiddlewareError::Config(_)));
        assert!(err.to_string().starts_with("configuration error"));
    }
}
