//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional base file, an optional environment overlay, and environment
//! variables prefixed with `LAUNCHER_`. Every field has a default, so an
//! empty configuration is valid.

pub mod logging;
pub mod plugin;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Plugin runtime settings.
    #[serde(default)]
    pub plugins: PluginConfig,
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables prefixed with `LAUNCHER` (`__` separates nested keys, e.g.
    /// `LAUNCHER_PLUGINS__QUERY_TIMEOUT_MS=500`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration from an explicit base file plus the `config/{env}` overlay.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LAUNCHER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_files_yield_defaults() {
        let config = AppConfig::load_from("does/not/exist", "nowhere").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.plugins.init_timeout_ms, 30_000);
        assert!(config.plugins.settings.is_empty());
    }

    #[test]
    fn test_load_plugin_settings_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[logging]
format = "json"

[plugins]
query_timeout_ms = 500

[plugins.settings.websearch]
disabled = true
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = AppConfig::load_from(&path, "nowhere").unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.plugins.query_timeout_ms, 500);
        assert!(config.plugins.settings["websearch"].disabled);
    }
}
