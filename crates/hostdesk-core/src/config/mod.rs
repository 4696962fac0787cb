//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file overlaid with `HOSTDESK__*` environment variables. Each
//! sub-module represents a logical configuration section, and every field has
//! a default so an empty configuration is valid.

pub mod lifecycle;
pub mod logging;
pub mod plugin;

use serde::{Deserialize, Serialize};

pub use self::lifecycle::LifecycleConfig;
pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin system settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Service lifecycle settings.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file (optional) and the environment.
    ///
    /// `path` is given without requiring the file to exist; environment
    /// variables prefixed with `HOSTDESK` and separated by `__` override it,
    /// e.g. `HOSTDESK__PLUGINS__ENABLED='["ticket-notes"]'`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("HOSTDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(path, "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from an inline TOML string.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
