//! Plugin system configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Serialized list of enabled plugin ids (a JSON array).
    ///
    /// Kept as the raw string the settings store hands out; it is decoded
    /// exactly once when the plugin registry is constructed.
    #[serde(default = "default_enabled")]
    pub enabled: String,
    /// Path to the package manifest used to resolve plugin versions.
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            manifest: default_manifest(),
        }
    }
}

fn default_enabled() -> String {
    "[]".to_string()
}

fn default_manifest() -> String {
    "composer.lock".to_string()
}
