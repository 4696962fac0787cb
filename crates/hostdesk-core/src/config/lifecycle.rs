//! Service lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Settings consumed by the lifecycle controller's collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Locale used to resolve user-facing default texts.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Overrides the localized default suspend reason when set.
    #[serde(default)]
    pub suspend_reason: Option<String>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            suspend_reason: None,
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}
