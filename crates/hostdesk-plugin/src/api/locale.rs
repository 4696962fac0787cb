//! Localization collaborator.

use std::collections::HashMap;

use hostdesk_core::config::LifecycleConfig;

/// Key of the default reason recorded when a service is suspended without
/// an explicit one.
pub const EXPIRE_SUSPEND: &str = "service.expire_suspend";

/// Resolves user-facing texts.
pub trait Localizer: Send + Sync {
    /// Text for `key`. Unknown keys resolve to the key itself.
    fn text(&self, key: &str) -> String;
}

/// Localizer over a fixed table of texts.
#[derive(Debug, Clone, Default)]
pub struct StaticLocalizer {
    /// Key → text.
    texts: HashMap<String, String>,
}

impl StaticLocalizer {
    /// Built-in texts for `locale`; unsupported locales fall back to English.
    pub fn for_locale(locale: &str) -> Self {
        let expire_suspend = match locale {
            "zh_CN" | "zh-CN" => "服务已到期",
            _ => "Service expired",
        };
        Self::default().with_text(EXPIRE_SUSPEND, expire_suspend)
    }

    /// Built-in texts for the configured locale, with the configured
    /// suspend reason taking precedence.
    pub fn from_config(config: &LifecycleConfig) -> Self {
        let localizer = Self::for_locale(&config.locale);
        match config.suspend_reason.as_deref() {
            Some(reason) if !reason.is_empty() => localizer.with_text(EXPIRE_SUSPEND, reason),
            _ => localizer,
        }
    }

    /// Sets a text.
    pub fn with_text(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(key.into(), text.into());
        self
    }
}

impl Localizer for StaticLocalizer {
    fn text(&self, key: &str) -> String {
        self.texts
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
