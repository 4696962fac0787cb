//! Product entity model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hostdesk_core::types::id::ProductId;

/// A sellable hosting plan, provisioned through one server plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Id of the always-on plugin that provisions this product.
    pub server_plugin: String,
    /// Values of the plugin's product configuration form.
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
}

impl Product {
    /// Creates a product provisioned by `server_plugin`.
    pub fn new(name: impl Into<String>, server_plugin: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            server_plugin: server_plugin.into(),
            options: BTreeMap::new(),
        }
    }

    /// Sets a product option, builder style.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Gets a product option as a string.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }
}
