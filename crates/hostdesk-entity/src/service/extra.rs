//! Backend-specific key/value state attached to a service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key reserved by the lifecycle controller for the suspension reason.
pub const SUSPEND_REASON: &str = "suspend_reason";

/// Open key/value attachment of a service.
///
/// Updates merge into the existing map (union, incoming value wins on a key
/// conflict); nothing is ever dropped by a merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceExtra(BTreeMap<String, Value>);

impl ServiceExtra {
    /// Creates an empty attachment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single key, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a single key, replacing a previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merges `other` into `self`; keys in `other` override.
    pub fn merge(&mut self, other: ServiceExtra) {
        self.0.extend(other.0);
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    /// The recorded suspension reason, if any.
    pub fn suspend_reason(&self) -> Option<&str> {
        self.get_str(SUSPEND_REASON)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ServiceExtra {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
