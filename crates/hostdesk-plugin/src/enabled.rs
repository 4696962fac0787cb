//! The set of plugin ids switched on by the operator.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

/// Ordered set of enabled plugin ids.
///
/// Membership is a hash lookup; insertion order is kept for listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledSet {
    /// Ids in first-seen order.
    order: Vec<String>,
    /// Membership index.
    members: HashSet<String>,
}

impl EnabledSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the serialized list handed out by the settings store.
    ///
    /// A JSON array keeps its string elements, a bare JSON string becomes a
    /// one-element set, and anything else (null, objects, malformed input)
    /// yields an empty set.
    pub fn from_json(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Enabled plugin list is not valid JSON, treating as empty");
                return Self::new();
            }
        };

        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(id) => Some(id),
                    other => {
                        warn!(entry = %other, "Ignoring non-string enabled plugin entry");
                        None
                    }
                })
                .collect(),
            Value::String(id) => std::iter::once(id).collect(),
            Value::Null => Self::new(),
            other => {
                warn!(value = %other, "Unexpected enabled plugin list shape, treating as empty");
                Self::new()
            }
        }
    }

    /// Adds an id; duplicates keep their first position.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.members.insert(id.clone()) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// Checks membership.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Ids in listing order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<String> for EnabledSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for EnabledSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_keeps_order_and_dedupes() {
        let set = EnabledSet::from_json(r#"["notes", "affiliate", "notes"]"#);
        assert_eq!(set.ids(), ["notes", "affiliate"]);
        assert!(set.contains("affiliate"));
        assert!(!set.contains("cpanel"));
    }

    #[test]
    fn test_scalar_string_is_wrapped() {
        let set = EnabledSet::from_json(r#""notes""#);
        assert_eq!(set.ids(), ["notes"]);
    }

    #[test]
    fn test_null_and_garbage_are_empty() {
        assert!(EnabledSet::from_json("null").is_empty());
        assert!(EnabledSet::from_json("not json").is_empty());
        assert!(EnabledSet::from_json(r#"{"notes": true}"#).is_empty());
    }

    #[test]
    fn test_non_string_entries_skipped() {
        let set = EnabledSet::from_json(r#"["notes", 7, null]"#);
        assert_eq!(set.len(), 1);
    }
}
