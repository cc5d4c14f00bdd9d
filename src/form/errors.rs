//! Per-field validation messages returned by a rejected submission.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key used for messages that are not attributed to any field, such as
/// transport or storage failures.
pub const GENERAL_KEY: &str = "form";

/// Mapping of field name to the latest validation message for that field.
///
/// A field absent from the map has no active error. Insertion order is kept so
/// messages render in the order the backend reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, String>);

impl ErrorMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding one message with no field attribution.
    pub fn general(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(GENERAL_KEY, message);
        map
    }

    /// Sets the message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Returns the message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` if `field` has an active error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns `true` if no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates `(field, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_empty() {
        let map = ErrorMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get("email"), None);
    }

    #[test]
    fn insert_replaces_existing_message() {
        let mut map = ErrorMap::new();
        map.insert("email", "required");
        map.insert("email", "already taken");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("email"), Some("already taken"));
    }

    #[test]
    fn iter_keeps_insertion_order() {
        let map: ErrorMap = [("password", "too short"), ("current_password", "invalid")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["password", "current_password"]);
    }

    #[test]
    fn general_uses_general_key() {
        let map = ErrorMap::general("server unreachable");
        assert!(map.contains(GENERAL_KEY));
        assert_eq!(map.get(GENERAL_KEY), Some("server unreachable"));
    }

    #[test]
    fn clear_removes_all() {
        let mut map = ErrorMap::general("boom");
        map.insert("name", "required");
        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn deserializes_from_flat_object() {
        let map: ErrorMap = serde_json::from_str(r#"{"email":"already taken"}"#).unwrap();
        assert_eq!(map.get("email"), Some("already taken"));
    }
}
