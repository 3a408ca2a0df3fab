//! Local key/value store backing a model.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Attribute mapping of a single model: name to arbitrary JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: HashMap<String, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Insert or overwrite `name`.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Overwrite every key present in `fields`, leaving all others untouched.
    ///
    /// Returns the number of keys written.
    pub fn merge(&mut self, fields: &Map<String, Value>) -> usize {
        for (name, value) in fields {
            self.set(name.clone(), value.clone());
        }
        fields.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Snapshot as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_overwrites_existing_value() {
        let mut attrs = Attributes::new();
        attrs.set("age", json!(30));
        attrs.set("age", json!("thirty"));
        assert_eq!(attrs.get("age"), Some(&json!("thirty")));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn merge_keeps_untouched_keys() {
        let mut attrs = Attributes::new();
        attrs.set("firstName", json!("Alice"));
        attrs.set("lastName", json!("Old"));

        let incoming = json!({ "lastName": "spec", "age": 4 });
        let written = attrs.merge(incoming.as_object().unwrap());

        assert_eq!(written, 2);
        assert_eq!(attrs.get("firstName"), Some(&json!("Alice")));
        assert_eq!(attrs.get("lastName"), Some(&json!("spec")));
        assert_eq!(attrs.get("age"), Some(&json!(4)));
    }

    #[test]
    fn to_json_snapshots_all_values() {
        let mut attrs = Attributes::new();
        attrs.set("a", json!(1));
        attrs.set("b", json!([true]));
        assert_eq!(attrs.to_json(), json!({ "a": 1, "b": [true] }));
    }
}
