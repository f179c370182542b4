//! Collection control: keyed entries sharing one element schema

use super::error::{join_path, FormError, FormResult};
use super::field::EditableField;
use super::schema::{keyed_entries, FieldSchema};
use serde_json::{Map, Value};

/// Editable counterpart of a sequence shape.
///
/// Entries are keyed, ordered by insertion, and all built from the same
/// element schema. Any entry may be added or removed at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormCollection {
    element: FieldSchema,
    entries: Vec<(String, EditableField)>,
}

impl FormCollection {
    /// Empty collection of `element` entries
    pub fn new(element: FieldSchema) -> Self {
        Self::from_parts(element, Vec::new())
    }

    pub(crate) fn from_parts(element: FieldSchema, entries: Vec<(String, EditableField)>) -> Self {
        Self { element, entries }
    }

    pub fn element(&self) -> &FieldSchema {
        &self.element
    }

    /// Snapshot keyed by entry key, in insertion order
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value()))
            .collect();
        Value::Object(map)
    }

    /// Entry values in insertion order, without keys
    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, entry)| entry.value()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&EditableField> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut EditableField> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    fn check_element(&self, key: &str, entry: &EditableField) -> FormResult<()> {
        if entry.schema() != self.element {
            return Err(FormError::SchemaMismatch {
                name: key.to_string(),
            });
        }
        Ok(())
    }

    /// Build a fresh entry from the element schema
    pub fn create_entry(&self, initial: Option<&Value>) -> FormResult<EditableField> {
        self.element.instantiate(initial)
    }

    /// Append an entry under a new key
    pub fn add_control(&mut self, key: &str, entry: EditableField) -> FormResult<()> {
        self.check_element(key, &entry)?;
        if self.contains(key) {
            return Err(FormError::DuplicateControl {
                name: key.to_string(),
            });
        }
        tracing::debug!("collection add_control '{key}'");
        self.entries.push((key.to_string(), entry));
        Ok(())
    }

    /// Append an entry under the lowest unused numeric key, returning the key
    pub fn push(&mut self, entry: EditableField) -> FormResult<String> {
        let key = (0..)
            .map(|i| i.to_string())
            .find(|k| !self.contains(k))
            .unwrap_or_default();
        self.add_control(&key, entry)?;
        Ok(key)
    }

    /// Remove an entry, returning it if it was present
    pub fn remove_control(&mut self, key: &str) -> Option<EditableField> {
        tracing::debug!("collection remove_control '{key}'");
        self.entries
            .iter()
            .position(|(k, _)| k == key)
            .map(|index| self.entries.remove(index).1)
    }

    /// Replace an entry, or append it when absent. Returns the replaced entry.
    pub fn set_control(
        &mut self,
        key: &str,
        entry: EditableField,
    ) -> FormResult<Option<EditableField>> {
        self.check_element(key, &entry)?;
        match self.get_mut(key) {
            Some(existing) => Ok(Some(std::mem::replace(existing, entry))),
            None => {
                self.entries.push((key.to_string(), entry));
                Ok(None)
            }
        }
    }

    /// Pair supplied items with entry keys. Objects match by key, arrays by
    /// position over the entries in insertion order.
    fn match_entries<'a>(
        &self,
        path: &str,
        value: &'a Value,
    ) -> FormResult<Vec<(String, &'a Value)>> {
        match value {
            Value::Array(items) => Ok(self
                .entries
                .iter()
                .zip(items)
                .map(|((key, _), item)| (key.clone(), item))
                .collect()),
            _ => keyed_entries(path, value),
        }
    }

    pub(crate) fn set_value_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        if let Value::Array(items) = value {
            if items.len() != self.entries.len() {
                return Err(FormError::shape_mismatch(
                    path,
                    format!(
                        "expected {} entries, found {}",
                        self.entries.len(),
                        items.len()
                    ),
                ));
            }
        }
        let supplied = self.match_entries(path, value)?;

        if let Some((missing, _)) = self
            .entries
            .iter()
            .find(|(k, _)| !supplied.iter().any(|(s, _)| s == k))
        {
            return Err(FormError::shape_mismatch(
                path,
                format!("missing value for entry '{missing}'"),
            ));
        }
        if let Some((extra, _)) = supplied.iter().find(|(s, _)| !self.contains(s)) {
            return Err(FormError::shape_mismatch(
                path,
                format!("entry '{extra}' is not currently present"),
            ));
        }

        for (key, item) in supplied {
            if let Some(entry) = self.get_mut(&key) {
                entry.set_value_at(&join_path(path, &key), item)?;
            }
        }
        Ok(())
    }

    pub(crate) fn patch_value_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        for (key, item) in self.match_entries(path, value)? {
            if let Some(entry) = self.get_mut(&key) {
                entry.patch_value_at(&join_path(path, &key), item)?;
            }
        }
        Ok(())
    }

    pub(crate) fn reset_at(&mut self, path: &str, value: Option<&Value>) -> FormResult<()> {
        let supplied = value.map(|v| self.match_entries(path, v)).transpose()?;
        for (key, entry) in &mut self.entries {
            let item = supplied
                .as_ref()
                .and_then(|s| s.iter().find(|(k, _)| k == key).map(|(_, v)| *v));
            entry.reset_at(&join_path(path, key), item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::schema::map_shape;
    use crate::state::forms::shape::Shape;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn flags() -> FormCollection {
        FormCollection::new(map_shape(&Shape::boolean()))
    }

    fn keys(collection: &FormCollection) -> Vec<String> {
        collection.value().as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut collection = flags();
        let foo = collection.create_entry(Some(&json!(true))).unwrap();
        let bar = collection.create_entry(Some(&json!(false))).unwrap();
        collection.add_control("foo", foo).unwrap();
        collection.add_control("bar", bar).unwrap();

        assert_eq!(keys(&collection), vec!["foo", "bar"]);
        assert_eq!(collection.value(), json!({"foo": true, "bar": false}));
    }

    #[test]
    fn test_remove_leaves_remaining_entries() {
        let mut collection = flags();
        for key in ["foo", "bar"] {
            let entry = collection.create_entry(None).unwrap();
            collection.add_control(key, entry).unwrap();
        }
        assert!(collection.remove_control("foo").is_some());
        assert_eq!(keys(&collection), vec!["bar"]);
        assert!(collection.remove_control("foo").is_none());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut collection = flags();
        let first = collection.create_entry(None).unwrap();
        let second = collection.create_entry(None).unwrap();
        collection.add_control("foo", first).unwrap();
        assert_eq!(
            collection.add_control("foo", second).unwrap_err().kind(),
            "DuplicateControl"
        );
    }

    #[test]
    fn test_entry_with_other_schema_rejected() {
        let mut collection = flags();
        let text = map_shape(&Shape::text()).instantiate(None).unwrap();
        assert_eq!(
            collection.add_control("foo", text).unwrap_err(),
            FormError::SchemaMismatch {
                name: "foo".to_string()
            }
        );
    }

    #[test]
    fn test_push_picks_unused_numeric_key() {
        let mut collection = flags();
        let a = collection.create_entry(None).unwrap();
        let b = collection.create_entry(None).unwrap();
        let c = collection.create_entry(None).unwrap();
        assert_eq!(collection.push(a).unwrap(), "0");
        assert_eq!(collection.push(b).unwrap(), "1");
        collection.remove_control("0");
        assert_eq!(collection.push(c).unwrap(), "0");
        assert_eq!(keys(&collection), vec!["1", "0"]);
    }

    #[test]
    fn test_set_control_replaces_or_appends() {
        let mut collection = flags();
        let foo = collection.create_entry(Some(&json!(true))).unwrap();
        collection.add_control("foo", foo).unwrap();

        let off = collection.create_entry(Some(&json!(false))).unwrap();
        let replaced = collection.set_control("foo", off).unwrap();
        assert_eq!(replaced.map(|e| e.value()), Some(json!(true)));

        let bar = collection.create_entry(None).unwrap();
        assert!(collection.set_control("bar", bar).unwrap().is_none());
        assert_eq!(keys(&collection), vec!["foo", "bar"]);
        assert_eq!(collection.value(), json!({"foo": false, "bar": false}));

        let text = map_shape(&Shape::text()).instantiate(None).unwrap();
        assert_eq!(
            collection.set_control("foo", text).unwrap_err().kind(),
            "SchemaMismatch"
        );
    }

    #[test]
    fn test_set_value_requires_exact_keys() {
        let mut collection = flags();
        let foo = collection.create_entry(None).unwrap();
        collection.add_control("foo", foo).unwrap();

        collection.set_value_at("", &json!({"foo": true})).unwrap();
        assert_eq!(collection.values(), vec![json!(true)]);

        let err = collection
            .set_value_at("", &json!({"foo": true, "bar": true}))
            .unwrap_err();
        assert!(err.to_string().contains("entry 'bar' is not currently present"));

        let err = collection.set_value_at("", &json!({})).unwrap_err();
        assert!(err.to_string().contains("missing value for entry 'foo'"));
    }

    #[test]
    fn test_array_input_follows_insertion_order() {
        let mut collection = FormCollection::new(map_shape(&Shape::text()));
        for name in ["a", "b"] {
            let entry = collection.create_entry(Some(&json!(name))).unwrap();
            collection.push(entry).unwrap();
        }
        collection.remove_control("0");
        let c = collection.create_entry(Some(&json!("c"))).unwrap();
        collection.push(c).unwrap();
        assert_eq!(keys(&collection), vec!["1", "0"]);

        let values = Value::Array(collection.values());
        collection.set_value_at("", &values).unwrap();
        assert_eq!(collection.values(), vec![json!("b"), json!("c")]);

        collection.patch_value_at("", &json!(["B"])).unwrap();
        assert_eq!(collection.value(), json!({"1": "B", "0": "c"}));

        collection.reset_at("", Some(&json!(["x", "y"]))).unwrap();
        assert_eq!(collection.values(), vec![json!("x"), json!("y")]);
    }

    #[test]
    fn test_set_value_array_length_must_match() {
        let mut collection = flags();
        let a = collection.create_entry(None).unwrap();
        collection.push(a).unwrap();
        let err = collection.set_value_at("", &json!([true, false])).unwrap_err();
        assert_eq!(err.kind(), "ShapeMismatch");
        assert!(err.to_string().contains("expected 1 entries, found 2"));
        assert_eq!(collection.values(), vec![json!(false)]);
    }

    #[test]
    fn test_set_value_accepts_index_keyed_array() {
        let mut collection = flags();
        let a = collection.create_entry(None).unwrap();
        collection.push(a).unwrap();
        collection.set_value_at("", &json!([true])).unwrap();
        assert_eq!(collection.value(), json!({"0": true}));
    }

    #[test]
    fn test_reset_entries() {
        let mut collection = flags();
        for key in ["foo", "bar"] {
            let entry = collection.create_entry(Some(&json!(false))).unwrap();
            collection.add_control(key, entry).unwrap();
        }
        collection
            .set_value_at("", &json!({"foo": true, "bar": true}))
            .unwrap();
        collection.reset_at("", Some(&json!({"bar": true}))).unwrap();
        assert_eq!(collection.value(), json!({"foo": false, "bar": true}));
    }
}
