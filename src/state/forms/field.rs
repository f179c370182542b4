//! Editable field tree

use super::collection::FormCollection;
use super::error::{join_path, FormError, FormResult};
use super::group::FormGroup;
use super::schema::FieldSchema;
use super::value::FormValue;
use serde_json::Value;

/// Runtime counterpart of a shape: a group, a collection, or a single value
#[derive(Debug, Clone, PartialEq)]
pub enum EditableField {
    Group(FormGroup),
    Collection(FormCollection),
    Value(FormValue),
}

impl EditableField {
    /// Schema this field was built from
    pub fn schema(&self) -> FieldSchema {
        match self {
            EditableField::Group(g) => FieldSchema::Group(g.schema().clone()),
            EditableField::Collection(c) => FieldSchema::Collection(Box::new(c.element().clone())),
            EditableField::Value(v) => FieldSchema::Value(v.schema()),
        }
    }

    /// Snapshot of the currently present fields and entries
    pub fn value(&self) -> Value {
        match self {
            EditableField::Group(g) => g.value(),
            EditableField::Collection(c) => c.value(),
            EditableField::Value(v) => v.value().clone(),
        }
    }

    /// Replace the whole value. The supplied value must match current
    /// presence exactly; nothing is changed when it does not.
    pub fn set_value(&mut self, value: &Value) -> FormResult<()> {
        let mut staged = self.clone();
        staged.set_value_at("", value)?;
        *self = staged;
        Ok(())
    }

    /// Update only the members present in `value`
    pub fn patch_value(&mut self, value: &Value) -> FormResult<()> {
        let mut staged = self.clone();
        staged.patch_value_at("", value)?;
        *self = staged;
        Ok(())
    }

    /// Reset every present value to its initial value, or to the matching
    /// member of `value` when supplied
    pub fn reset(&mut self, value: Option<&Value>) -> FormResult<()> {
        let mut staged = self.clone();
        staged.reset_at("", value)?;
        *self = staged;
        Ok(())
    }

    pub(crate) fn set_value_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        match self {
            EditableField::Group(g) => g.set_value_at(path, value),
            EditableField::Collection(c) => c.set_value_at(path, value),
            EditableField::Value(v) => v.set_at(path, value),
        }
    }

    pub(crate) fn patch_value_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        match self {
            EditableField::Group(g) => g.patch_value_at(path, value),
            EditableField::Collection(c) => c.patch_value_at(path, value),
            EditableField::Value(v) => v.set_at(path, value),
        }
    }

    pub(crate) fn reset_at(&mut self, path: &str, value: Option<&Value>) -> FormResult<()> {
        match self {
            EditableField::Group(g) => g.reset_at(path, value),
            EditableField::Collection(c) => c.reset_at(path, value),
            EditableField::Value(v) => v.reset_at(path, value),
        }
    }

    /// Immediate child by name (groups) or key (collections)
    pub fn child(&self, name: &str) -> Option<&EditableField> {
        match self {
            EditableField::Group(g) => g.get(name),
            EditableField::Collection(c) => c.get(name),
            EditableField::Value(_) => None,
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut EditableField> {
        match self {
            EditableField::Group(g) => g.get_mut(name),
            EditableField::Collection(c) => c.get_mut(name),
            EditableField::Value(_) => None,
        }
    }

    /// Look up a nested field by dotted path, e.g. `ingredients.0.name`.
    ///
    /// Returns `Ok(None)` when a segment is absent and `NotAContainer` when
    /// the path walks through a value control.
    pub fn get(&self, path: &str) -> FormResult<Option<&EditableField>> {
        let mut current = self;
        let mut walked = String::new();
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            if matches!(current, EditableField::Value(_)) {
                return Err(FormError::NotAContainer {
                    path: super::error::display_path(&walked),
                });
            }
            match current.child(segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
            walked = join_path(&walked, segment);
        }
        Ok(Some(current))
    }

    pub fn get_mut(&mut self, path: &str) -> FormResult<Option<&mut EditableField>> {
        let mut current = self;
        let mut walked = String::new();
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            if matches!(current, EditableField::Value(_)) {
                return Err(FormError::NotAContainer {
                    path: super::error::display_path(&walked),
                });
            }
            match current.child_mut(segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
            walked = join_path(&walked, segment);
        }
        Ok(Some(current))
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut FormCollection> {
        match self {
            EditableField::Collection(c) => Some(c),
            _ => None,
        }
    }
}
