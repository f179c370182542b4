//! Group control: named members, some of them optional

use super::error::{join_path, FormError, FormResult};
use super::field::EditableField;
use super::schema::{map_shape, FieldSchema, GroupSchema};
use super::shape::{json_type_name, Shape};
use serde_json::{Map, Value};

/// Editable counterpart of a composite shape.
///
/// Holds every required member for its whole lifetime. Optional members are
/// absent until [`FormGroup::add_control`] supplies them and can be removed
/// again. Present members keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormGroup {
    schema: GroupSchema,
    controls: Vec<(String, EditableField)>,
}

impl FormGroup {
    /// Build a group from a composite shape, optionally seeded with initial values
    pub fn from_shape(shape: &Shape, initial: Option<&Value>) -> FormResult<Self> {
        let schema @ FieldSchema::Group(_) = map_shape(shape) else {
            return Err(FormError::shape_mismatch(
                "",
                "a group can only be built from a composite shape",
            ));
        };
        match schema.instantiate(initial)? {
            EditableField::Group(group) => Ok(group),
            _ => Err(FormError::shape_mismatch("", "expected a group")),
        }
    }

    /// Build a group whose shape is inferred from its initial values. Every
    /// member is required.
    pub fn from_values(initial: &Value) -> FormResult<Self> {
        if !initial.is_object() {
            return Err(FormError::shape_mismatch(
                "",
                format!("expected an object, found {}", json_type_name(initial)),
            ));
        }
        Self::from_shape(&Shape::infer(initial)?, Some(initial))
    }

    pub(crate) fn from_parts(schema: GroupSchema, controls: Vec<(String, EditableField)>) -> Self {
        Self { schema, controls }
    }

    pub fn schema(&self) -> &GroupSchema {
        &self.schema
    }

    /// Snapshot of the present members. Absent optional members are omitted.
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .controls
            .iter()
            .map(|(name, control)| (name.clone(), control.value()))
            .collect();
        Value::Object(map)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controls.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&EditableField> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, control)| control)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EditableField> {
        self.controls
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, control)| control)
    }

    /// Check that `control` may be placed under `name`
    fn check_declared(&self, name: &str, control: &EditableField) -> FormResult<()> {
        let declared = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownControl {
                name: name.to_string(),
            })?;
        if declared.schema != control.schema() {
            return Err(FormError::SchemaMismatch {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Add an absent optional member.
    ///
    /// Required members are always present, so adding one is reported as a
    /// duplicate.
    pub fn add_control(&mut self, name: &str, control: EditableField) -> FormResult<()> {
        self.check_declared(name, &control)?;
        if self.contains(name) {
            return Err(FormError::DuplicateControl {
                name: name.to_string(),
            });
        }
        tracing::debug!("add_control '{name}'");
        self.controls.push((name.to_string(), control));
        Ok(())
    }

    /// Remove an optional member, returning it if it was present
    pub fn remove_control(&mut self, name: &str) -> FormResult<Option<EditableField>> {
        let declared = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownControl {
                name: name.to_string(),
            })?;
        if !declared.optional {
            return Err(FormError::IllegalRemoval {
                name: name.to_string(),
            });
        }
        tracing::debug!("remove_control '{name}'");
        Ok(self
            .controls
            .iter()
            .position(|(n, _)| n == name)
            .map(|index| self.controls.remove(index).1))
    }

    /// Replace a member, or add it when absent. Returns the replaced control.
    pub fn set_control(
        &mut self,
        name: &str,
        control: EditableField,
    ) -> FormResult<Option<EditableField>> {
        self.check_declared(name, &control)?;
        tracing::debug!("set_control '{name}'");
        match self.get_mut(name) {
            Some(existing) => Ok(Some(std::mem::replace(existing, control))),
            None => {
                self.controls.push((name.to_string(), control));
                Ok(None)
            }
        }
    }

    /// Build a fresh control for a declared member from its schema
    pub fn create_control(&self, name: &str, initial: Option<&Value>) -> FormResult<EditableField> {
        let declared = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownControl {
                name: name.to_string(),
            })?;
        declared.schema.instantiate_at(name, initial)
    }

    /// Replace the full value. `value` must name exactly the present members.
    pub fn set_value(&mut self, value: &Value) -> FormResult<()> {
        let mut staged = self.clone();
        staged.set_value_at("", value)?;
        *self = staged;
        Ok(())
    }

    /// Update the present members named in `value`, ignoring everything else
    pub fn patch_value(&mut self, value: &Value) -> FormResult<()> {
        let mut staged = self.clone();
        staged.patch_value_at("", value)?;
        *self = staged;
        Ok(())
    }

    /// Reset present members to their initial values, or to the matching
    /// member of `value` when supplied
    pub fn reset(&mut self, value: Option<&Value>) -> FormResult<()> {
        let mut staged = self.clone();
        staged.reset_at("", value)?;
        *self = staged;
        Ok(())
    }

    pub(crate) fn set_value_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        let map = expect_object(path, value)?;

        if let Some((missing, _)) = self.controls.iter().find(|(n, _)| !map.contains_key(n)) {
            return Err(FormError::shape_mismatch(
                path,
                format!("missing value for present control '{missing}'"),
            ));
        }
        if let Some(extra) = map.keys().find(|k| !self.contains(k)) {
            return Err(FormError::shape_mismatch(
                path,
                format!("'{extra}' is not currently present"),
            ));
        }

        for (name, control) in &mut self.controls {
            control.set_value_at(&join_path(path, name), &map[name.as_str()])?;
        }
        Ok(())
    }

    pub(crate) fn patch_value_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        let map = expect_object(path, value)?;
        for (name, control) in &mut self.controls {
            if let Some(member) = map.get(name.as_str()) {
                control.patch_value_at(&join_path(path, name), member)?;
            }
        }
        Ok(())
    }

    pub(crate) fn reset_at(&mut self, path: &str, value: Option<&Value>) -> FormResult<()> {
        let map = value.map(|v| expect_object(path, v)).transpose()?;
        for (name, control) in &mut self.controls {
            let member = map.and_then(|m| m.get(name.as_str()));
            control.reset_at(&join_path(path, name), member)?;
        }
        Ok(())
    }
}

fn expect_object<'a>(path: &str, value: &'a Value) -> FormResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        FormError::shape_mismatch(
            path,
            format!("expected an object, found {}", json_type_name(value)),
        )
    })
}
