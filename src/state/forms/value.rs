//! Single scalar control

use super::error::FormResult;
use super::schema::ValueSchema;
use serde_json::Value;

/// Editable counterpart of a scalar: one current value plus the initial
/// value it resets to.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValue {
    schema: ValueSchema,
    initial: Value,
    current: Value,
}

impl FormValue {
    /// Create a control, validating the initial value against the schema
    pub fn new(schema: ValueSchema, initial: Value) -> FormResult<Self> {
        schema.check("", &initial)?;
        Ok(Self::from_parts(schema, initial))
    }

    pub(crate) fn from_parts(schema: ValueSchema, initial: Value) -> Self {
        Self {
            schema,
            current: initial.clone(),
            initial,
        }
    }

    pub fn schema(&self) -> ValueSchema {
        self.schema
    }

    pub fn value(&self) -> &Value {
        &self.current
    }

    pub fn initial(&self) -> &Value {
        &self.initial
    }

    /// Replace the current value
    pub fn set(&mut self, value: &Value) -> FormResult<()> {
        self.set_at("", value)
    }

    pub(crate) fn set_at(&mut self, path: &str, value: &Value) -> FormResult<()> {
        self.schema.check(path, value)?;
        self.current = value.clone();
        Ok(())
    }

    /// Restore the initial value, or set `value` when one is supplied.
    /// The initial value itself never changes.
    pub fn reset(&mut self, value: Option<&Value>) -> FormResult<()> {
        self.reset_at("", value)
    }

    pub(crate) fn reset_at(&mut self, path: &str, value: Option<&Value>) -> FormResult<()> {
        match value {
            Some(v) => self.set_at(path, v),
            None => {
                self.current = self.initial.clone();
                Ok(())
            }
        }
    }
}
