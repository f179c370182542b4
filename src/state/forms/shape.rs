//! Data shapes: the static description a form is built from

use super::error::{join_path, FormError, FormResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Atomic value types a scalar shape can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    Text,
    Number,
    Boolean,
    /// Either a string or a number (e.g. an ingredient amount)
    TextOrNumber,
}

impl ScalarKind {
    /// Check whether a JSON value is a scalar of this kind (`null` is never accepted here)
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ScalarKind::Text => value.is_string(),
            ScalarKind::Number => value.is_number(),
            ScalarKind::Boolean => value.is_boolean(),
            ScalarKind::TextOrNumber => value.is_string() || value.is_number(),
        }
    }

    /// Value a freshly created control of this kind starts with
    pub fn default_value(&self) -> Value {
        match self {
            ScalarKind::Text | ScalarKind::TextOrNumber => Value::String(String::new()),
            ScalarKind::Number => Value::from(0),
            ScalarKind::Boolean => Value::Bool(false),
        }
    }

    /// Infer the kind of a JSON scalar
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(ScalarKind::Text),
            Value::Number(_) => Some(ScalarKind::Number),
            Value::Bool(_) => Some(ScalarKind::Boolean),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScalarKind::Text => "string",
            ScalarKind::Number => "number",
            ScalarKind::Boolean => "boolean",
            ScalarKind::TextOrNumber => "string | number",
        }
    }
}

/// Human readable name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One named member of a composite shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeField {
    pub name: String,
    pub shape: Shape,
    /// Optional members are absent from the form until explicitly added
    pub optional: bool,
}

/// Description of a nested data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Named members, unique by name, in declaration order
    Composite(Vec<ShapeField>),
    /// A single element shape repeated any number of times
    Sequence(Box<Shape>),
    Scalar { kind: ScalarKind, nullable: bool },
}

impl Shape {
    pub fn text() -> Self {
        Shape::Scalar {
            kind: ScalarKind::Text,
            nullable: false,
        }
    }

    pub fn number() -> Self {
        Shape::Scalar {
            kind: ScalarKind::Number,
            nullable: false,
        }
    }

    pub fn boolean() -> Self {
        Shape::Scalar {
            kind: ScalarKind::Boolean,
            nullable: false,
        }
    }

    pub fn text_or_number() -> Self {
        Shape::Scalar {
            kind: ScalarKind::TextOrNumber,
            nullable: false,
        }
    }

    pub fn sequence(element: Shape) -> Self {
        Shape::Sequence(Box::new(element))
    }

    /// Allow `null` for a scalar. Composites and sequences are returned unchanged.
    pub fn nullable(self) -> Self {
        match self {
            Shape::Scalar { kind, .. } => Shape::Scalar {
                kind,
                nullable: true,
            },
            other => other,
        }
    }

    /// Infer a shape from a sample value: objects become composites with every
    /// member required, arrays take the shape of their first element.
    pub fn infer(value: &Value) -> FormResult<Self> {
        Self::infer_at("", value)
    }

    fn infer_at(path: &str, value: &Value) -> FormResult<Self> {
        match value {
            Value::Object(map) => {
                let mut composite = CompositeShape::new();
                for (name, member) in map {
                    let shape = Self::infer_at(&join_path(path, name), member)?;
                    composite = composite.field(name, shape);
                }
                Ok(composite.build())
            }
            Value::Array(items) => {
                let first = items.first().ok_or_else(|| {
                    FormError::shape_mismatch(path, "cannot infer an element shape from an empty array")
                })?;
                Ok(Shape::sequence(Self::infer_at(&join_path(path, "0"), first)?))
            }
            Value::Null => Err(FormError::shape_mismatch(
                path,
                "cannot infer a shape from null",
            )),
            scalar => {
                let kind = ScalarKind::of(scalar).ok_or_else(|| {
                    FormError::shape_mismatch(path, "unsupported scalar")
                })?;
                Ok(Shape::Scalar {
                    kind,
                    nullable: false,
                })
            }
        }
    }
}

/// Builder for composite shapes. Member names are unique: declaring a name
/// twice replaces the earlier declaration in place.
#[derive(Debug, Clone, Default)]
pub struct CompositeShape {
    fields: Vec<ShapeField>,
}

impl CompositeShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required member
    pub fn field(self, name: &str, shape: Shape) -> Self {
        self.member(name, shape, false)
    }

    /// Declare an optional member
    pub fn optional(self, name: &str, shape: Shape) -> Self {
        self.member(name, shape, true)
    }

    /// Declare a member whose shape and optionality come from a Rust type
    pub fn field_of<T: super::typed::Shaped>(self, name: &str) -> Self {
        self.member(name, T::shape(), T::OPTIONAL)
    }

    fn member(mut self, name: &str, shape: Shape, optional: bool) -> Self {
        let field = ShapeField {
            name: name.to_string(),
            shape,
            optional,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn build(self) -> Shape {
        Shape::Composite(self.fields)
    }
}
