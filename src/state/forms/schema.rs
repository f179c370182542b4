//! Editable field schemas and the shape mapping

use super::collection::FormCollection;
use super::error::{join_path, FormError, FormResult};
use super::field::EditableField;
use super::group::FormGroup;
use super::shape::{json_type_name, ScalarKind, Shape};
use super::value::FormValue;
use serde_json::{Map, Value};

/// Schema of a single value control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSchema {
    pub kind: ScalarKind,
    /// Whether `null` is an acceptable value
    pub nullable: bool,
}

impl ValueSchema {
    /// Validate a candidate value for a control at `path`
    pub(crate) fn check(&self, path: &str, value: &Value) -> FormResult<()> {
        if value.is_null() && self.nullable {
            return Ok(());
        }
        if self.kind.accepts(value) {
            return Ok(());
        }
        let expected = if self.nullable {
            format!("{} | null", self.kind.label())
        } else {
            self.kind.label().to_string()
        };
        Err(FormError::ScalarMismatch {
            path: super::error::display_path(path),
            expected,
            found: json_type_name(value).to_string(),
        })
    }

    /// Starting value when no initial value is supplied
    pub fn default_value(&self) -> Value {
        if self.nullable {
            Value::Null
        } else {
            self.kind.default_value()
        }
    }
}

/// A declared member of a group schema
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFieldSchema {
    pub name: String,
    pub schema: FieldSchema,
    pub optional: bool,
}

/// Schema of a group: the full set of members it may ever hold
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupSchema {
    fields: Vec<GroupFieldSchema>,
}

impl GroupSchema {
    pub fn field(&self, name: &str) -> Option<&GroupFieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &GroupFieldSchema> {
        self.fields.iter()
    }
}

/// Schema of an editable field tree, mirroring a [`Shape`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSchema {
    Group(GroupSchema),
    /// Homogeneous keyed entries sharing one element schema
    Collection(Box<FieldSchema>),
    Value(ValueSchema),
}

/// Map a data shape onto the schema of its editable field tree.
///
/// Composites become groups with exactly the same members (and optional
/// flags), sequences become collections of the mapped element, and scalars
/// become value controls of the same kind.
pub fn map_shape(shape: &Shape) -> FieldSchema {
    match shape {
        Shape::Composite(fields) => FieldSchema::Group(GroupSchema {
            fields: fields
                .iter()
                .map(|f| GroupFieldSchema {
                    name: f.name.clone(),
                    schema: map_shape(&f.shape),
                    optional: f.optional,
                })
                .collect(),
        }),
        Shape::Sequence(element) => FieldSchema::Collection(Box::new(map_shape(element))),
        Shape::Scalar { kind, nullable } => FieldSchema::Value(ValueSchema {
            kind: *kind,
            nullable: *nullable,
        }),
    }
}

impl FieldSchema {
    /// Build an editable field tree from this schema.
    ///
    /// Required group members are always created; optional members only when
    /// `initial` supplies a non-null value for them. Collections get one entry
    /// per object key, or per array element keyed by index.
    pub fn instantiate(&self, initial: Option<&Value>) -> FormResult<EditableField> {
        self.instantiate_at("", initial)
    }

    pub(crate) fn instantiate_at(
        &self,
        path: &str,
        initial: Option<&Value>,
    ) -> FormResult<EditableField> {
        match self {
            FieldSchema::Group(schema) => {
                let members = match initial {
                    None => None,
                    Some(Value::Object(map)) => Some(map),
                    Some(other) => {
                        return Err(FormError::shape_mismatch(
                            path,
                            format!("expected an object, found {}", json_type_name(other)),
                        ))
                    }
                };
                if let Some(map) = members {
                    if let Some(unknown) = map.keys().find(|k| schema.field(k).is_none()) {
                        return Err(FormError::shape_mismatch(
                            path,
                            format!("'{unknown}' is not declared by this group"),
                        ));
                    }
                }

                let mut controls = Vec::new();
                for declared in schema.fields() {
                    let supplied = members
                        .and_then(|m| m.get(&declared.name))
                        .filter(|v| !(declared.optional && v.is_null()));
                    if declared.optional && supplied.is_none() {
                        continue;
                    }
                    let child = declared
                        .schema
                        .instantiate_at(&join_path(path, &declared.name), supplied)?;
                    controls.push((declared.name.clone(), child));
                }
                Ok(EditableField::Group(FormGroup::from_parts(
                    schema.clone(),
                    controls,
                )))
            }
            FieldSchema::Collection(element) => {
                let mut entries = Vec::new();
                if let Some(initial) = initial {
                    for (key, item) in keyed_entries(path, initial)? {
                        let child = element.instantiate_at(&join_path(path, &key), Some(item))?;
                        entries.push((key, child));
                    }
                }
                Ok(EditableField::Collection(FormCollection::from_parts(
                    (**element).clone(),
                    entries,
                )))
            }
            FieldSchema::Value(schema) => {
                let value = match initial {
                    Some(v) => {
                        schema.check(path, v)?;
                        v.clone()
                    }
                    None => schema.default_value(),
                };
                Ok(EditableField::Value(FormValue::from_parts(*schema, value)))
            }
        }
    }

    /// Drop `null` members that correspond to optional group fields, so a
    /// serialized `None` reads as "absent" rather than as a value.
    pub fn strip_absent_optionals(&self, value: &Value) -> Value {
        match (self, value) {
            (FieldSchema::Group(schema), Value::Object(map)) => {
                let mut out = Map::new();
                for (name, member) in map {
                    match schema.field(name) {
                        Some(declared) if declared.optional && member.is_null() => {}
                        Some(declared) => {
                            out.insert(name.clone(), declared.schema.strip_absent_optionals(member));
                        }
                        None => {
                            out.insert(name.clone(), member.clone());
                        }
                    }
                }
                Value::Object(out)
            }
            (FieldSchema::Collection(element), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| element.strip_absent_optionals(item))
                    .collect(),
            ),
            (FieldSchema::Collection(element), Value::Object(map)) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), element.strip_absent_optionals(v)))
                    .collect(),
            ),
            _ => value.clone(),
        }
    }
}

/// Split a collection value into `(key, item)` pairs. Objects keep their keys,
/// arrays are keyed by index.
pub(crate) fn keyed_entries<'a>(
    path: &str,
    value: &'a Value,
) -> FormResult<Vec<(String, &'a Value)>> {
    match value {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Ok(items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect()),
        other => Err(FormError::shape_mismatch(
            path,
            format!(
                "expected an object or array, found {}",
                json_type_name(other)
            ),
        )),
    }
}
