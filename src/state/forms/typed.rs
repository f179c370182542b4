//! Shapes derived from Rust types

use super::error::{FormError, FormResult};
use super::group::FormGroup;
use super::schema::{map_shape, FieldSchema};
use super::shape::Shape;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// A Rust type with a statically known form shape.
///
/// `Vec<T>` maps to a sequence of `T`. `Option<T>` as a struct member makes
/// that member optional; on its own it makes a scalar nullable.
pub trait Shaped {
    /// Whether a struct member of this type is optional
    const OPTIONAL: bool = false;

    fn shape() -> Shape;
}

macro_rules! shaped_scalar {
    ($ctor:ident: $($ty:ty),+) => {
        $(
            impl Shaped for $ty {
                fn shape() -> Shape {
                    Shape::$ctor()
                }
            }
        )+
    };
}

shaped_scalar!(text: String, &str, char);
shaped_scalar!(number: i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);
shaped_scalar!(boolean: bool);

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }
}

impl<T: Shaped> Shaped for Option<T> {
    const OPTIONAL: bool = true;

    fn shape() -> Shape {
        T::shape().nullable()
    }
}

/// Implement [`Shaped`] for a struct by listing its serialized member names
/// and types.
///
/// ```ignore
/// shaped!(Login { "email" => String, "twoFactor" => Option<String> });
/// ```
#[macro_export]
macro_rules! shaped {
    ($ty:ty { $($name:literal => $field:ty),* $(,)? }) => {
        impl $crate::state::Shaped for $ty {
            fn shape() -> $crate::state::Shape {
                $crate::state::CompositeShape::new()
                    $(.field_of::<$field>($name))*
                    .build()
            }
        }
    };
}

/// A form group whose shape comes from `T`.
///
/// Values are exchanged as `T`; members that serialize to `None` count as
/// absent optional members.
#[derive(Debug, Clone)]
pub struct TypedForm<T> {
    schema: FieldSchema,
    group: FormGroup,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Shaped + Serialize> TypedForm<T> {
    pub fn new(initial: &T) -> FormResult<Self> {
        let shape = T::shape();
        let schema = map_shape(&shape);
        let initial = Self::snapshot_of(&schema, initial)?;
        let group = FormGroup::from_shape(&shape, Some(&initial))?;
        Ok(Self {
            schema,
            group,
            _marker: PhantomData,
        })
    }

    fn snapshot_of(schema: &FieldSchema, value: &T) -> FormResult<Value> {
        let raw = serde_json::to_value(value)
            .map_err(|e| FormError::shape_mismatch("", format!("cannot serialize value: {e}")))?;
        Ok(schema.strip_absent_optionals(&raw))
    }

    pub fn value(&self) -> Value {
        self.group.value()
    }

    /// Replace the full value; presence of optional members must match
    pub fn set_value(&mut self, value: &T) -> FormResult<()> {
        let snapshot = Self::snapshot_of(&self.schema, value)?;
        self.group.set_value(&snapshot)
    }

    pub fn patch_value(&mut self, value: &Value) -> FormResult<()> {
        self.group.patch_value(value)
    }

    pub fn reset(&mut self) -> FormResult<()> {
        self.group.reset(None)
    }

    /// Untyped access for adding and removing optional members
    pub fn group_mut(&mut self) -> &mut FormGroup {
        &mut self.group
    }
}
