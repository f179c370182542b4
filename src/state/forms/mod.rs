//! Form domain layer
//!
//! Data shapes are mapped onto trees of editable fields: composites become
//! groups, sequences become keyed collections and scalars become single
//! value controls. Groups track which optional members are currently
//! present, and every read reflects exactly that presence.

mod collection;
mod error;
mod field;
mod group;
mod schema;
mod shape;
mod typed;
mod value;

pub use collection::FormCollection;
pub use error::{FormError, FormResult};
pub use field::EditableField;
pub use group::FormGroup;
pub use schema::{map_shape, ValueSchema};
pub use shape::{CompositeShape, ScalarKind, Shape};
pub use typed::{Shaped, TypedForm};
pub use value::FormValue;
