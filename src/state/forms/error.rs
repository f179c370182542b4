//! Form usage errors

use thiserror::Error;

/// Errors raised synchronously by form operations.
///
/// None of these are recoverable by the form itself; the caller performed an
/// operation the form's schema does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The supplied value does not match the controls currently present
    #[error("Shape mismatch at '{path}': {reason}")]
    ShapeMismatch { path: String, reason: String },

    /// Attempt to remove a control that is not marked optional
    #[error("Cannot remove required control '{name}'")]
    IllegalRemoval { name: String },

    /// The group does not declare a control with this name
    #[error("Unknown control '{name}'")]
    UnknownControl { name: String },

    /// A control with this name or key is already present
    #[error("Control '{name}' is already present")]
    DuplicateControl { name: String },

    /// The supplied control was built from a different schema
    #[error("Control '{name}' does not match its declared schema")]
    SchemaMismatch { name: String },

    /// A scalar of the wrong kind was supplied to a value control
    #[error("Expected {expected} at '{path}', found {found}")]
    ScalarMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// Path lookup stepped into a value control
    #[error("'{path}' is not a group or collection")]
    NotAContainer { path: String },
}

impl FormError {
    pub(crate) fn shape_mismatch(path: &str, reason: impl Into<String>) -> Self {
        FormError::ShapeMismatch {
            path: display_path(path),
            reason: reason.into(),
        }
    }

    /// Short kind label used by the console log
    pub fn kind(&self) -> &'static str {
        match self {
            FormError::ShapeMismatch { .. } => "ShapeMismatch",
            FormError::IllegalRemoval { .. } => "IllegalRemoval",
            FormError::UnknownControl { .. } => "UnknownControl",
            FormError::DuplicateControl { .. } => "DuplicateControl",
            FormError::SchemaMismatch { .. } => "SchemaMismatch",
            FormError::ScalarMismatch { .. } => "ScalarMismatch",
            FormError::NotAContainer { .. } => "NotAContainer",
        }
    }
}

/// Result alias for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Join a dotted control path
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Root paths are shown as `<root>` in error messages
pub(crate) fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}
