//! Error types for the field type registry.

use fieldtype_core::InvalidTypeDefinition;

/// Errors produced by [`FieldTypeRegistry`](crate::FieldTypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No type is registered under this name and none can be synthesized.
    #[error("field type '{name}' not found")]
    NotFound { name: String },

    #[error("field type '{name}' is already registered")]
    DuplicateName { name: String },

    /// The type exists, but its encoding signature differs from the one asked for.
    #[error("field type '{name}' has signature {actual:#018x}, expected {expected:#018x}")]
    SignatureMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    /// Several types can represent the shape; the caller must pick one by name.
    #[error("shape '{shape}' is ambiguous; candidates: {}", .candidates.join(", "))]
    AmbiguousType {
        shape: String,
        candidates: Vec<String>,
    },

    /// No registered or synthesizable type represents the shape.
    #[error("no field type represents shape '{shape}'")]
    NoMatch { shape: String },

    /// An explicitly named type does not represent the requested shape.
    #[error("field type '{name}' has shape '{actual}', expected '{expected}'")]
    ShapeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    InvalidTypeDefinition(#[from] InvalidTypeDefinition),
}
