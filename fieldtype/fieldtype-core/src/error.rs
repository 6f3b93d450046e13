//! Error types for field type construction, encoding, parsing and conversion.

/// A [`Value`](crate::Value) of the wrong variant was handed to a field type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} value, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

/// Raised while constructing a field type; fatal to that construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTypeDefinition {
    /// Array nesting exceeds [`MAX_DIMENSIONS`](crate::MAX_DIMENSIONS).
    #[error("array type '{name}' has {dimensions} dimensions (maximum is 255)")]
    TooManyDimensions { name: String, dimensions: usize },

    /// A null-safe wrapper was placed around a type that is already null-safe.
    #[error("type '{name}' is already null-safe and cannot be wrapped again")]
    NestedNullSafe { name: String },

    #[error("enum type '{name}' has no identifiers")]
    EmptyEnum { name: String },

    #[error("enum type '{name}' declares identifier '{identifier}' more than once")]
    DuplicateIdentifier { name: String, identifier: String },

    #[error("invalid type name '{name}': {detail}")]
    InvalidName { name: String, detail: String },

    /// The array storage representation cannot hold elements of this type.
    #[error("array representation '{repr}' does not support element type '{element}'")]
    UnsupportedElement { repr: &'static str, element: String },
}

/// Raised by `decode` when bytes do not form a valid encoding.
///
/// This signals storage corruption or an encoding/schema mismatch and is never
/// recovered from internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed encoding for type '{type_name}': {detail}")]
pub struct MalformedEncoding {
    pub type_name: String,
    pub detail: String,
}

impl MalformedEncoding {
    pub fn new(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }
}

/// Raised by `encode` when a value cannot be written by the target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    TypeMismatch(#[from] ValueTypeError),

    /// The value has the right variant but lies outside the type's domain
    /// (e.g. an enum ordinal the type does not declare).
    #[error("invalid value for type '{type_name}': {detail}")]
    InvalidValue { type_name: String, detail: String },
}

/// Raised by the textual parser on malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at position {position}: {detail}")]
pub struct ParseError {
    /// Byte offset into the parsed text.
    pub position: usize,
    pub detail: String,
}

impl ParseError {
    pub fn new(position: usize, detail: impl Into<String>) -> Self {
        Self {
            position,
            detail: detail.into(),
        }
    }
}

/// Raised by `convert` when a value cannot be re-expressed in the target type.
///
/// Conversions are exact; there is no lossy fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("cannot convert values of type '{from}' to type '{to}'")]
    Incompatible { from: String, to: String },

    #[error(
        "cannot convert {from_dimensions}-dimensional '{from}' to {to_dimensions}-dimensional '{to}'"
    )]
    DimensionMismatch {
        from: String,
        to: String,
        from_dimensions: usize,
        to_dimensions: usize,
    },

    #[error("value is outside the domain of type '{to}': {detail}")]
    OutOfDomain { to: String, detail: String },

    #[error("invalid null value for non-null type '{to}'")]
    UnexpectedNull { to: String },

    #[error("array element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },

    #[error(transparent)]
    ValueType(#[from] ValueTypeError),
}
