//! Storage-independent core of the field type subsystem.
//!
//! This crate provides the dynamic [`Value`] model, the [`ElementShape`]
//! descriptors used for lookup, and the [`FieldType`] contract that every
//! order-preserving codec implements. Concrete types live in
//! `fieldtype-types`; the registry lives in `fieldtype`.

mod error;
mod field_type;
mod parse;
mod shape;
mod value;

pub use error::{
    ConversionError, EncodeError, InvalidTypeDefinition, MalformedEncoding, ParseError,
    ValueTypeError,
};
pub use field_type::{ArrayAccess, FieldType, MAX_DIMENSIONS, TypeKey};
pub use parse::{ParseContext, is_token_char};
pub use shape::{ElementShape, ValueShape};
pub use value::{EnumValue, Value};
