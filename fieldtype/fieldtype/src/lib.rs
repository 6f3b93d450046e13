//! Field type registry.
//!
//! [`FieldTypeRegistry`] maps type names and value shapes to the
//! order-preserving codecs in [`types`]. Shape lookups that match more than
//! one type fail with [`RegistryError::AmbiguousType`] instead of guessing.
//!
//! ```
//! use fieldtype::{ElementShape, FieldTypeRegistry, ValueShape};
//!
//! let registry = FieldTypeRegistry::shared();
//! let ty = registry.lookup_by_name("int[]").unwrap();
//! let value = ty.from_parseable_string("[3, 1, 2]").unwrap();
//! let bytes = ty.encode(&value).unwrap();
//! assert_eq!(ty.decode_exact(&bytes).unwrap(), value);
//!
//! let shape = ElementShape::non_null(ValueShape::String);
//! assert_eq!(registry.resolve(&shape, None).unwrap().name(), "string");
//! ```

mod error;
mod registry;

pub use error::RegistryError;
pub use fieldtype_core as core;
pub use fieldtype_core::{ElementShape, FieldType, Value, ValueShape};
pub use fieldtype_types as types;
pub use registry::{FieldTypeRegistry, FieldTypeRegistryBuilder};
