pub mod compare;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use fieldtype::{FieldType, FieldTypeRegistry, Value};

pub(crate) fn lookup(registry: &FieldTypeRegistry, name: &str) -> Result<Arc<dyn FieldType>> {
    registry
        .lookup_by_name(name)
        .with_context(|| format!("unknown field type '{name}'"))
}

pub(crate) fn parse_value(ty: &dyn FieldType, text: &str) -> Result<Value> {
    ty.from_parseable_string(text)
        .with_context(|| format!("invalid {} value '{text}'", ty.name()))
}
