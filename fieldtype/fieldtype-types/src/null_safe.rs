use std::{cmp::Ordering, sync::Arc};

use bytes::Buf;
use fieldtype_core::{
    ConversionError, ElementShape, EncodeError, FieldType, InvalidTypeDefinition,
    MalformedEncoding, ParseContext, ParseError, Value, ValueTypeError,
};

const NULL: u8 = 0x00;
const PRESENT: u8 = 0x01;

/// Wraps a non-null type so that it also accepts `null`.
///
/// Layout: `0x00` for null, otherwise `0x01` followed by the inner encoding.
/// Null therefore sorts before every non-null value. The text form of null
/// is the keyword `null`.
#[derive(Debug, Clone)]
pub struct NullSafeType {
    inner: Arc<dyn FieldType>,
    name: String,
    shape: ElementShape,
}

impl NullSafeType {
    pub fn new(inner: Arc<dyn FieldType>) -> Result<Self, InvalidTypeDefinition> {
        if inner.is_null_safe() {
            return Err(InvalidTypeDefinition::NestedNullSafe {
                name: inner.name().to_string(),
            });
        }
        let name = format!("{}?", inner.name());
        let shape = ElementShape::nullable(inner.shape().shape.clone());
        Ok(Self { inner, name, shape })
    }

    pub fn inner(&self) -> &Arc<dyn FieldType> {
        &self.inner
    }
}

impl FieldType for NullSafeType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "null-safe"
    }

    fn encoding_signature(&self) -> u64 {
        self.inner.encoding_signature()
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        Value::Null
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        if value.is_null() {
            dst.push(NULL);
            return Ok(());
        }
        dst.push(PRESENT);
        self.inner.encode_into(value, dst)
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        match src.try_get_u8() {
            Ok(NULL) => Ok(Value::Null),
            Ok(PRESENT) => self.inner.decode(src),
            Ok(other) => Err(MalformedEncoding::new(
                &self.name,
                format!("invalid null sentinel 0x{other:02x}"),
            )),
            Err(_) => Err(MalformedEncoding::new(&self.name, "missing null sentinel")),
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        match (a.is_null(), b.is_null()) {
            (true, true) => Ok(Ordering::Equal),
            (true, false) => Ok(Ordering::Less),
            (false, true) => Ok(Ordering::Greater),
            (false, false) => self.inner.compare(a, b),
        }
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        if value.is_null() {
            out.push_str("null");
            Ok(())
        } else {
            self.inner.write_parseable(value, out)
        }
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        if ctx.try_keyword("null") {
            Ok(Value::Null)
        } else {
            self.inner.parse(ctx)
        }
    }

    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError> {
        if value.is_null() {
            Ok(Value::Null)
        } else {
            self.inner.convert(from, value)
        }
    }

    fn null_safe_inner(&self) -> Option<&Arc<dyn FieldType>> {
        Some(&self.inner)
    }
}
