use std::cmp::Ordering;

use bytes::Buf;
use fieldtype_core::{
    ConversionError, ElementShape, EncodeError, FieldType, MalformedEncoding, ParseContext,
    ParseError, Value, ValueShape, ValueTypeError,
};

use crate::convert::{self, Numeric, Source};

/// `false` -> `0x00`, `true` -> `0x01`.
#[derive(Debug, Clone)]
pub struct BooleanType {
    shape: ElementShape,
}

impl BooleanType {
    pub fn new() -> Self {
        Self {
            shape: ElementShape::non_null(ValueShape::Bool),
        }
    }
}

impl Default for BooleanType {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldType for BooleanType {
    fn name(&self) -> &str {
        "boolean"
    }

    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        Value::Bool(false)
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        dst.push(u8::from(value.try_bool()?));
        Ok(())
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        match src.try_get_u8() {
            Ok(0) => Ok(Value::Bool(false)),
            Ok(1) => Ok(Value::Bool(true)),
            Ok(other) => Err(MalformedEncoding::new(
                self.name(),
                format!("invalid byte 0x{other:02x}"),
            )),
            Err(_) => Err(MalformedEncoding::new(self.name(), "expected 1 byte")),
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        Ok(a.try_bool()?.cmp(&b.try_bool()?))
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        out.push_str(if value.try_bool()? { "true" } else { "false" });
        Ok(())
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        if ctx.try_keyword("true") {
            Ok(Value::Bool(true))
        } else if ctx.try_keyword("false") {
            Ok(Value::Bool(false))
        } else {
            Err(ctx.error("expected 'true' or 'false'"))
        }
    }

    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError> {
        let from = match convert::prepare(self, from, value)? {
            Source::Identical => return Ok(value.clone()),
            Source::Scalar(from) => from,
        };
        if let Value::String(text) = value {
            return convert::parse_text(self, text);
        }
        match convert::numeric(value) {
            Some(Numeric::Bool(b)) => Ok(Value::Bool(b)),
            Some(Numeric::Int(0)) => Ok(Value::Bool(false)),
            Some(Numeric::Int(1)) => Ok(Value::Bool(true)),
            Some(Numeric::Int(i)) => Err(convert::out_of_domain(
                self,
                format!("{i} is neither 0 nor 1"),
            )),
            _ => Err(convert::incompatible(from, self)),
        }
    }
}
