use std::cmp::Ordering;

use bytes::Buf;
use fieldtype_core::{
    ConversionError, ElementShape, EncodeError, FieldType, MalformedEncoding, ParseContext,
    ParseError, Value, ValueShape, ValueTypeError,
};

use crate::convert::{self, Numeric, Source};

const SIGN64: u64 = 1 << 63;
const SIGN32: u32 = 1 << 31;

/// Width of a floating point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    pub fn type_name(self) -> &'static str {
        match self {
            FloatWidth::F32 => "float",
            FloatWidth::F64 => "double",
        }
    }
}

/// IEEE-754 float ordered by its total order: negative values have all bits
/// inverted, non-negative values have the sign bit set. `-0.0` sorts before
/// `0.0` and NaNs sort at the ends.
#[derive(Debug, Clone)]
pub struct FloatType {
    width: FloatWidth,
    shape: ElementShape,
}

impl FloatType {
    pub fn new(width: FloatWidth) -> Self {
        let shape = match width {
            FloatWidth::F32 => ValueShape::F32,
            FloatWidth::F64 => ValueShape::F64,
        };
        Self {
            width,
            shape: ElementShape::non_null(shape),
        }
    }

    pub fn float() -> Self {
        Self::new(FloatWidth::F32)
    }

    pub fn double() -> Self {
        Self::new(FloatWidth::F64)
    }

    pub fn width(&self) -> FloatWidth {
        self.width
    }

    fn malformed(&self, detail: impl Into<String>) -> MalformedEncoding {
        MalformedEncoding::new(self.name(), detail)
    }
}

fn order_bits64(bits: u64) -> u64 {
    if bits & SIGN64 != 0 { !bits } else { bits ^ SIGN64 }
}

fn restore_bits64(enc: u64) -> u64 {
    if enc & SIGN64 != 0 { enc ^ SIGN64 } else { !enc }
}

fn order_bits32(bits: u32) -> u32 {
    if bits & SIGN32 != 0 { !bits } else { bits ^ SIGN32 }
}

fn restore_bits32(enc: u32) -> u32 {
    if enc & SIGN32 != 0 { enc ^ SIGN32 } else { !enc }
}

impl FieldType for FloatType {
    fn name(&self) -> &str {
        self.width.type_name()
    }

    fn kind(&self) -> &'static str {
        "float"
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        match self.width {
            FloatWidth::F32 => Value::F32(0.0),
            FloatWidth::F64 => Value::F64(0.0),
        }
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self.width {
            FloatWidth::F32 => {
                let bits = order_bits32(value.try_f32()?.to_bits());
                dst.extend_from_slice(&bits.to_be_bytes());
            }
            FloatWidth::F64 => {
                let bits = order_bits64(value.try_f64()?.to_bits());
                dst.extend_from_slice(&bits.to_be_bytes());
            }
        }
        Ok(())
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        match self.width {
            FloatWidth::F32 => {
                let enc = src
                    .try_get_u32()
                    .map_err(|_| self.malformed("expected 4 bytes"))?;
                Ok(Value::F32(f32::from_bits(restore_bits32(enc))))
            }
            FloatWidth::F64 => {
                let enc = src
                    .try_get_u64()
                    .map_err(|_| self.malformed("expected 8 bytes"))?;
                Ok(Value::F64(f64::from_bits(restore_bits64(enc))))
            }
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        Ok(match self.width {
            FloatWidth::F32 => a.try_f32()?.total_cmp(&b.try_f32()?),
            FloatWidth::F64 => a.try_f64()?.total_cmp(&b.try_f64()?),
        })
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        let text = match self.width {
            FloatWidth::F32 => value.try_f32()?.to_string(),
            FloatWidth::F64 => value.try_f64()?.to_string(),
        };
        out.push_str(&text);
        Ok(())
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let start = ctx.position();
        let token = ctx.token("number")?;
        let parsed = match self.width {
            FloatWidth::F32 => token.parse::<f32>().ok().map(Value::F32),
            FloatWidth::F64 => token.parse::<f64>().ok().map(Value::F64),
        };
        parsed.ok_or_else(|| ParseError::new(start, format!("invalid {} value '{token}'", self.name())))
    }

    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError> {
        let from = match convert::prepare(self, from, value)? {
            Source::Identical => return Ok(value.clone()),
            Source::Scalar(from) => from,
        };
        if let Value::String(text) = value {
            return convert::parse_text(self, text);
        }
        let inexact = |detail: String| convert::out_of_domain(self, detail);
        match (self.width, convert::numeric(value)) {
            (FloatWidth::F32, Some(Numeric::Int(i))) => convert::i64_to_f32(i)
                .map(Value::F32)
                .ok_or_else(|| inexact(format!("{i} has no exact float representation"))),
            (FloatWidth::F64, Some(Numeric::Int(i))) => convert::i64_to_f64(i)
                .map(Value::F64)
                .ok_or_else(|| inexact(format!("{i} has no exact double representation"))),
            (FloatWidth::F32, Some(Numeric::Float(f))) => convert::f64_to_f32(f)
                .map(Value::F32)
                .ok_or_else(|| inexact(format!("{f} has no exact float representation"))),
            (FloatWidth::F64, Some(Numeric::Float(f))) => Ok(Value::F64(f)),
            _ => Err(convert::incompatible(from, self)),
        }
    }
}
