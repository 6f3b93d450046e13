use std::cmp::Ordering;

use bytes::Buf;
use fieldtype_core::{
    ConversionError, ElementShape, EncodeError, FieldType, MalformedEncoding, ParseContext,
    ParseError, Value, ValueShape, ValueTypeError,
};

use crate::convert::{self, Numeric, Source};

/// Width of a signed integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

impl IntWidth {
    pub fn type_name(self) -> &'static str {
        match self {
            IntWidth::I8 => "byte",
            IntWidth::I16 => "short",
            IntWidth::I32 => "int",
            IntWidth::I64 => "long",
        }
    }

    pub fn byte_len(self) -> usize {
        match self {
            IntWidth::I8 => 1,
            IntWidth::I16 => 2,
            IntWidth::I32 => 4,
            IntWidth::I64 => 8,
        }
    }

    fn shape(self) -> ValueShape {
        match self {
            IntWidth::I8 => ValueShape::I8,
            IntWidth::I16 => ValueShape::I16,
            IntWidth::I32 => ValueShape::I32,
            IntWidth::I64 => ValueShape::I64,
        }
    }

    fn extract(self, value: &Value) -> Result<i64, ValueTypeError> {
        match self {
            IntWidth::I8 => value.try_i8().map(i64::from),
            IntWidth::I16 => value.try_i16().map(i64::from),
            IntWidth::I32 => value.try_i32().map(i64::from),
            IntWidth::I64 => value.try_i64(),
        }
    }

    /// `v` as a value of this width, if it fits.
    fn wrap(self, v: i64) -> Option<Value> {
        match self {
            IntWidth::I8 => i8::try_from(v).ok().map(Value::I8),
            IntWidth::I16 => i16::try_from(v).ok().map(Value::I16),
            IntWidth::I32 => i32::try_from(v).ok().map(Value::I32),
            IntWidth::I64 => Some(Value::I64(v)),
        }
    }

    fn zero(self) -> Value {
        match self {
            IntWidth::I8 => Value::I8(0),
            IntWidth::I16 => Value::I16(0),
            IntWidth::I32 => Value::I32(0),
            IntWidth::I64 => Value::I64(0),
        }
    }

    fn sign_bit(self) -> u64 {
        1 << (self.byte_len() * 8 - 1)
    }
}

/// Signed integer stored big-endian with the sign bit flipped, so that
/// negative values sort before positive ones.
#[derive(Debug, Clone)]
pub struct IntegerType {
    width: IntWidth,
    shape: ElementShape,
}

impl IntegerType {
    pub fn new(width: IntWidth) -> Self {
        Self {
            width,
            shape: ElementShape::non_null(width.shape()),
        }
    }

    pub fn byte() -> Self {
        Self::new(IntWidth::I8)
    }

    pub fn short() -> Self {
        Self::new(IntWidth::I16)
    }

    pub fn int() -> Self {
        Self::new(IntWidth::I32)
    }

    pub fn long() -> Self {
        Self::new(IntWidth::I64)
    }

    pub fn width(&self) -> IntWidth {
        self.width
    }

    fn out_of_range(&self, detail: impl std::fmt::Display) -> ConversionError {
        convert::out_of_domain(self, format!("{detail} is out of range"))
    }
}

impl FieldType for IntegerType {
    fn name(&self) -> &str {
        self.width.type_name()
    }

    fn kind(&self) -> &'static str {
        "integer"
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        self.width.zero()
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        let v = self.width.extract(value)?;
        let n = self.width.byte_len();
        let biased = (v as u64) ^ self.width.sign_bit();
        dst.extend_from_slice(&biased.to_be_bytes()[8 - n..]);
        Ok(())
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        let n = self.width.byte_len();
        if src.remaining() < n {
            return Err(MalformedEncoding::new(
                self.name(),
                format!("expected {n} bytes, found {}", src.remaining()),
            ));
        }
        let mut buf = [0u8; 8];
        src.copy_to_slice(&mut buf[8 - n..]);
        let raw = u64::from_be_bytes(buf) ^ self.width.sign_bit();
        let shift = 64 - n * 8;
        let v = ((raw << shift) as i64) >> shift;
        self.width
            .wrap(v)
            .ok_or_else(|| MalformedEncoding::new(self.name(), "value out of range"))
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        Ok(self.width.extract(a)?.cmp(&self.width.extract(b)?))
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        out.push_str(&self.width.extract(value)?.to_string());
        Ok(())
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let start = ctx.position();
        let token = ctx.token("integer")?;
        token
            .parse::<i64>()
            .ok()
            .and_then(|v| self.width.wrap(v))
            .ok_or_else(|| ParseError::new(start, format!("invalid {} value '{token}'", self.name())))
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
            Some(Numeric::Bool(b)) => self
                .width
                .wrap(i64::from(b))
                .ok_or_else(|| self.out_of_range(b)),
            Some(Numeric::Int(i)) => self.width.wrap(i).ok_or_else(|| self.out_of_range(i)),
            Some(Numeric::Float(f)) => convert::float_to_i64(f)
                .and_then(|i| self.width.wrap(i))
                .ok_or_else(|| self.out_of_range(f)),
            None => Err(convert::incompatible(from, self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_flips_sign_bit() {
        let int = IntegerType::int();
        assert_eq!(int.encode(&Value::I32(0)).unwrap(), [0x80, 0, 0, 0]);
        assert_eq!(int.encode(&Value::I32(-1)).unwrap(), [0x7f, 0xff, 0xff, 0xff]);
        assert_eq!(int.encode(&Value::I32(i32::MIN)).unwrap(), [0, 0, 0, 0]);

        let byte = IntegerType::byte();
        assert_eq!(byte.encode(&Value::I8(-128)).unwrap(), [0x00]);
        assert_eq!(byte.encode(&Value::I8(127)).unwrap(), [0xff]);
    }

    #[test]
    fn decode_sign_extends() {
        let short = IntegerType::short();
        for v in [i16::MIN, -300, -1, 0, 1, 300, i16::MAX] {
            let bytes = short.encode(&Value::I16(v)).unwrap();
            assert_eq!(short.decode_exact(&bytes).unwrap(), Value::I16(v));
        }
    }

    #[test]
    fn rejects_wrong_width() {
        let long = IntegerType::long();
        assert!(matches!(
            long.encode(&Value::I32(1)),
            Err(EncodeError::TypeMismatch(_))
        ));
    }
}
