use std::cmp::Ordering;

use bytes::Buf;
use fieldtype_core::{
    ConversionError, ElementShape, EncodeError, FieldType, MalformedEncoding, ParseContext,
    ParseError, Value, ValueShape, ValueTypeError,
};
use nom::{
    character::complete::{char, hex_digit1},
    sequence::delimited,
};

use crate::convert::{self, Source};

const END: u8 = 0x00;
const ESCAPE: u8 = 0x01;

/// UTF-8 text ordered byte-wise.
///
/// Layout: the UTF-8 bytes with `0x00` written as `0x01 0x01` and `0x01` as
/// `0x01 0x02`, followed by a `0x00` terminator. The terminator is smaller
/// than every content byte, so a prefix sorts before its extensions.
///
/// Text form: double-quoted with `\"`, `\\`, `\n`, `\r`, `\t` and `\u{..}`
/// escapes.
#[derive(Debug, Clone)]
pub struct StringType {
    shape: ElementShape,
}

impl StringType {
    pub fn new() -> Self {
        Self {
            shape: ElementShape::non_null(ValueShape::String),
        }
    }

    fn malformed(&self, detail: impl Into<String>) -> MalformedEncoding {
        MalformedEncoding::new(self.name(), detail)
    }
}

impl Default for StringType {
    fn default() -> Self {
        Self::new()
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn parse_quoted(ctx: &mut ParseContext<'_>) -> Result<String, ParseError> {
    ctx.expect('"')?;
    let mut s = String::new();
    loop {
        let c = ctx
            .read_char()
            .map_err(|_| ctx.error("unterminated string"))?;
        match c {
            '"' => return Ok(s),
            '\\' => {
                let start = ctx.position();
                let escaped = match ctx.read_char()? {
                    '"' => '"',
                    '\\' => '\\',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        let hex = ctx.apply(
                            "'{hex}' after \\u",
                            delimited(char('{'), hex_digit1, char('}')),
                        )?;
                        u32::from_str_radix(hex, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| ParseError::new(start, format!("invalid code point '{hex}'")))?
                    }
                    other => {
                        return Err(ParseError::new(start, format!("invalid escape '\\{other}'")));
                    }
                };
                s.push(escaped);
            }
            c => s.push(c),
        }
    }
}

impl FieldType for StringType {
    fn name(&self) -> &str {
        "string"
    }

    fn kind(&self) -> &'static str {
        "string"
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        Value::string("")
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        for &b in value.try_str()?.as_bytes() {
            match b {
                0x00 | 0x01 => dst.extend_from_slice(&[ESCAPE, b + 1]),
                b => dst.push(b),
            }
        }
        dst.push(END);
        Ok(())
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        let mut bytes = Vec::new();
        loop {
            let b = src
                .try_get_u8()
                .map_err(|_| self.malformed("missing terminator"))?;
            match b {
                END => break,
                ESCAPE => match src.try_get_u8() {
                    Ok(e @ (0x01 | 0x02)) => bytes.push(e - 1),
                    Ok(e) => return Err(self.malformed(format!("invalid escape 0x{e:02x}"))),
                    Err(_) => return Err(self.malformed("truncated escape")),
                },
                b => bytes.push(b),
            }
        }
        String::from_utf8(bytes)
            .map(Value::string)
            .map_err(|e| self.malformed(format!("invalid UTF-8: {e}")))
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        Ok(a.try_str()?.as_bytes().cmp(b.try_str()?.as_bytes()))
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        write_quoted(value.try_str()?, out);
        Ok(())
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        parse_quoted(ctx).map(Value::string)
    }

    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError> {
        let from = match convert::prepare(self, from, value)? {
            Source::Identical => return Ok(value.clone()),
            Source::Scalar(from) => from,
        };
        match value {
            Value::String(_) => Ok(value.clone()),
            Value::Enum(e) => Ok(Value::String(e.name.clone())),
            other => Ok(Value::string(from.to_parseable_string(other)?)),
        }
    }
}
