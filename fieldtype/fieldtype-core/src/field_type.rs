//! The field type contract shared by leaf, null-safe and array types.

use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{
    error::{
        ConversionError, EncodeError, MalformedEncoding, ParseError, ValueTypeError,
    },
    parse::ParseContext,
    shape::ElementShape,
    value::Value,
};

/// Maximum number of nested array dimensions.
pub const MAX_DIMENSIONS: usize = 255;

/// Codec, comparator and text form for one kind of value.
///
/// Implementations are immutable once built and are shared between any
/// number of concurrent readers.
///
/// The central contract: for any two values `a` and `b` accepted by a type,
/// `compare(a, b)` has the same sign as the byte-wise comparison of
/// `encode(a)` and `encode(b)`. Encodings are self-delimiting, so several of
/// them can be concatenated into a composite key and decoded back in order.
pub trait FieldType: fmt::Debug + Send + Sync {
    /// Globally unique type name, e.g. `int` or `int[]`.
    fn name(&self) -> &str;

    /// Short tag for the concrete implementation, used in [`TypeKey`].
    fn kind(&self) -> &'static str;

    /// Fingerprint of the binary layout. Types with equal names but
    /// different signatures can only meet through [`convert`](Self::convert).
    fn encoding_signature(&self) -> u64 {
        0
    }

    /// Semantic shape of the values this type handles.
    fn shape(&self) -> &ElementShape;

    /// Value used when nothing is stored.
    fn default_value(&self) -> Value;

    /// Append the self-delimiting encoding of `value` to `dst`.
    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError>;

    /// Decode one value from the front of `src`, advancing it past the
    /// consumed bytes.
    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding>;

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError>;

    /// Append the text form of `value` to `out`.
    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError>;

    /// Parse one value starting at the cursor, leaving it just past the value.
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError>;

    /// Re-express `value`, produced by type `from`, as a value of this type.
    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError>;

    /// Inner type, if this is a null-safe wrapper.
    fn null_safe_inner(&self) -> Option<&Arc<dyn FieldType>> {
        None
    }

    /// Array view, if this is an array type.
    fn as_array(&self) -> Option<&dyn ArrayAccess> {
        None
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Decode the value starting at `position`; returns it with the number of
    /// bytes it occupied.
    fn decode_at(&self, bytes: &[u8], position: usize) -> Result<(Value, usize), MalformedEncoding> {
        let Some(mut src) = bytes.get(position..) else {
            return Err(MalformedEncoding::new(
                self.name(),
                format!("position {position} is past the end of {} bytes", bytes.len()),
            ));
        };
        let before = src.len();
        let value = self.decode(&mut src)?;
        Ok((value, before - src.len()))
    }

    /// Decode a buffer holding exactly one encoded value.
    fn decode_exact(&self, bytes: &[u8]) -> Result<Value, MalformedEncoding> {
        let (value, consumed) = self.decode_at(bytes, 0)?;
        if consumed != bytes.len() {
            return Err(MalformedEncoding::new(
                self.name(),
                format!("{} trailing bytes after value", bytes.len() - consumed),
            ));
        }
        Ok(value)
    }

    fn to_parseable_string(&self, value: &Value) -> Result<String, ValueTypeError> {
        let mut out = String::new();
        self.write_parseable(value, &mut out)?;
        Ok(out)
    }

    /// Parse a text holding exactly one value.
    fn from_parseable_string(&self, text: &str) -> Result<Value, ParseError> {
        let mut ctx = ParseContext::new(text);
        let value = self.parse(&mut ctx)?;
        ctx.expect_eof()?;
        Ok(value)
    }

    fn is_null_safe(&self) -> bool {
        self.null_safe_inner().is_some()
    }

    /// Array dimensions of this type; `0` for anything but an array.
    fn dimensions(&self) -> usize {
        self.as_array().map_or(0, |array| array.dimensions())
    }

    /// Structural identity of this type.
    fn type_key(&self) -> TypeKey {
        if let Some(inner) = self.null_safe_inner() {
            return TypeKey::NullSafe(Box::new(inner.type_key()));
        }
        if let Some(array) = self.as_array() {
            return TypeKey::Array {
                repr: array.repr_name(),
                element: Box::new(array.element_type().type_key()),
            };
        }
        TypeKey::Leaf {
            kind: self.kind(),
            name: self.name().to_string(),
            signature: self.encoding_signature(),
        }
    }
}

/// Structural identity of a field type: concrete kind, name and, recursively,
/// the wrapped or element type.
///
/// Two independently built `int[]` types have equal keys and are
/// interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Leaf {
        kind: &'static str,
        name: String,
        signature: u64,
    },
    NullSafe(Box<TypeKey>),
    Array {
        repr: &'static str,
        element: Box<TypeKey>,
    },
}

impl PartialEq for dyn FieldType {
    fn eq(&self, other: &Self) -> bool {
        self.type_key() == other.type_key()
    }
}

impl Eq for dyn FieldType {}

impl Hash for dyn FieldType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_key().hash(state);
    }
}

/// Representation-independent view of an array type, used to read arrays
/// produced by another array type (e.g. during conversion).
pub trait ArrayAccess {
    fn element_type(&self) -> &Arc<dyn FieldType>;

    /// Between 1 and [`MAX_DIMENSIONS`].
    fn dimensions(&self) -> usize;

    /// Name of the storage representation.
    fn repr_name(&self) -> &'static str;

    fn length(&self, array: &Value) -> Result<usize, ValueTypeError>;

    fn element_at<'a>(&self, array: &'a Value, index: usize)
    -> Result<Cow<'a, Value>, ValueTypeError>;
}
