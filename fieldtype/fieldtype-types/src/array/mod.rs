//! Fixed-dimension array types.
//!
//! Layout: each element is written as `0x01` followed by the element
//! encoding, and the array ends with a `0x00` terminator. Since the
//! terminator is smaller than the element marker, a proper prefix sorts
//! before its extensions, matching the lexicographic comparator.
//!
//! Text form: `[e1, e2, e3]`, with `[]` for the empty array.

mod repr;

use std::{borrow::Cow, cmp::Ordering, sync::Arc};

use bytes::Buf;
use fieldtype_core::{
    ArrayAccess, ConversionError, ElementShape, EncodeError, FieldType, InvalidTypeDefinition,
    MAX_DIMENSIONS, MalformedEncoding, ParseContext, ParseError, Value, ValueShape, ValueTypeError,
};

pub use repr::{ArrayRepr, BytesRepr, ListRepr};

use crate::convert;

const END: u8 = 0x00;
const ELEMENT: u8 = 0x01;

/// Array of `element` values held in representation `R`.
///
/// Arrays are never null themselves; wrap the array type in a
/// [`NullSafeType`](crate::NullSafeType) for that.
#[derive(Debug, Clone)]
pub struct ArrayType<R: ArrayRepr = ListRepr> {
    element: Arc<dyn FieldType>,
    repr: R,
    name: String,
    dimensions: usize,
    shape: ElementShape,
}

impl ArrayType<ListRepr> {
    pub fn new(element: Arc<dyn FieldType>) -> Result<Self, InvalidTypeDefinition> {
        Self::with_repr(element, ListRepr)
    }
}

impl ArrayType<BytesRepr> {
    /// `byte[]` stored as packed bytes.
    pub fn bytes(element: Arc<dyn FieldType>) -> Result<Self, InvalidTypeDefinition> {
        Self::with_repr(element, BytesRepr)
    }
}

impl<R: ArrayRepr> ArrayType<R> {
    pub fn with_repr(element: Arc<dyn FieldType>, repr: R) -> Result<Self, InvalidTypeDefinition> {
        let name = format!("{}[]", element.name());

        // A null-safe element hides the array beneath it.
        let nested = match element.null_safe_inner() {
            Some(inner) => inner.dimensions(),
            None => element.dimensions(),
        };
        let dimensions = nested + 1;
        if dimensions > MAX_DIMENSIONS {
            return Err(InvalidTypeDefinition::TooManyDimensions { name, dimensions });
        }
        if !repr.accepts(element.as_ref()) {
            return Err(InvalidTypeDefinition::UnsupportedElement {
                repr: repr.name(),
                element: element.name().to_string(),
            });
        }

        let shape = ElementShape::non_null(ValueShape::array_of(element.shape().clone()));
        Ok(Self {
            element,
            repr,
            name,
            dimensions,
            shape,
        })
    }

    pub fn element(&self) -> &Arc<dyn FieldType> {
        &self.element
    }

    pub fn repr(&self) -> &R {
        &self.repr
    }

    fn malformed(&self, detail: impl Into<String>) -> MalformedEncoding {
        MalformedEncoding::new(&self.name, detail)
    }
}

impl<R: ArrayRepr> FieldType for ArrayType<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "array"
    }

    fn encoding_signature(&self) -> u64 {
        self.element.encoding_signature()
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        self.repr.empty()
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        for i in 0..self.repr.length(value)? {
            dst.push(ELEMENT);
            self.element
                .encode_into(&*self.repr.element_at(value, i)?, dst)?;
        }
        dst.push(END);
        Ok(())
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        let mut elements = Vec::new();
        loop {
            match src.try_get_u8() {
                Ok(END) => break,
                Ok(ELEMENT) => elements.push(self.element.decode(src)?),
                Ok(other) => {
                    return Err(self.malformed(format!("invalid element marker 0x{other:02x}")));
                }
                Err(_) => return Err(self.malformed("missing array terminator")),
            }
        }
        self.repr
            .build(elements)
            .map_err(|e| self.malformed(e.to_string()))
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        let (len_a, len_b) = (self.repr.length(a)?, self.repr.length(b)?);
        for i in 0..len_a.min(len_b) {
            let ord = self.element.compare(
                &*self.repr.element_at(a, i)?,
                &*self.repr.element_at(b, i)?,
            )?;
            if ord != Ordering::Equal {
                return Ok(ord);
            }
        }
        Ok(len_a.cmp(&len_b))
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        out.push('[');
        for i in 0..self.repr.length(value)? {
            if i > 0 {
                out.push_str(", ");
            }
            self.element
                .write_parseable(&*self.repr.element_at(value, i)?, out)?;
        }
        out.push(']');
        Ok(())
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let start = ctx.position();
        ctx.expect('[')?;
        let mut elements = Vec::new();
        loop {
            ctx.skip_whitespace();
            if ctx.try_literal("]") {
                break;
            }
            if !elements.is_empty() {
                ctx.expect(',')?;
                ctx.skip_whitespace();
            }
            elements.push(self.element.parse(ctx)?);
        }
        self.repr
            .build(elements)
            .map_err(|e| ParseError::new(start, e.to_string()))
    }

    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError> {
        if value.is_null() {
            return Err(ConversionError::UnexpectedNull {
                to: self.name.clone(),
            });
        }
        let from = convert::unwrap_null_safe(from);
        if from.type_key() == self.type_key() {
            return Ok(value.clone());
        }
        let Some(source) = from.as_array() else {
            return Err(convert::incompatible(from, self));
        };
        if source.dimensions() != self.dimensions {
            return Err(ConversionError::DimensionMismatch {
                from: from.name().to_string(),
                to: self.name.clone(),
                from_dimensions: source.dimensions(),
                to_dimensions: self.dimensions,
            });
        }

        let source_element = source.element_type().as_ref();
        let len = source.length(value)?;
        let mut elements = Vec::with_capacity(len);
        for index in 0..len {
            let element = source.element_at(value, index)?;
            let converted = self
                .element
                .convert(source_element, &element)
                .map_err(|e| ConversionError::Element {
                    index,
                    source: Box::new(e),
                })?;
            elements.push(converted);
        }
        Ok(self.repr.build(elements)?)
    }

    fn as_array(&self) -> Option<&dyn ArrayAccess> {
        Some(self)
    }
}

impl<R: ArrayRepr> ArrayAccess for ArrayType<R> {
    fn element_type(&self) -> &Arc<dyn FieldType> {
        &self.element
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn repr_name(&self) -> &'static str {
        self.repr.name()
    }

    fn length(&self, array: &Value) -> Result<usize, ValueTypeError> {
        self.repr.length(array)
    }

    fn element_at<'a>(
        &self,
        array: &'a Value,
        index: usize,
    ) -> Result<Cow<'a, Value>, ValueTypeError> {
        self.repr.element_at(array, index)
    }
}
