//! Storage representations for array values.

use std::{borrow::Cow, fmt};

use fieldtype_core::{FieldType, Value, ValueShape, ValueTypeError};

/// How an array value is held in memory.
///
/// [`ArrayType`](super::ArrayType) is written purely against this triad
/// (`length`, `element_at`, `build`) plus the element type's own operations,
/// so a new representation only has to implement these.
pub trait ArrayRepr: fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Whether arrays of `element` can be held in this representation.
    fn accepts(&self, element: &dyn FieldType) -> bool;

    fn empty(&self) -> Value;

    fn length(&self, array: &Value) -> Result<usize, ValueTypeError>;

    fn element_at<'a>(&self, array: &'a Value, index: usize)
    -> Result<Cow<'a, Value>, ValueTypeError>;

    fn build(&self, elements: Vec<Value>) -> Result<Value, ValueTypeError>;
}

fn out_of_bounds(array: &Value, index: usize) -> ValueTypeError {
    ValueTypeError::new(format!("array with more than {index} elements"), array.variant_name())
}

/// `Value::Array`, one boxed value per element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRepr;

impl ArrayRepr for ListRepr {
    fn name(&self) -> &'static str {
        "list"
    }

    fn accepts(&self, _element: &dyn FieldType) -> bool {
        true
    }

    fn empty(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn length(&self, array: &Value) -> Result<usize, ValueTypeError> {
        Ok(array.try_array()?.len())
    }

    fn element_at<'a>(
        &self,
        array: &'a Value,
        index: usize,
    ) -> Result<Cow<'a, Value>, ValueTypeError> {
        array
            .try_array()?
            .get(index)
            .map(Cow::Borrowed)
            .ok_or_else(|| out_of_bounds(array, index))
    }

    fn build(&self, elements: Vec<Value>) -> Result<Value, ValueTypeError> {
        Ok(Value::Array(elements))
    }
}

/// Packed `Value::Bytes` for arrays of non-null `byte`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesRepr;

impl ArrayRepr for BytesRepr {
    fn name(&self) -> &'static str {
        "bytes"
    }

    fn accepts(&self, element: &dyn FieldType) -> bool {
        !element.shape().nullable && element.shape().shape == ValueShape::I8
    }

    fn empty(&self) -> Value {
        Value::bytes(b"")
    }

    fn length(&self, array: &Value) -> Result<usize, ValueTypeError> {
        match array {
            Value::Array(elements) => Ok(elements.len()),
            _ => Ok(array.try_bytes()?.len()),
        }
    }

    /// Reads packed bytes, or a `Value::Array` of `I8` as produced by
    /// `From<Vec<i8>>`.
    fn element_at<'a>(
        &self,
        array: &'a Value,
        index: usize,
    ) -> Result<Cow<'a, Value>, ValueTypeError> {
        if let Value::Array(elements) = array {
            let element = elements
                .get(index)
                .ok_or_else(|| out_of_bounds(array, index))?;
            element.try_i8()?;
            return Ok(Cow::Borrowed(element));
        }
        array
            .try_bytes()?
            .get(index)
            .map(|&b| Cow::Owned(Value::I8(b as i8)))
            .ok_or_else(|| out_of_bounds(array, index))
    }

    fn build(&self, elements: Vec<Value>) -> Result<Value, ValueTypeError> {
        let bytes = elements
            .iter()
            .map(|e| e.try_i8().map(|b| b as u8))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_repr_reads_twos_complement() {
        let array = Value::bytes([0x00, 0xff, 0x7f]);
        assert_eq!(BytesRepr.length(&array).unwrap(), 3);
        assert_eq!(*BytesRepr.element_at(&array, 1).unwrap(), Value::I8(-1));
        assert!(BytesRepr.element_at(&array, 3).is_err());
        assert_eq!(
            BytesRepr.build(vec![Value::I8(-1), Value::I8(5)]).unwrap(),
            Value::bytes([0xff, 0x05])
        );
        assert!(BytesRepr.build(vec![Value::I32(1)]).is_err());
    }

    #[test]
    fn bytes_repr_reads_i8_lists() {
        let array = Value::from(vec![3i8, -1]);
        assert_eq!(BytesRepr.length(&array).unwrap(), 2);
        assert_eq!(*BytesRepr.element_at(&array, 1).unwrap(), Value::I8(-1));
        assert!(BytesRepr.element_at(&array, 2).is_err());

        let mixed = Value::Array(vec![Value::I8(1), Value::I32(2)]);
        assert!(BytesRepr.element_at(&mixed, 1).is_err());
        assert!(BytesRepr.length(&Value::I8(1)).is_err());
    }

    #[test]
    fn list_repr_rejects_packed_bytes() {
        assert!(ListRepr.length(&Value::bytes([1])).is_err());
        assert_eq!(ListRepr.length(&ListRepr.empty()).unwrap(), 0);
    }
}
