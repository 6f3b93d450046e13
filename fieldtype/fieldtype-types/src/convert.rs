//! Conversion rules shared by the scalar types.

use fieldtype_core::{ConversionError, FieldType, Value};

/// Result of the checks every scalar conversion starts with.
pub(crate) enum Source<'a> {
    /// Source and target are the same type; the value passes through.
    Identical,
    /// A different, non-array source type with any null-safe wrapper removed.
    Scalar(&'a dyn FieldType),
}

pub(crate) fn prepare<'a>(
    to: &dyn FieldType,
    from: &'a dyn FieldType,
    value: &Value,
) -> Result<Source<'a>, ConversionError> {
    if value.is_null() {
        return Err(ConversionError::UnexpectedNull {
            to: to.name().to_string(),
        });
    }
    let from = unwrap_null_safe(from);
    if from.type_key() == to.type_key() {
        return Ok(Source::Identical);
    }
    if from.as_array().is_some() {
        return Err(incompatible(from, to));
    }
    Ok(Source::Scalar(from))
}

pub(crate) fn unwrap_null_safe(from: &dyn FieldType) -> &dyn FieldType {
    match from.null_safe_inner() {
        Some(inner) => inner.as_ref(),
        None => from,
    }
}

pub(crate) fn incompatible(from: &dyn FieldType, to: &dyn FieldType) -> ConversionError {
    ConversionError::Incompatible {
        from: from.name().to_string(),
        to: to.name().to_string(),
    }
}

pub(crate) fn out_of_domain(to: &dyn FieldType, detail: impl Into<String>) -> ConversionError {
    ConversionError::OutOfDomain {
        to: to.name().to_string(),
        detail: detail.into(),
    }
}

/// Interpret `text` as the complete text form of a `to` value.
pub(crate) fn parse_text(to: &dyn FieldType, text: &str) -> Result<Value, ConversionError> {
    to.from_parseable_string(text)
        .map_err(|e| out_of_domain(to, format!("'{text}': {e}")))
}

/// Numeric reading of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Bool(bool),
    Int(i64),
    Float(f64),
}

pub(crate) fn numeric(value: &Value) -> Option<Numeric> {
    Some(match value {
        Value::Bool(v) => Numeric::Bool(*v),
        Value::I8(v) => Numeric::Int(i64::from(*v)),
        Value::I16(v) => Numeric::Int(i64::from(*v)),
        Value::I32(v) => Numeric::Int(i64::from(*v)),
        Value::I64(v) => Numeric::Int(*v),
        Value::F32(v) => Numeric::Float(f64::from(*v)),
        Value::F64(v) => Numeric::Float(*v),
        _ => return None,
    })
}

/// `f` as an `i64`, if it is integral and in range.
pub(crate) fn float_to_i64(f: f64) -> Option<i64> {
    const LOWER: f64 = i64::MIN as f64;
    if f.is_finite() && f.fract() == 0.0 && f >= LOWER && f < -LOWER {
        Some(f as i64)
    } else {
        None
    }
}

pub(crate) fn i64_to_f64(i: i64) -> Option<f64> {
    let f = i as f64;
    (f as i128 == i128::from(i)).then_some(f)
}

pub(crate) fn i64_to_f32(i: i64) -> Option<f32> {
    let f = i as f32;
    (f as i128 == i128::from(i)).then_some(f)
}

pub(crate) fn f64_to_f32(f: f64) -> Option<f32> {
    let g = f as f32;
    (f.is_nan() || f64::from(g) == f).then_some(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_to_i64_rejects_fractions_and_overflow() {
        assert_eq!(float_to_i64(3.0), Some(3));
        assert_eq!(float_to_i64(-0.0), Some(0));
        assert_eq!(float_to_i64(3.5), None);
        assert_eq!(float_to_i64(9.3e18), None);
        assert_eq!(float_to_i64(i64::MIN as f64), Some(i64::MIN));
        assert_eq!(float_to_i64(f64::NAN), None);
    }

    #[test]
    fn integer_to_float_must_round_trip() {
        assert_eq!(i64_to_f64(1 << 53), Some(9007199254740992.0));
        assert_eq!(i64_to_f64((1 << 53) + 1), None);
        assert_eq!(i64_to_f64(i64::MAX), None);
        assert_eq!(i64_to_f32(16_777_217), None);
        assert_eq!(i64_to_f32(-16_777_216), Some(-16_777_216.0));
    }

    #[test]
    fn narrowing_float_keeps_nan() {
        assert!(f64_to_f32(f64::NAN).is_some_and(f32::is_nan));
        assert_eq!(f64_to_f32(0.5), Some(0.5));
        assert_eq!(f64_to_f32(0.1), None);
    }
}
