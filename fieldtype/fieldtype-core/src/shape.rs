//! Semantic value shapes used to look field types up without introspection.

use std::fmt::{Display, Formatter, Result};

/// Runtime value shape a field type encodes.
///
/// Variant names mirror [`Value`](crate::Value) for consistency (values ↔ shapes).
/// This describes what a caller holds, not how it is laid out on disk; several
/// field types may share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    /// Enum of the given identifiers, in ordinal order.
    Enum(Vec<String>),
    Array(Box<ElementShape>),
}

impl ValueShape {
    pub fn array_of(element: ElementShape) -> Self {
        ValueShape::Array(Box::new(element))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, ValueShape::Array(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ValueShape::Bool => "bool",
            ValueShape::I8 => "i8",
            ValueShape::I16 => "i16",
            ValueShape::I32 => "i32",
            ValueShape::I64 => "i64",
            ValueShape::F32 => "f32",
            ValueShape::F64 => "f64",
            ValueShape::String => "string",
            ValueShape::Enum(_) => "enum",
            ValueShape::Array(_) => "array",
        }
    }
}

impl Display for ValueShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ValueShape::Enum(identifiers) => write!(f, "enum{{{}}}", identifiers.join(",")),
            ValueShape::Array(element) => write!(f, "{element}[]"),
            other => f.write_str(other.type_name()),
        }
    }
}

/// A shape together with whether `null` is part of its domain.
///
/// Used both for top-level field shapes and for array elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementShape {
    pub shape: ValueShape,
    pub nullable: bool,
}

impl ElementShape {
    pub fn new(shape: ValueShape, nullable: bool) -> Self {
        Self { shape, nullable }
    }

    pub fn non_null(shape: ValueShape) -> Self {
        Self::new(shape, false)
    }

    pub fn nullable(shape: ValueShape) -> Self {
        Self::new(shape, true)
    }

    /// Number of nested array levels, looking through element nullability.
    pub fn dimensions(&self) -> usize {
        let mut dims = 0;
        let mut current = &self.shape;
        while let ValueShape::Array(element) = current {
            dims += 1;
            current = &element.shape;
        }
        dims
    }
}

impl Display for ElementShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.shape)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nests_arrays_and_nullability() {
        let shape = ElementShape::non_null(ValueShape::array_of(ElementShape::nullable(
            ValueShape::array_of(ElementShape::non_null(ValueShape::I32)),
        )));
        assert_eq!(shape.to_string(), "i32[]?[]");
        assert_eq!(shape.dimensions(), 2);
    }

    #[test]
    fn enum_display_lists_identifiers() {
        let shape = ValueShape::Enum(vec!["RED".into(), "GREEN".into()]);
        assert_eq!(shape.to_string(), "enum{RED,GREEN}");
        assert!(shape.is_primitive());
    }
}
