//! Name and shape lookup over registered field types.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use fieldtype_core::{ElementShape, FieldType, InvalidTypeDefinition, MAX_DIMENSIONS, ValueShape};
use fieldtype_types::{ArrayRepr, ArrayType, BytesRepr, EnumType, NullSafeType, builtin_types};
use tracing::{debug, trace};

use crate::error::RegistryError;

/// Maps type names and value shapes to [`FieldType`] instances.
///
/// Only leaf (and custom) types are stored. Array and null-safe variants are
/// synthesized on demand from their names (`int[]`, `string?`) or shapes.
/// Lookups take `&self`; registration happens before the registry is shared.
#[derive(Debug, Default)]
pub struct FieldTypeRegistry {
    types: HashMap<String, Arc<dyn FieldType>>,
    order: Vec<String>,
}

/// Builder for configuring [`FieldTypeRegistry`].
#[derive(Debug, Default)]
pub struct FieldTypeRegistryBuilder {
    default_types: bool,
    types: Vec<Arc<dyn FieldType>>,
    enums: Vec<(String, Vec<String>)>,
}

impl FieldTypeRegistry {
    /// Create a builder for [`FieldTypeRegistry`].
    pub fn builder() -> FieldTypeRegistryBuilder {
        FieldTypeRegistryBuilder::default()
    }

    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in leaf types.
    pub fn with_default_types() -> Self {
        let mut registry = Self::new();
        for ty in builtin_types() {
            registry.insert(ty);
        }
        registry
    }

    /// Process-wide registry with the built-in types, created on first use.
    pub fn shared() -> &'static FieldTypeRegistry {
        static SHARED: OnceLock<FieldTypeRegistry> = OnceLock::new();
        SHARED.get_or_init(FieldTypeRegistry::with_default_types)
    }

    /// Register a type under its own name.
    pub fn register(&mut self, ty: Arc<dyn FieldType>) -> Result<(), RegistryError> {
        if self.types.contains_key(ty.name()) {
            return Err(RegistryError::DuplicateName {
                name: ty.name().to_string(),
            });
        }
        self.insert(ty);
        Ok(())
    }

    /// Build and register an enum type.
    pub fn register_enum<I, S>(
        &mut self,
        name: &str,
        identifiers: I,
    ) -> Result<Arc<dyn FieldType>, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ty: Arc<dyn FieldType> = Arc::new(EnumType::new(name, identifiers)?);
        self.register(ty.clone())?;
        Ok(ty)
    }

    fn insert(&mut self, ty: Arc<dyn FieldType>) {
        let name = ty.name().to_string();
        debug!(name = %name, kind = ty.kind(), shape = %ty.shape(), "registered field type");
        if self.types.insert(name.clone(), ty).is_none() {
            self.order.push(name);
        }
    }

    /// Registered types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &Arc<dyn FieldType>> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Find a type by name.
    ///
    /// Names not registered directly are synthesized from their base name:
    /// `T[]` is an array of `T` and `T?` the null-safe `T`, so `int?[][]` or
    /// `string[]?` resolve as long as the leaf is registered.
    pub fn lookup_by_name(&self, name: &str) -> Result<Arc<dyn FieldType>, RegistryError> {
        if let Some(ty) = self.types.get(name) {
            return Ok(ty.clone());
        }

        if let Some(base) = name.strip_suffix('?') {
            if base.ends_with('?') {
                return Err(InvalidTypeDefinition::InvalidName {
                    name: name.to_string(),
                    detail: "a type can be made null-safe only once".to_string(),
                }
                .into());
            }
            let inner = self.lookup_by_name(base)?;
            trace!(name = %name, "synthesized null-safe type");
            return Ok(Arc::new(NullSafeType::new(inner)?));
        }

        if name.ends_with("[]") {
            let dimensions = name.matches("[]").count();
            if dimensions > MAX_DIMENSIONS {
                return Err(InvalidTypeDefinition::TooManyDimensions {
                    name: name.to_string(),
                    dimensions,
                }
                .into());
            }
            let base = &name[..name.len() - 2];
            let element = self.lookup_by_name(base)?;
            trace!(name = %name, "synthesized array type");
            return Ok(array_of(element)?);
        }

        debug!(name = %name, "field type not found");
        Err(RegistryError::NotFound {
            name: name.to_string(),
        })
    }

    /// Like [`lookup_by_name`](Self::lookup_by_name), but `None` on any failure.
    pub fn get(&self, name: &str) -> Option<Arc<dyn FieldType>> {
        self.lookup_by_name(name).ok()
    }

    /// Find a type by name, requiring a specific encoding signature.
    pub fn get_with_signature(
        &self,
        name: &str,
        signature: u64,
    ) -> Result<Arc<dyn FieldType>, RegistryError> {
        let ty = self.lookup_by_name(name)?;
        let actual = ty.encoding_signature();
        if actual != signature {
            return Err(RegistryError::SignatureMismatch {
                name: name.to_string(),
                expected: signature,
                actual,
            });
        }
        Ok(ty)
    }

    /// Every type that can represent `shape`.
    ///
    /// Registered types whose shape matches come first, in registration
    /// order. A nullable shape also yields the null-safe form of each
    /// non-null candidate. An array shape with no registered match yields
    /// arrays synthesized over each element candidate.
    pub fn lookup_by_shape(
        &self,
        shape: &ElementShape,
    ) -> Result<Vec<Arc<dyn FieldType>>, RegistryError> {
        let dimensions = shape.dimensions();
        if dimensions > MAX_DIMENSIONS {
            return Err(InvalidTypeDefinition::TooManyDimensions {
                name: shape.to_string(),
                dimensions,
            }
            .into());
        }
        let candidates = self.candidates(shape)?;
        trace!(shape = %shape, count = candidates.len(), "shape lookup");
        Ok(candidates)
    }

    fn candidates(&self, shape: &ElementShape) -> Result<Vec<Arc<dyn FieldType>>, RegistryError> {
        let non_null = self.non_null_candidates(&shape.shape)?;
        if !shape.nullable {
            return Ok(non_null);
        }

        let mut out: Vec<Arc<dyn FieldType>> = self.registered_with_shape(shape).collect();
        for ty in non_null {
            let wrapped: Arc<dyn FieldType> = Arc::new(NullSafeType::new(ty)?);
            if !out.iter().any(|existing| **existing == *wrapped) {
                out.push(wrapped);
            }
        }
        Ok(out)
    }

    fn non_null_candidates(
        &self,
        shape: &ValueShape,
    ) -> Result<Vec<Arc<dyn FieldType>>, RegistryError> {
        let wanted = ElementShape::non_null(shape.clone());
        let direct: Vec<_> = self.registered_with_shape(&wanted).collect();
        match shape {
            ValueShape::Array(element) if direct.is_empty() => self
                .candidates(element)?
                .into_iter()
                .map(|ty| array_of(ty).map_err(RegistryError::from))
                .collect(),
            _ => Ok(direct),
        }
    }

    fn registered_with_shape<'a>(
        &'a self,
        shape: &'a ElementShape,
    ) -> impl Iterator<Item = Arc<dyn FieldType>> + 'a {
        self.types().filter(move |ty| ty.shape() == shape).cloned()
    }

    /// Pick the type for a field of the given shape.
    ///
    /// With an explicit name, that type is used and must represent `shape`.
    /// Without one, exactly one candidate must exist; several candidates are
    /// an [`AmbiguousType`](RegistryError::AmbiguousType) error rather than a
    /// guess.
    pub fn resolve(
        &self,
        shape: &ElementShape,
        explicit_name: Option<&str>,
    ) -> Result<Arc<dyn FieldType>, RegistryError> {
        if let Some(name) = explicit_name {
            let ty = self.lookup_by_name(name)?;
            if ty.shape() != shape {
                return Err(RegistryError::ShapeMismatch {
                    name: name.to_string(),
                    expected: shape.to_string(),
                    actual: ty.shape().to_string(),
                });
            }
            return Ok(ty);
        }

        let mut candidates = self.lookup_by_shape(shape)?;
        match candidates.len() {
            0 => {
                debug!(shape = %shape, "no field type matches shape");
                Err(RegistryError::NoMatch {
                    shape: shape.to_string(),
                })
            }
            1 => Ok(candidates.remove(0)),
            _ => {
                let names: Vec<String> = candidates.iter().map(|ty| ty.name().to_string()).collect();
                debug!(shape = %shape, candidates = ?names, "ambiguous shape lookup");
                Err(RegistryError::AmbiguousType {
                    shape: shape.to_string(),
                    candidates: names,
                })
            }
        }
    }
}

/// Array over `element`, packed as bytes when the element is `byte`.
fn array_of(element: Arc<dyn FieldType>) -> Result<Arc<dyn FieldType>, InvalidTypeDefinition> {
    if BytesRepr.accepts(element.as_ref()) {
        Ok(Arc::new(ArrayType::bytes(element)?))
    } else {
        Ok(Arc::new(ArrayType::new(element)?))
    }
}

impl FieldTypeRegistryBuilder {
    /// Register the built-in leaf types.
    pub fn with_default_types(mut self) -> Self {
        self.default_types = true;
        self
    }

    /// Register a custom type.
    pub fn with_type(mut self, ty: Arc<dyn FieldType>) -> Self {
        self.types.push(ty);
        self
    }

    /// Register an enum type with the given identifiers, in ordinal order.
    pub fn with_enum<I, S>(mut self, name: impl Into<String>, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums
            .push((name.into(), identifiers.into_iter().map(Into::into).collect()));
        self
    }

    /// Build the registry; fails on duplicate names or invalid enum definitions.
    pub fn build(self) -> Result<FieldTypeRegistry, RegistryError> {
        let mut registry = if self.default_types {
            FieldTypeRegistry::with_default_types()
        } else {
            FieldTypeRegistry::new()
        };
        for ty in self.types {
            registry.register(ty)?;
        }
        for (name, identifiers) in self.enums {
            registry.register_enum(&name, identifiers)?;
        }
        Ok(registry)
    }
}
