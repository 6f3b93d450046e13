use std::sync::Arc;

use fieldtype::{
    ElementShape, FieldType, FieldTypeRegistry, RegistryError, Value, ValueShape,
    core::{InvalidTypeDefinition, MAX_DIMENSIONS},
    types::{EnumType, IntegerType},
};

fn shape(shape: ValueShape) -> ElementShape {
    ElementShape::non_null(shape)
}

fn colors() -> FieldTypeRegistry {
    FieldTypeRegistry::builder()
        .with_default_types()
        .with_enum("Color", ["RED", "GREEN", "BLUE"])
        .build()
        .unwrap()
}

#[test]
fn lookup_by_name_synthesizes_arrays_and_null_safe_types() {
    let registry = FieldTypeRegistry::with_default_types();
    for name in ["int", "int[]", "int[][]", "string?", "string?[]", "int[]?", "long?[][]?"] {
        let ty = registry.lookup_by_name(name).unwrap();
        assert_eq!(ty.name(), name);
    }
    assert_eq!(registry.lookup_by_name("int[]?").unwrap().dimensions(), 0);
    assert_eq!(registry.lookup_by_name("long?[][]").unwrap().dimensions(), 2);
}

#[test]
fn lookup_by_name_rejects_unknown_and_malformed_names() {
    let registry = FieldTypeRegistry::with_default_types();
    assert!(matches!(
        registry.lookup_by_name("uuid"),
        Err(RegistryError::NotFound { ref name }) if name == "uuid"
    ));
    assert!(matches!(
        registry.lookup_by_name("uuid[]"),
        Err(RegistryError::NotFound { ref name }) if name == "uuid"
    ));
    assert!(matches!(
        registry.lookup_by_name("int??"),
        Err(RegistryError::InvalidTypeDefinition(InvalidTypeDefinition::InvalidName { .. }))
    ));
    assert!(registry.get("int??").is_none());
}

#[test]
fn lookup_by_name_enforces_dimension_ceiling() {
    let registry = FieldTypeRegistry::with_default_types();
    let max = format!("int{}", "[]".repeat(MAX_DIMENSIONS));
    assert_eq!(registry.lookup_by_name(&max).unwrap().dimensions(), MAX_DIMENSIONS);

    let over = format!("int{}", "[]".repeat(MAX_DIMENSIONS + 1));
    assert!(matches!(
        registry.lookup_by_name(&over),
        Err(RegistryError::InvalidTypeDefinition(
            InvalidTypeDefinition::TooManyDimensions { dimensions: 256, .. }
        ))
    ));
}

#[test]
fn synthesized_types_equal_each_other() {
    let registry = FieldTypeRegistry::with_default_types();
    let a = registry.lookup_by_name("short?[]").unwrap();
    let b = registry.lookup_by_name("short?[]").unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(*a == *b);
}

#[test]
fn register_rejects_duplicate_names() {
    let mut registry = FieldTypeRegistry::with_default_types();
    let err = registry.register(Arc::new(IntegerType::int())).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateName { name: "int".to_string() });

    let err = FieldTypeRegistry::builder()
        .with_enum("Color", ["RED"])
        .with_enum("Color", ["BLUE"])
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { .. }));
}

#[test]
fn builder_surfaces_invalid_enum_definitions() {
    let err = FieldTypeRegistry::builder()
        .with_enum("Empty", Vec::<String>::new())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidTypeDefinition(InvalidTypeDefinition::EmptyEnum { .. })
    ));
}

#[test]
fn get_with_signature_checks_enum_layout() {
    let registry = colors();
    let color = registry.lookup_by_name("Color").unwrap();
    let signature = color.encoding_signature();

    assert!(registry.get_with_signature("Color", signature).is_ok());
    assert!(registry.get_with_signature("Color[]", signature).is_ok());
    assert!(matches!(
        registry.get_with_signature("Color", signature ^ 1),
        Err(RegistryError::SignatureMismatch { .. })
    ));
    assert!(registry.get_with_signature("int", 0).is_ok());
}

#[test]
fn lookup_by_shape_finds_leaves_and_synthesizes_composites() {
    let registry = colors();

    let found = registry.lookup_by_shape(&shape(ValueShape::I64)).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "long");

    let nullable = ElementShape::nullable(ValueShape::String);
    let found = registry.lookup_by_shape(&nullable).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "string?");

    let nested = shape(ValueShape::array_of(ElementShape::nullable(ValueShape::array_of(
        shape(ValueShape::Enum(vec!["RED".into(), "GREEN".into(), "BLUE".into()])),
    ))));
    let found = registry.lookup_by_shape(&nested).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Color[]?[]");
    assert_eq!(found[0].shape(), &nested);

    let bytes = registry
        .lookup_by_shape(&shape(ValueShape::array_of(shape(ValueShape::I8))))
        .unwrap();
    assert_eq!(bytes[0].as_array().unwrap().repr_name(), "bytes");

    let unknown = shape(ValueShape::Enum(vec!["UP".into(), "DOWN".into()]));
    assert!(registry.lookup_by_shape(&unknown).unwrap().is_empty());
}

#[test]
fn resolve_fails_closed_on_ambiguous_shapes() {
    let registry = FieldTypeRegistry::builder()
        .with_default_types()
        .with_enum("Color", ["RED", "GREEN"])
        .with_enum("Light", ["RED", "GREEN"])
        .build()
        .unwrap();
    let enum_shape = shape(ValueShape::Enum(vec!["RED".into(), "GREEN".into()]));

    match registry.resolve(&enum_shape, None) {
        Err(RegistryError::AmbiguousType { candidates, .. }) => {
            assert_eq!(candidates, ["Color", "Light"]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }

    let array_shape = shape(ValueShape::array_of(enum_shape.clone()));
    assert!(matches!(
        registry.resolve(&array_shape, None),
        Err(RegistryError::AmbiguousType { ref candidates, .. })
            if candidates == &["Color[]", "Light[]"]
    ));

    let light = registry.resolve(&enum_shape, Some("Light")).unwrap();
    assert_eq!(light.name(), "Light");
}

#[test]
fn resolve_with_explicit_name_checks_shape() {
    let registry = FieldTypeRegistry::with_default_types();
    let err = registry
        .resolve(&shape(ValueShape::I32), Some("long"))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::ShapeMismatch {
            name: "long".to_string(),
            expected: "i32".to_string(),
            actual: "i64".to_string(),
        }
    );

    let nullable = ElementShape::nullable(ValueShape::I32);
    assert_eq!(registry.resolve(&nullable, Some("int?")).unwrap().name(), "int?");
    assert!(registry.resolve(&nullable, Some("int")).is_err());
}

#[test]
fn resolve_reports_missing_shapes() {
    let registry = FieldTypeRegistry::new();
    assert!(registry.is_empty());
    assert!(matches!(
        registry.resolve(&shape(ValueShape::Bool), None),
        Err(RegistryError::NoMatch { .. })
    ));
}

#[test]
fn custom_types_take_part_in_lookup() {
    let status: Arc<dyn FieldType> = Arc::new(EnumType::new("Status", ["OPEN", "CLOSED"]).unwrap());
    let registry = FieldTypeRegistry::builder()
        .with_default_types()
        .with_type(status)
        .build()
        .unwrap();

    let ty = registry.lookup_by_name("Status?[]").unwrap();
    let value = ty.from_parseable_string("[CLOSED, null, OPEN]").unwrap();
    assert_eq!(ty.to_parseable_string(&value).unwrap(), "[CLOSED, null, OPEN]");
    let bytes = ty.encode(&value).unwrap();
    assert_eq!(ty.decode_exact(&bytes).unwrap(), value);
    assert!(matches!(value, Value::Array(ref items) if items[1].is_null()));
}

#[test]
fn shared_registry_serves_concurrent_readers() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let registry = FieldTypeRegistry::shared();
                let ty = registry.lookup_by_name("int[]").unwrap();
                let value = Value::Array(vec![Value::I32(i), Value::I32(-i)]);
                ty.decode_exact(&ty.encode(&value).unwrap()).unwrap() == value
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
