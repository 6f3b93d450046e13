use std::sync::Arc;

use fieldtype_core::{ConversionError, FieldType, Value};
use fieldtype_types::{BooleanType, EnumType, FloatType, IntegerType, NullSafeType, StringType};

fn convert(to: &dyn FieldType, from: &dyn FieldType, value: Value) -> Result<Value, ConversionError> {
    to.convert(from, &value)
}

#[test]
fn integers_widen_and_narrow_exactly() {
    let (byte, long) = (IntegerType::byte(), IntegerType::long());
    assert_eq!(convert(&long, &byte, Value::I8(-7)).unwrap(), Value::I64(-7));
    assert_eq!(convert(&byte, &long, Value::I64(127)).unwrap(), Value::I8(127));
    assert!(matches!(
        convert(&byte, &long, Value::I64(128)),
        Err(ConversionError::OutOfDomain { .. })
    ));
}

#[test]
fn floats_and_integers_convert_only_when_exact() {
    let (int, double, float) = (IntegerType::int(), FloatType::double(), FloatType::float());
    assert_eq!(convert(&int, &double, Value::F64(42.0)).unwrap(), Value::I32(42));
    assert!(convert(&int, &double, Value::F64(42.5)).is_err());
    assert!(convert(&int, &double, Value::F64(f64::NAN)).is_err());
    assert_eq!(convert(&double, &int, Value::I32(-3)).unwrap(), Value::F64(-3.0));
    assert_eq!(convert(&float, &double, Value::F64(0.25)).unwrap(), Value::F32(0.25));
    assert!(convert(&float, &double, Value::F64(0.1)).is_err());
    assert_eq!(convert(&double, &float, Value::F32(0.1)).unwrap(), Value::F64(f64::from(0.1f32)));
}

#[test]
fn booleans_map_to_zero_and_one() {
    let (boolean, short) = (BooleanType::new(), IntegerType::short());
    assert_eq!(convert(&short, &boolean, Value::Bool(true)).unwrap(), Value::I16(1));
    assert_eq!(convert(&boolean, &short, Value::I16(0)).unwrap(), Value::Bool(false));
    assert!(matches!(
        convert(&boolean, &short, Value::I16(2)),
        Err(ConversionError::OutOfDomain { .. })
    ));
    assert!(matches!(
        convert(&FloatType::double(), &boolean, Value::Bool(true)),
        Err(ConversionError::Incompatible { .. })
    ));
}

#[test]
fn strings_round_trip_through_text_form() {
    let string = StringType::new();
    let double = FloatType::double();
    let boolean = BooleanType::new();
    assert_eq!(convert(&string, &double, Value::F64(1.5)).unwrap(), Value::string("1.5"));
    assert_eq!(convert(&double, &string, Value::string("1.5")).unwrap(), Value::F64(1.5));
    assert_eq!(convert(&string, &boolean, Value::Bool(true)).unwrap(), Value::string("true"));
    assert_eq!(convert(&boolean, &string, Value::string("false")).unwrap(), Value::Bool(false));
    assert!(convert(&boolean, &string, Value::string("yes")).is_err());
    assert!(convert(&IntegerType::int(), &string, Value::string("12 ")).is_err());
}

#[test]
fn enums_convert_by_identifier() {
    let old = EnumType::new("Color", ["RED", "GREEN", "BLUE"]).unwrap();
    let new = EnumType::new("Color", ["BLUE", "RED"]).unwrap();
    let string = StringType::new();

    let green = old.value_of("GREEN").unwrap();
    let red = old.value_of("RED").unwrap();
    assert_eq!(convert(&new, &old, red).unwrap(), new.value_of("RED").unwrap());
    assert!(matches!(
        convert(&new, &old, green.clone()),
        Err(ConversionError::OutOfDomain { .. })
    ));
    assert_eq!(convert(&string, &old, green).unwrap(), Value::string("GREEN"));
    assert_eq!(
        convert(&new, &string, Value::string("BLUE")).unwrap(),
        new.value_of("BLUE").unwrap()
    );
    assert!(matches!(
        convert(&new, &IntegerType::int(), Value::I32(0)),
        Err(ConversionError::Incompatible { .. })
    ));
}

#[test]
fn null_safe_source_is_unwrapped() {
    let nullable_long = NullSafeType::new(Arc::new(IntegerType::long())).unwrap();
    let int = IntegerType::int();
    assert_eq!(convert(&int, &nullable_long, Value::I64(9)).unwrap(), Value::I32(9));
    assert!(matches!(
        convert(&int, &nullable_long, Value::Null),
        Err(ConversionError::UnexpectedNull { .. })
    ));
}

#[test]
fn identical_types_pass_values_through() {
    let string = StringType::new();
    assert_eq!(
        convert(&string, &StringType::new(), Value::string("x")).unwrap(),
        Value::string("x")
    );
}
