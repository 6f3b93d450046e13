//! Built-in field types.
//!
//! Every type here implements [`FieldType`] with an order-preserving,
//! self-delimiting binary encoding:
//!
//! | type              | value          | encoding                        |
//! |-------------------|----------------|---------------------------------|
//! | `boolean`         | `Bool`         | `0x00` / `0x01`                 |
//! | `byte` .. `long`  | `I8` .. `I64`  | big-endian, sign bit flipped    |
//! | `float`, `double` | `F32`, `F64`   | IEEE bits in total order        |
//! | `string`          | `String`       | escaped UTF-8, `0x00` terminated|
//! | enums             | `Enum`         | big-endian `u32` ordinal        |
//! | `T?`              | `Null` or `T`  | `0x00`, or `0x01` + `T`         |
//! | `T[]`             | `Array`        | (`0x01` + `T`)*, then `0x00`    |

mod array;
mod convert;
mod null_safe;
mod types;

use std::sync::Arc;

use fieldtype_core::FieldType;

pub use array::{ArrayRepr, ArrayType, BytesRepr, ListRepr};
pub use null_safe::NullSafeType;
pub use types::{
    BooleanType, EnumType, FloatType, FloatWidth, IntWidth, IntegerType, StringType,
};

/// The built-in leaf types, in registration order.
pub fn builtin_types() -> Vec<Arc<dyn FieldType>> {
    vec![
        Arc::new(BooleanType::new()),
        Arc::new(IntegerType::byte()),
        Arc::new(IntegerType::short()),
        Arc::new(IntegerType::int()),
        Arc::new(IntegerType::long()),
        Arc::new(FloatType::float()),
        Arc::new(FloatType::double()),
        Arc::new(StringType::new()),
    ]
}
