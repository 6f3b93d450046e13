//! Built-in leaf types.

mod boolean;
mod enumeration;
mod float;
mod integer;
mod string;

pub use boolean::BooleanType;
pub use enumeration::EnumType;
pub use float::{FloatType, FloatWidth};
pub use integer::{IntWidth, IntegerType};
pub use string::StringType;
