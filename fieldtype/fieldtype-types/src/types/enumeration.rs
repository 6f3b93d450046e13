use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use bytes::Buf;
use fieldtype_core::{
    ConversionError, ElementShape, EncodeError, EnumValue, FieldType, InvalidTypeDefinition,
    MalformedEncoding, ParseContext, ParseError, Value, ValueShape, ValueTypeError,
};

use crate::convert::{self, Source};

/// Enum of user-declared identifiers, ordered by declaration position.
///
/// Encoded as the big-endian `u32` ordinal; the text form is the identifier.
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    identifiers: Vec<Arc<str>>,
    ordinals: HashMap<Arc<str>, u32>,
    shape: ElementShape,
    signature: u64,
}

const NULL_KEYWORD: &str = "null";

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// FNV-1a over the identifier list; changes whenever ordinals would.
fn fingerprint(identifiers: &[Arc<str>]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET;
    for id in identifiers {
        for &b in id.as_bytes().iter().chain(&[0u8]) {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(PRIME);
        }
    }
    hash
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, identifiers: I) -> Result<Self, InvalidTypeDefinition>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(InvalidTypeDefinition::InvalidName {
                name,
                detail: "enum type names must be identifiers".to_string(),
            });
        }

        let mut ids: Vec<Arc<str>> = Vec::new();
        let mut ordinals = HashMap::new();
        for id in identifiers {
            let id = id.as_ref();
            if !is_identifier(id) {
                return Err(InvalidTypeDefinition::InvalidName {
                    name,
                    detail: format!("'{id}' is not a valid enum identifier"),
                });
            }
            // The null-safe text form reads `null` as the absent value.
            if id == NULL_KEYWORD {
                return Err(InvalidTypeDefinition::InvalidName {
                    name,
                    detail: format!("'{id}' is reserved"),
                });
            }
            let id: Arc<str> = Arc::from(id);
            let ordinal = u32::try_from(ids.len()).map_err(|_| InvalidTypeDefinition::InvalidName {
                name: name.clone(),
                detail: "too many identifiers".to_string(),
            })?;
            if ordinals.insert(id.clone(), ordinal).is_some() {
                return Err(InvalidTypeDefinition::DuplicateIdentifier {
                    name,
                    identifier: id.to_string(),
                });
            }
            ids.push(id);
        }
        if ids.is_empty() {
            return Err(InvalidTypeDefinition::EmptyEnum { name });
        }

        let shape = ElementShape::non_null(ValueShape::Enum(
            ids.iter().map(|id| id.to_string()).collect(),
        ));
        let signature = fingerprint(&ids);
        Ok(Self {
            name,
            identifiers: ids,
            ordinals,
            shape,
            signature,
        })
    }

    pub fn identifiers(&self) -> &[Arc<str>] {
        &self.identifiers
    }

    /// The constant named `identifier`, if declared.
    pub fn value_of(&self, identifier: &str) -> Option<Value> {
        self.ordinals
            .get_key_value(identifier)
            .map(|(name, &ordinal)| Value::Enum(EnumValue { ordinal, name: name.clone() }))
    }

    fn constant(&self, ordinal: u32) -> Option<Value> {
        self.identifiers
            .get(ordinal as usize)
            .map(|name| Value::Enum(EnumValue { ordinal, name: name.clone() }))
    }

    /// Ordinal of `value`, checking that it belongs to this type.
    fn ordinal_of(&self, value: &Value) -> Result<u32, EncodeError> {
        let e = value.try_enum()?;
        match self.identifiers.get(e.ordinal as usize) {
            Some(id) if *id == e.name => Ok(e.ordinal),
            _ => Err(EncodeError::InvalidValue {
                type_name: self.name.clone(),
                detail: format!("'{}' (ordinal {}) is not a constant of this enum", e.name, e.ordinal),
            }),
        }
    }
}

impl FieldType for EnumType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "enum"
    }

    fn encoding_signature(&self) -> u64 {
        self.signature
    }

    fn shape(&self) -> &ElementShape {
        &self.shape
    }

    fn default_value(&self) -> Value {
        Value::Enum(EnumValue {
            ordinal: 0,
            name: self.identifiers[0].clone(),
        })
    }

    fn encode_into(&self, value: &Value, dst: &mut Vec<u8>) -> Result<(), EncodeError> {
        let ordinal = self.ordinal_of(value)?;
        dst.extend_from_slice(&ordinal.to_be_bytes());
        Ok(())
    }

    fn decode(&self, src: &mut &[u8]) -> Result<Value, MalformedEncoding> {
        let ordinal = src
            .try_get_u32()
            .map_err(|_| MalformedEncoding::new(&self.name, "expected 4 bytes"))?;
        self.constant(ordinal).ok_or_else(|| {
            MalformedEncoding::new(&self.name, format!("ordinal {ordinal} is out of range"))
        })
    }

    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ValueTypeError> {
        Ok(a.try_enum()?.ordinal.cmp(&b.try_enum()?.ordinal))
    }

    fn write_parseable(&self, value: &Value, out: &mut String) -> Result<(), ValueTypeError> {
        out.push_str(&value.try_enum()?.name);
        Ok(())
    }

    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Value, ParseError> {
        let start = ctx.position();
        let token = ctx.token("enum identifier")?;
        self.value_of(token).ok_or_else(|| {
            ParseError::new(start, format!("unknown identifier '{token}' for enum '{}'", self.name))
        })
    }

    fn convert(&self, from: &dyn FieldType, value: &Value) -> Result<Value, ConversionError> {
        let from = match convert::prepare(self, from, value)? {
            Source::Identical => return Ok(value.clone()),
            Source::Scalar(from) => from,
        };
        let identifier = match value {
            Value::Enum(e) => &*e.name,
            Value::String(s) => &**s,
            _ => return Err(convert::incompatible(from, self)),
        };
        self.value_of(identifier).ok_or_else(|| {
            convert::out_of_domain(self, format!("'{identifier}' is not a constant"))
        })
    }
}
