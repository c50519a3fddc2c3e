//! [`PackValue`] - the format-neutral value tree.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// A generic value that both codecs can decode into and encode from.
///
/// Objects keep their key order, which lets a JSON payload survive a
/// JSON → UBJSON → JSON trip with its fields in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PackValue {
    #[default]
    Null,
    /// UBJSON no-op marker. JSON has no equivalent and writes `null`.
    Undefined,
    Bool(bool),
    Integer(i64),
    /// Only used for values above `i64::MAX`.
    UInteger(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<PackValue>),
    Object(Vec<(String, PackValue)>),
}

impl PackValue {
    /// Builds a value tree from anything serde can serialize.
    ///
    /// Goes through `serde_json::Value`, so byte buffers arrive as arrays of
    /// integers rather than [`PackValue::Bytes`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(PackValue::from)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PackValue::Null | PackValue::Undefined)
    }

    /// Looks up an object field by key.
    pub fn get(&self, key: &str) -> Option<&PackValue> {
        match self {
            PackValue::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for PackValue {
    fn from(b: bool) -> Self {
        PackValue::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for PackValue {
            fn from(i: $t) -> Self {
                PackValue::Integer(i64::from(i))
            }
        }
    )*};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for PackValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => PackValue::Integer(i),
            Err(_) => PackValue::UInteger(u),
        }
    }
}

impl From<f64> for PackValue {
    fn from(f: f64) -> Self {
        PackValue::Float(f)
    }
}

impl From<&str> for PackValue {
    fn from(s: &str) -> Self {
        PackValue::Str(s.to_owned())
    }
}

impl From<String> for PackValue {
    fn from(s: String) -> Self {
        PackValue::Str(s)
    }
}

impl From<Vec<u8>> for PackValue {
    fn from(b: Vec<u8>) -> Self {
        PackValue::Bytes(b)
    }
}

impl From<&[u8]> for PackValue {
    fn from(b: &[u8]) -> Self {
        PackValue::Bytes(b.to_vec())
    }
}

impl From<Vec<PackValue>> for PackValue {
    fn from(items: Vec<PackValue>) -> Self {
        PackValue::Array(items)
    }
}

impl<T: Into<PackValue>> From<Option<T>> for PackValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(PackValue::Null, Into::into)
    }
}

impl From<JsonValue> for PackValue {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => PackValue::Null,
            JsonValue::Bool(b) => PackValue::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PackValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    PackValue::UInteger(u)
                } else {
                    PackValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => PackValue::Str(s),
            JsonValue::Array(arr) => PackValue::Array(arr.into_iter().map(PackValue::from).collect()),
            JsonValue::Object(obj) => PackValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, PackValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for PackValue {
    fn from(v: &JsonValue) -> Self {
        PackValue::from(v.clone())
    }
}

/// Lossy conversion: `Undefined` and non-finite floats become `null`,
/// bytes become an array of integers.
impl From<PackValue> for JsonValue {
    fn from(v: PackValue) -> Self {
        match v {
            PackValue::Null | PackValue::Undefined => JsonValue::Null,
            PackValue::Bool(b) => JsonValue::Bool(b),
            PackValue::Integer(i) => JsonValue::from(i),
            PackValue::UInteger(u) => JsonValue::from(u),
            PackValue::Float(f) => serde_json::Number::from_f64(f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            PackValue::Bytes(b) => JsonValue::Array(b.into_iter().map(JsonValue::from).collect()),
            PackValue::Str(s) => JsonValue::String(s),
            PackValue::Array(arr) => JsonValue::Array(arr.into_iter().map(JsonValue::from).collect()),
            PackValue::Object(obj) => JsonValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}
