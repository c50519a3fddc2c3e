//! `Deserialize` for [`PackValue`], and [`PackValue`] as a `Deserializer`.
//!
//! The second half is what lets a decoded UBJSON tree populate any
//! `DeserializeOwned` target without detouring through `serde_json::Value`.

use std::fmt;

use serde::de::value::{MapDeserializer, SeqDeserializer, StringDeserializer};
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    Unexpected, VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use thiserror::Error;

use crate::PackValue;

/// Error produced when a [`PackValue`] does not fit the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackValueError {
    #[error("{0}")]
    Custom(String),
}

impl de::Error for PackValueError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        PackValueError::Custom(msg.to_string())
    }
}

// ---------------------------------------------------------------------------
// Deserialize
// ---------------------------------------------------------------------------

struct PackValueVisitor;

impl<'de> Visitor<'de> for PackValueVisitor {
    type Value = PackValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-compatible value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<PackValue, E> {
        Ok(PackValue::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<PackValue, E> {
        Ok(PackValue::Integer(i))
    }

    fn visit_u64<E>(self, u: u64) -> Result<PackValue, E> {
        Ok(PackValue::from(u))
    }

    fn visit_f64<E>(self, f: f64) -> Result<PackValue, E> {
        Ok(PackValue::Float(f))
    }

    fn visit_str<E>(self, s: &str) -> Result<PackValue, E> {
        Ok(PackValue::Str(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> Result<PackValue, E> {
        Ok(PackValue::Str(s))
    }

    fn visit_bytes<E>(self, b: &[u8]) -> Result<PackValue, E> {
        Ok(PackValue::Bytes(b.to_vec()))
    }

    fn visit_byte_buf<E>(self, b: Vec<u8>) -> Result<PackValue, E> {
        Ok(PackValue::Bytes(b))
    }

    fn visit_none<E>(self) -> Result<PackValue, E> {
        Ok(PackValue::Null)
    }

    fn visit_unit<E>(self) -> Result<PackValue, E> {
        Ok(PackValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<PackValue, D::Error> {
        de::Deserialize::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<PackValue, D::Error> {
        de::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PackValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(PackValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PackValue, A::Error> {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some((key, value)) = map.next_entry::<String, PackValue>()? {
            fields.push((key, value));
        }
        Ok(PackValue::Object(fields))
    }
}

impl<'de> de::Deserialize<'de> for PackValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PackValueVisitor)
    }
}

// ---------------------------------------------------------------------------
// PackValue as a Deserializer
// ---------------------------------------------------------------------------

impl<'de> IntoDeserializer<'de, PackValueError> for PackValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

fn visit_array<'de, V: Visitor<'de>>(
    items: Vec<PackValue>,
    visitor: V,
) -> Result<V::Value, PackValueError> {
    let mut seq: SeqDeserializer<_, PackValueError> = SeqDeserializer::new(items.into_iter());
    let value = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(value)
}

fn visit_bytes_as_seq<'de, V: Visitor<'de>>(
    bytes: Vec<u8>,
    visitor: V,
) -> Result<V::Value, PackValueError> {
    let mut seq: SeqDeserializer<_, PackValueError> = SeqDeserializer::new(bytes.into_iter());
    let value = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(value)
}

fn visit_object<'de, V: Visitor<'de>>(
    fields: Vec<(String, PackValue)>,
    visitor: V,
) -> Result<V::Value, PackValueError> {
    let mut map: MapDeserializer<'de, _, PackValueError> = MapDeserializer::new(fields.into_iter());
    let value = visitor.visit_map(&mut map)?;
    map.end()?;
    Ok(value)
}

impl<'de> Deserializer<'de> for PackValue {
    type Error = PackValueError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self {
            PackValue::Null | PackValue::Undefined => visitor.visit_unit(),
            PackValue::Bool(b) => visitor.visit_bool(b),
            PackValue::Integer(i) => visitor.visit_i64(i),
            PackValue::UInteger(u) => visitor.visit_u64(u),
            PackValue::Float(f) => visitor.visit_f64(f),
            // Vec<u8> and friends deserialize from a sequence.
            PackValue::Bytes(b) => visit_bytes_as_seq(b, visitor),
            PackValue::Str(s) => visitor.visit_string(s),
            PackValue::Array(items) => visit_array(items, visitor),
            PackValue::Object(fields) => visit_object(fields, visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self {
            PackValue::Null | PackValue::Undefined => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self {
            PackValue::Null | PackValue::Undefined => visitor.visit_unit(),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self {
            PackValue::Bytes(b) => visitor.visit_byte_buf(b),
            PackValue::Str(s) => visitor.visit_string(s),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self {
            PackValue::Str(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: PackValue::Null,
            }),
            PackValue::Object(mut fields) if fields.len() == 1 => {
                let (variant, value) = fields.remove(0);
                visitor.visit_enum(EnumDeserializer { variant, value })
            }
            other => Err(de::Error::invalid_type(
                other.unexpected(),
                &"string or single-key object",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        seq tuple tuple_struct map struct unit_struct identifier ignored_any
    }
}

impl PackValue {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            PackValue::Null | PackValue::Undefined => Unexpected::Unit,
            PackValue::Bool(b) => Unexpected::Bool(*b),
            PackValue::Integer(i) => Unexpected::Signed(*i),
            PackValue::UInteger(u) => Unexpected::Unsigned(*u),
            PackValue::Float(f) => Unexpected::Float(*f),
            PackValue::Bytes(b) => Unexpected::Bytes(b),
            PackValue::Str(s) => Unexpected::Str(s),
            PackValue::Array(_) => Unexpected::Seq,
            PackValue::Object(_) => Unexpected::Map,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: PackValue,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = PackValueError;
    type Variant = VariantDeserializer;

    fn variant_seed<S: DeserializeSeed<'de>>(
        self,
        seed: S,
    ) -> Result<(S::Value, Self::Variant), Self::Error> {
        let name: StringDeserializer<PackValueError> = self.variant.into_deserializer();
        let variant = seed.deserialize(name)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: PackValue,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = PackValueError;

    fn unit_variant(self) -> Result<(), Self::Error> {
        if self.value.is_null() {
            Ok(())
        } else {
            Err(de::Error::invalid_type(
                self.value.unexpected(),
                &"unit variant",
            ))
        }
    }

    fn newtype_variant_seed<S: DeserializeSeed<'de>>(
        self,
        seed: S,
    ) -> Result<S::Value, Self::Error> {
        seed.deserialize(self.value)
    }

    fn tuple_variant<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.value.deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.value.deserialize_map(visitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: i32, h: i32 },
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Doc {
        name: String,
        tags: Vec<String>,
        blob: Vec<u8>,
        missing: Option<u32>,
        shapes: Vec<Shape>,
    }

    #[test]
    fn deserializes_struct_from_pack_value() {
        let value = PackValue::Object(vec![
            ("name".into(), PackValue::Str("doc".into())),
            (
                "tags".into(),
                PackValue::Array(vec![PackValue::Str("a".into())]),
            ),
            ("blob".into(), PackValue::Bytes(vec![0, 255, 16])),
            ("missing".into(), PackValue::Null),
            (
                "shapes".into(),
                PackValue::Array(vec![
                    PackValue::Str("Empty".into()),
                    PackValue::Object(vec![("Circle".into(), PackValue::Float(1.5))]),
                    PackValue::Object(vec![(
                        "Rect".into(),
                        PackValue::Object(vec![
                            ("w".into(), PackValue::Integer(2)),
                            ("h".into(), PackValue::Integer(3)),
                        ]),
                    )]),
                ]),
            ),
        ]);
        let doc = Doc::deserialize(value).unwrap();
        assert_eq!(
            doc,
            Doc {
                name: "doc".into(),
                tags: vec!["a".into()],
                blob: vec![0, 255, 16],
                missing: None,
                shapes: vec![
                    Shape::Empty,
                    Shape::Circle(1.5),
                    Shape::Rect { w: 2, h: 3 }
                ],
            }
        );
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = u32::deserialize(PackValue::Str("x".into())).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "got: {err}");
        assert!(i8::deserialize(PackValue::Integer(300)).is_err());
    }

    #[test]
    fn deserializes_pack_value_from_json_text() {
        let v: PackValue = serde_json::from_str(r#"{"a":[1,-2,3.5,"s",null]}"#).unwrap();
        assert_eq!(
            v,
            PackValue::Object(vec![(
                "a".into(),
                PackValue::Array(vec![
                    PackValue::Integer(1),
                    PackValue::Integer(-2),
                    PackValue::Float(3.5),
                    PackValue::Str("s".into()),
                    PackValue::Null,
                ])
            )])
        );
    }
}
