//! `Serialize` for [`PackValue`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::PackValue;

impl Serialize for PackValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PackValue::Null | PackValue::Undefined => serializer.serialize_unit(),
            PackValue::Bool(b) => serializer.serialize_bool(*b),
            PackValue::Integer(i) => serializer.serialize_i64(*i),
            PackValue::UInteger(u) => serializer.serialize_u64(*u),
            PackValue::Float(f) => serializer.serialize_f64(*f),
            PackValue::Bytes(b) => serializer.serialize_bytes(b),
            PackValue::Str(s) => serializer.serialize_str(s),
            PackValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PackValue::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (key, value) in obj {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::PackValue;

    #[test]
    fn serializes_through_serde_json() {
        let v = PackValue::Object(vec![
            ("b".into(), PackValue::Bytes(vec![1, 2])),
            ("n".into(), PackValue::Undefined),
            ("f".into(), PackValue::Float(0.5)),
        ]);
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"b":[1,2],"n":null,"f":0.5}"#
        );
    }
}
