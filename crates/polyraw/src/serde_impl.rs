//! serde integration for [`RawMessage`].
//!
//! Serializing writes the held payload as a nested value of the enclosing
//! document. Deserializing captures the nested value and stores it as JSON
//! bytes for human-readable formats, UBJSON bytes otherwise.

use polyraw_pack::codecs::{Codecs, JsonValueCodec};
use polyraw_pack::json::JsonEncoder;
use polyraw_pack::ubjson::UbjsonEncoder;
use polyraw_pack::PackValue;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};

use crate::raw::Raw;
use crate::{DecodeError, RawMessage, RawMessageError};

impl RawMessage {
    /// The held payload as a value tree, to be written into an enclosing
    /// document.
    fn to_pack_value(&self) -> Result<PackValue, RawMessageError> {
        let mut codecs = Codecs::new();
        let value = match self.raw().ok_or(RawMessageError::Uninitialized)? {
            Raw::Json(raw) => codecs.json.decode(raw.as_bytes()),
            Raw::Ubjson(raw) => codecs.ubjson.decode(raw.as_bytes()),
            Raw::Deferred(raw) => return Ok(raw.value().clone()),
        };
        Ok(value.map_err(DecodeError::Codec)?)
    }
}

impl Serialize for RawMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.to_pack_value().map_err(S::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let human_readable = deserializer.is_human_readable();
        let value = PackValue::deserialize(deserializer)?;
        let mut msg = RawMessage::default();
        if human_readable {
            msg.parse_json(JsonEncoder::new().encode(&value));
        } else {
            msg.parse_ubjson(UbjsonEncoder::new().encode(&value));
        }
        Ok(msg)
    }
}
