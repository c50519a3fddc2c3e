//! UBJSON variant: bytes already encoded as UBJSON.

use std::borrow::Cow;

use polyraw_pack::codecs::{Codecs, JsonValueCodec};
use polyraw_pack::EncodingFormat;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{DecodeError, RawMessageError};
use crate::raw::{describe_bytes, transcode, RawEncoding};

/// UBJSON bytes, stored as given. Nothing is validated until the bytes are
/// decoded or converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UbjsonRaw {
    bytes: Vec<u8>,
}

impl UbjsonRaw {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl RawEncoding for UbjsonRaw {
    fn to_json(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        transcode(
            codecs,
            &self.bytes,
            EncodingFormat::Ubjson,
            EncodingFormat::Json,
        )
        .map(Cow::Owned)
    }

    fn to_ubjson(&self, _codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        Ok(Cow::Borrowed(&self.bytes))
    }

    fn decode_into<T: DeserializeOwned>(&self, codecs: &mut Codecs) -> Result<T, RawMessageError> {
        let value = codecs.ubjson.decode(&self.bytes).map_err(|err| {
            debug!(format = %EncodingFormat::Ubjson, error = %err, "decode failed");
            DecodeError::Codec(err)
        })?;
        T::deserialize(value).map_err(|err| {
            debug!(format = %EncodingFormat::Ubjson, error = %err, "value does not fit target type");
            RawMessageError::from(DecodeError::Value(err))
        })
    }

    fn describe(&self) -> String {
        describe_bytes(EncodingFormat::Ubjson, &self.bytes)
    }
}
