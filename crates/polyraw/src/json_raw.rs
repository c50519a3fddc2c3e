//! JSON variant: bytes already encoded as JSON.

use std::borrow::Cow;

use polyraw_pack::codecs::Codecs;
use polyraw_pack::EncodingFormat;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{DecodeError, RawMessageError};
use crate::raw::{describe_bytes, transcode, RawEncoding};

/// JSON bytes, stored as given. Nothing is validated until the bytes are
/// decoded or converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRaw {
    bytes: Vec<u8>,
}

impl JsonRaw {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl RawEncoding for JsonRaw {
    fn to_json(&self, _codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        Ok(Cow::Borrowed(&self.bytes))
    }

    fn to_ubjson(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        transcode(
            codecs,
            &self.bytes,
            EncodingFormat::Json,
            EncodingFormat::Ubjson,
        )
        .map(Cow::Owned)
    }

    fn decode_into<T: DeserializeOwned>(&self, _codecs: &mut Codecs) -> Result<T, RawMessageError> {
        serde_json::from_slice(&self.bytes).map_err(|err| {
            debug!(format = %EncodingFormat::Json, error = %err, "decode failed");
            RawMessageError::from(DecodeError::Json(err))
        })
    }

    fn describe(&self) -> String {
        describe_bytes(EncodingFormat::Json, &self.bytes)
    }
}
