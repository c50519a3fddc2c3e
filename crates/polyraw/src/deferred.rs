//! Deferred variant: an in-memory value encoded only when asked for.

use std::borrow::Cow;

use polyraw_pack::codecs::Codecs;
use polyraw_pack::{EncodingFormat, PackValue};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{DecodeError, RawMessageError};
use crate::raw::{encode_value, RawEncoding};

/// A value that has not been serialized yet.
///
/// Every emit encodes the value afresh; nothing is cached. There is no
/// serialized form to decode from, so [`RawEncoding::decode_into`] always
/// fails.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredRaw {
    value: PackValue,
}

impl DeferredRaw {
    pub fn new(value: impl Into<PackValue>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &PackValue {
        &self.value
    }
}

impl RawEncoding for DeferredRaw {
    fn to_json(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        trace!(to = %EncodingFormat::Json, "encoding deferred value");
        encode_value(codecs, &self.value, EncodingFormat::Json).map(Cow::Owned)
    }

    fn to_ubjson(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        trace!(to = %EncodingFormat::Ubjson, "encoding deferred value");
        encode_value(codecs, &self.value, EncodingFormat::Ubjson).map(Cow::Owned)
    }

    fn decode_into<T: DeserializeOwned>(&self, _codecs: &mut Codecs) -> Result<T, RawMessageError> {
        Err(DecodeError::Deferred.into())
    }

    fn describe(&self) -> String {
        format!("Deferred: {:?}", self.value)
    }
}
