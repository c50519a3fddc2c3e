//! The variant contract and the closed set of variants.

use std::borrow::Cow;

use polyraw_pack::codecs::Codecs;
use polyraw_pack::{EncodingFormat, PackValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::deferred::DeferredRaw;
use crate::error::{ConversionStage, RawMessageError};
use crate::json_raw::JsonRaw;
use crate::ubjson_raw::UbjsonRaw;
use crate::DESCRIBE_LIMIT;

/// Operations every variant supports.
///
/// Emitting in the variant's own format hands back the stored bytes
/// untouched. Emitting in the other format goes through [`PackValue`].
pub trait RawEncoding {
    fn to_json(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError>;

    fn to_ubjson(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError>;

    fn decode_into<T: DeserializeOwned>(&self, codecs: &mut Codecs) -> Result<T, RawMessageError>;

    /// Diagnostic summary prefixed with the variant's format name. Byte
    /// payloads are cut at [`DESCRIBE_LIMIT`] bytes.
    fn describe(&self) -> String;
}

/// One held representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    Json(JsonRaw),
    Ubjson(UbjsonRaw),
    Deferred(DeferredRaw),
}

impl Raw {
    /// Wire format of the stored bytes; `None` for a deferred value.
    pub fn format(&self) -> Option<EncodingFormat> {
        match self {
            Raw::Json(_) => Some(EncodingFormat::Json),
            Raw::Ubjson(_) => Some(EncodingFormat::Ubjson),
            Raw::Deferred(_) => None,
        }
    }
}

impl RawEncoding for Raw {
    fn to_json(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        match self {
            Raw::Json(raw) => raw.to_json(codecs),
            Raw::Ubjson(raw) => raw.to_json(codecs),
            Raw::Deferred(raw) => raw.to_json(codecs),
        }
    }

    fn to_ubjson(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        match self {
            Raw::Json(raw) => raw.to_ubjson(codecs),
            Raw::Ubjson(raw) => raw.to_ubjson(codecs),
            Raw::Deferred(raw) => raw.to_ubjson(codecs),
        }
    }

    fn decode_into<T: DeserializeOwned>(&self, codecs: &mut Codecs) -> Result<T, RawMessageError> {
        match self {
            Raw::Json(raw) => raw.decode_into(codecs),
            Raw::Ubjson(raw) => raw.decode_into(codecs),
            Raw::Deferred(raw) => raw.decode_into(codecs),
        }
    }

    fn describe(&self) -> String {
        match self {
            Raw::Json(raw) => raw.describe(),
            Raw::Ubjson(raw) => raw.describe(),
            Raw::Deferred(raw) => raw.describe(),
        }
    }
}

impl From<JsonRaw> for Raw {
    fn from(raw: JsonRaw) -> Self {
        Raw::Json(raw)
    }
}

impl From<UbjsonRaw> for Raw {
    fn from(raw: UbjsonRaw) -> Self {
        Raw::Ubjson(raw)
    }
}

impl From<DeferredRaw> for Raw {
    fn from(raw: DeferredRaw) -> Self {
        Raw::Deferred(raw)
    }
}

/// Encodes `value` as `target`.
pub(crate) fn encode_value(
    codecs: &mut Codecs,
    value: &PackValue,
    target: EncodingFormat,
) -> Result<Vec<u8>, RawMessageError> {
    codecs.get(target).encode(value).map_err(|source| {
        debug!(to = %target, error = %source, "encoding failed");
        RawMessageError::Encode {
            target,
            stage: ConversionStage::Encode,
            source,
        }
    })
}

/// Re-encodes `bytes` from `from` to `target` through a [`PackValue`].
pub(crate) fn transcode(
    codecs: &mut Codecs,
    bytes: &[u8],
    from: EncodingFormat,
    target: EncodingFormat,
) -> Result<Vec<u8>, RawMessageError> {
    trace!(%from, to = %target, len = bytes.len(), "converting raw message");
    let value = codecs.get(from).decode(bytes).map_err(|source| {
        debug!(%from, to = %target, error = %source, "intermediate decode failed");
        RawMessageError::Encode {
            target,
            stage: ConversionStage::Decode(from),
            source,
        }
    })?;
    encode_value(codecs, &value, target)
}

/// `<FORMAT>: "<content>"`, cut at [`DESCRIBE_LIMIT`] bytes with the total
/// length appended.
pub(crate) fn describe_bytes(format: EncodingFormat, bytes: &[u8]) -> String {
    if bytes.len() > DESCRIBE_LIMIT {
        format!(
            "{format}: {:?}... ({})",
            String::from_utf8_lossy(&bytes[..DESCRIBE_LIMIT]),
            bytes.len()
        )
    } else {
        format!("{format}: {:?}", String::from_utf8_lossy(bytes))
    }
}
