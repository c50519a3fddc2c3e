//! [`RawMessage`] - the single-slot container.

use std::borrow::Cow;
use std::fmt;

use polyraw_pack::codecs::Codecs;
use polyraw_pack::{EncodingFormat, PackValue};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::deferred::DeferredRaw;
use crate::error::RawMessageError;
use crate::json_raw::JsonRaw;
use crate::raw::{Raw, RawEncoding};
use crate::ubjson_raw::UbjsonRaw;

/// A value held as JSON bytes, UBJSON bytes, or a not-yet-encoded
/// [`PackValue`], re-emittable in either format.
///
/// The default value is empty ("uninitialized"): every operation except
/// [`describe`](Self::describe) then fails with
/// [`RawMessageError::Uninitialized`].
///
/// ```
/// use polyraw::RawMessage;
///
/// let msg = RawMessage::from_json(&br#"{"id":7}"#[..]);
/// assert_eq!(&*msg.to_json().unwrap(), br#"{"id":7}"#);
/// assert_eq!(&*msg.to_ubjson().unwrap(), b"{U\x02idU\x07}");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMessage {
    raw: Option<Raw>,
}

impl RawMessage {
    /// Wraps bytes already encoded as JSON. The bytes are not validated.
    pub fn from_json(bytes: impl Into<Vec<u8>>) -> Self {
        Raw::Json(JsonRaw::new(bytes)).into()
    }

    /// Wraps bytes already encoded as UBJSON. The bytes are not validated.
    pub fn from_ubjson(bytes: impl Into<Vec<u8>>) -> Self {
        Raw::Ubjson(UbjsonRaw::new(bytes)).into()
    }

    /// Holds `value` unencoded until one of the emit methods is called.
    pub fn from_value(value: impl Into<PackValue>) -> Self {
        Raw::Deferred(DeferredRaw::new(value)).into()
    }

    /// Replaces whatever is held with JSON bytes.
    pub fn parse_json(&mut self, bytes: impl Into<Vec<u8>>) {
        let raw = JsonRaw::new(bytes);
        trace!(format = %EncodingFormat::Json, len = raw.as_bytes().len(), "replacing raw message");
        self.raw = Some(Raw::Json(raw));
    }

    /// Replaces whatever is held with UBJSON bytes.
    pub fn parse_ubjson(&mut self, bytes: impl Into<Vec<u8>>) {
        let raw = UbjsonRaw::new(bytes);
        trace!(format = %EncodingFormat::Ubjson, len = raw.as_bytes().len(), "replacing raw message");
        self.raw = Some(Raw::Ubjson(raw));
    }

    pub fn is_uninitialized(&self) -> bool {
        self.raw.is_none()
    }

    /// Format of the stored bytes. `None` when empty or deferred.
    pub fn format(&self) -> Option<EncodingFormat> {
        self.raw.as_ref().and_then(Raw::format)
    }

    pub fn raw(&self) -> Option<&Raw> {
        self.raw.as_ref()
    }

    pub fn into_raw(self) -> Option<Raw> {
        self.raw
    }

    fn held(&self) -> Result<&Raw, RawMessageError> {
        self.raw.as_ref().ok_or(RawMessageError::Uninitialized)
    }

    pub fn to_json(&self) -> Result<Cow<'_, [u8]>, RawMessageError> {
        self.to_json_with(&mut Codecs::new())
    }

    pub fn to_json_with(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        self.held()?.to_json(codecs)
    }

    pub fn to_ubjson(&self) -> Result<Cow<'_, [u8]>, RawMessageError> {
        self.to_ubjson_with(&mut Codecs::new())
    }

    pub fn to_ubjson_with(&self, codecs: &mut Codecs) -> Result<Cow<'_, [u8]>, RawMessageError> {
        self.held()?.to_ubjson(codecs)
    }

    /// Decodes the stored bytes into `T`.
    pub fn decode_into<T: DeserializeOwned>(&self) -> Result<T, RawMessageError> {
        self.decode_into_with(&mut Codecs::new())
    }

    pub fn decode_into_with<T: DeserializeOwned>(
        &self,
        codecs: &mut Codecs,
    ) -> Result<T, RawMessageError> {
        self.held()?.decode_into(codecs)
    }

    /// Diagnostic summary; `"uninitialized"` when empty. Not for data
    /// interchange.
    pub fn describe(&self) -> String {
        match &self.raw {
            Some(raw) => raw.describe(),
            None => "uninitialized".to_owned(),
        }
    }
}

impl From<Raw> for RawMessage {
    fn from(raw: Raw) -> Self {
        Self { raw: Some(raw) }
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
