//! Common codec trait and error.

use crate::{json::JsonError, ubjson::UbjsonError, EncodingFormat, PackValue};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] JsonError),
    #[error("UBJSON codec error: {0}")]
    Ubjson(#[from] UbjsonError),
}

/// Trait for codecs that encode/decode [`PackValue`].
pub trait JsonValueCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> EncodingFormat;
    fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CodecError>;
    fn decode(&mut self, bytes: &[u8]) -> Result<PackValue, CodecError>;
}
