//! UBJSON codec wrapper.

use crate::{ubjson::UbjsonDecoder, ubjson::UbjsonEncoder, EncodingFormat, PackValue};

use super::types::{CodecError, JsonValueCodec};

pub struct UbjsonJsonValueCodec {
    pub encoder: UbjsonEncoder,
    pub decoder: UbjsonDecoder,
}

impl Default for UbjsonJsonValueCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl UbjsonJsonValueCodec {
    pub fn new() -> Self {
        Self {
            encoder: UbjsonEncoder::new(),
            decoder: UbjsonDecoder::new(),
        }
    }
}

impl JsonValueCodec for UbjsonJsonValueCodec {
    fn id(&self) -> &'static str {
        "ubjson"
    }

    fn format(&self) -> EncodingFormat {
        EncodingFormat::Ubjson
    }

    fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(value))
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(self.decoder.decode(bytes)?)
    }
}
