//! JSON codec wrapper.

use crate::{json::JsonDecoder, json::JsonEncoder, EncodingFormat, PackValue};

use super::types::{CodecError, JsonValueCodec};

pub struct JsonJsonValueCodec {
    pub encoder: JsonEncoder,
    pub decoder: JsonDecoder,
}

impl Default for JsonJsonValueCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonJsonValueCodec {
    pub fn new() -> Self {
        Self {
            encoder: JsonEncoder::new(),
            decoder: JsonDecoder::new(),
        }
    }
}

impl JsonValueCodec for JsonJsonValueCodec {
    fn id(&self) -> &'static str {
        "json"
    }

    fn format(&self) -> EncodingFormat {
        EncodingFormat::Json
    }

    fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(value))
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(self.decoder.decode(bytes)?)
    }
}
