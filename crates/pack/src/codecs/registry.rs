//! Aggregate codec holder.

use super::{JsonJsonValueCodec, JsonValueCodec, UbjsonJsonValueCodec};
use crate::EncodingFormat;

/// One codec per supported format. Holding a `Codecs` lets callers reuse
/// the encoders' scratch buffers across many values.
pub struct Codecs {
    pub json: JsonJsonValueCodec,
    pub ubjson: UbjsonJsonValueCodec,
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            json: JsonJsonValueCodec::new(),
            ubjson: UbjsonJsonValueCodec::new(),
        }
    }

    pub fn get(&mut self, format: EncodingFormat) -> &mut dyn JsonValueCodec {
        match format {
            EncodingFormat::Json => &mut self.json,
            EncodingFormat::Ubjson => &mut self.ubjson,
        }
    }
}
