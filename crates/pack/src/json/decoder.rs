//! `JsonDecoder` - JSON text to [`PackValue`].

use serde::Deserialize;

use super::error::JsonError;
use crate::PackValue;

/// Decodes JSON text into a [`PackValue`] tree.
///
/// Integers that fit `i64` become [`PackValue::Integer`], larger unsigned
/// ones [`PackValue::UInteger`], everything else [`PackValue::Float`].
/// Object keys keep their document order. Byte arrays written by
/// [`JsonEncoder`](super::JsonEncoder) come back as arrays of integers.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &[u8]) -> Result<PackValue, JsonError> {
        let mut de = serde_json::Deserializer::from_slice(input);
        let value = PackValue::deserialize(&mut de)?;
        de.end()?;
        Ok(value)
    }
}
