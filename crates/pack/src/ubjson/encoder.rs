//! `UbjsonEncoder` - [`PackValue`] to UBJSON.

use polyraw_buffers::Writer;

use super::constants::*;
use crate::PackValue;

/// UBJSON encoder.
///
/// Integers use the narrowest marker that fits; floats are always written
/// as `D` (float64) so they decode back bit-exact; unsigned values above
/// `i64::MAX` fall back to the `H` high-precision string form.
pub struct UbjsonEncoder {
    pub writer: Writer,
}

impl Default for UbjsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl UbjsonEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.writer.u8(NULL),
            PackValue::Undefined => self.writer.u8(NOOP),
            PackValue::Bool(b) => self.write_boolean(*b),
            PackValue::Integer(i) => self.write_integer(*i),
            PackValue::UInteger(u) => self.write_u_integer(*u),
            PackValue::Float(f) => self.write_float(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(arr) => {
                self.write_start_arr();
                for item in arr {
                    self.write_any(item);
                }
                self.write_end_arr();
            }
            PackValue::Object(obj) => {
                self.write_start_obj();
                for (key, value) in obj {
                    self.write_key(key);
                    self.write_any(value);
                }
                self.write_end_obj();
            }
        }
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        let w = &mut self.writer;
        if (0..=0xff).contains(&int) {
            w.u8(UINT8);
            w.u8(int as u8);
        } else if let Ok(i) = i8::try_from(int) {
            w.u8(INT8);
            w.i8(i);
        } else if let Ok(i) = i16::try_from(int) {
            w.u8(INT16);
            w.i16(i);
        } else if let Ok(i) = i32::try_from(int) {
            w.u8(INT32);
            w.i32(i);
        } else {
            w.u8(INT64);
            w.i64(int);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        match i64::try_from(uint) {
            Ok(int) => self.write_integer(int),
            Err(_) => {
                let digits = uint.to_string();
                self.writer.u8(HIGH_PRECISION);
                self.write_length(digits.len());
                self.writer.ascii(&digits);
            }
        }
    }

    pub fn write_float(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    /// Writes a container length or string size as a UBJSON integer.
    pub fn write_length(&mut self, len: usize) {
        self.write_integer(i64::try_from(len).unwrap_or(i64::MAX));
    }

    pub fn write_str(&mut self, s: &str) {
        self.writer.u8(STRING);
        self.write_length(s.len());
        self.writer.utf8(s);
    }

    /// Object keys are strings without the `S` marker.
    pub fn write_key(&mut self, key: &str) {
        self.write_length(key.len());
        self.writer.utf8(key);
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.writer.ensure_capacity(buf.len() + 6);
        self.writer.u8(ARRAY_START);
        self.writer.u8(CONTAINER_TYPE);
        self.writer.u8(UINT8);
        self.writer.u8(CONTAINER_COUNT);
        self.write_length(buf.len());
        self.writer.buf(buf);
    }

    pub fn write_start_arr(&mut self) {
        self.writer.u8(ARRAY_START);
    }

    pub fn write_end_arr(&mut self) {
        self.writer.u8(ARRAY_END);
    }

    pub fn write_start_obj(&mut self) {
        self.writer.u8(OBJECT_START);
    }

    pub fn write_end_obj(&mut self) {
        self.writer.u8(OBJECT_END);
    }
}
