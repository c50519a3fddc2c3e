//! `JsonEncoder` - [`PackValue`] to compact JSON text.

use polyraw_buffers::Writer;

use crate::PackValue;

/// Compact JSON encoder.
///
/// - `Undefined` and non-finite floats are written as `null`.
/// - Floats use the shortest representation that round-trips, and always
///   keep a fractional part or exponent so they decode back as floats.
/// - Binary values are written as arrays of byte values, so `[0,255,16]`
///   reads back as a sequence of integers.
pub struct JsonEncoder {
    pub writer: Writer,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
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
            PackValue::Null | PackValue::Undefined => self.write_null(),
            PackValue::Bool(b) => self.write_boolean(*b),
            PackValue::Integer(i) => self.writer.ascii(&i.to_string()),
            PackValue::UInteger(u) => self.writer.ascii(&u.to_string()),
            PackValue::Float(f) => self.write_float(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(arr) => self.write_arr(arr),
            PackValue::Object(obj) => self.write_obj(obj),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.ascii("null");
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.ascii(if b { "true" } else { "false" });
    }

    pub fn write_float(&mut self, float: f64) {
        match serde_json::Number::from_f64(float) {
            Some(n) => self.writer.ascii(&n.to_string()),
            None => self.write_null(),
        }
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.writer.ensure_capacity(buf.len() * 4 + 2);
        self.writer.u8(b'[');
        for (i, byte) in buf.iter().enumerate() {
            if i > 0 {
                self.writer.u8(b',');
            }
            self.writer.ascii(&byte.to_string());
        }
        self.writer.u8(b']');
    }

    pub fn write_str(&mut self, s: &str) {
        let w = &mut self.writer;
        w.ensure_capacity(s.len() + 2);
        w.u8(b'"');
        let bytes = s.as_bytes();
        let mut start = 0;
        for (i, &ch) in bytes.iter().enumerate() {
            let escape: &[u8] = match ch {
                b'"' => b"\\\"",
                b'\\' => b"\\\\",
                b'\n' => b"\\n",
                b'\r' => b"\\r",
                b'\t' => b"\\t",
                0x08 => b"\\b",
                0x0c => b"\\f",
                0x00..=0x1f => {
                    w.buf(&bytes[start..i]);
                    w.ascii(&format!("\\u{:04x}", ch));
                    start = i + 1;
                    continue;
                }
                _ => continue,
            };
            w.buf(&bytes[start..i]);
            w.buf(escape);
            start = i + 1;
        }
        w.buf(&bytes[start..]);
        w.u8(b'"');
    }

    pub fn write_arr(&mut self, arr: &[PackValue]) {
        self.writer.u8(b'[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.writer.u8(b',');
            }
            self.write_any(item);
        }
        self.writer.u8(b']');
    }

    pub fn write_obj(&mut self, obj: &[(String, PackValue)]) {
        self.writer.u8(b'{');
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 {
                self.writer.u8(b',');
            }
            self.write_str(key);
            self.writer.u8(b':');
            self.write_any(value);
        }
        self.writer.u8(b'}');
    }
}
