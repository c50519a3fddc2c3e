//! Auto-growing binary buffer writer.

/// Writes big-endian binary data into an internal buffer.
///
/// The buffer is reused across encodes: [`Writer::flush`] hands out the
/// bytes written since the last flush and clears the buffer while keeping
/// its capacity.
#[derive(Debug, Default)]
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Discards any bytes written since the last flush.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8.clone();
        self.uint8.clear();
        out
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    pub fn ensure_capacity(&mut self, additional: usize) {
        self.uint8.reserve(additional);
    }

    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.uint8.push(byte);
    }

    #[inline]
    pub fn i8(&mut self, int: i8) {
        self.uint8.push(int as u8);
    }

    #[inline]
    pub fn u16(&mut self, word: u16) {
        self.uint8.extend_from_slice(&word.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, int: i16) {
        self.uint8.extend_from_slice(&int.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, int: i32) {
        self.uint8.extend_from_slice(&int.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, int: i64) {
        self.uint8.extend_from_slice(&int.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, float: f64) {
        self.uint8.extend_from_slice(&float.to_be_bytes());
    }

    /// Writes a marker byte followed by a big-endian `f64`.
    #[inline]
    pub fn u8f64(&mut self, marker: u8, float: f64) {
        self.ensure_capacity(9);
        self.u8(marker);
        self.f64(float);
    }

    pub fn buf(&mut self, buf: &[u8]) {
        self.uint8.extend_from_slice(buf);
    }

    /// Writes the UTF-8 bytes of `s` and returns how many were written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.uint8.extend_from_slice(s.as_bytes());
        s.len()
    }

    pub fn ascii(&mut self, s: &str) {
        debug_assert!(s.is_ascii());
        self.uint8.extend_from_slice(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_resets_but_keeps_capacity() {
        let mut writer = Writer::new();
        writer.u8(1);
        writer.u16(0x0203);
        let cap = writer.uint8.capacity();
        assert_eq!(writer.flush(), vec![1, 2, 3]);
        assert!(writer.is_empty());
        assert_eq!(writer.uint8.capacity(), cap);
    }

    #[test]
    fn marker_and_float() {
        let mut writer = Writer::new();
        writer.u8f64(0x44, 1.0);
        let out = writer.flush();
        assert_eq!(out.len(), 9);
        assert_eq!(out[0], 0x44);
        assert_eq!(&out[1..], &1.0f64.to_be_bytes());
    }

    #[test]
    fn utf8_returns_byte_length() {
        let mut writer = Writer::new();
        assert_eq!(writer.utf8("héllo"), 6);
        assert_eq!(writer.flush(), "héllo".as_bytes());
    }
}
