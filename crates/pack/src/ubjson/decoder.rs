//! `UbjsonDecoder` - UBJSON to [`PackValue`].

use polyraw_buffers::Reader;

use super::constants::*;
use super::error::UbjsonError;
use crate::PackValue;

/// Deepest container nesting accepted by [`UbjsonDecoder`].
pub const MAX_DEPTH: usize = 128;

/// Largest count accepted for a typed container whose items carry no
/// payload bytes (`$Z`, `$N`, `$T`, `$F`).
pub const MAX_ZERO_WIDTH_COUNT: usize = 1 << 16;

/// UBJSON decoder.
///
/// Accepts plain, counted (`#`) and strongly typed (`$`) containers.
/// Typed `uint8` arrays decode to [`PackValue::Bytes`]; other typed arrays
/// decode to a plain [`PackValue::Array`]. The whole input must be consumed
/// by a single value. Containers may nest at most [`MAX_DEPTH`] levels.
#[derive(Debug, Default, Clone, Copy)]
pub struct UbjsonDecoder;

impl UbjsonDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, data: &[u8]) -> Result<PackValue, UbjsonError> {
        let mut reader = Reader::new(data);
        let value = self.read_any(&mut reader)?;
        match reader.size() {
            0 => Ok(value),
            n => Err(UbjsonError::TrailingBytes(n)),
        }
    }

    pub fn read_any(&self, reader: &mut Reader<'_>) -> Result<PackValue, UbjsonError> {
        self.read_nested(reader, 0)
    }

    fn read_nested(&self, reader: &mut Reader<'_>, depth: usize) -> Result<PackValue, UbjsonError> {
        let marker = reader.u8()?;
        self.read_value(reader, marker, depth)
    }

    fn read_value(
        &self,
        reader: &mut Reader<'_>,
        marker: u8,
        depth: usize,
    ) -> Result<PackValue, UbjsonError> {
        Ok(match marker {
            NULL => PackValue::Null,
            NOOP => PackValue::Undefined,
            TRUE => PackValue::Bool(true),
            FALSE => PackValue::Bool(false),
            INT8 => PackValue::Integer(i64::from(reader.i8()?)),
            UINT8 => PackValue::Integer(i64::from(reader.u8()?)),
            INT16 => PackValue::Integer(i64::from(reader.i16()?)),
            INT32 => PackValue::Integer(i64::from(reader.i32()?)),
            INT64 => PackValue::Integer(reader.i64()?),
            FLOAT32 => PackValue::Float(f64::from(reader.f32()?)),
            FLOAT64 => PackValue::Float(reader.f64()?),
            HIGH_PRECISION => {
                let len = self.read_length(reader)?;
                parse_high_precision(reader.utf8(len)?)?
            }
            CHAR => {
                let ch = reader.u8()?;
                if !ch.is_ascii() {
                    return Err(UbjsonError::UnexpectedByte(ch, reader.x - 1));
                }
                PackValue::Str(char::from(ch).to_string())
            }
            STRING => {
                let len = self.read_length(reader)?;
                PackValue::Str(reader.utf8(len)?.to_owned())
            }
            ARRAY_START | OBJECT_START if depth >= MAX_DEPTH => {
                return Err(UbjsonError::DepthLimit(MAX_DEPTH))
            }
            ARRAY_START => self.read_arr(reader, depth + 1)?,
            OBJECT_START => self.read_obj(reader, depth + 1)?,
            other => return Err(UbjsonError::UnexpectedByte(other, reader.x - 1)),
        })
    }

    /// Reads a non-negative integer used as a length or count.
    fn read_length(&self, reader: &mut Reader<'_>) -> Result<usize, UbjsonError> {
        let marker = reader.u8()?;
        let len = match marker {
            INT8 => i64::from(reader.i8()?),
            UINT8 => i64::from(reader.u8()?),
            INT16 => i64::from(reader.i16()?),
            INT32 => i64::from(reader.i32()?),
            INT64 => reader.i64()?,
            other => return Err(UbjsonError::UnexpectedByte(other, reader.x - 1)),
        };
        usize::try_from(len).map_err(|_| UbjsonError::InvalidLength(len))
    }

    /// Reads the optional `$type` and `#count` container header.
    ///
    /// Every item takes at least one byte, so a count larger than the rest of
    /// the input is reported as truncation up front. Items of a zero-width
    /// type take none and are capped at [`MAX_ZERO_WIDTH_COUNT`] instead.
    fn read_container_header(
        &self,
        reader: &mut Reader<'_>,
    ) -> Result<(Option<u8>, Option<usize>), UbjsonError> {
        let (item_type, count) = match reader.peek()? {
            CONTAINER_TYPE => {
                reader.u8()?;
                let item_type = reader.u8()?;
                // A typed container must carry a count.
                let marker = reader.u8()?;
                if marker != CONTAINER_COUNT {
                    return Err(UbjsonError::UnexpectedByte(marker, reader.x - 1));
                }
                (Some(item_type), self.read_length(reader)?)
            }
            CONTAINER_COUNT => {
                reader.u8()?;
                (None, self.read_length(reader)?)
            }
            _ => return Ok((None, None)),
        };
        match item_type {
            Some(NULL | NOOP | TRUE | FALSE) if count > MAX_ZERO_WIDTH_COUNT => {
                Err(UbjsonError::InvalidLength(
                    i64::try_from(count).unwrap_or(i64::MAX),
                ))
            }
            Some(NULL | NOOP | TRUE | FALSE) => Ok((item_type, Some(count))),
            _ if count > reader.size() => Err(UbjsonError::UnexpectedEof),
            _ => Ok((item_type, Some(count))),
        }
    }

    fn read_arr(&self, reader: &mut Reader<'_>, depth: usize) -> Result<PackValue, UbjsonError> {
        match self.read_container_header(reader)? {
            (Some(UINT8), Some(count)) => Ok(PackValue::Bytes(reader.buf(count)?.to_vec())),
            (item_type, Some(count)) => {
                let mut arr = Vec::with_capacity(count);
                for _ in 0..count {
                    arr.push(match item_type {
                        Some(marker) => self.read_value(reader, marker, depth)?,
                        None => self.read_nested(reader, depth)?,
                    });
                }
                Ok(PackValue::Array(arr))
            }
            (_, None) => {
                let mut arr = Vec::new();
                while reader.peek()? != ARRAY_END {
                    arr.push(self.read_nested(reader, depth)?);
                }
                reader.u8()?;
                Ok(PackValue::Array(arr))
            }
        }
    }

    fn read_obj(&self, reader: &mut Reader<'_>, depth: usize) -> Result<PackValue, UbjsonError> {
        let (item_type, count) = self.read_container_header(reader)?;
        let mut obj = Vec::new();
        match count {
            Some(count) => {
                for _ in 0..count {
                    let key = self.read_key(reader)?;
                    let value = match item_type {
                        Some(marker) => self.read_value(reader, marker, depth)?,
                        None => self.read_nested(reader, depth)?,
                    };
                    obj.push((key, value));
                }
            }
            None => {
                while reader.peek()? != OBJECT_END {
                    let key = self.read_key(reader)?;
                    obj.push((key, self.read_nested(reader, depth)?));
                }
                reader.u8()?;
            }
        }
        Ok(PackValue::Object(obj))
    }

    fn read_key(&self, reader: &mut Reader<'_>) -> Result<String, UbjsonError> {
        let len = self.read_length(reader)?;
        Ok(reader.utf8(len)?.to_owned())
    }
}

fn parse_high_precision(digits: &str) -> Result<PackValue, UbjsonError> {
    if let Ok(i) = digits.parse::<i64>() {
        return Ok(PackValue::Integer(i));
    }
    if let Ok(u) = digits.parse::<u64>() {
        return Ok(PackValue::UInteger(u));
    }
    match digits.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(PackValue::Float(f)),
        _ => Err(UbjsonError::InvalidNumber(digits.to_owned())),
    }
}
