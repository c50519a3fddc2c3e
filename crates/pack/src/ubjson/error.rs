//! UBJSON decoder error type.

use polyraw_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UbjsonError {
    #[error("unexpected byte 0x{0:02x} at position {1}")]
    UnexpectedByte(u8, usize),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("invalid length {0}")]
    InvalidLength(i64),
    #[error("invalid high-precision number {0:?}")]
    InvalidNumber(String),
    #[error("containers nested deeper than {0} levels")]
    DepthLimit(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl From<BufferError> for UbjsonError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => UbjsonError::UnexpectedEof,
            BufferError::InvalidUtf8 => UbjsonError::InvalidUtf8,
        }
    }
}
