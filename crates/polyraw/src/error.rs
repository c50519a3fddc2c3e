//! Raw message error types.

use std::fmt;

use polyraw_pack::codecs::CodecError;
use polyraw_pack::{EncodingFormat, PackValueError};
use thiserror::Error;

/// Which step of producing an encoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Decoding the stored bytes into the intermediate value tree.
    Decode(EncodingFormat),
    /// Encoding the value tree into the requested format.
    Encode,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionStage::Decode(format) => write!(f, "{format} decoding"),
            ConversionStage::Encode => f.write_str("encoding"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RawMessageError {
    #[error("raw message is not initialized")]
    Uninitialized,
    #[error("cannot produce {target}: {stage} failed: {source}")]
    Encode {
        target: EncodingFormat,
        stage: ConversionStage,
        #[source]
        source: CodecError,
    },
    #[error("cannot decode raw message: {0}")]
    Decode(#[from] DecodeError),
}

impl RawMessageError {
    /// The failed stage, for encode errors.
    pub fn stage(&self) -> Option<ConversionStage> {
        match self {
            RawMessageError::Encode { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("{0}")]
    Value(#[from] PackValueError),
    #[error("cannot decode a deferred, never-serialized value")]
    Deferred,
}
