//! JSON encoder/decoder error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
