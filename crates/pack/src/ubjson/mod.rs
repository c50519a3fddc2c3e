//! UBJSON (Universal Binary JSON) encoding/decoding.
//!
//! Draft 12 markers, big-endian numbers. Byte arrays use the strongly typed
//! container form `[$U#<count><bytes>`.

mod constants;
mod decoder;
mod encoder;
mod error;

pub use decoder::{UbjsonDecoder, MAX_DEPTH, MAX_ZERO_WIDTH_COUNT};
pub use encoder::UbjsonEncoder;
pub use error::UbjsonError;
