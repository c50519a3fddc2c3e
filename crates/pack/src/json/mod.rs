//! JSON encoder/decoder.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use error::JsonError;
