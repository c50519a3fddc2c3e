//! JSON and UBJSON value codecs behind one trait.

mod json;
mod registry;
mod types;
mod ubjson;

pub use json::JsonJsonValueCodec;
pub use registry::Codecs;
pub use types::{CodecError, JsonValueCodec};
pub use ubjson::UbjsonJsonValueCodec;
