//! Generic value tree and the two wire codecs behind polyraw.
//!
//! [`PackValue`] is the format-neutral pivot: the JSON codec and the UBJSON
//! codec both decode into it and encode from it, so converting between the
//! two formats is always decode-then-reencode through this tree.

mod constants;
mod pack_value;
mod pack_value_de;
mod pack_value_ser;

pub mod codecs;
pub mod json;
pub mod ubjson;

pub use constants::EncodingFormat;
pub use pack_value::PackValue;
pub use pack_value_de::PackValueError;
