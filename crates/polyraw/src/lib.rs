//! Deferred, format-polymorphic raw values.
//!
//! A [`RawMessage`] holds one payload that is either already encoded as JSON,
//! already encoded as UBJSON, or still an in-memory [`PackValue`]. Whatever it
//! holds, it can be emitted as either format, decoded into a typed value, or
//! described for logs:
//!
//! ```
//! use polyraw::RawMessage;
//!
//! let msg = RawMessage::from_value(vec![0x00u8, 0xff, 0x10]);
//! assert_eq!(&*msg.to_json().unwrap(), b"[0,255,16]");
//!
//! let msg = RawMessage::from_ubjson(msg.to_ubjson().unwrap().into_owned());
//! let bytes: Vec<u8> = msg.decode_into().unwrap();
//! assert_eq!(bytes, vec![0x00, 0xff, 0x10]);
//! ```
//!
//! Emitting in the payload's own format returns the stored bytes as they
//! are. Emitting in the other format decodes into a [`PackValue`] and
//! re-encodes it.

mod deferred;
mod error;
mod json_raw;
mod message;
mod raw;
mod serde_impl;
mod ubjson_raw;

pub use deferred::DeferredRaw;
pub use error::{ConversionStage, DecodeError, RawMessageError};
pub use json_raw::JsonRaw;
pub use message::RawMessage;
pub use raw::{Raw, RawEncoding};
pub use ubjson_raw::UbjsonRaw;

pub use polyraw_pack::codecs::Codecs;
pub use polyraw_pack::{EncodingFormat, PackValue};

/// Maximum number of payload bytes shown by `describe`.
pub const DESCRIBE_LIMIT: usize = 128;
