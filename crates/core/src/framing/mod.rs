//! Decoding of single-object and multiplexed two-part response bodies

pub mod codec;
pub mod framer;

pub use codec::{CodecError, JsonCodec, SubMessageCodec};
pub use framer::{decode_json, ContentFormat, PrimaryMessage, ResponseFramer};
