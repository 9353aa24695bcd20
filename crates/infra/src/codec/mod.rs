//! Sub-message codecs backed by external crates

pub mod msgpack;

pub use msgpack::MsgPackCodec;
