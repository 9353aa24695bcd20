//! Sub-message codecs

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{content_type} decode failed: {message}")]
pub struct CodecError {
    pub content_type: &'static str,
    pub message: String,
}

impl CodecError {
    pub fn new(content_type: &'static str, message: impl Into<String>) -> Self {
        Self { content_type, message: message.into() }
    }
}

/// Decodes one sub-message of a response body.
///
/// A codec is registered for exactly one content type; the framer switches
/// to multiplexed mode when a response carries that content type.
pub trait SubMessageCodec: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SubMessageCodec for JsonCodec {
    fn content_type(&self) -> &'static str {
        beagle_domain::constants::JSON_CONTENT_TYPE
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::new(self.content_type(), e.to_string()))
    }
}
