//! Response framer
//!
//! A multiplexed body is two sub-messages written back to back with no
//! container around them. `Content-Length` gives the total size and
//! `X-Suggestion-Content-Length` the size of the first (primary) part; the
//! rest of the body is the optional secondary part.

use beagle_domain::{
    ApiError, FramedPayload, MultiplexedResponse, ResponseEnvelope, SecondaryPayload, Suggestion,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::codec::{CodecError, SubMessageCodec};

/// How a response body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// One JSON object; the fallback for any unrecognized content type.
    Json,
    /// Two length-delimited sub-messages in the codec's binary format.
    BinaryMultiplex,
}

/// Primary sub-message of a multiplexed response.
pub trait PrimaryMessage {
    /// Whether the message means "nothing to do right now".
    fn is_noop(&self) -> bool {
        false
    }
}

impl PrimaryMessage for Suggestion {
    fn is_noop(&self) -> bool {
        self.is_wait()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseFramer<C> {
    codec: C,
}

impl<C: SubMessageCodec> ResponseFramer<C> {
    pub const fn new(codec: C) -> Self {
        Self { codec }
    }

    pub const fn codec(&self) -> &C {
        &self.codec
    }

    pub fn format_of(&self, response: &ResponseEnvelope) -> ContentFormat {
        match response.content_type() {
            Some(media) if media == self.codec.content_type() => ContentFormat::BinaryMultiplex,
            _ => ContentFormat::Json,
        }
    }

    /// Decode a body holding exactly one object, binary or JSON.
    pub fn decode_single<T: DeserializeOwned>(
        &self,
        response: &ResponseEnvelope,
    ) -> Result<T, ApiError> {
        match self.format_of(response) {
            ContentFormat::BinaryMultiplex => {
                self.codec.decode(response.body()).map_err(decode_error)
            }
            ContentFormat::Json => decode_json(response.body()),
        }
    }

    /// Decode a body that may carry a secondary sub-message.
    ///
    /// Only problems with the primary part fail the call. Secondary problems
    /// are reported through [`SecondaryPayload`].
    pub fn decode_multiplexed<P, S>(
        &self,
        response: ResponseEnvelope,
    ) -> Result<MultiplexedResponse<P, S>, ApiError>
    where
        P: DeserializeOwned + PrimaryMessage,
        S: DeserializeOwned,
    {
        match self.format_of(&response) {
            ContentFormat::Json => {
                let primary = decode_json(response.body())?;
                Ok(MultiplexedResponse {
                    primary,
                    secondary: SecondaryPayload::unsupported_format(),
                    frame: None,
                })
            }
            ContentFormat::BinaryMultiplex => self.split(response),
        }
    }

    fn split<P, S>(&self, response: ResponseEnvelope) -> Result<MultiplexedResponse<P, S>, ApiError>
    where
        P: DeserializeOwned + PrimaryMessage,
        S: DeserializeOwned,
    {
        let frame = FramedPayload::from_headers(&response)?;
        let body = response.into_body();

        let Some(primary_bytes) = body.get(..frame.primary_length()) else {
            error!(
                expected = frame.primary_length(),
                available = body.len(),
                "Response ended before the primary sub-message was complete"
            );
            return Err(ApiError::malformed(format!(
                "expected {} primary bytes, body has {}",
                frame.primary_length(),
                body.len()
            )));
        };
        let primary: P = self.codec.decode(primary_bytes).map_err(decode_error)?;
        debug!(
            primary_bytes = frame.primary_length(),
            secondary_bytes = frame.secondary_length(),
            "Decoded primary sub-message"
        );

        let secondary = if frame.has_secondary() {
            let remaining = body.get(frame.primary_length()..).unwrap_or_default();
            if remaining.len() == frame.secondary_length() {
                match self.codec.decode::<S>(remaining) {
                    Ok(data) => SecondaryPayload::present(data, primary.is_noop()),
                    Err(err) => {
                        warn!(error = %err, "Failed to decode secondary sub-message");
                        SecondaryPayload::failed()
                    }
                }
            } else {
                warn!(
                    expected = frame.secondary_length(),
                    received = remaining.len(),
                    "Secondary sub-message length mismatch"
                );
                SecondaryPayload::failed()
            }
        } else {
            SecondaryPayload::not_available()
        };

        Ok(MultiplexedResponse { primary, secondary, frame: Some(frame) })
    }
}

/// Decode a whole body as one UTF-8 JSON document.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ApiError::decode(format!("response body is not UTF-8: {e}")))?;
    serde_json::from_str(text).map_err(|e| ApiError::decode(e.to_string()))
}

fn decode_error(err: CodecError) -> ApiError {
    ApiError::decode(err.to_string())
}
