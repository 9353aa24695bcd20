//! Failure classification for completed responses and transport errors
//!
//! The classifier never fails: whatever the server sent, the caller gets an
//! [`ApiError`] with a message that can be shown to the user.

use beagle_domain::constants::{
    MAX_ERROR_BODY_BYTES, NO_RESPONSE_BODY_MESSAGE, SERVER_ERROR_PREFIX, SERVER_RESPONDED_PREFIX,
};
use beagle_domain::{ApiError, ResponseEnvelope};
use serde_json::Value;
use tracing::warn;

/// Map a non-2xx response to [`ApiError::Server`].
pub fn classify_response(response: &ResponseEnvelope) -> ApiError {
    let message = extract_message(response.body(), response.reason());
    ApiError::server(response.status(), message)
}

/// Map a failure that produced no response at all.
pub fn classify_transport(err: &impl std::fmt::Display) -> ApiError {
    ApiError::transport(err.to_string())
}

/// Pull a user-facing message out of an error body.
///
/// - empty body: fixed "no response body" message
/// - JSON object with a `message` field: that field verbatim
/// - anything else: the body text, capped at 1 MiB
/// - a body that looks like JSON but does not parse: the status text
pub fn extract_message(body: &[u8], reason: &str) -> String {
    if body.is_empty() {
        return NO_RESPONSE_BODY_MESSAGE.to_string();
    }

    let capped = body.get(..MAX_ERROR_BODY_BYTES).unwrap_or(body);
    let text = String::from_utf8_lossy(capped);
    let trimmed = text.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(fields)) => match fields.get("message") {
                Some(Value::String(message)) => return message.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            },
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "Error body looked like JSON but could not be parsed");
                return format!("{SERVER_ERROR_PREFIX}{reason}");
            }
        }
    }

    format!("{SERVER_RESPONDED_PREFIX}{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, reason: &str, body: &str) -> ResponseEnvelope {
        ResponseEnvelope::new(
            status,
            reason,
            [("Content-Type", "application/json")],
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn message_field_is_used_verbatim() {
        let err = classify_response(&response(400, "Bad Request", r#"{"message":"Item is blocked"}"#));
        assert_eq!(err, ApiError::server(400, "Item is blocked"));
        assert_eq!(err.outcome().message, "Item is blocked");
    }

    #[test]
    fn json_without_message_echoes_body() {
        let err = classify_response(&response(403, "Forbidden", r#"{"error":"token_expired"}"#));
        assert_eq!(
            err,
            ApiError::server(403, r#"Server responded with: {"error":"token_expired"}"#)
        );
    }

    #[test]
    fn plain_text_body_is_echoed() {
        let err = classify_response(&response(502, "Bad Gateway", "upstream timed out"));
        assert_eq!(err, ApiError::server(502, "Server responded with: upstream timed out"));
    }

    #[test]
    fn broken_json_falls_back_to_status_text() {
        let err = classify_response(&response(500, "Internal Server Error", "{not json}"));
        assert_eq!(err, ApiError::server(500, "Server error: Internal Server Error"));
    }

    #[test]
    fn empty_body_has_fixed_message() {
        let err = classify_response(&response(503, "Service Unavailable", ""));
        assert_eq!(err, ApiError::server(503, "Unknown server error (no response body)"));
    }

    #[test]
    fn non_string_message_is_rendered_as_json() {
        let message = extract_message(br#"{"message": 42}"#, "Bad Request");
        assert_eq!(message, "42");
    }

    #[test]
    fn echoed_body_is_capped() {
        let body = vec![b'x'; MAX_ERROR_BODY_BYTES + 100];
        let message = extract_message(&body, "Payload Too Large");
        assert_eq!(message.len(), SERVER_RESPONDED_PREFIX.len() + MAX_ERROR_BODY_BYTES);
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = classify_transport(&"connection refused");
        assert_eq!(err.http_status(), -1);
        assert_eq!(err.outcome().message, "Unknown Error");
    }
}
