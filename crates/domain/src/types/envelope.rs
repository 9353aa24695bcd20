//! Request and response envelopes exchanged with the HTTP layer

use std::collections::HashMap;

use serde_json::Value;

use crate::constants::{CONTENT_LENGTH_HEADER, CONTENT_TYPE_HEADER, PRIMARY_LENGTH_HEADER};
use crate::errors::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

crate::impl_wire_enum_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
});

/// Description of one logical API request.
///
/// Envelopes are built once and never mutated. A retry re-sends the same
/// envelope; only the Authorization header is recomputed at send time.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    requires_auth: bool,
    accept: Option<String>,
}

impl RequestEnvelope {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path.into(), None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path.into(), Some(body))
    }

    const fn new(method: HttpMethod, path: String, body: Option<Value>) -> Self {
        Self { method, path, query: Vec::new(), body, requires_auth: true, accept: None }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Mark the request as not needing a session token (login, signup).
    #[must_use]
    pub const fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    #[must_use]
    pub fn with_accept(mut self, content_type: impl Into<String>) -> Self {
        self.accept = Some(content_type.into());
        self
    }

    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }
}

/// A completed HTTP response.
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    status: u16,
    reason: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseEnvelope {
    pub fn new<I, K, V>(status: u16, reason: impl Into<String>, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let headers =
            headers.into_iter().map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into())).collect();
        Self { status, reason: reason.into(), headers, body }
    }

    pub const fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Media type without parameters, lowercased.
    pub fn content_type(&self) -> Option<String> {
        self.header(CONTENT_TYPE_HEADER)
            .and_then(|value| value.split(';').next())
            .map(|media| media.trim().to_ascii_lowercase())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Length metadata of a multiplexed body.
///
/// The body carries `primary_length` bytes of the primary sub-message
/// followed by `secondary_length` bytes of the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramedPayload {
    total_length: usize,
    primary_length: usize,
}

impl FramedPayload {
    pub fn new(total_length: usize, primary_length: usize) -> Result<Self, ApiError> {
        if primary_length > total_length {
            return Err(ApiError::malformed(format!(
                "primary length {primary_length} exceeds total length {total_length}"
            )));
        }
        Ok(Self { total_length, primary_length })
    }

    /// Read both lengths from the response headers.
    pub fn from_headers(response: &ResponseEnvelope) -> Result<Self, ApiError> {
        let total = parse_length(response, CONTENT_LENGTH_HEADER)?;
        let primary = parse_length(response, PRIMARY_LENGTH_HEADER)?;
        Self::new(total, primary)
    }

    pub const fn total_length(&self) -> usize {
        self.total_length
    }

    pub const fn primary_length(&self) -> usize {
        self.primary_length
    }

    pub const fn secondary_length(&self) -> usize {
        self.total_length - self.primary_length
    }

    pub const fn has_secondary(&self) -> bool {
        self.secondary_length() > 0
    }
}

fn parse_length(response: &ResponseEnvelope, header: &str) -> Result<usize, ApiError> {
    let raw = response
        .header(header)
        .ok_or_else(|| ApiError::malformed(format!("missing {header} header")))?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ApiError::malformed(format!("invalid {header} header: {raw}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn framed_response(total: &str, primary: &str) -> ResponseEnvelope {
        ResponseEnvelope::new(
            200,
            "OK",
            [("Content-Length", total), ("X-Suggestion-Content-Length", primary)],
            Vec::new(),
        )
    }

    #[test]
    fn request_builder_defaults_to_authenticated() {
        let envelope = RequestEnvelope::post("/prices", json!({"item_id": 4151}))
            .with_query("display_name", "Zezima")
            .with_accept("application/x-msgpack");

        assert!(envelope.requires_auth());
        assert_eq!(envelope.method(), HttpMethod::Post);
        assert_eq!(envelope.query(), &[("display_name".to_string(), "Zezima".to_string())]);
        assert_eq!(envelope.accept(), Some("application/x-msgpack"));
        assert!(!RequestEnvelope::get("/login").unauthenticated().requires_auth());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = ResponseEnvelope::new(
            200,
            "OK",
            [("Content-Type", "application/x-msgpack; charset=binary")],
            Vec::new(),
        );
        assert_eq!(response.header("content-type"), Some("application/x-msgpack; charset=binary"));
        assert_eq!(response.header("CONTENT-TYPE"), response.header("Content-Type"));
        assert_eq!(response.content_type().as_deref(), Some("application/x-msgpack"));
    }

    #[test]
    fn framed_payload_splits_lengths() {
        let frame = FramedPayload::from_headers(&framed_response("170", "120")).unwrap();
        assert_eq!(frame.primary_length(), 120);
        assert_eq!(frame.secondary_length(), 50);
        assert!(frame.has_secondary());
    }

    #[test]
    fn framed_payload_rejects_primary_longer_than_total() {
        let err = FramedPayload::from_headers(&framed_response("100", "120")).unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }));
    }

    #[test]
    fn framed_payload_rejects_unparseable_lengths() {
        for (total, primary) in [("abc", "10"), ("100", "-5"), ("100", "")] {
            let err = FramedPayload::from_headers(&framed_response(total, primary)).unwrap_err();
            assert!(matches!(err, ApiError::Malformed { .. }), "{total}/{primary}");
        }

        let missing = ResponseEnvelope::new(200, "OK", [("Content-Length", "10")], Vec::new());
        assert!(matches!(
            FramedPayload::from_headers(&missing),
            Err(ApiError::Malformed { .. })
        ));
    }
}
