use std::time::Duration;

use beagle_domain::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use beagle_domain::{ApiError, BeagleError, HttpMethod, RequestEnvelope, ResponseEnvelope};
use reqwest::header::ACCEPT;
use reqwest::{Client as ReqwestClient, Method, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::IntoApiError;

/// HTTP transport bound to one API base URL.
///
/// Sends a [`RequestEnvelope`] exactly once and buffers the whole response
/// into a [`ResponseEnvelope`]. Retrying is the caller's decision.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: Url,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder(base_url: impl Into<String>) -> HttpClientBuilder {
        HttpClientBuilder::new(base_url)
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for the envelope's path and query.
    pub fn url_for(&self, envelope: &RequestEnvelope) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = envelope.path().trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|e| ApiError::transport(format!("invalid request URL: {e}")))?;

        if !envelope.query().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in envelope.query() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send the envelope, attaching `bearer` as the Authorization header.
    pub async fn send(
        &self,
        envelope: &RequestEnvelope,
        bearer: Option<&str>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let url = self.url_for(envelope)?;
        let mut request = self.client.request(to_method(envelope.method()), url.clone());

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(accept) = envelope.accept() {
            request = request.header(ACCEPT, accept);
        }
        if let Some(body) = envelope.body() {
            request = request.json(body);
        }

        debug!(method = %envelope.method(), %url, "sending HTTP request");
        let response = request.send().await.map_err(|err| {
            debug!(method = %envelope.method(), %url, error = %err, "HTTP request failed");
            err.into_api_error()
        })?;
        debug!(method = %envelope.method(), %url, status = %response.status(), "received HTTP response");

        buffer(response).await
    }

    /// POST a JSON body to an absolute URL outside the API base.
    pub async fn post_json_to(&self, url: Url, body: &Value) -> Result<ResponseEnvelope, ApiError> {
        debug!(%url, "sending HTTP request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(IntoApiError::into_api_error)?;
        buffer(response).await
    }
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

async fn buffer(response: Response) -> Result<ResponseEnvelope, ApiError> {
    let status = response.status();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.bytes().await.map_err(IntoApiError::into_api_error)?;

    Ok(ResponseEnvelope::new(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        headers,
        body.to_vec(),
    ))
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl HttpClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    #[must_use]
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `BeagleError::Config` for an unparseable base URL or when the
    /// TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient, BeagleError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| BeagleError::Config(format!("invalid API base URL {}: {e}", self.base_url)))?;

        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()));

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|e| BeagleError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpClient { client, base_url })
    }
}
