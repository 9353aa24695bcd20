//! Authenticated API client
//!
//! Attaches the session token to every request that needs one and recovers
//! from a single 401 by refreshing the token and re-sending the request.

use std::sync::Arc;
use std::time::Duration;

use beagle_core::framing::decode_json;
use beagle_core::{classify_response, RefreshTransport, SessionPersistence, SessionStore};
use beagle_domain::constants::MAX_AUTH_RETRIES;
use beagle_domain::{ApiError, BeagleError, Config, RequestEnvelope, ResponseEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::refresh;
use crate::http::HttpClient;
use crate::storage;

const UNAUTHORIZED: u16 = 401;

/// API client that owns the authentication retry policy.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    session: SessionStore,
}

impl ApiClient {
    pub const fn new(http: HttpClient, session: SessionStore) -> Self {
        Self { http, session }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Send `envelope` and hand the 2xx response to `decode`.
    ///
    /// A 401 on an authenticated request triggers one token refresh and one
    /// re-send. A second 401, or a failed refresh, resets the session and
    /// returns [`ApiError::SessionExpired`]. Transport and decode failures
    /// are never retried.
    ///
    /// # Errors
    /// Any [`ApiError`]; see the variant docs for when each is produced.
    #[instrument(skip(self, envelope, decode), fields(method = %envelope.method(), path = %envelope.path()))]
    pub async fn execute<T, D>(&self, envelope: &RequestEnvelope, decode: D) -> Result<T, ApiError>
    where
        D: FnOnce(ResponseEnvelope) -> Result<T, ApiError>,
    {
        let mut auth_retries = 0;

        let response = loop {
            let bearer = if envelope.requires_auth() {
                let Some(token) = self.session.bearer_token().await else {
                    warn!("Request requires a session but none is available");
                    return Err(ApiError::Unauthenticated);
                };
                Some(token)
            } else {
                None
            };

            let response = self.http.send(envelope, bearer.as_deref()).await?;

            let Some(rejected) = bearer.filter(|_| response.status() == UNAUTHORIZED) else {
                break response;
            };

            if auth_retries >= MAX_AUTH_RETRIES {
                warn!(attempts = auth_retries + 1, "Token rejected again after refresh");
                self.session.reset().await;
                return Err(ApiError::SessionExpired);
            }
            auth_retries += 1;

            if !self.session.refresh_after_rejection(&rejected).await {
                warn!("Token refresh failed, clearing session");
                self.session.reset().await;
                return Err(ApiError::SessionExpired);
            }
            info!("Token refreshed, retrying request");
        };

        if !response.is_success() {
            let err = classify_response(&response);
            warn!(status = response.status(), error = %err, "Request failed");
            return Err(err);
        }

        debug!(status = response.status(), bytes = response.body().len(), "Request succeeded");
        decode(response)
    }

    /// Execute and decode the body as JSON.
    ///
    /// An empty body (204/205) decodes as JSON `null`, so `()` and `Option`
    /// targets work.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        envelope: &RequestEnvelope,
    ) -> Result<T, ApiError> {
        self.execute(envelope, |response| {
            if response.body().is_empty() {
                serde_json::from_value(Value::Null).map_err(|e| {
                    ApiError::decode(format!(
                        "empty response ({}) cannot be decoded: {e}",
                        response.status()
                    ))
                })
            } else {
                decode_json(response.body())
            }
        })
        .await
    }

    /// Execute and ignore the body.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn execute_empty(&self, envelope: &RequestEnvelope) -> Result<(), ApiError> {
        self.execute(envelope, |_| Ok(())).await
    }
}

/// Builder for [`ApiClient`].
///
/// Anything not supplied is derived from the [`Config`].
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<Config>,
    persistence: Option<Arc<dyn SessionPersistence>>,
    refresher: Option<Arc<dyn RefreshTransport>>,
}

impl ApiClientBuilder {
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this session storage instead of the configured backend.
    #[must_use]
    pub fn persistence(mut self, persistence: Arc<dyn SessionPersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Use this refresh transport instead of the configured one.
    #[must_use]
    pub fn refresher(mut self, refresher: Arc<dyn RefreshTransport>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// # Errors
    /// Returns `BeagleError::Config` for invalid URLs and `BeagleError::Storage`
    /// or `BeagleError::Config` when the session backend cannot be set up.
    pub fn build(self) -> Result<ApiClient, BeagleError> {
        let config = self.config.unwrap_or_default();

        let mut http = HttpClient::builder(&config.api.base_url)
            .timeout(Duration::from_secs(config.api.timeout_seconds));
        if let Some(agent) = &config.api.user_agent {
            http = http.user_agent(agent);
        }
        let http = http.build()?;

        let persistence = match self.persistence {
            Some(persistence) => persistence,
            None => storage::from_config(&config.storage)?,
        };
        let refresher = match self.refresher {
            Some(refresher) => refresher,
            None => refresh::transport_for(&config.auth, http.clone())?,
        };

        info!(
            base_url = %config.api.base_url,
            refresh_mode = %config.auth.refresh_mode,
            "API client configured"
        );
        Ok(ApiClient::new(http, SessionStore::new(persistence, refresher)))
    }
}
