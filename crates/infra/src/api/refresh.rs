//! Token refresh transports
//!
//! Two wire formats exist for exchanging a refresh token:
//! - the identity provider's token endpoint (`grant_type=refresh_token`)
//! - the API's own `/refresh-token` route
//!
//! Both return the new session token as `id_token` and may reissue the
//! refresh token. Which one is used comes from [`AuthConfig::refresh_mode`].

use std::sync::Arc;

use async_trait::async_trait;
use beagle_core::{classify_response, RefreshTransport, RefreshedToken};
use beagle_domain::constants::REFRESH_TOKEN_PATH;
use beagle_domain::{ApiError, AuthConfig, BeagleError, RefreshMode, RequestEnvelope, ResponseEnvelope};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(alias = "idToken", default)]
    id_token: Option<String>,
    #[serde(alias = "refreshToken", default)]
    refresh_token: Option<String>,
}

fn parse_refresh(response: &ResponseEnvelope) -> Result<RefreshedToken, ApiError> {
    if !response.is_success() {
        return Err(classify_response(response));
    }

    let parsed: RefreshResponse = serde_json::from_slice(response.body())
        .map_err(|e| ApiError::decode(format!("invalid refresh response: {e}")))?;
    let token = parsed
        .id_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::decode("refresh response has no id_token"))?;

    Ok(RefreshedToken { token, refresh_token: parsed.refresh_token })
}

/// Refresh against the external identity provider.
#[derive(Debug, Clone)]
pub struct IdentityProviderRefresh {
    http: HttpClient,
    endpoint: Url,
}

impl IdentityProviderRefresh {
    pub const fn new(http: HttpClient, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl RefreshTransport for IdentityProviderRefresh {
    async fn exchange(&self, refresh_token: &str) -> Result<RefreshedToken, ApiError> {
        debug!(endpoint = %self.endpoint, "Exchanging refresh token with identity provider");
        let body = json!({ "grant_type": "refresh_token", "refresh_token": refresh_token });
        let response = self.http.post_json_to(self.endpoint.clone(), &body).await?;
        parse_refresh(&response)
    }
}

/// Refresh through the API's `/refresh-token` route.
#[derive(Debug, Clone)]
pub struct ApiRefresh {
    http: HttpClient,
}

impl ApiRefresh {
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RefreshTransport for ApiRefresh {
    async fn exchange(&self, refresh_token: &str) -> Result<RefreshedToken, ApiError> {
        debug!("Exchanging refresh token with API");
        let envelope =
            RequestEnvelope::post(REFRESH_TOKEN_PATH, json!({ "refreshToken": refresh_token }))
                .unauthenticated();
        let response = self.http.send(&envelope, None).await?;
        parse_refresh(&response)
    }
}

/// Refresh transport selected by `auth.refresh_mode`.
///
/// # Errors
/// Returns `BeagleError::Config` when the identity provider URL is invalid.
pub fn transport_for(
    auth: &AuthConfig,
    http: HttpClient,
) -> Result<Arc<dyn RefreshTransport>, BeagleError> {
    match auth.refresh_mode {
        RefreshMode::IdentityProvider => {
            let endpoint = Url::parse(&auth.refresh_url).map_err(|e| {
                BeagleError::Config(format!("invalid refresh URL {}: {e}", auth.refresh_url))
            })?;
            Ok(Arc::new(IdentityProviderRefresh::new(http, endpoint)))
        }
        RefreshMode::Api => Ok(Arc::new(ApiRefresh::new(http))),
    }
}
