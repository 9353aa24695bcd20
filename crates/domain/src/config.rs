//! Client configuration structures
//!
//! Every section has defaults, so a config file only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, DEFAULT_REFRESH_URL,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Which service exchanges a refresh token for a new session token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// `{grant_type, refresh_token}` posted to the identity provider.
    #[default]
    IdentityProvider,
    /// `{refreshToken}` posted to the API's own `/refresh-token` route.
    Api,
}

crate::impl_wire_enum_conversions!(RefreshMode {
    IdentityProvider => "identity_provider",
    Api => "api",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub refresh_mode: RefreshMode,
    /// Token endpoint of the identity provider, including any API key query.
    pub refresh_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { refresh_mode: RefreshMode::default(), refresh_url: DEFAULT_REFRESH_URL.to_string() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    #[default]
    File,
    Keychain,
    Memory,
}

crate::impl_wire_enum_conversions!(SessionBackend {
    File => "file",
    Keychain => "keychain",
    Memory => "memory",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: SessionBackend,
    /// Session file location; the platform config directory when unset.
    pub session_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}
