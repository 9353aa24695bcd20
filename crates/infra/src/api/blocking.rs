//! Blocking facade for simple lookups
//!
//! Owns a small tokio runtime and blocks the calling thread on each request.
//! Must not be called from inside an async context.

use std::collections::HashMap;

use beagle_domain::{ApiError, BeagleError, Config, Flip};
use tokio::runtime::{Builder, Runtime};

use super::client::ApiClient;
use super::endpoints::CopilotApi;

pub struct BlockingApiClient {
    runtime: Runtime,
    api: CopilotApi,
}

impl BlockingApiClient {
    /// # Errors
    /// Returns `BeagleError::Internal` if the runtime cannot start, or any
    /// error from building the [`ApiClient`].
    pub fn from_config(config: Config) -> Result<Self, BeagleError> {
        let client = ApiClient::builder().config(config).build()?;
        Self::new(CopilotApi::new(client))
    }

    /// # Errors
    /// Returns `BeagleError::Internal` if the runtime cannot start.
    pub fn new(api: CopilotApi) -> Result<Self, BeagleError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("beagle-blocking")
            .enable_all()
            .build()
            .map_err(|e| BeagleError::Internal(format!("failed to start runtime: {e}")))?;
        Ok(Self { runtime, api })
    }

    pub const fn api(&self) -> &CopilotApi {
        &self.api
    }

    /// # Errors
    /// Any [`ApiError`]; the same single-retry rule applies as for async calls.
    pub fn account_names(&self, display_name: &str) -> Result<HashMap<String, i32>, ApiError> {
        self.runtime.block_on(self.api.account_names(display_name))
    }

    /// # Errors
    /// Any [`ApiError`].
    pub fn flips(&self, display_name: &str) -> Result<Vec<Flip>, ApiError> {
        self.runtime.block_on(self.api.flips(display_name))
    }
}
