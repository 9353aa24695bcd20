//! Authenticated access to the flipping assistant API
//!
//! - [`ApiClient`] sends envelopes and owns the refresh-on-401 policy
//! - [`CopilotApi`] exposes the named operations on top of it
//! - [`BlockingApiClient`] wraps a few lookups for synchronous callers
//! - [`refresh`] holds the two token refresh transports

pub mod blocking;
pub mod client;
pub mod endpoints;
pub mod refresh;

pub use blocking::BlockingApiClient;
pub use client::{ApiClient, ApiClientBuilder};
pub use endpoints::CopilotApi;
pub use refresh::{ApiRefresh, IdentityProviderRefresh};
