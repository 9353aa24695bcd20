//! # Beagle Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP transport and the authenticated API client
//! - Endpoint operations of the Beagle API
//! - Session persistence adapters (file, keychain, memory)
//! - The msgpack sub-message codec
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `beagle-core`
//! - Depends on `beagle-domain` and `beagle-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod codec;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, BlockingApiClient, CopilotApi};
pub use codec::MsgPackCodec;
pub use http::{HttpClient, HttpClientBuilder};
pub use storage::{FileSessionStorage, KeychainSessionStorage, MemorySessionStorage};
