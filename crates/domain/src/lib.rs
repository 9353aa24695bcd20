//! # Beagle Domain
//!
//! Domain types shared by every layer of the Beagle Flipper client.
//!
//! This crate contains:
//! - Session and request/response envelope types
//! - Wire models exchanged with the Beagle API (suggestions, prices, flips)
//! - The API error taxonomy and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Beagle crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
