//! Session ownership and token refresh

pub mod ports;
pub mod store;

pub use store::SessionStore;
