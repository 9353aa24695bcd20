//! # Beagle Core
//!
//! Request pipeline logic with no HTTP or storage code.
//!
//! This crate contains:
//! - The session store and its persistence/refresh ports
//! - Error classification for non-2xx responses
//! - Framing of multiplexed two-part response bodies
//! - Completion delivery and send throttling
//!
//! ## Architecture Principles
//! - Only depends on `beagle-domain`
//! - All external collaborators via traits
//! - Pure, testable logic

pub mod classifier;
pub mod dispatch;
pub mod framing;
pub mod session;
pub mod throttle;

// Re-export specific items to avoid ambiguity
pub use classifier::{classify_response, classify_transport};
pub use dispatch::{callback_channel, CallbackDispatcher, CallbackLoop, Completion};
pub use framing::{CodecError, ContentFormat, JsonCodec, PrimaryMessage, ResponseFramer, SubMessageCodec};
pub use session::ports::{RefreshTransport, RefreshedToken, SessionPersistence};
pub use session::SessionStore;
pub use throttle::SendThrottle;
