//! Domain types and models

pub mod account;
pub mod envelope;
pub mod flip;
pub mod payload;
pub mod premium;
pub mod price;
pub mod session;
pub mod suggestion;

pub use account::{AccountStatus, Preferences};
pub use envelope::{FramedPayload, HttpMethod, RequestEnvelope, ResponseEnvelope};
pub use flip::{Flip, OfferType, Transaction};
pub use payload::{AbsentReason, MultiplexedResponse, SecondaryPayload};
pub use premium::PremiumInstanceStatus;
pub use price::{ItemPrice, PriceRequest};
pub use session::Session;
pub use suggestion::{GraphData, PricePoint, Suggestion, SuggestionResponse};
