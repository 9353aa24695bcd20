//! Error conversions for infrastructure failures

pub mod conversions;

pub(crate) use conversions::{IntoApiError, IntoStorageError};
