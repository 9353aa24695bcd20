//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level when it is set and valid.

use beagle_domain::{BeagleError, LoggingConfig, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter from `RUST_LOG`, or from `config.level` when that is unset.
///
/// # Errors
/// Returns `BeagleError::Config` if the configured level is not a valid
/// filter directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            BeagleError::Config(format!("Invalid log level {}: {e}", config.level))
        }),
    }
}

/// Install the global fmt subscriber, with JSON lines when `config.json`.
///
/// # Errors
/// Returns `BeagleError::Config` for an invalid level or when a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| BeagleError::Config(format!("Failed to install tracing subscriber: {e}")))?;

    tracing::debug!(level = %config.level, json = config.json, "Tracing initialised");
    Ok(())
}
