//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::{LoggingConfig, RuntimeError, RuntimeResult};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `Ok(false)` if a
/// subscriber was already installed, which is not an error for embedders
/// that bring their own.
pub fn init_logging(config: &LoggingConfig) -> RuntimeResult<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| RuntimeError::Logging(format!("bad filter {:?}: {}", config.level, e)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
