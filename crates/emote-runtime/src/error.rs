//! Runtime setup errors

use std::path::PathBuf;

use emote_core::EmoteError;
use thiserror::Error;

/// Errors from loading configuration or installing logging.
/// Running nodes never fail.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] EmoteError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
