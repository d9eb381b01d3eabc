//! Error types for emote configuration

use thiserror::Error;

/// Core emote errors
///
/// Audio analysis and expression transitions never fail; every variant here
/// comes from validating configuration before the node starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmoteError {
    #[error("Thresholds out of order: low {low} < mid {mid} < high {high} required")]
    ThresholdOrder { low: f32, mid: f32, high: f32 },

    #[error("Threshold out of range [0, 1]: {0}")]
    ThresholdRange(f32),

    #[error("Decay factor must be in (0, 1): {0}")]
    DecayFactor(f32),

    #[error("Analysis window must hold at least 2 samples: {0}")]
    WindowSize(usize),

    #[error("Duration must be non-zero: {0}")]
    ZeroDuration(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for emote operations
pub type EmoteResult<T> = Result<T, EmoteError>;
