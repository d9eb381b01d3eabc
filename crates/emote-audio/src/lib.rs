//! Emote Audio - Loudness extraction from PCM
//!
//! This is NOT a DSP library. It turns interleaved 16-bit stereo PCM, as
//! delivered by an A2DP sink callback, into one scalar loudness level.
//!
//! # Pipeline
//!
//! bytes → stereo pairs → mono (mean of channels) → normalize by 32768
//! → RMS or mean-absolute over an analysis window → clamp to [0, 1]
//!
//! The streaming extractor keeps a sliding mono buffer and analyses it once
//! a full window is buffered, then drops the oldest half (50% overlap).

pub mod extractor;
pub mod frame;
pub mod window;

pub use extractor::*;
pub use frame::*;
pub use window::*;
