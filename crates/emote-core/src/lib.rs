//! Emote Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by every emote component:
//! - Loudness level (clamped scalar in [0, 1])
//! - Connection state reported by the audio link
//! - Facial expressions derived from level and connection
//! - Face time (monotonic microseconds since node start)
//! - Error types and configuration helpers

pub mod connection;
pub mod error;
pub mod expression;
pub mod level;
pub mod serde_millis;
pub mod time;

pub use connection::*;
pub use error::*;
pub use expression::*;
pub use level::*;
pub use time::*;
