//! Emote Time - clocks and periodic drivers
//!
//! This crate implements the time-driven parts of the face:
//! - Clock sources (monotonic for devices, manual for tests)
//! - Decay driver: fades the held level when audio stops
//! - Blink schedule: decides when the next wink is due
//!
//! Neither driver owns a timer. The runtime ticks them at fixed periods.

pub mod blink;
pub mod clock;
pub mod decay;

pub use blink::*;
pub use clock::*;
pub use decay::*;
