//! Emote Face - Expression as state
//!
//! The face does not render anything. It holds the loudness level and the
//! link state, and derives the one expression a display should show.
//!
//! # Derivation (first match wins)
//!
//! 1. Active transient override (wink, connection announcement)
//! 2. Link not connected → Sleeping
//! 3. level > high → Excited
//! 4. level > mid → Happy
//! 5. level > low → Neutral
//! 6. otherwise → Idle
//!
//! Geometry, colours, backlight duty and status text are derived views over
//! the same state, handed to display sinks.

pub mod backlight;
pub mod config;
pub mod machine;
pub mod status;
pub mod style;

pub use backlight::*;
pub use config::*;
pub use machine::*;
pub use status::*;
pub use style::*;
