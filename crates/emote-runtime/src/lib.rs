//! Emote Runtime - Face node orchestration
//!
//! Wires the extractor, expression machine, decay driver and blink schedule
//! into one owned state record, and connects it to the outside world:
//! 1. Audio source delivers PCM (`on_audio`)
//! 2. Connection source delivers link transitions (`on_connection`)
//! 3. Timer tasks tick decay, blink, and override restore
//! 4. Display sinks receive every expression change
//!
//! All mutations of the record happen under one mutex (`FaceHandle`), so
//! the audio callback context and the timer context never interleave a
//! read-modify-write.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod handle;
pub mod node;
pub mod sink;
pub mod telemetry;

pub use clock::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use handle::*;
pub use node::*;
pub use sink::*;
pub use telemetry::*;
