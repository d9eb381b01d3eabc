//! Emote Test Harness - Deterministic face validation
//!
//! This crate provides:
//! - PCM signal generators with known loudness
//! - The level sweep simulator used by the demo
//! - A scenario harness driving a face node on a manual clock
//! - End-to-end behaviour tests

pub mod integration;
pub mod scenario;
pub mod signal;

pub use scenario::*;
pub use signal::*;
