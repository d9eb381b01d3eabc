//! End-to-end Behaviour Suite
//!
//! Drives a full face node (extractor, machine, decay, blink, sink) through
//! realistic sessions and checks what the display would have shown.
