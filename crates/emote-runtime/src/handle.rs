//! Shared handle to a face node
//!
//! The audio callback and the timer tasks run in different contexts. Each
//! call takes the node lock once, so a level update and a decay tick can
//! never interleave their read-modify-write of the level.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use emote_audio::AudioFrame;
use emote_core::{ConnectionState, FaceTime};
use emote_face::ExpressionChange;
use emote_time::Clock;

use crate::{DisplaySink, FaceNode, FaceSnapshot, RuntimeConfig, RuntimeStats};

/// Cloneable, thread-safe face node
#[derive(Clone, Debug)]
pub struct FaceHandle {
    node: Arc<Mutex<FaceNode>>,
}

impl FaceHandle {
    pub fn new(config: RuntimeConfig, clock: Arc<dyn Clock>, sink: Box<dyn DisplaySink>) -> Self {
        Self::from_node(FaceNode::new(config, clock, sink))
    }

    pub fn from_node(node: FaceNode) -> Self {
        FaceHandle {
            node: Arc::new(Mutex::new(node)),
        }
    }

    pub fn on_audio(&self, data: &[u8]) -> Option<ExpressionChange> {
        self.node.lock().on_audio(data)
    }

    pub fn on_frame(&self, frame: &AudioFrame) -> Option<ExpressionChange> {
        self.node.lock().on_frame(frame)
    }

    pub fn on_connection(&self, state: ConnectionState) -> Option<ExpressionChange> {
        self.node.lock().on_connection(state)
    }

    pub fn on_connection_raw(&self, code: u8) -> Option<ExpressionChange> {
        self.node.lock().on_connection_raw(code)
    }

    pub fn decay_tick(&self) -> Option<ExpressionChange> {
        self.node.lock().decay_tick()
    }

    pub fn blink_tick(&self) -> Option<ExpressionChange> {
        self.node.lock().blink_tick()
    }

    pub fn expire_overrides(&self) -> Option<ExpressionChange> {
        self.node.lock().expire_overrides()
    }

    pub fn snapshot(&self) -> FaceSnapshot {
        self.node.lock().snapshot()
    }

    pub fn stats(&self) -> RuntimeStats {
        self.node.lock().stats().clone()
    }

    pub fn config(&self) -> RuntimeConfig {
        self.node.lock().config().clone()
    }

    pub fn now(&self) -> FaceTime {
        self.node.lock().now()
    }

    pub fn attach_restore_timer(&self, tx: mpsc::UnboundedSender<FaceTime>) {
        self.node.lock().attach_restore_timer(tx)
    }

    /// Run `f` with exclusive access to the node
    pub fn with_node<R>(&self, f: impl FnOnce(&mut FaceNode) -> R) -> R {
        f(&mut self.node.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSink;
    use emote_audio::AudioFrame;
    use emote_core::Expression;
    use emote_time::ManualClock;
    use std::time::Duration;

    #[test]
    fn test_audio_and_ticks_from_two_threads() {
        let clock = ManualClock::new();
        let sink = RecordingSink::new();
        let handle = FaceHandle::new(
            RuntimeConfig::default(),
            Arc::new(clock.clone()),
            Box::new(sink.clone()),
        );
        handle.on_connection(ConnectionState::Connected);
        clock.advance(Duration::from_millis(300));
        handle.expire_overrides();

        let loud = AudioFrame::from_mono(&[20_000; 512]);
        let audio = {
            let handle = handle.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    handle.on_frame(&loud);
                }
            })
        };
        let ticker = {
            let handle = handle.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    handle.decay_tick();
                }
            })
        };
        audio.join().unwrap();
        ticker.join().unwrap();

        let stats = handle.stats();
        assert_eq!(stats.frames_received, 200);
        assert_eq!(stats.decay_ticks, 200);
        // Every recorded change chains from the previous one
        let changes = sink.changes();
        for pair in changes.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(handle.snapshot().connection, ConnectionState::Connected);
        assert_ne!(handle.snapshot().expression, Expression::Sleeping);
    }
}
