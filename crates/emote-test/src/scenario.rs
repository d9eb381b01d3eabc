//! Scenario Harness - a face node on a hand-driven clock
//!
//! Time only moves when the scenario says so. `advance` fires the decay
//! ticks, blink polls and restore deadlines that fall inside the step, in
//! time order, exactly as the async drivers would.

use std::sync::Arc;
use std::time::Duration;

use emote_audio::AudioFrame;
use emote_core::{ConnectionState, Expression, FaceTime, Loudness};
use emote_face::ExpressionChange;
use emote_runtime::{FaceNode, FaceSnapshot, RecordingSink, RuntimeConfig};
use emote_time::{Clock, ManualClock};

use crate::signal;

/// Audio delivery period used by `play`
pub const AUDIO_PERIOD: Duration = Duration::from_millis(10);

/// Stereo frames per `AUDIO_PERIOD` at 44.1 kHz
pub const FRAMES_PER_PERIOD: usize = 441;

// ============================================================================
// SCENARIO
// ============================================================================

/// Deterministic face scenario
pub struct Scenario {
    node: FaceNode,
    clock: ManualClock,
    sink: RecordingSink,
    next_decay: FaceTime,
    next_blink: FaceTime,
}

impl Scenario {
    /// Default configuration with a fixed blink seed
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig {
            seed: Some(0),
            ..Default::default()
        })
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let clock = ManualClock::new();
        let sink = RecordingSink::new();
        let next_decay = FaceTime::ZERO + config.decay.tick_interval;
        let next_blink = FaceTime::ZERO + config.blink.poll_interval;
        let node = FaceNode::new(config, Arc::new(clock.clone()), Box::new(sink.clone()));

        Scenario {
            node,
            clock,
            sink,
            next_decay,
            next_blink,
        }
    }

    /// Scenario without periodic blinking
    pub fn without_blink() -> Self {
        let mut config = RuntimeConfig {
            seed: Some(0),
            ..Default::default()
        };
        config.blink.enabled = false;
        Self::with_config(config)
    }

    // ------------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------------

    pub fn set_connection(&mut self, state: ConnectionState) -> Option<ExpressionChange> {
        self.node.on_connection(state)
    }

    /// Connect and let the announcement run out
    pub fn connect(&mut self) {
        self.node.on_connection(ConnectionState::Connected);
        let announce = self.node.config().face.announce_duration;
        self.advance(announce);
    }

    pub fn disconnect(&mut self) -> Option<ExpressionChange> {
        self.node.on_connection(ConnectionState::Disconnected)
    }

    pub fn feed(&mut self, frame: &AudioFrame) -> Option<ExpressionChange> {
        self.node.on_frame(frame)
    }

    /// Feed one full analysis window of a square wave at `level`
    pub fn feed_level(&mut self, level: f32) -> Option<ExpressionChange> {
        let frames = self.node.config().window.size;
        self.node.on_frame(&signal::square(frames, level))
    }

    /// Stream a steady tone for `duration`, one chunk per audio period
    pub fn play(&mut self, level: f32, duration: Duration) -> Vec<ExpressionChange> {
        let chunk = signal::square(FRAMES_PER_PERIOD, level);
        let end = self.clock.now() + duration;
        let mut changes = Vec::new();

        while self.clock.now() < end {
            changes.extend(self.node.on_frame(&chunk));
            let step = AUDIO_PERIOD.min(end - self.clock.now());
            changes.extend(self.advance(step));
        }
        changes
    }

    /// Move time forward, firing every timer that falls due on the way
    pub fn advance(&mut self, dt: Duration) -> Vec<ExpressionChange> {
        let target = self.clock.now() + dt;
        let decay_interval = self.node.config().decay.tick_interval;
        let blink = self.node.config().blink.clone();
        let mut changes = Vec::new();

        loop {
            let deadline = self.node.snapshot().override_deadline;
            let next = [
                Some(self.next_decay),
                blink.enabled.then_some(self.next_blink),
                deadline,
            ]
            .into_iter()
            .flatten()
            .min();

            let Some(at) = next.filter(|&at| at <= target) else {
                break;
            };
            self.clock.set(at);

            if deadline == Some(at) {
                changes.extend(self.node.expire_overrides());
            }
            if self.next_decay == at {
                changes.extend(self.node.decay_tick());
                self.next_decay = at + decay_interval;
            }
            if blink.enabled && self.next_blink == at {
                changes.extend(self.node.blink_tick());
                self.next_blink = at + blink.poll_interval;
            }
        }

        self.clock.set(target);
        changes
    }

    // ------------------------------------------------------------------------
    // Observations
    // ------------------------------------------------------------------------

    pub fn expression(&self) -> Expression {
        self.node.snapshot().expression
    }

    pub fn level(&self) -> Loudness {
        self.node.snapshot().level
    }

    pub fn speaking(&self) -> bool {
        self.node.snapshot().speaking
    }

    pub fn snapshot(&self) -> FaceSnapshot {
        self.node.snapshot()
    }

    pub fn now(&self) -> FaceTime {
        self.clock.now()
    }

    pub fn node(&self) -> &FaceNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut FaceNode {
        &mut self.node
    }

    pub fn sink(&self) -> &RecordingSink {
        &self.sink
    }

    /// Every expression shown so far, in order
    pub fn shown(&self) -> Vec<Expression> {
        self.sink.expressions()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_settles() {
        let mut scenario = Scenario::new();
        scenario.connect();
        assert_eq!(scenario.expression(), Expression::Idle);
        assert_eq!(scenario.shown(), vec![Expression::Happy, Expression::Idle]);
        assert_eq!(scenario.now(), FaceTime::from_millis(200));
    }

    #[test]
    fn test_advance_fires_timers_in_order() {
        let mut scenario = Scenario::new();
        scenario.connect();

        let changes = scenario.advance(Duration::from_millis(3500));
        let seq: Vec<_> = changes.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(
            seq,
            vec![
                (Expression::Idle, Expression::Wink),
                (Expression::Wink, Expression::Idle)
            ]
        );
        // Blink schedule restarted at connect (t=0)
        assert_eq!(changes[0].at, FaceTime::from_millis(3000));
        assert_eq!(changes[1].at, FaceTime::from_millis(3200));
    }

    #[test]
    fn test_play_holds_level() {
        let mut scenario = Scenario::without_blink();
        scenario.connect();

        scenario.play(0.45, Duration::from_millis(500));
        assert_eq!(scenario.expression(), Expression::Happy);
        assert!(scenario.speaking());
        assert!((scenario.level().value() - 0.45).abs() < 0.01);
    }
}
