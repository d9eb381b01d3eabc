//! Face Node - the single owner of all face state
//!
//! One node per display. Each entry point is one synchronous update:
//! read the clock, advance the component it concerns, recompute the
//! expression, and hand any change to the sink. Level updates that leave
//! the expression alone still reach the sink so level-driven output stays
//! live.

use std::sync::Arc;

use tokio::sync::mpsc;

use emote_audio::{AudioFrame, LevelExtractor};
use emote_core::{ConnectionState, Expression, FaceTime, Loudness};
use emote_face::{ExpressionChange, ExpressionMachine};
use emote_time::{BlinkSchedule, Clock, DecayDriver};

use crate::{DisplaySink, LevelUpdate, RuntimeConfig};

/// Counters for observability
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub frames_received: u64,
    /// Frames dropped because the link was not connected
    pub frames_ignored: u64,
    pub levels_analyzed: u64,
    pub decay_ticks: u64,
    pub blinks: u64,
    pub expression_changes: u64,
    pub connection_changes: u64,
}

/// Point-in-time view of the face
#[derive(Clone, Debug, PartialEq)]
pub struct FaceSnapshot {
    pub connection: ConnectionState,
    pub expression: Expression,
    pub level: Loudness,
    pub speaking: bool,
    pub override_deadline: Option<FaceTime>,
    pub at: FaceTime,
}

/// Face node
pub struct FaceNode {
    config: RuntimeConfig,
    clock: Arc<dyn Clock>,
    extractor: LevelExtractor,
    machine: ExpressionMachine,
    decay: DecayDriver,
    blink: BlinkSchedule,
    sink: Box<dyn DisplaySink>,
    /// Restore timer requests
    restore_tx: Option<mpsc::UnboundedSender<FaceTime>>,
    /// Last deadline handed to the restore timer
    requested_deadline: Option<FaceTime>,
    stats: RuntimeStats,
}

impl FaceNode {
    /// Create a node. The face starts disconnected and asleep.
    pub fn new(config: RuntimeConfig, clock: Arc<dyn Clock>, sink: Box<dyn DisplaySink>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut blink = BlinkSchedule::new(config.blink.clone(), seed);
        blink.reset(clock.now());

        FaceNode {
            extractor: LevelExtractor::new(config.window),
            machine: ExpressionMachine::new(config.face.clone()),
            decay: DecayDriver::new(config.decay.clone()),
            blink,
            clock,
            sink,
            restore_tx: None,
            requested_deadline: None,
            stats: RuntimeStats::default(),
            config,
        }
    }

    /// Raw PCM from the audio source. Ignored unless connected.
    pub fn on_audio(&mut self, data: &[u8]) -> Option<ExpressionChange> {
        self.on_frame(&AudioFrame::copy_from(data))
    }

    pub fn on_frame(&mut self, frame: &AudioFrame) -> Option<ExpressionChange> {
        self.stats.frames_received += 1;

        if !self.machine.connection().is_connected() {
            self.stats.frames_ignored += 1;
            tracing::debug!(bytes = frame.len(), "audio while not connected, ignored");
            return None;
        }

        let level = self.extractor.push(frame)?;
        self.stats.levels_analyzed += 1;
        self.decay.note_analysis();
        tracing::debug!(level = %level, "level analysed");

        let now = self.clock.now();
        let change = self.machine.set_level(level, now);
        self.finish_level(change, now)
    }

    /// Link transition from the connection source
    pub fn on_connection(&mut self, state: ConnectionState) -> Option<ExpressionChange> {
        let previous = self.machine.connection();
        if state == previous {
            return None;
        }

        let now = self.clock.now();
        tracing::info!(
            device = %self.config.device_name,
            from = %previous,
            to = %state,
            "connection state changed"
        );
        self.stats.connection_changes += 1;

        match state {
            ConnectionState::Disconnected => self.extractor.reset(),
            ConnectionState::Connected => self.blink.reset(now),
            _ => {}
        }

        self.sink.connection(state, now);
        let change = self.machine.set_connection(state, now);
        self.finish(change)
    }

    /// Link transition as a raw stack code. Unknown codes are ignored.
    pub fn on_connection_raw(&mut self, code: u8) -> Option<ExpressionChange> {
        match ConnectionState::from_raw(code) {
            Some(state) => self.on_connection(state),
            None => {
                tracing::debug!(code, "unknown connection state code, ignored");
                None
            }
        }
    }

    /// One decay period elapsed
    pub fn decay_tick(&mut self) -> Option<ExpressionChange> {
        self.stats.decay_ticks += 1;
        let decayed = self.decay.tick(self.machine.level())?;
        tracing::trace!(level = %decayed, "level decayed");

        let now = self.clock.now();
        let change = self.machine.set_level(decayed, now);
        self.finish_level(change, now)
    }

    /// Blink poll. Winks when the schedule says one is due.
    pub fn blink_tick(&mut self) -> Option<ExpressionChange> {
        let now = self.clock.now();
        if !self.blink.due(now) {
            return None;
        }

        let change = self.machine.trigger_wink(now);
        if change.is_some() {
            self.stats.blinks += 1;
            tracing::debug!(at_ms = now.as_millis(), "blink");
        }
        self.finish(change)
    }

    /// Restore timer fired
    pub fn expire_overrides(&mut self) -> Option<ExpressionChange> {
        let now = self.clock.now();
        let change = self.machine.expire_overrides(now);
        self.finish(change)
    }

    pub fn snapshot(&self) -> FaceSnapshot {
        FaceSnapshot {
            connection: self.machine.connection(),
            expression: self.machine.expression(),
            level: self.machine.level(),
            speaking: self.machine.speaking(),
            override_deadline: self.machine.override_deadline(),
            at: self.clock.now(),
        }
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn now(&self) -> FaceTime {
        self.clock.now()
    }

    /// Route override deadlines to a restore timer
    pub fn attach_restore_timer(&mut self, tx: mpsc::UnboundedSender<FaceTime>) {
        self.restore_tx = Some(tx);
        self.requested_deadline = None;
        self.request_restore();
    }

    fn finish_level(
        &mut self,
        change: Option<ExpressionChange>,
        now: FaceTime,
    ) -> Option<ExpressionChange> {
        if change.is_none() {
            self.sink.level(&LevelUpdate {
                expression: self.machine.expression(),
                level: self.machine.level(),
                speaking: self.machine.speaking(),
                at: now,
            });
        }
        self.finish(change)
    }

    fn finish(&mut self, change: Option<ExpressionChange>) -> Option<ExpressionChange> {
        if let Some(change) = &change {
            self.stats.expression_changes += 1;
            tracing::info!(
                from = %change.from,
                to = %change.to,
                level = %change.level,
                speaking = change.speaking,
                "expression changed"
            );
            self.sink.show(change);
        }
        self.request_restore();
        change
    }

    /// Ask the timer for a wakeup at a new override deadline
    fn request_restore(&mut self) {
        let deadline = self.machine.override_deadline();
        if deadline == self.requested_deadline {
            return;
        }
        self.requested_deadline = deadline;

        let Some(deadline) = deadline else { return };
        let sent = match &self.restore_tx {
            Some(tx) => tx.send(deadline).is_ok(),
            None => return,
        };
        if !sent {
            tracing::warn!("restore timer gone, overrides expire lazily");
            self.restore_tx = None;
        }
    }
}

impl std::fmt::Debug for FaceNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceNode")
            .field("device_name", &self.config.device_name)
            .field("machine", &self.machine)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
