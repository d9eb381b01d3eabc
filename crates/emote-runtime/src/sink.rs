//! Display sinks - consumers of expression changes
//!
//! The node calls `show` once per actual expression change and `level` for
//! every other level update, inside its critical section. Sinks must not
//! block.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use emote_core::{ConnectionState, Expression, FaceTime, Loudness};
use emote_face::{status_text, Backlight, ExpressionChange, FaceLayout};

/// Live level while the expression holds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUpdate {
    pub expression: Expression,
    pub level: Loudness,
    pub speaking: bool,
    pub at: FaceTime,
}

/// Receives expression changes
pub trait DisplaySink: Send {
    fn show(&mut self, change: &ExpressionChange);

    /// Level moved without changing the expression. Default: ignore.
    fn level(&mut self, _update: &LevelUpdate) {}

    /// Link state changed. Default: ignore.
    fn connection(&mut self, _state: ConnectionState, _at: FaceTime) {}
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn show(&mut self, change: &ExpressionChange) {
        (**self).show(change)
    }

    fn level(&mut self, update: &LevelUpdate) {
        (**self).level(update)
    }

    fn connection(&mut self, state: ConnectionState, at: FaceTime) {
        (**self).connection(state, at)
    }
}

/// Logs every change with the status line a label would show
#[derive(Debug)]
pub struct LogSink {
    device_name: String,
    connection: ConnectionState,
}

impl LogSink {
    pub fn new(device_name: impl Into<String>) -> Self {
        LogSink {
            device_name: device_name.into(),
            connection: ConnectionState::Disconnected,
        }
    }
}

impl DisplaySink for LogSink {
    fn show(&mut self, change: &ExpressionChange) {
        tracing::info!(
            device = %self.device_name,
            from = %change.from,
            to = %change.to,
            level = %change.level,
            speaking = change.speaking,
            at_ms = change.at.as_millis(),
            "{} {}",
            change.to.glyph(),
            status_text(self.connection, change.level),
        );
    }

    fn level(&mut self, update: &LevelUpdate) {
        tracing::trace!(
            device = %self.device_name,
            level = %update.level,
            "{}",
            status_text(self.connection, update.level),
        );
    }

    fn connection(&mut self, state: ConnectionState, _at: FaceTime) {
        self.connection = state;
        tracing::info!(
            device = %self.device_name,
            state = %state,
            "{}",
            status_text(state, Loudness::ZERO),
        );
    }
}

/// Records changes for inspection. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    changes: Arc<Mutex<Vec<ExpressionChange>>>,
    levels: Arc<Mutex<Vec<LevelUpdate>>>,
    connections: Arc<Mutex<Vec<ConnectionState>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> Vec<ExpressionChange> {
        self.changes.lock().clone()
    }

    /// Target expression of each change, in order
    pub fn expressions(&self) -> Vec<Expression> {
        self.changes.lock().iter().map(|c| c.to).collect()
    }

    /// Level updates that did not change the expression
    pub fn levels(&self) -> Vec<LevelUpdate> {
        self.levels.lock().clone()
    }

    pub fn connections(&self) -> Vec<ConnectionState> {
        self.connections.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.changes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.changes.lock().clear();
        self.levels.lock().clear();
        self.connections.lock().clear();
    }
}

impl DisplaySink for RecordingSink {
    fn show(&mut self, change: &ExpressionChange) {
        self.changes.lock().push(*change);
    }

    fn level(&mut self, update: &LevelUpdate) {
        self.levels.lock().push(*update);
    }

    fn connection(&mut self, state: ConnectionState, _at: FaceTime) {
        self.connections.lock().push(state);
    }
}

/// Drives a backlight PWM channel from the level
///
/// The writer receives a 13-bit duty and is only called when it changes.
pub struct BacklightSink<F> {
    backlight: Backlight,
    write: F,
    last_duty: Option<u32>,
}

impl<F: FnMut(u32) + Send> BacklightSink<F> {
    pub fn new(backlight: Backlight, write: F) -> Self {
        BacklightSink {
            backlight,
            write,
            last_duty: None,
        }
    }

    pub fn last_duty(&self) -> Option<u32> {
        self.last_duty
    }

    fn update(&mut self, level: Loudness, expression: Expression) {
        let duty = self.backlight.duty_for(level, expression);
        if self.last_duty != Some(duty) {
            self.last_duty = Some(duty);
            (self.write)(duty);
        }
    }
}

impl<F: FnMut(u32) + Send> DisplaySink for BacklightSink<F> {
    fn show(&mut self, change: &ExpressionChange) {
        self.update(change.level, change.to);
    }

    fn level(&mut self, update: &LevelUpdate) {
        self.update(update.level, update.expression);
    }
}

/// Draws the face through a callback, redrawing on every level update
pub struct LayoutSink<F> {
    draw: F,
}

impl<F: FnMut(&FaceLayout) + Send> LayoutSink<F> {
    pub fn new(draw: F) -> Self {
        LayoutSink { draw }
    }
}

impl<F: FnMut(&FaceLayout) + Send> DisplaySink for LayoutSink<F> {
    fn show(&mut self, change: &ExpressionChange) {
        let layout = FaceLayout::compute(change.to, change.level, change.speaking, change.at);
        (self.draw)(&layout);
    }

    fn level(&mut self, update: &LevelUpdate) {
        let layout =
            FaceLayout::compute(update.expression, update.level, update.speaking, update.at);
        (self.draw)(&layout);
    }
}

/// Publishes the latest change to async watchers
#[derive(Debug)]
pub struct ChannelSink {
    tx: watch::Sender<Option<ExpressionChange>>,
}

impl ChannelSink {
    pub fn new() -> (Self, watch::Receiver<Option<ExpressionChange>>) {
        let (tx, rx) = watch::channel(None);
        (ChannelSink { tx }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ExpressionChange>> {
        self.tx.subscribe()
    }
}

impl DisplaySink for ChannelSink {
    fn show(&mut self, change: &ExpressionChange) {
        // No receivers is fine
        self.tx.send_replace(Some(*change));
    }
}

/// Forwards to several sinks in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn DisplaySink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl DisplaySink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn DisplaySink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DisplaySink for FanoutSink {
    fn show(&mut self, change: &ExpressionChange) {
        for sink in &mut self.sinks {
            sink.show(change);
        }
    }

    fn level(&mut self, update: &LevelUpdate) {
        for sink in &mut self.sinks {
            sink.level(update);
        }
    }

    fn connection(&mut self, state: ConnectionState, at: FaceTime) {
        for sink in &mut self.sinks {
            sink.connection(state, at);
        }
    }
}
