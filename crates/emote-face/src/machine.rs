//! Expression State Machine
//!
//! Holds the loudness level and link state and derives the expression.
//! Every input goes through `recompute`; a change is reported only when the
//! derived expression differs from the one currently shown.

use emote_core::{ConnectionState, Expression, FaceTime, Loudness};

use crate::{FaceConfig, RestorePolicy, Thresholds};

/// Observable expression transition, handed to display sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionChange {
    pub from: Expression,
    pub to: Expression,
    pub level: Loudness,
    pub speaking: bool,
    pub at: FaceTime,
}

/// Short-lived forced expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientOverride {
    pub expression: Expression,
    pub deadline: FaceTime,
    /// Expression shown when the override started; only a wink restores it
    pub restore: Expression,
}

impl TransientOverride {
    #[inline]
    pub fn is_active(&self, now: FaceTime) -> bool {
        now < self.deadline
    }
}

/// Expression for the inputs, ignoring overrides: (expression, speaking)
pub fn base_expression(
    connection: ConnectionState,
    level: Loudness,
    thresholds: &Thresholds,
) -> (Expression, bool) {
    if !connection.is_connected() {
        return (Expression::Sleeping, false);
    }

    let v = level.value();
    let speaking = thresholds.is_speaking(level);
    let expression = if v > thresholds.high {
        Expression::Excited
    } else if v > thresholds.mid {
        Expression::Happy
    } else if speaking {
        Expression::Neutral
    } else {
        Expression::Idle
    };
    (expression, speaking)
}

/// Face expression state record
#[derive(Debug, Clone)]
pub struct ExpressionMachine {
    config: FaceConfig,
    connection: ConnectionState,
    level: Loudness,
    expression: Expression,
    speaking: bool,
    transient: Option<TransientOverride>,
}

impl ExpressionMachine {
    /// Start disconnected, silent and asleep
    pub fn new(config: FaceConfig) -> Self {
        Self {
            config,
            connection: ConnectionState::Disconnected,
            level: Loudness::ZERO,
            expression: Expression::Sleeping,
            speaking: false,
            transient: None,
        }
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn level(&self) -> Loudness {
        self.level
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn speaking(&self) -> bool {
        self.speaking
    }

    pub fn transient(&self) -> Option<TransientOverride> {
        self.transient
    }

    pub fn override_deadline(&self) -> Option<FaceTime> {
        self.transient.map(|t| t.deadline)
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// What the face should show at `now`, without mutating anything
    ///
    /// The override only governs the expression; `speaking` always follows
    /// the level so the mouth keeps moving through a wink.
    pub fn evaluate(&self, now: FaceTime) -> (Expression, bool) {
        let (base, speaking) =
            base_expression(self.connection, self.level, &self.config.thresholds);

        match self.transient {
            Some(t) if t.is_active(now) => (t.expression, speaking),
            _ => (base, speaking),
        }
    }

    /// Store a freshly analysed or decayed level
    pub fn set_level(&mut self, level: Loudness, now: FaceTime) -> Option<ExpressionChange> {
        self.level = level;
        self.recompute(now)
    }

    /// Apply a link transition. Repeating the current state is a no-op.
    pub fn set_connection(
        &mut self,
        state: ConnectionState,
        now: FaceTime,
    ) -> Option<ExpressionChange> {
        if state == self.connection {
            return None;
        }
        self.connection = state;

        match state {
            ConnectionState::Disconnected => {
                self.level = Loudness::ZERO;
                self.transient = None;
            }
            ConnectionState::Connecting => self.announce(Expression::Surprised, now),
            ConnectionState::Connected => self.announce(Expression::Happy, now),
            ConnectionState::Disconnecting => self.announce(Expression::Neutral, now),
        }

        self.recompute(now)
    }

    /// Start a wink. Only a connected face winks.
    pub fn trigger_wink(&mut self, now: FaceTime) -> Option<ExpressionChange> {
        if !self.connection.is_connected() {
            return None;
        }
        self.transient = Some(TransientOverride {
            expression: Expression::Wink,
            deadline: now + self.config.override_duration,
            restore: self.expression,
        });
        self.recompute(now)
    }

    /// End an override whose deadline has passed
    ///
    /// Connection announcements always re-derive on expiry; the restore
    /// policy only governs winks.
    pub fn expire_overrides(&mut self, now: FaceTime) -> Option<ExpressionChange> {
        let expired = self.clear_expired(now)?;

        match (self.config.restore, expired.expression) {
            (RestorePolicy::Cached, Expression::Wink) => {
                let (_, speaking) = self.evaluate(now);
                self.apply(expired.restore, speaking, now)
            }
            _ => self.recompute(now),
        }
    }

    /// Re-derive the expression from the current inputs
    pub fn recompute(&mut self, now: FaceTime) -> Option<ExpressionChange> {
        self.clear_expired(now);
        let (expression, speaking) = self.evaluate(now);
        self.apply(expression, speaking, now)
    }

    fn announce(&mut self, expression: Expression, now: FaceTime) {
        self.transient = Some(TransientOverride {
            expression,
            deadline: now + self.config.announce_duration,
            restore: self.expression,
        });
    }

    /// Drop an elapsed override, returning it
    fn clear_expired(&mut self, now: FaceTime) -> Option<TransientOverride> {
        match self.transient {
            Some(t) if !t.is_active(now) => {
                self.transient = None;
                Some(t)
            }
            _ => None,
        }
    }

    fn apply(
        &mut self,
        expression: Expression,
        speaking: bool,
        now: FaceTime,
    ) -> Option<ExpressionChange> {
        self.speaking = speaking;
        if expression == self.expression {
            return None;
        }

        let from = self.expression;
        self.expression = expression;
        Some(ExpressionChange {
            from,
            to: expression,
            level: self.level,
            speaking,
            at: now,
        })
    }
}

impl Default for ExpressionMachine {
    fn default() -> Self {
        Self::new(FaceConfig::default())
    }
}
