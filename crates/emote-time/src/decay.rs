//! Decay Driver - fades the held level when no audio arrives

use std::time::Duration;

use serde::{Deserialize, Serialize};

use emote_core::{serde_millis, EmoteError, EmoteResult, Loudness};

/// Decay configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Multiplier applied per idle tick
    pub factor: f32,
    /// Below this the level is left alone
    pub epsilon: f32,
    /// Tick period
    #[serde(with = "serde_millis")]
    pub tick_interval: Duration,
}

impl Default for DecayConfig {
    fn default() -> Self {
        DecayConfig {
            factor: 0.95,
            epsilon: 0.01,
            tick_interval: Duration::from_millis(50),
        }
    }
}

impl DecayConfig {
    /// Faster fade for displays that should calm down quickly
    pub fn fast() -> Self {
        DecayConfig {
            factor: 0.8,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EmoteResult<()> {
        if !(self.factor > 0.0 && self.factor < 1.0) {
            return Err(EmoteError::DecayFactor(self.factor));
        }
        if !(self.epsilon > 0.0 && self.epsilon < 1.0) {
            return Err(EmoteError::InvalidConfig(format!(
                "decay epsilon must be in (0, 1): {}",
                self.epsilon
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(EmoteError::ZeroDuration("decay.tick_interval"));
        }
        Ok(())
    }
}

/// Exponential level decay, ticked at a fixed period
///
/// A tick after fresh audio only consumes the fresh flag. Levels already
/// below epsilon are left untouched so quiescent ticks produce no work.
#[derive(Debug)]
pub struct DecayDriver {
    config: DecayConfig,
    /// An analysis happened since the last tick
    fresh: bool,
    ticks: u64,
    decays: u64,
}

impl DecayDriver {
    pub fn new(config: DecayConfig) -> Self {
        Self {
            config,
            fresh: false,
            ticks: 0,
            decays: 0,
        }
    }

    /// Record that a new level was analysed
    pub fn note_analysis(&mut self) {
        self.fresh = true;
    }

    /// Advance one tick. Returns the decayed level, or `None` when nothing
    /// should change.
    pub fn tick(&mut self, level: Loudness) -> Option<Loudness> {
        self.ticks += 1;

        if std::mem::take(&mut self.fresh) {
            return None;
        }
        if level.is_below(self.config.epsilon) {
            return None;
        }

        self.decays += 1;
        Some(level.scale(self.config.factor))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn decays(&self) -> u64 {
        self.decays
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }
}

impl Default for DecayDriver {
    fn default() -> Self {
        Self::new(DecayConfig::default())
    }
}
