//! Expression thresholds and timing

use std::time::Duration;

use serde::{Deserialize, Serialize};

use emote_core::{serde_millis, EmoteError, EmoteResult, Loudness};

/// Loudness band boundaries. A level must be strictly above a boundary to
/// enter the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            low: 0.1,
            mid: 0.3,
            high: 0.6,
        }
    }
}

impl Thresholds {
    /// Lower speaking boundary, reacts to quiet audio
    pub fn sensitive() -> Self {
        Thresholds {
            low: 0.05,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EmoteResult<()> {
        for value in [self.low, self.mid, self.high] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EmoteError::ThresholdRange(value));
            }
        }
        if !(self.low < self.mid && self.mid < self.high) {
            return Err(EmoteError::ThresholdOrder {
                low: self.low,
                mid: self.mid,
                high: self.high,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_speaking(&self, level: Loudness) -> bool {
        level.value() > self.low
    }
}

/// What to show when a transient override ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorePolicy {
    /// Re-derive from the inputs at expiry
    #[default]
    Recompute,
    /// Restore the expression captured when the override started. Stale if
    /// the level moved meanwhile.
    Cached,
}

/// Expression machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub thresholds: Thresholds,
    /// Wink duration
    #[serde(with = "serde_millis")]
    pub override_duration: Duration,
    /// Duration of connection announcements (surprised, happy, neutral)
    #[serde(with = "serde_millis")]
    pub announce_duration: Duration,
    pub restore: RestorePolicy,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            thresholds: Thresholds::default(),
            override_duration: Duration::from_millis(200),
            announce_duration: Duration::from_millis(200),
            restore: RestorePolicy::Recompute,
        }
    }
}

impl FaceConfig {
    pub fn validate(&self) -> EmoteResult<()> {
        self.thresholds.validate()?;
        if self.override_duration.is_zero() {
            return Err(EmoteError::ZeroDuration("override_duration"));
        }
        if self.announce_duration.is_zero() {
            return Err(EmoteError::ZeroDuration("announce_duration"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_valid() {
        assert!(Thresholds::default().validate().is_ok());
        assert!(Thresholds::sensitive().validate().is_ok());
    }

    #[test]
    fn test_threshold_order_rejected() {
        let t = Thresholds {
            low: 0.4,
            mid: 0.3,
            high: 0.6,
        };
        assert!(matches!(t.validate(), Err(EmoteError::ThresholdOrder { .. })));
    }

    #[test]
    fn test_threshold_range_rejected() {
        let t = Thresholds {
            high: 1.5,
            ..Default::default()
        };
        assert_eq!(t.validate(), Err(EmoteError::ThresholdRange(1.5)));
    }

    #[test]
    fn test_zero_override_rejected() {
        let config = FaceConfig {
            override_duration: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(EmoteError::ZeroDuration("override_duration"))
        );
    }
}
