//! Blink schedule - periodic winks independent of audio

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use emote_core::{serde_millis, EmoteError, EmoteResult, FaceTime};

/// Blink configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub enabled: bool,
    /// Mean time between blinks
    #[serde(with = "serde_millis")]
    pub interval: Duration,
    /// Uniform random spread around `interval`
    #[serde(with = "serde_millis")]
    pub jitter: Duration,
    /// How often the runtime asks whether a blink is due
    #[serde(with = "serde_millis")]
    pub poll_interval: Duration,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        BlinkConfig {
            enabled: true,
            interval: Duration::from_millis(3000),
            jitter: Duration::ZERO,
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl BlinkConfig {
    /// Irregular blinking, reads as less mechanical
    pub fn natural() -> Self {
        BlinkConfig {
            jitter: Duration::from_millis(1000),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EmoteResult<()> {
        if self.interval.is_zero() {
            return Err(EmoteError::ZeroDuration("blink.interval"));
        }
        if self.poll_interval.is_zero() {
            return Err(EmoteError::ZeroDuration("blink.poll_interval"));
        }
        if self.jitter >= self.interval {
            return Err(EmoteError::InvalidConfig(format!(
                "blink jitter {:?} must be shorter than interval {:?}",
                self.jitter, self.interval
            )));
        }
        Ok(())
    }
}

/// Decides when the next blink is due
#[derive(Debug)]
pub struct BlinkSchedule {
    config: BlinkConfig,
    next_at: FaceTime,
    rng: StdRng,
    blinks: u64,
}

impl BlinkSchedule {
    /// First blink one interval after start
    pub fn new(config: BlinkConfig, seed: u64) -> Self {
        let mut schedule = Self {
            next_at: FaceTime::ZERO,
            rng: StdRng::seed_from_u64(seed),
            blinks: 0,
            config,
        };
        schedule.reset(FaceTime::ZERO);
        schedule
    }

    /// True once per interval. Schedules the following blink when it fires.
    pub fn due(&mut self, now: FaceTime) -> bool {
        if !self.config.enabled || now < self.next_at {
            return false;
        }
        self.blinks += 1;
        self.reset(now);
        true
    }

    /// Schedule the next blink one (jittered) interval after `now`
    pub fn reset(&mut self, now: FaceTime) {
        self.next_at = now + self.next_gap();
    }

    pub fn next_at(&self) -> FaceTime {
        self.next_at
    }

    pub fn blinks(&self) -> u64 {
        self.blinks
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }

    fn next_gap(&mut self) -> Duration {
        let base = self.config.interval.as_millis() as i64;
        let spread = self.config.jitter.as_millis() as i64;
        if spread == 0 {
            return self.config.interval;
        }
        let offset = self.rng.gen_range(-spread..=spread);
        Duration::from_millis((base + offset).max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blink_every_interval() {
        let mut schedule = BlinkSchedule::new(BlinkConfig::default(), 7);

        assert!(!schedule.due(FaceTime::from_millis(2900)));
        assert!(schedule.due(FaceTime::from_millis(3000)));
        // Fires once, then waits another interval
        assert!(!schedule.due(FaceTime::from_millis(3100)));
        assert!(schedule.due(FaceTime::from_millis(6000)));
        assert_eq!(schedule.blinks(), 2);
    }

    #[test]
    fn test_disabled_never_blinks() {
        let config = BlinkConfig {
            enabled: false,
            ..Default::default()
        };
        let mut schedule = BlinkSchedule::new(config, 7);
        assert!(!schedule.due(FaceTime::from_millis(60_000)));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let mut schedule = BlinkSchedule::new(BlinkConfig::natural(), 42);
        let mut now = FaceTime::ZERO;
        for _ in 0..50 {
            let gap = schedule.next_at() - now;
            assert!(gap >= Duration::from_millis(2000));
            assert!(gap <= Duration::from_millis(4000));
            now = schedule.next_at();
            assert!(schedule.due(now));
        }
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let mut a = BlinkSchedule::new(BlinkConfig::natural(), 9);
        let mut b = BlinkSchedule::new(BlinkConfig::natural(), 9);
        for _ in 0..10 {
            assert_eq!(a.next_at(), b.next_at());
            let now = a.next_at();
            a.due(now);
            b.due(now);
        }
    }

    #[test]
    fn test_config_validate() {
        assert!(BlinkConfig::default().validate().is_ok());
        let bad = BlinkConfig {
            jitter: Duration::from_secs(5),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
