//! Clock implementations

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use emote_core::FaceTime;

/// Source of face time
/// INVARIANT: `now()` never goes backwards
pub trait Clock: Send + Sync {
    fn now(&self) -> FaceTime;
}

/// Monotonic clock backed by the OS
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    /// Node start
    reference: Instant,
}

impl MonotonicClock {
    /// Create a clock starting at zero
    pub fn new() -> Self {
        MonotonicClock {
            reference: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> FaceTime {
        FaceTime::from_micros(self.reference.elapsed().as_micros() as u64)
    }
}

/// Hand-driven clock for deterministic tests and simulations
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given time
    pub fn starting_at(t: FaceTime) -> Self {
        let clock = Self::new();
        clock.set(t);
        clock
    }

    /// Move time forward
    pub fn advance(&self, dt: Duration) -> FaceTime {
        let added = dt.as_micros() as u64;
        let prev = self.micros.fetch_add(added, Ordering::SeqCst);
        FaceTime::from_micros(prev.saturating_add(added))
    }

    /// Jump to `t`. Only moves forward.
    pub fn set(&self, t: FaceTime) {
        self.micros.fetch_max(t.as_micros(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> FaceTime {
        FaceTime::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();

        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let t2 = clock.now();

        assert!(t2 > t1);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let other = clock.clone();

        clock.advance(Duration::from_millis(250));
        assert_eq!(other.now(), FaceTime::from_millis(250));
    }

    #[test]
    fn test_manual_clock_never_rewinds() {
        let clock = ManualClock::starting_at(FaceTime::from_millis(100));
        clock.set(FaceTime::from_millis(50));
        assert_eq!(clock.now(), FaceTime::from_millis(100));
    }
}
