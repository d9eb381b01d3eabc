//! Time primitives
//!
//! Face time is monotonic microseconds since node start. Deadlines for
//! transient overrides and blink scheduling are expressed in it, so the
//! state machine never reads a wall clock itself.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Monotonic face time in microseconds since node start
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FaceTime(pub u64);

impl FaceTime {
    pub const ZERO: FaceTime = FaceTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        FaceTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FaceTime(millis.saturating_mul(1000))
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FaceTime(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    #[inline]
    pub fn since(self, earlier: FaceTime) -> Duration {
        self - earlier
    }
}

impl Add<Duration> for FaceTime {
    type Output = FaceTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<FaceTime> for FaceTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FaceTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FaceTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({:.3}ms)", self.0 as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_time_arithmetic() {
        let t = FaceTime::from_millis(100);
        let later = t + Duration::from_millis(200);
        assert_eq!(later.as_millis(), 300);
        assert_eq!(later - t, Duration::from_millis(200));
        // Never negative
        assert_eq!(t - later, Duration::ZERO);
    }

    #[test]
    fn test_face_time_saturates() {
        let t = FaceTime(u64::MAX - 1);
        assert_eq!(t + Duration::from_secs(1), FaceTime(u64::MAX));
    }
}
