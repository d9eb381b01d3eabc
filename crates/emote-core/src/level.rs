//! Loudness level - the scalar that drives every expression decision

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized loudness in [0.0, 1.0]
/// INVARIANT: the inner value is always finite and clamped to [0, 1]
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Loudness(f32);

impl Loudness {
    pub const ZERO: Loudness = Loudness(0.0);
    pub const MAX: Loudness = Loudness(1.0);

    /// Create a level, clamping into range. NaN maps to silence.
    #[inline]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Loudness::ZERO;
        }
        Loudness(value.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Multiply by a factor, staying in range
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Loudness::new(self.0 * factor)
    }

    /// Strictly below `epsilon`
    #[inline]
    pub fn is_below(self, epsilon: f32) -> bool {
        self.0 < epsilon
    }
}

impl From<f32> for Loudness {
    fn from(value: f32) -> Self {
        Loudness::new(value)
    }
}

impl From<Loudness> for f32 {
    fn from(level: Loudness) -> Self {
        level.0
    }
}

impl fmt::Debug for Loudness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Loudness({:.3})", self.0)
    }
}

impl fmt::Display for Loudness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_loudness_clamps() {
        assert_eq!(Loudness::new(1.7).value(), 1.0);
        assert_eq!(Loudness::new(-0.2).value(), 0.0);
        assert_eq!(Loudness::new(f32::NAN), Loudness::ZERO);
        assert_eq!(Loudness::new(f32::INFINITY), Loudness::MAX);
    }

    #[test]
    fn test_loudness_scale() {
        let level = Loudness::new(0.5).scale(0.5);
        assert!((level.value() - 0.25).abs() < 1e-6);
        assert_eq!(Loudness::new(0.8).scale(2.0), Loudness::MAX);
    }

    #[test]
    fn test_loudness_below() {
        assert!(Loudness::new(0.005).is_below(0.01));
        assert!(!Loudness::new(0.01).is_below(0.01));
    }

    proptest! {
        #[test]
        fn prop_loudness_always_in_range(v in proptest::num::f32::ANY) {
            let level = Loudness::new(v);
            prop_assert!(level.value() >= 0.0 && level.value() <= 1.0);
        }
    }
}
