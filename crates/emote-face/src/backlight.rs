//! Backlight brightness from loudness
//!
//! Maps the level to a brightness percentage and then to a duty cycle for a
//! 13-bit LEDC PWM channel. Driving the pin is the sink's job.

use emote_core::{Expression, Loudness};

/// Maximum duty for a 13-bit timer
pub const LEDC_DUTY_MAX: u32 = (1 << 13) - 1;

/// Brightness range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backlight {
    /// Brightness while asleep or silent
    pub min_percent: u8,
    /// Brightness at full loudness
    pub max_percent: u8,
}

impl Default for Backlight {
    fn default() -> Self {
        Backlight {
            min_percent: 10,
            max_percent: 100,
        }
    }
}

impl Backlight {
    /// Brightness in percent for a face state
    pub fn percent(&self, level: Loudness, expression: Expression) -> u8 {
        let min = self.min_percent.min(100);
        let max = self.max_percent.clamp(min, 100);

        if expression == Expression::Sleeping {
            return min;
        }
        let span = (max - min) as f32;
        min + (span * level.value()).round() as u8
    }

    /// 13-bit duty for a brightness percentage
    pub fn duty(percent: u8) -> u32 {
        LEDC_DUTY_MAX * percent.min(100) as u32 / 100
    }

    pub fn duty_for(&self, level: Loudness, expression: Expression) -> u32 {
        Self::duty(self.percent(level, expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_endpoints() {
        assert_eq!(Backlight::duty(0), 0);
        assert_eq!(Backlight::duty(100), 8191);
        assert_eq!(Backlight::duty(50), 4095);
        assert_eq!(Backlight::duty(200), 8191);
    }

    #[test]
    fn test_sleeping_is_dim() {
        let backlight = Backlight::default();
        assert_eq!(backlight.percent(Loudness::MAX, Expression::Sleeping), 10);
    }

    #[test]
    fn test_brightness_follows_level() {
        let backlight = Backlight::default();
        assert_eq!(backlight.percent(Loudness::ZERO, Expression::Idle), 10);
        assert_eq!(backlight.percent(Loudness::new(0.5), Expression::Happy), 55);
        assert_eq!(backlight.percent(Loudness::MAX, Expression::Excited), 100);
    }

    #[test]
    fn test_inverted_range_is_flat() {
        let backlight = Backlight {
            min_percent: 80,
            max_percent: 20,
        };
        assert_eq!(backlight.percent(Loudness::MAX, Expression::Excited), 80);
    }
}
