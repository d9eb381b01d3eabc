//! Face Style - geometry and colours per expression
//!
//! This is NOT a renderer. It describes where the eyes and mouth go on a
//! 200x200 canvas so a display sink can draw them with whatever graphics
//! stack it owns.

use emote_core::{Expression, FaceTime, Loudness};

/// Canvas edge in pixels
pub const CANVAS_SIZE: i32 = 200;

/// Levels above this show the level readout
pub const LEVEL_READOUT_THRESHOLD: f32 = 0.05;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }
}

/// Axis-aligned rectangle, inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// Rectangle of `width` x `height` centred on (cx, cy)
    pub fn centered(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Rect {
            x0: cx - width / 2,
            y0: cy - height / 2,
            x1: cx + width / 2,
            y1: cy + height / 2,
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn offset_y(self, dy: i32) -> Self {
        Rect {
            y0: self.y0 + dy,
            y1: self.y1 + dy,
            ..self
        }
    }
}

/// Per-expression appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceStyle {
    pub eye_width: i32,
    pub eye_height: i32,
    pub mouth_width: i32,
    pub mouth_height: i32,
    pub eye_color: Rgb,
    pub mouth_color: Rgb,
    /// Left eye drawn as a closed slit
    pub left_eye_closed: bool,
}

impl FaceStyle {
    const NEUTRAL: FaceStyle = FaceStyle {
        eye_width: 25,
        eye_height: 25,
        mouth_width: 40,
        mouth_height: 20,
        eye_color: Rgb(0x00FF00),
        mouth_color: Rgb(0xFF0000),
        left_eye_closed: false,
    };

    pub fn for_expression(expression: Expression) -> Self {
        match expression {
            Expression::Neutral => Self::NEUTRAL,
            Expression::Idle => FaceStyle {
                eye_height: 16,
                mouth_width: 30,
                mouth_height: 8,
                mouth_color: Rgb(0xAA0000),
                ..Self::NEUTRAL
            },
            Expression::Happy => FaceStyle {
                eye_height: 20,
                mouth_height: 25,
                mouth_color: Rgb(0xFF4444),
                ..Self::NEUTRAL
            },
            Expression::Excited => FaceStyle {
                eye_width: 30,
                eye_height: 30,
                mouth_width: 50,
                mouth_height: 30,
                eye_color: Rgb(0x00FFFF),
                mouth_color: Rgb(0xFF0088),
                ..Self::NEUTRAL
            },
            Expression::Sleeping => FaceStyle {
                eye_height: 8,
                mouth_width: 20,
                mouth_height: 10,
                eye_color: Rgb(0x0088FF),
                mouth_color: Rgb(0x888888),
                ..Self::NEUTRAL
            },
            Expression::Surprised => FaceStyle {
                eye_width: 35,
                eye_height: 35,
                mouth_width: 15,
                mouth_height: 25,
                eye_color: Rgb(0xFFFF00),
                mouth_color: Rgb(0xFF8800),
                ..Self::NEUTRAL
            },
            Expression::Wink => FaceStyle {
                eye_color: Rgb(0xFF00FF),
                mouth_color: Rgb(0x00FF88),
                left_eye_closed: true,
                ..Self::NEUTRAL
            },
        }
    }
}

/// Vertical mouth bounce while speaking: ±5px sine with a 100ms time base
pub fn mouth_offset(speaking: bool, now: FaceTime) -> i32 {
    if !speaking {
        return 0;
    }
    ((now.as_millis() as f64 / 100.0).sin() * 5.0) as i32
}

/// Everything a sink needs to draw one face
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLayout {
    pub background: Rgb,
    pub left_eye: Rect,
    pub right_eye: Rect,
    pub mouth: Rect,
    pub style: FaceStyle,
    /// Level readout, e.g. "♪ 0.42"
    pub readout: Option<String>,
}

impl FaceLayout {
    const LEFT_EYE: (i32, i32) = (60, 80);
    const RIGHT_EYE: (i32, i32) = (120, 80);
    const MOUTH: (i32, i32) = (90, 130);

    pub fn compute(expression: Expression, level: Loudness, speaking: bool, now: FaceTime) -> Self {
        let style = FaceStyle::for_expression(expression);

        let left_height = if style.left_eye_closed {
            4
        } else {
            style.eye_height
        };
        let left_eye = Rect::centered(
            Self::LEFT_EYE.0,
            Self::LEFT_EYE.1,
            style.eye_width,
            left_height,
        );
        let right_eye = Rect::centered(
            Self::RIGHT_EYE.0,
            Self::RIGHT_EYE.1,
            style.eye_width,
            style.eye_height,
        );
        let mouth = Rect::centered(
            Self::MOUTH.0,
            Self::MOUTH.1,
            style.mouth_width,
            style.mouth_height,
        )
        .offset_y(mouth_offset(speaking, now));

        let readout = (level.value() > LEVEL_READOUT_THRESHOLD).then(|| format!("♪ {level}"));

        FaceLayout {
            background: Rgb::BLACK,
            left_eye,
            right_eye,
            mouth,
            style,
            readout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_expression_has_style() {
        for expression in Expression::ALL {
            let style = FaceStyle::for_expression(expression);
            assert!(style.eye_width > 0 && style.mouth_width > 0);
        }
    }

    #[test]
    fn test_wink_closes_left_eye_only() {
        let layout = FaceLayout::compute(Expression::Wink, Loudness::ZERO, false, FaceTime::ZERO);
        assert_eq!(layout.left_eye.height(), 4);
        assert_eq!(layout.right_eye.height(), 24);
    }

    #[test]
    fn test_mouth_still_when_silent() {
        let now = FaceTime::from_millis(157);
        assert_eq!(mouth_offset(false, now), 0);
        assert!(mouth_offset(true, now).abs() <= 5);
        assert_ne!(mouth_offset(true, now), 0);
    }

    #[test]
    fn test_readout_only_when_audible() {
        let quiet = FaceLayout::compute(Expression::Idle, Loudness::new(0.02), false, FaceTime::ZERO);
        assert_eq!(quiet.readout, None);

        let loud = FaceLayout::compute(Expression::Happy, Loudness::new(0.42), true, FaceTime::ZERO);
        assert_eq!(loud.readout.as_deref(), Some("♪ 0.42"));
    }

    #[test]
    fn test_rgb_channels() {
        let c = Rgb(0xFF8800);
        assert_eq!((c.r(), c.g(), c.b()), (0xFF, 0x88, 0x00));
    }
}
