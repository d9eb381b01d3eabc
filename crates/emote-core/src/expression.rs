//! Facial expressions
//!
//! An expression is never set directly; it is derived from the connection
//! state and loudness level, with short-lived overrides for winks and
//! connection announcements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete expression shown by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// Link is down
    #[default]
    Sleeping,
    /// Connected, no audible signal
    Idle,
    /// Quiet audio, mouth moving
    Neutral,
    /// Moderate audio
    Happy,
    /// Loud audio
    Excited,
    /// Link coming up
    Surprised,
    /// Periodic blink
    Wink,
}

impl Expression {
    pub const ALL: [Expression; 7] = [
        Expression::Sleeping,
        Expression::Idle,
        Expression::Neutral,
        Expression::Happy,
        Expression::Excited,
        Expression::Surprised,
        Expression::Wink,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Expression::Sleeping => "sleeping",
            Expression::Idle => "idle",
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Excited => "excited",
            Expression::Surprised => "surprised",
            Expression::Wink => "wink",
        }
    }

    /// Small ASCII face for log output
    pub fn glyph(self) -> &'static str {
        match self {
            Expression::Sleeping => "-_-",
            Expression::Idle => "._.",
            Expression::Neutral => "o_o",
            Expression::Happy => "^_^",
            Expression::Excited => "O_O",
            Expression::Surprised => "0_0",
            Expression::Wink => "-_^",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_names_unique() {
        let mut names: Vec<_> = Expression::ALL.iter().map(|e| e.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Expression::ALL.len());
    }

    #[test]
    fn test_default_is_sleeping() {
        assert_eq!(Expression::default(), Expression::Sleeping);
    }
}
