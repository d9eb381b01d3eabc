//! Analysis window configuration and the level kernel

use serde::{Deserialize, Serialize};

use emote_core::{EmoteError, EmoteResult, Loudness};

use crate::frame::normalize;

/// Default analysis window in mono samples (~11.6ms at 44.1kHz)
pub const DEFAULT_WINDOW_SIZE: usize = 512;

/// Loudness metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMode {
    /// Root-mean-square, sensitive to peaks
    #[default]
    Rms,
    /// Mean absolute amplitude
    MeanAbs,
}

/// Analysis window specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    /// Mono samples per analysis
    pub size: usize,
    /// Metric applied to each window
    pub mode: LevelMode,
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec {
            size: DEFAULT_WINDOW_SIZE,
            mode: LevelMode::Rms,
        }
    }
}

impl WindowSpec {
    /// Mean-absolute metric over the default window
    pub fn mean_abs() -> Self {
        WindowSpec {
            mode: LevelMode::MeanAbs,
            ..Default::default()
        }
    }

    /// Samples discarded after each analysis (50% overlap)
    pub fn hop(&self) -> usize {
        (self.size / 2).max(1)
    }

    pub fn validate(&self) -> EmoteResult<()> {
        if self.size < 2 {
            return Err(EmoteError::WindowSize(self.size));
        }
        Ok(())
    }
}

/// Level of a block of mono samples. Empty input is silence.
pub fn analyze(samples: &[i16], mode: LevelMode) -> Loudness {
    if samples.is_empty() {
        return Loudness::ZERO;
    }

    // f64 accumulator: f32 drifts over a full window
    let count = samples.len() as f64;
    let value = match mode {
        LevelMode::Rms => {
            let sum: f64 = samples
                .iter()
                .map(|&s| {
                    let x = normalize(s) as f64;
                    x * x
                })
                .sum();
            (sum / count).sqrt()
        }
        LevelMode::MeanAbs => {
            let sum: f64 = samples.iter().map(|&s| normalize(s).abs() as f64).sum();
            sum / count
        }
    };

    Loudness::new(value as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validate() {
        assert!(WindowSpec::default().validate().is_ok());
        let tiny = WindowSpec {
            size: 1,
            ..Default::default()
        };
        assert_eq!(tiny.validate(), Err(EmoteError::WindowSize(1)));
    }

    #[test]
    fn test_hop_is_half_window() {
        assert_eq!(WindowSpec::default().hop(), 256);
    }

    #[test]
    fn test_analyze_empty_is_silent() {
        assert_eq!(analyze(&[], LevelMode::Rms), Loudness::ZERO);
        assert_eq!(analyze(&[], LevelMode::MeanAbs), Loudness::ZERO);
    }

    #[test]
    fn test_rms_vs_mean_abs() {
        // Constant half-scale: both metrics agree
        let half = vec![16384i16; 64];
        assert!((analyze(&half, LevelMode::Rms).value() - 0.5).abs() < 1e-4);
        assert!((analyze(&half, LevelMode::MeanAbs).value() - 0.5).abs() < 1e-4);

        // One loud sample in silence: RMS weighs the peak more
        let mut spike = vec![0i16; 16];
        spike[0] = 16384;
        assert!(analyze(&spike, LevelMode::Rms) > analyze(&spike, LevelMode::MeanAbs));
    }
}
