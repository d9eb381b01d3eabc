//! PCM Signal Generators
//!
//! Every generator returns interleaved stereo with identical channels, so
//! the mono mixdown equals the generated waveform.

use std::f32::consts::TAU;

use emote_audio::{AudioFrame, FULL_SCALE};
use emote_core::Loudness;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn amplitude(level: f32) -> i16 {
    (level.clamp(0.0, 1.0) * FULL_SCALE).min(i16::MAX as f32) as i16
}

fn stereo(samples: impl IntoIterator<Item = i16>) -> AudioFrame {
    let samples: Vec<i16> = samples.into_iter().collect();
    AudioFrame::from_mono(&samples)
}

/// `frames` stereo frames of digital silence
pub fn silence(frames: usize) -> AudioFrame {
    stereo(std::iter::repeat(0).take(frames))
}

/// DC signal at a raw sample value
pub fn constant(frames: usize, value: i16) -> AudioFrame {
    stereo(std::iter::repeat(value).take(frames))
}

/// Alternating +/- square wave. RMS and mean-abs both equal `level`.
pub fn square(frames: usize, level: f32) -> AudioFrame {
    let amp = amplitude(level);
    stereo((0..frames).map(|i| if i % 2 == 0 { amp } else { -amp }))
}

/// Sine with peak `level` and a period in frames. RMS is `level / sqrt(2)`.
pub fn sine(frames: usize, level: f32, period: usize) -> AudioFrame {
    let amp = amplitude(level) as f32;
    let period = period.max(1) as f32;
    stereo((0..frames).map(|i| (amp * (TAU * i as f32 / period).sin()) as i16))
}

/// Uniform noise bounded by `level`
pub fn noise(frames: usize, level: f32, seed: u64) -> AudioFrame {
    let amp = amplitude(level);
    let mut rng = StdRng::seed_from_u64(seed);
    stereo((0..frames).map(|_| if amp == 0 { 0 } else { rng.gen_range(-amp..=amp) }))
}

/// Triangle sweep of simulated levels
///
/// Climbs from 0 to `peak` in fixed steps and back down, forever. The demo
/// feeds one value every 50 ms.
#[derive(Debug, Clone)]
pub struct LevelSweep {
    step: f32,
    steps: u32,
    position: u32,
    rising: bool,
}

impl LevelSweep {
    pub fn new(step: f32, peak: f32) -> Self {
        let step = step.max(f32::EPSILON);
        LevelSweep {
            step,
            steps: (peak / step).round().max(1.0) as u32,
            position: 0,
            rising: true,
        }
    }

    /// Number of values in one full up-and-down cycle
    pub fn period(&self) -> usize {
        2 * self.steps as usize
    }
}

impl Default for LevelSweep {
    /// 0 to 0.8 in 0.05 steps
    fn default() -> Self {
        Self::new(0.05, 0.8)
    }
}

impl Iterator for LevelSweep {
    type Item = Loudness;

    fn next(&mut self) -> Option<Loudness> {
        let value = Loudness::new(self.position as f32 * self.step);

        if self.rising {
            self.position += 1;
            if self.position == self.steps {
                self.rising = false;
            }
        } else {
            self.position -= 1;
            if self.position == 0 {
                self.rising = true;
            }
        }
        Some(value)
    }
}
