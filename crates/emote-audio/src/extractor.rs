//! Level Extractor - PCM frames to a loudness level

use std::collections::VecDeque;

use emote_core::Loudness;
use tracing::trace;

use crate::{analyze, AudioFrame, WindowSpec};

/// One-shot level of a single frame.
///
/// Analyses the most recent `window.size` mono samples of the frame, or the
/// whole frame when it is shorter. Frames holding less than one stereo pair
/// yield silence.
pub fn extract_level(frame: &AudioFrame, window: &WindowSpec) -> Loudness {
    let frames = frame.stereo_frames();
    if frames == 0 {
        return Loudness::ZERO;
    }

    let skip = frames.saturating_sub(window.size.max(1));
    let samples: Vec<i16> = frame.mono_samples().skip(skip).collect();
    analyze(&samples, window.mode)
}

/// Streaming extractor with a sliding, half-overlapping window
///
/// Mono samples accumulate until a full window is buffered. Each analysis
/// then discards the oldest half, so a level is produced at most one
/// half-window after the audio that caused it.
#[derive(Debug)]
pub struct LevelExtractor {
    /// Mixed mono samples awaiting analysis
    buffer: VecDeque<i16>,

    /// Window configuration
    window: WindowSpec,

    /// Windows analysed since creation
    windows_analyzed: u64,

    /// Most recent result
    last_level: Option<Loudness>,
}

impl LevelExtractor {
    /// Create a new extractor
    pub fn new(window: WindowSpec) -> Self {
        Self {
            buffer: VecDeque::with_capacity(window.size * 2),
            window,
            windows_analyzed: 0,
            last_level: None,
        }
    }

    /// Feed one frame.
    ///
    /// Returns the level of the newest completed window, or `None` when the
    /// frame did not complete a window.
    pub fn push(&mut self, frame: &AudioFrame) -> Option<Loudness> {
        self.buffer.extend(frame.mono_samples());

        let size = self.window.size.max(1);
        let hop = self.window.hop();
        let mut produced = None;

        while self.buffer.len() >= size {
            let level = analyze(&self.buffer.make_contiguous()[..size], self.window.mode);
            self.buffer.drain(..hop);
            self.windows_analyzed += 1;
            produced = Some(level);
        }

        if let Some(level) = produced {
            trace!(level = level.value(), buffered = self.buffer.len(), "window analysed");
            self.last_level = Some(level);
        }
        produced
    }

    /// Samples currently buffered
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Total windows analysed
    pub fn windows_analyzed(&self) -> u64 {
        self.windows_analyzed
    }

    /// Most recent level, if any window has completed
    pub fn last_level(&self) -> Option<Loudness> {
        self.last_level
    }

    pub fn window(&self) -> &WindowSpec {
        &self.window
    }

    /// Drop buffered audio (e.g. on disconnect)
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_level = None;
    }
}

impl Default for LevelExtractor {
    fn default() -> Self {
        Self::new(WindowSpec::default())
    }
}
