//! Audio Frame - one delivery from the audio source
//!
//! A frame is an immutable buffer of interleaved little-endian 16-bit
//! stereo PCM. Each stereo pair occupies 4 bytes; a trailing partial pair is
//! ignored.

use bytes::{BufMut, Bytes, BytesMut};

/// Bytes per stereo sample pair (2 channels x 2 bytes)
pub const BYTES_PER_FRAME: usize = 4;

/// 16-bit signed full scale
pub const FULL_SCALE: f32 = 32768.0;

/// Immutable PCM buffer as delivered by the audio source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioFrame {
    data: Bytes,
}

impl AudioFrame {
    /// Wrap raw bytes without copying
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Copy a borrowed callback buffer
    pub fn copy_from(data: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Build from (left, right) sample pairs
    pub fn from_samples(pairs: &[(i16, i16)]) -> Self {
        let mut buf = BytesMut::with_capacity(pairs.len() * BYTES_PER_FRAME);
        for &(left, right) in pairs {
            buf.put_i16_le(left);
            buf.put_i16_le(right);
        }
        Self { data: buf.freeze() }
    }

    /// Build a frame with the same sample on both channels
    pub fn from_mono(samples: &[i16]) -> Self {
        let mut buf = BytesMut::with_capacity(samples.len() * BYTES_PER_FRAME);
        for &s in samples {
            buf.put_i16_le(s);
            buf.put_i16_le(s);
        }
        Self { data: buf.freeze() }
    }

    /// Raw length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of complete stereo pairs
    pub fn stereo_frames(&self) -> usize {
        self.data.len() / BYTES_PER_FRAME
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mono samples, one per complete stereo pair
    pub fn mono_samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.data.chunks_exact(BYTES_PER_FRAME).map(|pair| {
            let left = i16::from_le_bytes([pair[0], pair[1]]);
            let right = i16::from_le_bytes([pair[2], pair[3]]);
            mix_to_mono(left, right)
        })
    }
}

impl From<Vec<u8>> for AudioFrame {
    fn from(data: Vec<u8>) -> Self {
        AudioFrame::new(data)
    }
}

/// Average two channels. The mean never clips, unlike the sum.
#[inline]
pub fn mix_to_mono(left: i16, right: i16) -> i16 {
    ((left as i32 + right as i32) / 2) as i16
}

/// Sample normalized to [-1.0, 1.0)
#[inline]
pub fn normalize(sample: i16) -> f32 {
    sample as f32 / FULL_SCALE
}
