//! Audio: immutable PCM sources, per-voice playback, device backend chain
//!
//! The core mixes synchronously into a host-sized buffer each step; device
//! transport (and whatever thread it runs on) lives behind [`AudioIo`].

pub mod backend;
pub mod sampler;

pub use backend::{AudioFactory, AudioIo, NullAudio, open_audio};
pub use sampler::{Sampler, VoiceState};

use bytemuck::{Pod, Zeroable};

/// One interleaved stereo output slot
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StereoFrame {
    pub l: f32,
    pub r: f32,
}

impl StereoFrame {
    pub const SILENCE: Self = Self { l: 0.0, r: 0.0 };
}

/// Immutable 16-bit PCM data
#[derive(Debug, Clone)]
pub struct Wav {
    /// Interleaved channel count
    pub channels: u16,
    pub sample_rate: u32,
    /// Raw interleaved samples
    pub samples: Vec<i16>,
}

impl Wav {
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<i16>) -> Self {
        Self {
            channels,
            sample_rate,
            samples,
        }
    }

    /// Decode raw little-endian PCM bytes into samples.
    ///
    /// A trailing odd byte is dropped.
    pub fn from_pcm_bytes(channels: u16, sample_rate: u32, bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(channels, sample_rate, samples)
    }

    /// Zero-length source; a voice over it never leaves silence
    pub fn silent() -> Self {
        Self::new(2, 48_000, Vec::new())
    }

    /// Frame count (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }
}
