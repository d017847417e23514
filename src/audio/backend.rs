//! Audio device backend chain
//!
//! The platform transport (device callbacks, ring buffers, threads) is an
//! external collaborator behind [`AudioIo`]. Backend selection walks an
//! ordered list of capability-checked factories; the first one that opens a
//! device wins, and the last resort is a null device that keeps the step
//! loop fed and discards everything.

use super::StereoFrame;

/// Device transport boundary
pub trait AudioIo {
    /// Backend name for logs
    fn name(&self) -> &'static str;
    /// Interleaved stereo slots the device wants filled this frame
    fn frames_needed(&mut self) -> usize;
    /// Hand a filled buffer to the device
    fn submit(&mut self, frames: &[StereoFrame]);
}

/// Capability-checked backend constructor; `None` means unavailable
pub type AudioFactory = fn() -> Option<Box<dyn AudioIo>>;

/// Open the first available backend, falling back to [`NullAudio`]
pub fn open_audio(factories: &[AudioFactory]) -> Box<dyn AudioIo> {
    for factory in factories {
        if let Some(io) = factory() {
            log::info!("audio backend: {}", io.name());
            return io;
        }
    }
    log::info!("audio backend: null (no device available)");
    Box::new(NullAudio::default())
}

/// Deaf device: requests a fixed chunk and discards submissions
#[derive(Debug)]
pub struct NullAudio {
    chunk: usize,
    /// Total slots consumed, for inspection
    pub consumed: usize,
}

impl Default for NullAudio {
    fn default() -> Self {
        Self {
            chunk: 512,
            consumed: 0,
        }
    }
}

impl AudioIo for NullAudio {
    fn name(&self) -> &'static str {
        "null"
    }

    fn frames_needed(&mut self) -> usize {
        self.chunk
    }

    fn submit(&mut self, frames: &[StereoFrame]) {
        self.consumed += frames.len();
    }
}
