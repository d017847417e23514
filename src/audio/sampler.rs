//! Per-voice playback state machine
//!
//! One call to [`Sampler::step`] produces exactly one normalized sample - no
//! internal buffering, fully deterministic given (state, head, pcm). Stereo
//! sources are stepped once per channel per output slot; the voice itself is
//! channel-agnostic.

use std::sync::Arc;

use super::Wav;

/// Playback state of a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Stop,
    Play,
}

/// A single playback voice over shared immutable PCM
#[derive(Debug, Clone)]
pub struct Sampler {
    wav: Arc<Wav>,
    pub state: VoiceState,
    /// Playback window start (sample index)
    pub pb_start: usize,
    /// Playback window end, exclusive
    pub pb_end: usize,
    /// Next sample to emit
    pub head: usize,
    /// Wrap to `loop_start` instead of stopping at the window end
    pub loop_on: bool,
    pub loop_start: usize,
    pub loop_end: usize,
    /// One-shot start flag, consumed on the Stop -> Play transition
    pub trig: bool,
    pub vol: f32,
}

impl Sampler {
    /// Voice covering the whole source, stopped, loop off, unit volume
    pub fn new(wav: Arc<Wav>) -> Self {
        let end = wav.samples.len();
        Self {
            wav,
            state: VoiceState::Stop,
            pb_start: 0,
            pb_end: end,
            head: 0,
            loop_on: false,
            loop_start: 0,
            loop_end: end,
            trig: false,
            vol: 1.0,
        }
    }

    /// Re-arm the voice: playback state, head and trigger reset; the
    /// configured windows and volume stay
    pub fn reset(&mut self) {
        self.state = VoiceState::Stop;
        self.head = self.pb_start;
        self.trig = false;
    }

    /// Arm the one-shot trigger. Only examined from Stop; a trigger set
    /// during Play takes effect once the current window finishes.
    pub fn trigger(&mut self) {
        self.trig = true;
    }

    /// Emit the next sample.
    ///
    /// Stop emits silence unless triggered. Play emits
    /// `vol * pcm[head] / i16::MAX` and advances; reaching the window end on
    /// this call either wraps to `loop_start` (seamless, no silence frame)
    /// or stops and rewinds to the window start.
    pub fn step(&mut self) -> f32 {
        // Self-healing: a loop point at or past the window end can never be
        // reached, so the loop is disabled rather than treated as an error.
        if self.loop_start >= self.pb_end {
            self.loop_on = false;
        }

        match self.state {
            VoiceState::Stop => {
                if !self.trig {
                    return 0.0;
                }
                self.trig = false;
                if self.pb_start >= self.pb_end {
                    // Empty window: stay stopped, emit silence
                    return 0.0;
                }
                self.state = VoiceState::Play;
                self.head = self.pb_start;
                self.emit()
            }
            VoiceState::Play => self.emit(),
        }
    }

    fn emit(&mut self) -> f32 {
        // Out-of-range heads read as silence; never panic on bad config
        let sample = self.wav.samples.get(self.head).copied().unwrap_or(0);
        let x = self.vol * sample as f32 / i16::MAX as f32;

        self.head += 1;
        if self.head >= self.pb_end {
            if self.loop_on {
                self.head = self.loop_start;
            } else {
                self.state = VoiceState::Stop;
                self.head = self.pb_start;
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_wav(len: usize) -> Arc<Wav> {
        // samples 1, 2, 3, ... so every emitted value is distinguishable
        let samples = (1..=len as i16).collect();
        Arc::new(Wav::new(1, 48_000, samples))
    }

    fn raw(sample: i16) -> f32 {
        sample as f32 / i16::MAX as f32
    }

    #[test]
    fn test_silent_until_triggered() {
        let mut voice = Sampler::new(ramp_wav(4));
        for _ in 0..10 {
            assert_eq!(voice.step(), 0.0);
        }
        assert_eq!(voice.state, VoiceState::Stop);
    }

    #[test]
    fn test_one_shot_plays_window_then_stops() {
        let mut voice = Sampler::new(ramp_wav(4));
        voice.trigger();

        // Exactly 4 calls emit the 4 window samples; the Play -> Stop
        // transition happens during the final call.
        for i in 1..=4i16 {
            assert!((voice.step() - raw(i)).abs() < 1e-6);
        }
        assert_eq!(voice.state, VoiceState::Stop);
        assert_eq!(voice.head, voice.pb_start);

        // Everything after is silence until re-triggered
        for _ in 0..8 {
            assert_eq!(voice.step(), 0.0);
        }

        voice.trigger();
        assert!((voice.step() - raw(1)).abs() < 1e-6);
    }

    #[test]
    fn test_loop_wraps_seamlessly() {
        let mut voice = Sampler::new(ramp_wav(4));
        voice.loop_on = true;
        voice.loop_start = 1;
        voice.trigger();

        // 1 2 3 4 then wrap straight to index 1: 2 3 4 2 3 4 ...
        let expect = [1i16, 2, 3, 4, 2, 3, 4, 2];
        for &s in &expect {
            assert!((voice.step() - raw(s)).abs() < 1e-6, "sample {s}");
        }
        assert_eq!(voice.state, VoiceState::Play);
    }

    #[test]
    fn test_trigger_during_play_deferred() {
        let mut voice = Sampler::new(ramp_wav(3));
        voice.trigger();
        voice.step();
        voice.trigger(); // mid-window, must not restart
        assert!((voice.step() - raw(2)).abs() < 1e-6);
        assert!((voice.step() - raw(3)).abs() < 1e-6);
        assert_eq!(voice.state, VoiceState::Stop);

        // The armed trigger now takes effect from Stop
        assert!((voice.step() - raw(1)).abs() < 1e-6);
        assert_eq!(voice.state, VoiceState::Play);
    }

    #[test]
    fn test_invalid_loop_self_heals() {
        let mut voice = Sampler::new(ramp_wav(4));
        voice.loop_on = true;
        voice.loop_start = 4; // at pb_end: unreachable
        voice.trigger();

        for _ in 0..4 {
            voice.step();
        }
        assert!(!voice.loop_on);
        assert_eq!(voice.state, VoiceState::Stop);
    }

    #[test]
    fn test_empty_window_never_plays() {
        let mut voice = Sampler::new(Arc::new(Wav::silent()));
        voice.trigger();
        assert_eq!(voice.step(), 0.0);
        assert_eq!(voice.state, VoiceState::Stop);
        // Trigger was consumed, no latent restart
        assert!(!voice.trig);
    }

    #[test]
    fn test_volume_scales_output() {
        let wav = Arc::new(Wav::new(1, 48_000, vec![i16::MAX]));
        let mut voice = Sampler::new(wav);
        voice.vol = 0.25;
        voice.trigger();
        assert!((voice.step() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_reset_preserves_config() {
        let mut voice = Sampler::new(ramp_wav(4));
        voice.vol = 0.4;
        voice.loop_on = true;
        voice.loop_start = 2;
        voice.trigger();
        voice.step();

        voice.reset();
        assert_eq!(voice.state, VoiceState::Stop);
        assert_eq!(voice.head, 0);
        assert!(!voice.trig);
        assert_eq!(voice.vol, 0.4);
        assert!(voice.loop_on);
        assert_eq!(voice.loop_start, 2);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Output magnitude never exceeds the configured volume
            #[test]
            fn output_bounded_by_volume(
                samples in proptest::collection::vec(any::<i16>(), 1..256),
                vol in 0.0f32..1.0,
                steps in 1usize..1024,
            ) {
                let wav = Arc::new(Wav::new(1, 48_000, samples));
                let mut voice = Sampler::new(wav);
                voice.vol = vol;
                voice.loop_on = true;
                voice.trigger();
                // i16::MIN maps a hair past -1.0 (|MIN| = MAX + 1)
                let bound = vol * (i16::MIN as f32 / i16::MAX as f32).abs();
                for _ in 0..steps {
                    let x = voice.step();
                    prop_assert!(x.abs() <= bound + 1e-6);
                }
            }

            /// A looping voice triggered once never falls back to Stop
            #[test]
            fn looping_voice_stays_playing(
                len in 1usize..64,
                steps in 1usize..512,
            ) {
                let samples = vec![1i16; len];
                let wav = Arc::new(Wav::new(1, 48_000, samples));
                let mut voice = Sampler::new(wav);
                voice.loop_on = true;
                voice.trigger();
                for _ in 0..steps {
                    voice.step();
                }
                prop_assert_eq!(voice.state, VoiceState::Play);
            }
        }
    }
}
