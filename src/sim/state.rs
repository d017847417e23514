//! Game state and core simulation types
//!
//! Everything that persists across frames lives here, owned by the caller
//! through [`GameCtx`]. Entity-ish data (rocks, voices) sits in fixed-size
//! slot arrays with validity flags - recycled by index, never reallocated.

use std::sync::Arc;

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::level::shaft_scene;
use crate::assets::{AssetProvider, WavKey};
use crate::audio::{Sampler, Wav};
use crate::consts::MAX_ROCKS;
use crate::render::{RenderQueue, Scene};
use crate::settings::Settings;

/// Game flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before the first frame
    Init,
    Menu,
    Play,
    /// Reserved; no active transition targets it
    Pause,
}

/// Highlighted menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuSelection {
    #[default]
    None,
    Start,
    Quit,
}

/// One obstacle slot.
///
/// The cylinder axis is the rock's local +Y; `triggered` debounces the
/// near-miss sound until the ring regenerates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rock {
    pub pos: Vec3,
    pub dir: Quat,
    pub valid: bool,
    pub triggered: bool,
}

impl Rock {
    /// World-space cylinder axis
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.dir * Vec3::Y
    }
}

/// Near-miss voice pool size
pub const WOOSH_VOICES: usize = 4;
/// Impact voice pool size
pub const CRASH_VOICES: usize = 4;

/// Choir layer loop point: restart past the intro (interleaved samples)
pub const CHOIR_LOOP_START: usize = 7_899_500 * 2;
/// Wind loop point: restart after the fade-in (interleaved samples)
pub const WIND_LOOP_START: usize = 805_661 * 2;

/// Every playback voice the game mixes
#[derive(Debug, Clone)]
pub struct SoundBank {
    /// Menu theme, loops whole
    pub theme: Sampler,
    /// Menu choir layer, loops past its intro
    pub choir: Sampler,
    /// Falling ambience, loops past its fade-in
    pub wind: Sampler,
    /// Menu selection blip
    pub blip: Sampler,
    pub woosh: [Sampler; WOOSH_VOICES],
    pub crash: [Sampler; CRASH_VOICES],
}

impl SoundBank {
    /// Build the voices from whatever PCM the provider has ready.
    ///
    /// A source that is not loaded yet becomes a silent voice; the bank
    /// stays structurally complete either way.
    pub fn new(assets: &dyn AssetProvider, settings: &Settings) -> Self {
        let wav =
            |key: WavKey| assets.wav(key).unwrap_or_else(|| Arc::new(Wav::silent()));

        let mut theme = Sampler::new(wav(WavKey::Theme));
        theme.vol = settings.music_level(1.0);
        theme.loop_on = true;
        theme.trigger();

        let mut choir = Sampler::new(wav(WavKey::Choir));
        choir.vol = settings.music_level(0.8);
        choir.loop_on = true;
        choir.loop_start = CHOIR_LOOP_START;
        choir.trigger();

        let mut wind = Sampler::new(wav(WavKey::Wind));
        wind.vol = settings.music_level(1.0);
        wind.loop_on = true;
        wind.loop_start = WIND_LOOP_START;
        wind.trigger();

        let mut blip = Sampler::new(wav(WavKey::Blip));
        blip.vol = settings.sfx_level(0.3);

        let woosh = std::array::from_fn(|i| {
            let mut voice = Sampler::new(wav(WavKey::woosh(i)));
            voice.vol = settings.sfx_level(0.4);
            voice
        });
        let crash = std::array::from_fn(|i| {
            let mut voice = Sampler::new(wav(WavKey::crash(i)));
            voice.vol = settings.sfx_level(0.4);
            voice
        });

        Self {
            theme,
            choir,
            wind,
            blip,
            woosh,
            crash,
        }
    }
}

/// Complete per-session game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub cam: Camera,
    pub phase: GamePhase,
    /// Phase requested for the next transition check
    pub next_phase: GamePhase,
    pub menu_selection: MenuSelection,

    pub player_pos: Vec3,
    /// Smoothed steering vector (XZ plane)
    pub player_aim: Vec3,
    pub player_speed: f32,
    /// Completed descent bands
    pub round: u32,
    pub rocks: [Rock; MAX_ROCKS],

    pub sounds: SoundBank,
    pub rng: Pcg32,

    pub debug: bool,
    pub flycam: bool,
    pub flycam_speed: f32,
    /// Edge trackers for the toggle keys
    pub(super) key_debug: bool,
    pub(super) key_flycam: bool,

    pub last_time: f32,
    pub(super) last_size: (u32, u32),
}

impl GameState {
    pub fn new(assets: &dyn AssetProvider, settings: Settings, seed: u64) -> Self {
        let mut cam = Camera::new(settings.fov, 1.0);
        cam.set(Vec3::new(0.0, 1.0, -5.0), Quat::IDENTITY);

        let sounds = SoundBank::new(assets, &settings);

        Self {
            cam,
            phase: GamePhase::Init,
            next_phase: GamePhase::Menu,
            menu_selection: MenuSelection::None,
            player_pos: Vec3::ZERO,
            player_aim: Vec3::ZERO,
            player_speed: 1.0,
            round: 0,
            rocks: [Rock::default(); MAX_ROCKS],
            sounds,
            rng: Pcg32::seed_from_u64(seed),
            debug: settings.show_debug,
            flycam: false,
            flycam_speed: settings.flycam_speed,
            key_debug: false,
            key_flycam: false,
            last_time: 0.0,
            last_size: (0, 0),
            settings,
        }
    }
}

/// Caller-owned context: the state, the immutable level and the per-frame
/// queue carved from its arena
pub struct GameCtx {
    pub state: GameState,
    pub level: Scene,
    pub queue: RenderQueue,
}

impl GameCtx {
    pub fn new(assets: &dyn AssetProvider, settings: Settings, seed: u64) -> Self {
        let queue = RenderQueue::with_budget(settings.frame_arena_bytes);
        Self {
            state: GameState::new(assets, settings, seed),
            level: shaft_scene(),
            queue,
        }
    }
}
