//! Game settings and preferences
//!
//! Serialized as JSON; where the string lands (disk, local storage) is the
//! host's concern.

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_ARENA_BYTES;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume applied to the mixed output (0.0 - 1.0)
    pub master_volume: f32,
    /// Music/ambience category volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects category volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Camera ===
    /// Vertical field of view in radians
    pub fov: f32,
    /// Free-fly camera speed multiplier
    pub flycam_speed: f32,

    // === Debug ===
    /// Start with the debug overlay enabled
    pub show_debug: bool,

    // === Memory ===
    /// Per-frame render queue budget in bytes
    pub frame_arena_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.2,
            music_volume: 1.0,
            sfx_volume: 1.0,
            fov: 1.05,
            flycam_speed: 1.0,
            show_debug: false,
            frame_arena_bytes: FRAME_ARENA_BYTES,
        }
    }
}

impl Settings {
    /// Serialize for the host to store
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a stored settings blob; falls back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("settings parse failed ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Effective volume for a music-category voice
    pub fn music_level(&self, base: f32) -> f32 {
        base * self.music_volume.clamp(0.0, 1.0)
    }

    /// Effective volume for an sfx-category voice
    pub fn sfx_level(&self, base: f32) -> f32 {
        base * self.sfx_volume.clamp(0.0, 1.0)
    }
}
