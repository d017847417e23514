//! Freefall - dive down an endless shaft, dodge the rocks
//!
//! Core modules:
//! - `sim`: Deterministic game simulation (state machine, camera, collision)
//! - `render`: Per-frame draw queue with frustum culling and state batching
//! - `audio`: Sample-accurate voice playback and the device backend chain
//! - `assets`: Symbolic resource keys and the provider boundary
//! - `arena`: Bump-style per-frame storage
//! - `plugin`: Swappable init/step/fini function table

pub mod arena;
pub mod assets;
pub mod audio;
pub mod input;
pub mod plugin;
pub mod render;
pub mod settings;
pub mod sim;

pub use arena::FrameArena;
pub use settings::Settings;

use glam::{Mat4, Quat, Vec3};

/// Game configuration constants
pub mod consts {
    /// Horizontal clamp radius for the player (the shaft wall)
    pub const SHAFT_RADIUS: f32 = 25.0;
    /// Height of one stacked wall segment
    pub const SEGMENT_HEIGHT: f32 = 40.0;
    /// Wall segments per band; the level holds one band above and one below
    pub const SEGMENT_COUNT: usize = 10;
    /// Shaft depth of one band (player wraps after falling this far)
    pub const BAND_HEIGHT: f32 = SEGMENT_HEIGHT * SEGMENT_COUNT as f32;

    /// Constant vertical descent speed (units/s)
    pub const FALL_SPEED: f32 = 250.0;
    /// Steering acceleration applied to the aim vector
    pub const STEER_ACCEL: f32 = 6.0;
    /// Exponential damping factor on the aim vector per step
    pub const AIM_DAMPING: f32 = 0.9;

    /// Obstacle slots; first half is the active band, second half the preview
    pub const MAX_ROCKS: usize = 20;
    /// Rocks in the active band
    pub const ACTIVE_ROCKS: usize = 10;
    /// Radius of the ring rocks spawn on
    pub const ROCK_RING_RADIUS: f32 = SHAFT_RADIUS + 5.0;

    /// Axial reach of a rock's fatal cylinder
    pub const ROCK_FATAL_REACH: f32 = 25.0;
    /// Radial extent of a rock's fatal cylinder
    pub const ROCK_FATAL_RADIUS: f32 = 6.0;
    /// Axial reach of the near-miss warning volume
    pub const ROCK_WARN_REACH: f32 = 30.0;
    /// Radial extent of the near-miss warning volume
    pub const ROCK_WARN_RADIUS: f32 = 10.0;

    /// Per-frame render queue budget
    pub const FRAME_ARENA_BYTES: usize = 4 * 1024 * 1024;

    /// Camera eye height above the player while falling
    pub const CAMERA_EYE_HEIGHT: f32 = 3.0;
    /// How far below the player the camera aims
    pub const CAMERA_LOOK_DROP: f32 = 5.0;
    /// Lead factor applied to the aim when deriving the camera look target
    pub const CAMERA_AIM_LEAD: f32 = 0.2;

    /// Idle time on the menu before the room swaps to the screen shader
    pub const MENU_IDLE_SWAP_SECS: f32 = 15.0 * 60.0;
}

/// Orientation looking along `dir` with the given up hint.
///
/// Forward maps to -Z. Returns identity for degenerate directions
/// (zero length, or parallel to `up`).
pub fn quat_look_at(dir: Vec3, up: Vec3) -> Quat {
    if dir.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    if dir.cross(up).length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_mat4(&Mat4::look_to_rh(Vec3::ZERO, dir, up))
        .inverse()
        .normalize()
}

/// Clamp a position's horizontal (XZ) distance from the Y axis
#[inline]
pub fn clamp_radial(pos: Vec3, radius: f32) -> Vec3 {
    let flat = Vec3::new(pos.x, 0.0, pos.z);
    if flat.length() > radius {
        let clamped = flat.normalize() * radius;
        Vec3::new(clamped.x, pos.y, clamped.z)
    } else {
        pos
    }
}
