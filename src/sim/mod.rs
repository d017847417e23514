//! Deterministic game simulation
//!
//! All gameplay logic lives here. The step is pure with respect to its
//! inputs: fixed caller-provided time, seeded RNG only, no platform calls
//! beyond the traits handed in.

pub mod camera;
pub mod collision;
pub mod level;
pub mod state;
pub mod step;

pub use camera::Camera;
pub use collision::{RayHit, axis_projection, point_in_triangle, ray_intersect_mesh};
pub use level::shaft_scene;
pub use state::{GameCtx, GamePhase, GameState, MenuSelection, Rock, SoundBank};
pub use step::{game_fini, game_init, game_step, mix_audio};
