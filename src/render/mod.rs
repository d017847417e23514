//! Per-frame rendering pipeline
//!
//! Draw records accumulate in an arena-backed queue during the simulation
//! step and execute against the GPU boundary in one ordered pass, batching
//! shader/mesh/polygon-mode changes. Static scenes are frustum-culled on the
//! way in.

pub mod backend;
pub mod entity;
pub mod frustum;
pub mod queue;
pub mod scene;

pub use backend::{DrawParams, NullBackend, RecordingBackend, RenderBackend};
pub use entity::{Entity, EntityKind, PolygonMode};
pub use frustum::{cull_sphere, frustum_planes, sphere_outside};
pub use queue::{FrameEnv, RenderQueue};
pub use scene::Scene;
