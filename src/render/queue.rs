//! Per-frame render queue with state-change batching
//!
//! Build phase: entities are copied into the frame arena in draw order.
//! Execute phase: entities run in insertion order while the queue tracks the
//! last bound shader, mesh and polygon mode, touching GPU state only when a
//! key changes. Sorting scenes by shader then mesh maximizes batching, but
//! correctness never depends on order.

use glam::Vec2;

use super::backend::{DrawParams, RenderBackend};
use super::entity::{Entity, EntityKind, PolygonMode};
use crate::arena::FrameArena;
use crate::assets::{AssetProvider, MeshKey, ShaderKey};
use crate::sim::Camera;

/// Per-frame values shared by every draw
#[derive(Debug, Clone, Copy)]
pub struct FrameEnv {
    /// Elapsed host time in seconds
    pub time: f32,
    pub width: u32,
    pub height: u32,
}

/// Append-only draw list for the current frame
pub struct RenderQueue {
    entities: FrameArena<Entity>,
}

impl RenderQueue {
    /// Queue sized from a byte budget; overflow during a frame is fatal
    pub fn with_budget(bytes: usize) -> Self {
        Self {
            entities: FrameArena::with_budget(bytes),
        }
    }

    /// Discard the previous frame's entities, keeping storage
    pub fn reset(&mut self) {
        self.entities.reset();
    }

    /// Append a draw record
    pub fn push(&mut self, entity: Entity) {
        self.entities.alloc(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Execute the queue against the GPU backend.
    ///
    /// Debug entities only run while `debug` is set. A shader or mesh the
    /// provider has not loaded yet skips its entity for this frame and
    /// leaves the current bindings untouched.
    pub fn exec(
        &self,
        assets: &dyn AssetProvider,
        cam: &Camera,
        env: &FrameEnv,
        debug: bool,
        gpu: &mut dyn RenderBackend,
    ) {
        let mut last_shader: Option<ShaderKey> = None;
        let mut last_mesh: Option<MeshKey> = None;
        let mut last_mode = PolygonMode::Fill;

        gpu.set_polygon_mode(last_mode);

        let resolution = Vec2::new(env.width as f32, env.height as f32);

        for entity in self.entities.iter() {
            if entity.kind == EntityKind::Debug && !debug {
                continue;
            }

            if last_shader != Some(entity.shader) {
                let Some(shader) = assets.shader(entity.shader) else {
                    continue;
                };
                gpu.bind_shader(shader, cam);
                last_shader = Some(entity.shader);
                // New program: attribute bindings are stale
                last_mesh = None;
            }
            // Resolved above, or carried over from the previous entity
            let Some(shader) = last_shader.and_then(|key| assets.shader(key)) else {
                continue;
            };

            if last_mesh != Some(entity.mesh) {
                let Some(mesh) = assets.mesh(entity.mesh) else {
                    continue;
                };
                gpu.bind_mesh(shader, mesh);
                last_mesh = Some(entity.mesh);
            }
            let Some(mesh) = last_mesh.and_then(|key| assets.mesh(key)) else {
                continue;
            };

            if last_mode != entity.mode {
                last_mode = entity.mode;
                gpu.set_polygon_mode(last_mode);
            }

            gpu.draw(
                shader,
                mesh,
                &DrawParams {
                    model: entity.model_matrix(),
                    time: env.time,
                    camera_pos: cam.position,
                    color: entity.color,
                    resolution,
                },
            );
        }
    }
}
