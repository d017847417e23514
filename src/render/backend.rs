//! GPU-facing boundary
//!
//! Resource creation and the actual draw submission are external; the queue
//! drives whatever implements [`RenderBackend`]. [`NullBackend`] discards
//! everything (headless runs); [`RecordingBackend`] counts calls for draw
//! inspection and tests.

use glam::{Mat4, Vec2, Vec3};

use super::entity::PolygonMode;
use crate::assets::{Mesh, Shader};
use crate::sim::Camera;

/// Per-draw parameters.
///
/// The backend forwards only the values the bound shader exposes; an absent
/// uniform is skipped silently, never an error.
#[derive(Debug, Clone, Copy)]
pub struct DrawParams {
    pub model: Mat4,
    pub time: f32,
    pub camera_pos: Vec3,
    pub color: Vec3,
    pub resolution: Vec2,
}

/// Draw-submission boundary the queue executes against
pub trait RenderBackend {
    fn set_viewport(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn set_polygon_mode(&mut self, mode: PolygonMode);
    /// Bind a program and its camera matrices
    fn bind_shader(&mut self, shader: &Shader, cam: &Camera);
    /// Bind mesh buffers against the currently bound program
    fn bind_mesh(&mut self, shader: &Shader, mesh: &Mesh);
    fn draw(&mut self, shader: &Shader, mesh: &Mesh, params: &DrawParams);
}

/// Backend that does nothing
#[derive(Debug, Default)]
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn set_viewport(&mut self, _width: u32, _height: u32) {}
    fn clear(&mut self) {}
    fn set_polygon_mode(&mut self, _mode: PolygonMode) {}
    fn bind_shader(&mut self, _shader: &Shader, _cam: &Camera) {}
    fn bind_mesh(&mut self, _shader: &Shader, _mesh: &Mesh) {}
    fn draw(&mut self, _shader: &Shader, _mesh: &Mesh, _params: &DrawParams) {}
}

/// Backend that records call counts
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub shader_binds: u32,
    pub mesh_binds: u32,
    pub mode_changes: u32,
    pub draws: u32,
    pub clears: u32,
    pub viewport: Option<(u32, u32)>,
    /// Shader handles in bind order
    pub bound_shaders: Vec<u64>,
}

impl RenderBackend for RecordingBackend {
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn set_polygon_mode(&mut self, _mode: PolygonMode) {
        self.mode_changes += 1;
    }

    fn bind_shader(&mut self, shader: &Shader, _cam: &Camera) {
        self.shader_binds += 1;
        self.bound_shaders.push(shader.handle);
    }

    fn bind_mesh(&mut self, _shader: &Shader, _mesh: &Mesh) {
        self.mesh_binds += 1;
    }

    fn draw(&mut self, _shader: &Shader, _mesh: &Mesh, _params: &DrawParams) {
        self.draws += 1;
    }
}
