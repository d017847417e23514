//! Transient draw records
//!
//! An [`Entity`] describes one draw call and lives only inside the frame's
//! render queue (or a static scene list). No ownership beyond the frame.

use glam::{Mat4, Quat, Vec3};

use crate::assets::{MeshKey, ShaderKey};

/// What a draw record is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    /// World geometry
    #[default]
    Game,
    /// Full-screen effect
    Screen,
    /// Menu/HUD overlay
    Ui,
    /// Only drawn while the debug overlay is on
    Debug,
}

/// Rasterizer fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
}

/// One draw call, by value
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub kind: EntityKind,
    pub shader: ShaderKey,
    pub mesh: MeshKey,
    pub mode: PolygonMode,
    pub rotation: Quat,
    pub position: Vec3,
    pub scale: Vec3,
    pub color: Vec3,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            kind: EntityKind::Game,
            shader: ShaderKey::Wall,
            mesh: MeshKey::Wall,
            mode: PolygonMode::Fill,
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            color: Vec3::ZERO,
        }
    }
}

impl Entity {
    /// Model transform from position/rotation/scale
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
