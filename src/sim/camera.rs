//! Quaternion camera
//!
//! Position + orientation with cached projection/view matrices. Mutated by
//! the gameplay follow logic, the menu framing, or the free-fly overlay.

use glam::{Mat4, Quat, Vec3};

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Perspective camera with a cached view transform
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    pub proj: Mat4,
    pub view: Mat4,
    pub fov: f32,
    pub ratio: f32,
}

impl Camera {
    /// Camera at the origin with the given vertical fov (radians) and aspect
    pub fn new(fov: f32, ratio: f32) -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            fov,
            ratio,
        };
        cam.set_ratio(ratio);
        cam.update_view();
        cam
    }

    /// Place the camera
    pub fn set(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation.normalize();
        self.update_view();
    }

    /// Rebuild the projection for a new aspect ratio
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
        self.proj = Mat4::perspective_rh(self.fov, ratio.max(f32::EPSILON), Z_NEAR, Z_FAR);
    }

    /// Aim at a world point; no-op for degenerate directions
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON || dir.cross(up).length_squared() <= f32::EPSILON {
            return;
        }
        self.view = Mat4::look_to_rh(self.position, dir, up);
        self.rotation = Quat::from_mat4(&self.view).inverse().normalize();
    }

    /// Move by a world-space delta
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.update_view();
    }

    /// Rotate around a world-space axis
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (Quat::from_axis_angle(axis, angle) * self.rotation).normalize();
        self.update_view();
    }

    /// View direction (camera forward is -Z)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Camera-space left in world coordinates
    pub fn left(&self) -> Vec3 {
        self.rotation * Vec3::NEG_X
    }

    /// Combined projection * view
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view
    }

    fn update_view(&mut self) {
        self.view = Mat4::from_rotation_translation(self.rotation, self.position).inverse();
    }
}
