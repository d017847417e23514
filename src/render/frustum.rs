//! Frustum plane extraction and sphere culling
//!
//! Planes come straight out of the view-projection matrix (Gribb/Hartmann),
//! for a [0, 1] clip depth range. The sphere test is conservative: a
//! partially visible object is never culled, while the bounding
//! approximation may let some fully hidden ones through.

use glam::{Mat4, Vec3, Vec4};

use crate::assets::BoundingSphere;

/// The 6 planes as (normal, d); a point p is inside when `n·p + d >= 0`
pub fn frustum_planes(view_proj: &Mat4) -> [Vec4; 6] {
    let r0 = view_proj.row(0);
    let r1 = view_proj.row(1);
    let r2 = view_proj.row(2);
    let r3 = view_proj.row(3);

    [
        normalize_plane(r3 + r0), // left
        normalize_plane(r3 - r0), // right
        normalize_plane(r3 + r1), // bottom
        normalize_plane(r3 - r1), // top
        normalize_plane(r2),      // near (z >= 0 in clip space)
        normalize_plane(r3 - r2), // far
    ]
}

fn normalize_plane(p: Vec4) -> Vec4 {
    let len = p.truncate().length();
    if len <= f32::EPSILON { p } else { p / len }
}

/// True when the sphere lies entirely outside at least one plane
pub fn sphere_outside(planes: &[Vec4; 6], center: Vec3, radius: f32) -> bool {
    planes
        .iter()
        .any(|p| p.truncate().dot(center) + p.w < -radius)
}

/// Cull test for a mesh bounding sphere placed at `pos` with `scale`.
///
/// The sphere center follows the componentwise-scaled offset; the radius
/// takes the largest scale component, conservatively.
pub fn cull_sphere(planes: &[Vec4; 6], bounding: &BoundingSphere, pos: Vec3, scale: Vec3) -> bool {
    let center = scale * bounding.offset + pos;
    let radius = scale.max_element() * bounding.radius;
    sphere_outside(planes, center, radius)
}
