//! Geometry queries: ray/mesh intersection and cylinder proximity
//!
//! The mesh query walks every triangle - O(vertex count), no spatial
//! acceleration. Fine at the scale of these meshes; a BVH becomes worth it
//! long before the meshes do.

use glam::{Mat4, Vec3};

use crate::assets::{Mesh, Primitive};

/// Closest ray/mesh intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Signed distance along a ray to the plane `n·p = offset`.
///
/// `None` when the ray runs parallel to the plane.
pub fn ray_plane_distance(origin: Vec3, dir: Vec3, normal: Vec3, offset: f32) -> Option<f32> {
    let denom = dir.dot(normal);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    Some((offset - origin.dot(normal)) / denom)
}

/// Same-side test: `q` inside triangle `abc` (on its plane).
///
/// Each edge's cross product against the query offset must agree with the
/// triangle normal (right-hand rule); points on an edge count as inside.
pub fn point_in_triangle(q: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let n = (b - a).cross(c - a).normalize_or_zero();
    if n == Vec3::ZERO {
        return false;
    }

    (b - a).cross(q - a).dot(n) >= 0.0
        && (c - b).cross(q - b).dot(n) >= 0.0
        && (a - c).cross(q - c).dot(n) >= 0.0
}

/// Closest hit of a ray against a transformed triangle mesh.
///
/// Requires triangle topology and retained positions; anything else is a
/// miss, as is a ray parallel to every candidate plane. Hits behind the
/// origin are rejected.
pub fn ray_intersect_mesh(origin: Vec3, dir: Vec3, mesh: &Mesh, xfrm: &Mat4) -> Option<RayHit> {
    if mesh.primitive != Primitive::Triangles || mesh.positions.is_empty() {
        return None;
    }

    let mut best: Option<RayHit> = None;

    for tri in mesh.positions.chunks_exact(9) {
        let t1 = xfrm.transform_point3(Vec3::new(tri[0], tri[1], tri[2]));
        let t2 = xfrm.transform_point3(Vec3::new(tri[3], tri[4], tri[5]));
        let t3 = xfrm.transform_point3(Vec3::new(tri[6], tri[7], tri[8]));

        let n = (t2 - t1).cross(t3 - t1).normalize_or_zero();
        if n == Vec3::ZERO {
            continue; // degenerate triangle
        }

        let Some(d) = ray_plane_distance(origin, dir, n, t1.dot(n)) else {
            continue;
        };
        if d < 0.0 || best.is_some_and(|hit| d >= hit.distance) {
            continue;
        }

        let p = origin + dir * d;
        if point_in_triangle(p, t1, t2, t3) {
            best = Some(RayHit {
                point: p,
                distance: d,
            });
        }
    }

    best
}

/// Project a point onto a cylinder axis.
///
/// Returns `(along, radial)`: the signed extent along the unit `axis` from
/// `base`, and the distance from the axis line.
#[inline]
pub fn axis_projection(point: Vec3, base: Vec3, axis: Vec3) -> (f32, f32) {
    let rel = point - base;
    let along = rel.dot(axis);
    let radial = (rel - axis * along).length();
    (along, radial)
}
