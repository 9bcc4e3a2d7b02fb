//! Click-to-surface picking against the tree silhouette.
//!
//! The tree itself is a point cloud and can't be hit, so clicks are tested
//! against an invisible cone of the same size. Only faces turned toward the
//! ray count, which means a click always lands on the near side.

use crate::core::assembly::Primitive;
use crate::core::mesh::build_mesh;
use glam::{Mat3, Quat, Vec2, Vec3};

const EPSILON: f32 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to a front-facing triangle (counter-clockwise
    /// winding seen by the ray), or `None` on a miss.
    pub fn hit_triangle(&self, [a, b, c]: [Vec3; 3]) -> Option<f32> {
        let e1 = b - a;
        let e2 = c - a;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        if det < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = e2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// Invisible cone standing on the origin, base at `-height / 2`.
pub struct ConeProxy {
    triangles: Vec<[Vec3; 3]>,
}

impl ConeProxy {
    pub fn new(radius: f32, height: f32, segments: u32) -> Self {
        let mesh = build_mesh(&Primitive::Cone {
            radius,
            height,
            segments,
        });
        let triangles = mesh
            .triangles()
            .map(|t| t.map(Vec3::from_array))
            .collect();
        Self { triangles }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Nearest front-facing hit point.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        self.triangles
            .iter()
            .filter_map(|tri| ray.hit_triangle(*tri))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| ray.at(t))
    }
}

/// Rotation that turns local +Z away from the tree axis through `point`.
///
/// Points on the axis itself have no outward direction and keep the identity.
pub fn facing_outward(point: Vec3) -> Quat {
    let Some(forward) = Vec3::new(point.x, 0.0, point.z).try_normalize() else {
        return Quat::IDENTITY;
    };
    let right = Vec3::Y.cross(forward).normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Canvas-relative position in \[0, 1\] (y down) to normalized device coordinates (y up).
#[inline]
pub fn uv_to_ndc(uv: [f32; 2]) -> Vec2 {
    Vec2::new(uv[0] * 2.0 - 1.0, 1.0 - uv[1] * 2.0)
}
