//! Triangle primitive and ray intersection

use crate::aabb::Aabb;
use crate::ray::Ray;
use solara_core::math::{Vec2, Vec3};

/// Numerical epsilon shared by the determinant and distance rejections.
pub const INTERSECT_EPSILON: f32 = 1e-7;

/// A triangle with per-vertex positions, texture coordinates, and normals,
/// all in mesh-local space.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex position
    pub v0: Vec3,
    /// Second vertex position
    pub v1: Vec3,
    /// Third vertex position
    pub v2: Vec3,
    /// Texture coordinates at `v0`
    pub t0: Vec2,
    /// Texture coordinates at `v1`
    pub t1: Vec2,
    /// Texture coordinates at `v2`
    pub t2: Vec2,
    /// Normal at `v0`
    pub n0: Vec3,
    /// Normal at `v1`
    pub n1: Vec3,
    /// Normal at `v2`
    pub n2: Vec3,
}

impl Triangle {
    /// Centroid of the three vertices
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Bounding box of the three vertices
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::EMPTY;
        aabb.expand(self.v0);
        aabb.expand(self.v1);
        aabb.expand(self.v2);
        aabb
    }

    /// Möller–Trumbore ray intersection.
    ///
    /// Returns `(t, u, v)` where `u`/`v` are the barycentric weights of
    /// `v1` and `v2`. Back faces are not culled; hits require `t` beyond
    /// the shared epsilon.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(edge2);
        let det = edge1.dot(h);

        if det.abs() < INTERSECT_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self.v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if t > INTERSECT_EPSILON {
            Some((t, u, v))
        } else {
            None
        }
    }
}
