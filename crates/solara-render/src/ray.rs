//! Rays in world and mesh-local space

use solara_core::math::{Mat4, Vec3};

/// A ray defined by an origin and a unit-length direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point
    pub origin: Vec3,
    /// Direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray; the direction is normalized.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance `t` along the ray
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map this ray through an affine matrix, renormalizing the direction.
    ///
    /// Passing a mesh's inverse matrix yields the ray in that mesh's local
    /// frame. For rigid transforms the renormalized direction keeps hit
    /// distances equal in both frames.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point(self.origin),
            direction: matrix.transform_vector(self.direction).normalize(),
        }
    }
}
