//! Pinhole camera and primary ray generation

use crate::ray::Ray;
use serde::{Deserialize, Serialize};
use solara_core::math::Vec3;

/// A pinhole camera described by position, look-at target, up vector, and
/// vertical field of view in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Look-at target
    pub look_at: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_at: Vec3::Z,
            up: Vec3::Y,
            fov_deg: 60.0,
        }
    }
}

impl Camera {
    /// Create a new camera
    #[must_use]
    pub const fn new(position: Vec3, look_at: Vec3, up: Vec3, fov_deg: f32) -> Self {
        Self {
            position,
            look_at,
            up,
            fov_deg,
        }
    }

    /// Primary ray through normalized screen coordinates.
    ///
    /// `nx` and `ny` are pixel-center coordinates in `[0, 1]` with row 0 at
    /// the top of the image; `aspect` is width over height.
    #[must_use]
    pub fn ray_for(&self, nx: f32, ny: f32, aspect: f32) -> Ray {
        let forward = (self.look_at - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let camera_up = right.cross(forward);

        let scale = (self.fov_deg * std::f32::consts::PI / 360.0).tan();
        let rx = (2.0 * nx - 1.0) * aspect * scale;
        let ry = (1.0 - 2.0 * ny) * scale;

        let direction = (right * rx + camera_up * ry + forward).normalize();
        Ray {
            origin: self.position,
            direction,
        }
    }
}
