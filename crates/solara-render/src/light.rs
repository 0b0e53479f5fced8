//! Directional lighting

use serde::{Deserialize, Serialize};
use solara_core::math::Vec3;

/// A light at infinity.
///
/// `direction` is the unit vector from the shaded surface toward the light;
/// callers thinking in "direction the light travels" must negate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Unit vector from the surface toward the light
    pub direction: Vec3,
    /// Color and intensity of the light
    pub color: Vec3,
}

impl DirectionalLight {
    /// Create a directional light; the direction is normalized.
    #[must_use]
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::Y, Vec3::ONE)
    }
}
