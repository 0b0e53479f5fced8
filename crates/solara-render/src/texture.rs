//! RGBA textures and nearest-neighbor sampling

use solara_core::math::Vec3;
use solara_core::{Error, Result};

/// A decoded texture: tightly packed RGBA8, row-major, top-left origin.
#[derive(Debug, Clone)]
pub struct Texture {
    rgba: Vec<u8>,
    width: i32,
    height: i32,
}

impl Texture {
    /// Create a texture from a decoded RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Fails when either dimension is non-positive or the buffer length is
    /// not `width * height * 4`.
    pub fn new(rgba: Vec<u8>, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::Texture(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::Texture(format!(
                "buffer holds {} bytes, expected {expected}",
                rgba.len()
            )));
        }
        Ok(Self {
            rgba,
            width,
            height,
        })
    }

    /// A 1x1 texture of a single color
    #[must_use]
    pub fn solid(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgba: vec![r, g, b, 255],
            width: 1,
            height: 1,
        }
    }

    /// A two-color checkerboard, `cell` pixels per square
    #[must_use]
    pub fn checkerboard(width: i32, height: i32, cell: i32, a: [u8; 3], b: [u8; 3]) -> Self {
        let cell = cell.max(1);
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let color = if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b };
                rgba.extend_from_slice(&color);
                rgba.push(255);
            }
        }
        Self {
            rgba,
            width,
            height,
        }
    }

    /// Texture width in pixels
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Texture height in pixels
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Sample the nearest texel with wrapping, returning linear RGB.
    ///
    /// UV `(0, 0)` maps to the top-left texel; alpha is discarded.
    #[must_use]
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = u - u.floor();
        let v = v - v.floor();
        let x = (u * (self.width - 1) as f32) as usize;
        let y = (v * (self.height - 1) as f32) as usize;
        let idx = (y * self.width as usize + x) * 4;
        Vec3::new(
            f32::from(self.rgba[idx]) / 255.0,
            f32::from(self.rgba[idx + 1]) / 255.0,
            f32::from(self.rgba[idx + 2]) / 255.0,
        )
    }
}
