//! Scene assembly, the per-pixel shading kernel, and frame buffers

use crate::camera::Camera;
use crate::light::DirectionalLight;
use crate::mesh::Mesh;
use crate::ray::Ray;
use crate::renderer;
use solara_core::math::{Vec2, Vec3};
use solara_core::{Error, Result};

/// Background color for rays that hit nothing
pub const BACKGROUND: [u8; 3] = [50, 50, 50];

/// Ambient light floor for the diffuse term
const AMBIENT_LIGHT: f32 = 0.2;

/// Shadow ray origin offset along the surface normal
const SHADOW_BIAS: f32 = 0.001;

/// A renderable scene: meshes, camera, light, and the frame sequence.
///
/// Frames are packed 8-bit RGB buffers of length `3 * width * height`,
/// row-major with the origin at the top left.
#[derive(Debug)]
pub struct Scene {
    meshes: Vec<Mesh>,
    camera: Camera,
    light: DirectionalLight,
    width: u32,
    height: u32,
    frames: Vec<Vec<u8>>,
    current_frame: usize,
}

impl Scene {
    /// Create a scene with `frame_count` preallocated frame buffers.
    ///
    /// # Errors
    ///
    /// Fails when either image dimension is zero or no frames are requested.
    pub fn new(width: u32, height: u32, frame_count: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Scene(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        if frame_count == 0 {
            return Err(Error::Scene("at least one frame is required".to_string()));
        }

        let frame_len = 3 * width as usize * height as usize;
        Ok(Self {
            meshes: Vec::new(),
            camera: Camera::default(),
            light: DirectionalLight::default(),
            width,
            height,
            frames: vec![vec![0; frame_len]; frame_count],
            current_frame: 0,
        })
    }

    /// Image width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The scene's meshes
    #[must_use]
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// The scene's camera
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The scene's light
    #[must_use]
    pub const fn light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Number of frames in the sequence
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the frame currently being rendered
    #[must_use]
    pub const fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    /// Add a mesh to the scene
    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Replace the camera
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Replace the light; the direction (surface toward light) is normalized.
    pub fn set_light(&mut self, direction: Vec3, color: Vec3) {
        self.light = DirectionalLight::new(direction, color);
    }

    /// A rendered frame by index
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    /// The frame currently being rendered
    #[must_use]
    pub fn current_frame(&self) -> &[u8] {
        &self.frames[self.current_frame]
    }

    /// Advance to the next frame, clamping at the last one.
    pub fn next_frame(&mut self) {
        if self.current_frame + 1 < self.frames.len() {
            self.current_frame += 1;
        }
    }

    /// Render into the current frame buffer.
    pub fn render_frame(&mut self) {
        let index = self.current_frame;
        let mut frame = std::mem::take(&mut self.frames[index]);
        renderer::render(self, &mut frame);
        self.frames[index] = frame;
    }

    /// Shade a single pixel: closest hit across all meshes, texture lookup,
    /// shadow test, and the ambient-plus-diffuse lighting model.
    #[must_use]
    pub fn render_pixel(&self, x: u32, y: u32, aspect: f32) -> [u8; 3] {
        let ray = self.camera.ray_for(
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
            aspect,
        );

        let mut closest_t = f32::INFINITY;
        let mut hit_mesh: Option<&Mesh> = None;
        let mut hit_uv = Vec2::ZERO;
        let mut hit_normal = Vec3::ZERO;

        for mesh in &self.meshes {
            if let Some(hit) = mesh.intersect(&ray, closest_t) {
                if hit.t < closest_t {
                    closest_t = hit.t;
                    hit_mesh = Some(mesh);

                    let tri = &mesh.triangles()[hit.triangle_index as usize];
                    let w = 1.0 - hit.u - hit.v;
                    hit_uv = tri.t0 * w + tri.t1 * hit.u + tri.t2 * hit.v;
                    let local_normal =
                        (tri.n0 * w + tri.n1 * hit.u + tri.n2 * hit.v).normalize();
                    hit_normal = mesh.normal_to_world(local_normal);
                }
            }
        }

        let Some(mesh) = hit_mesh else {
            return BACKGROUND;
        };

        let albedo = mesh.sample_texture(hit_uv);

        // World-space hit point from the untransformed camera ray; the hit
        // distance is frame-independent because mesh transforms are rigid.
        let hit_point = ray.at(closest_t);
        let shadow_ray = Ray {
            origin: hit_point + hit_normal * SHADOW_BIAS,
            direction: self.light.direction,
        };
        let in_shadow = self
            .meshes
            .iter()
            .any(|occluder| occluder.intersect(&shadow_ray, f32::INFINITY).is_some());

        let mut diffuse = AMBIENT_LIGHT;
        if !in_shadow {
            diffuse = diffuse.max(hit_normal.dot(self.light.direction));
        }

        let color = albedo.mul_elem(self.light.color) * diffuse;
        [
            (color.x * 255.0).min(255.0) as u8,
            (color.y * 255.0).min(255.0) as u8,
            (color.z * 255.0).min(255.0) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use crate::triangle::Triangle;

    fn tri(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Triangle {
        Triangle {
            v0,
            v1,
            v2,
            t0: Vec2::ZERO,
            t1: Vec2::new(1.0, 0.0),
            t2: Vec2::new(0.0, 1.0),
            n0: normal,
            n1: normal,
            n2: normal,
        }
    }

    /// Horizontal quad at height `y` spanning `[-half, half]` in X and Z,
    /// normals pointing up.
    fn horizontal_quad(y: f32, half: f32) -> Vec<Triangle> {
        let a = Vec3::new(-half, y, -half);
        let b = Vec3::new(half, y, -half);
        let c = Vec3::new(half, y, half);
        let d = Vec3::new(-half, y, half);
        vec![tri(a, b, c, Vec3::Y), tri(a, c, d, Vec3::Y)]
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * width + x) * 3) as usize;
        [frame[idx], frame[idx + 1], frame[idx + 2]]
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(Scene::new(0, 4, 1), Err(Error::Scene(_))));
        assert!(matches!(Scene::new(4, 0, 1), Err(Error::Scene(_))));
        assert!(matches!(Scene::new(4, 4, 0), Err(Error::Scene(_))));
    }

    #[test]
    fn empty_scene_renders_background() {
        let mut scene = Scene::new(6, 4, 1).unwrap();
        scene.render_frame();
        let frame = scene.current_frame();
        for rgb in frame.chunks_exact(3) {
            assert_eq!(rgb, BACKGROUND);
        }
    }

    #[test]
    fn next_frame_clamps_at_last() {
        let mut scene = Scene::new(2, 2, 3).unwrap();
        assert_eq!(scene.current_frame_index(), 0);
        scene.next_frame();
        scene.next_frame();
        scene.next_frame();
        assert_eq!(scene.current_frame_index(), 2);
    }

    #[test]
    fn frames_are_independent_buffers() {
        let mut scene = Scene::new(2, 2, 2).unwrap();
        scene.render_frame();
        assert_eq!(scene.current_frame()[0], BACKGROUND[0]);
        assert_eq!(scene.frame(1).unwrap()[0], 0);
    }

    #[test]
    fn single_triangle_facing_away_gets_ambient_only() {
        // The triangle normal points along +Z, away from the camera; with
        // the light along -Z the Lambert term is negative and the ambient
        // floor wins, so the hit pixel reads 0.2 * 255 = 51.
        let mut scene = Scene::new(4, 4, 1).unwrap();
        let triangle = tri(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::Z,
        );
        let mesh = Mesh::new(vec![triangle], Texture::solid(255, 255, 255)).unwrap();
        scene.add_mesh(mesh);
        scene.set_camera(Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 60.0));
        scene.set_light(-Vec3::Z, Vec3::ONE);
        scene.render_frame();

        let hit = pixel(scene.current_frame(), 4, 2, 2);
        assert_eq!(hit, [51, 51, 51]);
    }

    #[test]
    fn reversing_the_light_brightens_the_hit() {
        let triangle = tri(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::Z,
        );
        let mut scene = Scene::new(4, 4, 1).unwrap();
        scene.add_mesh(Mesh::new(vec![triangle], Texture::solid(255, 255, 255)).unwrap());
        scene.set_camera(Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 60.0));
        scene.set_light(Vec3::Z, Vec3::ONE);
        scene.render_frame();

        let hit = pixel(scene.current_frame(), 4, 2, 2);
        assert!(hit[0] > 51, "lit pixel should beat ambient, got {hit:?}");
    }

    #[test]
    fn ground_under_quad_is_shadowed() {
        // A small quad floats above a large ground plane; the light points
        // straight down. The camera is aimed at a ground point beneath the
        // quad that is still visible from its oblique position.
        let mut scene = Scene::new(9, 9, 1).unwrap();
        scene.add_mesh(
            Mesh::new(horizontal_quad(0.0, 3.0), Texture::solid(255, 255, 255)).unwrap(),
        );
        scene.add_mesh(
            Mesh::new(horizontal_quad(1.0, 0.5), Texture::solid(255, 255, 255)).unwrap(),
        );
        scene.set_light(Vec3::Y, Vec3::ONE);
        scene.set_camera(Camera::new(
            Vec3::new(0.0, 3.0, -4.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
        ));
        scene.render_frame();

        // Center pixel: ground at the origin, occluded from the light.
        let shadowed = pixel(scene.current_frame(), 9, 4, 4);
        assert_eq!(shadowed, [51, 51, 51]);
    }

    #[test]
    fn ground_beside_quad_is_lit() {
        let mut scene = Scene::new(9, 9, 1).unwrap();
        scene.add_mesh(
            Mesh::new(horizontal_quad(0.0, 3.0), Texture::solid(255, 255, 255)).unwrap(),
        );
        scene.add_mesh(
            Mesh::new(horizontal_quad(1.0, 0.5), Texture::solid(255, 255, 255)).unwrap(),
        );
        scene.set_light(Vec3::Y, Vec3::ONE);
        scene.set_camera(Camera::new(
            Vec3::new(0.0, 3.0, -4.0),
            Vec3::new(1.5, 0.0, 0.0),
            Vec3::Y,
            60.0,
        ));
        scene.render_frame();

        // Center pixel: ground at (1.5, 0, 0), in full light.
        let lit = pixel(scene.current_frame(), 9, 4, 4);
        assert_eq!(lit, [255, 255, 255]);
    }

    #[test]
    fn closest_mesh_wins() {
        let near = tri(
            Vec3::new(-2.0, -2.0, 3.0),
            Vec3::new(2.0, -2.0, 3.0),
            Vec3::new(0.0, 2.0, 3.0),
            -Vec3::Z,
        );
        let far = tri(
            Vec3::new(-2.0, -2.0, 6.0),
            Vec3::new(2.0, -2.0, 6.0),
            Vec3::new(0.0, 2.0, 6.0),
            -Vec3::Z,
        );
        let mut scene = Scene::new(5, 5, 1).unwrap();
        scene.add_mesh(Mesh::new(vec![far], Texture::solid(255, 0, 0)).unwrap());
        scene.add_mesh(Mesh::new(vec![near], Texture::solid(0, 255, 0)).unwrap());
        scene.set_camera(Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 60.0));
        scene.set_light(-Vec3::Z, Vec3::ONE);
        scene.render_frame();

        let center = pixel(scene.current_frame(), 5, 2, 2);
        assert_eq!(center[0], 0, "near green mesh must occlude the red one");
        assert!(center[1] > 0);
    }
}
