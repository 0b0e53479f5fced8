//! Meshes: triangles, texture, transform, and an owned BVH

use crate::bvh::{Bvh, RayHit};
use crate::ray::Ray;
use crate::texture::Texture;
use crate::triangle::Triangle;
use solara_core::math::{Mat4, Transform, Vec2, Vec3};
use solara_core::{Error, Result};

/// A renderable triangle mesh.
///
/// The mesh owns its triangles, texture, and BVH. Construction reorders the
/// triangle array in place so that BVH leaves cover contiguous ranges; after
/// that the array is read-only for the lifetime of the BVH.
#[derive(Debug)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    texture: Texture,
    bvh: Bvh,
    transform: Transform,
    inverse_matrix: Mat4,
    normal_matrix: Mat4,
}

impl Mesh {
    /// Build a mesh from decoded triangles and a texture.
    ///
    /// # Errors
    ///
    /// Fails when the triangle list is empty or the built BVH does not
    /// reference every triangle exactly once.
    pub fn new(mut triangles: Vec<Triangle>, texture: Texture) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::Mesh("mesh has no triangles".to_string()));
        }

        let bvh = Bvh::build(&mut triangles);
        if !bvh.covers(triangles.len()) {
            return Err(Error::Mesh(
                "BVH does not cover the triangle array".to_string(),
            ));
        }

        Ok(Self {
            triangles,
            texture,
            bvh,
            transform: Transform::default(),
            inverse_matrix: Mat4::IDENTITY,
            normal_matrix: Mat4::IDENTITY,
        })
    }

    /// Set the mesh's world transform, recomputing the cached matrices.
    ///
    /// # Errors
    ///
    /// A rigid transform is always invertible; a non-invertible matrix here
    /// indicates a programmer bug and is surfaced as [`Error::Transform`]
    /// instead of producing undefined output.
    pub fn set_transform(&mut self, transform: Transform) -> Result<()> {
        let inverse_matrix = transform
            .matrix()
            .inverse()
            .ok_or_else(|| Error::Transform("mesh matrix is not invertible".to_string()))?;
        let normal_matrix = transform
            .rotation_matrix()
            .inverse()
            .ok_or_else(|| Error::Transform("mesh rotation is not invertible".to_string()))?
            .transpose();

        self.transform = transform;
        self.inverse_matrix = inverse_matrix;
        self.normal_matrix = normal_matrix;
        Ok(())
    }

    /// Current world transform
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    /// The mesh's triangles, in BVH order
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The mesh's texture
    #[must_use]
    pub const fn texture(&self) -> &Texture {
        &self.texture
    }

    /// The mesh's BVH
    #[must_use]
    pub const fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// Closest hit of a world-space ray, strictly nearer than `t_max`.
    ///
    /// The ray is mapped into the mesh's local frame by the cached inverse
    /// matrix; the transform is rigid, so the returned local-space `t` is
    /// also the world-space distance.
    #[must_use]
    pub fn intersect(&self, world_ray: &Ray, t_max: f32) -> Option<RayHit> {
        let local_ray = world_ray.transformed(&self.inverse_matrix);
        self.bvh.intersect(&local_ray, &self.triangles, t_max)
    }

    /// Map a local-space normal to world space and renormalize.
    #[must_use]
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        self.normal_matrix.transform_vector(normal).normalize()
    }

    /// Sample the mesh texture at interpolated UV coordinates.
    #[must_use]
    pub fn sample_texture(&self, uv: Vec2) -> Vec3 {
        self.texture.sample(uv.u, uv.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn quad_at_z(z: f32) -> Vec<Triangle> {
        let corners = [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ];
        let uvs = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::ONE,
            Vec2::new(0.0, 1.0),
        ];
        let n = -Vec3::Z;
        vec![
            Triangle {
                v0: corners[0],
                v1: corners[1],
                v2: corners[2],
                t0: uvs[0],
                t1: uvs[1],
                t2: uvs[2],
                n0: n,
                n1: n,
                n2: n,
            },
            Triangle {
                v0: corners[0],
                v1: corners[2],
                v2: corners[3],
                t0: uvs[0],
                t1: uvs[2],
                t2: uvs[3],
                n0: n,
                n1: n,
                n2: n,
            },
        ]
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let result = Mesh::new(Vec::new(), Texture::solid(255, 255, 255));
        assert!(matches!(result, Err(Error::Mesh(_))));
    }

    #[test]
    fn untransformed_mesh_hit() {
        let mesh = Mesh::new(quad_at_z(5.0), Texture::solid(255, 255, 255)).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = mesh.intersect(&ray, f32::INFINITY).expect("quad ahead");
        assert!((hit.t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn rotated_translated_mesh_hit() {
        // One triangle near z = 1, pushed to x = 5 and yawed a quarter turn.
        let triangles = vec![Triangle {
            v0: Vec3::new(0.0, 0.0, 1.0),
            v1: Vec3::new(1.0, 0.0, 1.0),
            v2: Vec3::new(0.0, 1.0, 1.0),
            t0: Vec2::ZERO,
            t1: Vec2::new(1.0, 0.0),
            t2: Vec2::new(0.0, 1.0),
            n0: Vec3::Z,
            n1: Vec3::Z,
            n2: Vec3::Z,
        }];
        let mut mesh = Mesh::new(triangles, Texture::solid(255, 255, 255)).unwrap();
        mesh.set_transform(Transform::new(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(0.0, FRAC_PI_2, 0.0),
        ))
        .unwrap();

        // The yaw sends local +Z to world +X, so the triangle's plane sits
        // at world x = 6 with its footprint in y ∈ [0,1], z ∈ [-1,0].
        let ray = Ray::new(Vec3::new(7.0, 0.25, -0.25), -Vec3::X);
        let hit = mesh.intersect(&ray, f32::INFINITY).expect("triangle hit");
        assert!((hit.t - 1.0).abs() < 1e-4, "expected t≈1, got {}", hit.t);
    }

    #[test]
    fn local_distance_equals_world_distance() {
        let mut mesh = Mesh::new(quad_at_z(3.0), Texture::solid(200, 200, 200)).unwrap();
        mesh.set_transform(Transform::new(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 0.3),
        ))
        .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Z);
        let hit = mesh.intersect(&ray, f32::INFINITY).expect("quad hit");
        // The quad plane stays at z = 3 relative to the mesh origin.
        assert!((hit.t - 3.0).abs() < 1e-4);
    }

    #[test]
    fn normal_follows_rotation() {
        let mut mesh = Mesh::new(quad_at_z(1.0), Texture::solid(255, 255, 255)).unwrap();
        mesh.set_transform(Transform::new(
            Vec3::ZERO,
            Vec3::new(0.0, FRAC_PI_2, 0.0),
        ))
        .unwrap();

        let world_normal = mesh.normal_to_world(Vec3::Z);
        assert!((world_normal.x - 1.0).abs() < 1e-5, "got {world_normal:?}");
        assert!((world_normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn t_max_prunes_hits() {
        let mesh = Mesh::new(quad_at_z(5.0), Texture::solid(255, 255, 255)).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(mesh.intersect(&ray, 4.0).is_none());
    }
}
