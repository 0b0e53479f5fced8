//! # Solara Render
//!
//! Offline CPU ray tracer for textured triangle meshes.
//!
//! A [`Scene`] holds meshes (each with its own texture, rigid transform, and
//! bounding volume hierarchy), a pinhole camera, a directional light, and a
//! sequence of packed RGB frame buffers. [`renderer::render`] fills a frame
//! by partitioning image rows across worker threads; each worker runs the
//! per-pixel closest-hit and shading kernel independently.
//!
//! ## Features
//!
//! - Möller–Trumbore ray/triangle intersection
//! - Median-centroid BVH built per mesh, traversed per ray
//! - Per-mesh rigid transforms with cached inverse matrices
//! - Nearest-neighbor texture sampling with UV wrapping
//! - Shadow rays against every mesh with first-hit short-circuit

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aabb;
pub mod bvh;
pub mod camera;
pub mod light;
pub mod mesh;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod triangle;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhNode, RayHit};
pub use camera::Camera;
pub use light::DirectionalLight;
pub use mesh::Mesh;
pub use ray::Ray;
pub use renderer::{render, render_with_workers, THREADS_ENV_VAR};
pub use scene::{Scene, BACKGROUND};
pub use texture::Texture;
pub use triangle::Triangle;
