//! Bounding volume hierarchy over a mesh's triangles
//!
//! The builder reorders the caller's triangle slice in place so that every
//! leaf covers a contiguous range; node indices always refer to positions
//! in the post-reorder array.

use crate::aabb::Aabb;
use crate::ray::Ray;
use crate::triangle::Triangle;

/// Leaves hold at most this many triangles.
const MAX_LEAF_TRIANGLES: usize = 4;

/// A node in the BVH tree.
///
/// Leaves have no children and describe the triangle range
/// `[start, start + count)`; internal nodes keep the same range fields for
/// their whole subtree.
#[derive(Debug)]
pub struct BvhNode {
    /// Bounding box of every triangle in the subtree
    pub bounds: Aabb,
    /// Left child (`None` for leaves)
    pub left: Option<Box<BvhNode>>,
    /// Right child (`None` for leaves)
    pub right: Option<Box<BvhNode>>,
    /// First triangle index of the range
    pub start: u32,
    /// Number of triangles in the range
    pub count: u32,
}

impl BvhNode {
    /// Whether this node is a leaf
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none()
    }

    fn node_count(&self) -> usize {
        let children = self
            .left
            .as_deref()
            .map_or(0, |left| left.node_count())
            + self.right.as_deref().map_or(0, |right| right.node_count());
        1 + children
    }
}

/// The result of a successful closest-hit query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Hit distance along the ray
    pub t: f32,
    /// Barycentric weight of `v1`
    pub u: f32,
    /// Barycentric weight of `v2`
    pub v: f32,
    /// Index of the hit triangle in the reordered array
    pub triangle_index: u32,
}

/// Bounding Volume Hierarchy accelerator.
#[derive(Debug)]
pub struct Bvh {
    root: BvhNode,
    /// Build time in milliseconds
    pub build_time_ms: f32,
}

impl Bvh {
    /// Build a BVH over `triangles`, reordering the slice in place.
    #[must_use]
    pub fn build(triangles: &mut [Triangle]) -> Self {
        let started = std::time::Instant::now();
        let root = build_node(triangles, 0, triangles.len());
        let build_time_ms = started.elapsed().as_secs_f32() * 1000.0;

        tracing::debug!(
            triangles = triangles.len(),
            nodes = root.node_count(),
            build_time_ms,
            "BVH built"
        );

        Self {
            root,
            build_time_ms,
        }
    }

    /// Root node of the tree
    #[must_use]
    pub const fn root(&self) -> &BvhNode {
        &self.root
    }

    /// Total number of nodes in the tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Check that the leaves partition `[0, triangle_count)` exactly.
    #[must_use]
    pub fn covers(&self, triangle_count: usize) -> bool {
        let mut seen = vec![false; triangle_count];
        if !mark_leaves(&self.root, &mut seen) {
            return false;
        }
        seen.iter().all(|&covered| covered)
    }

    /// Closest hit along `ray`, strictly nearer than `t_max`.
    ///
    /// Both children of an internal node are queried with the caller's
    /// bound; the nearer result wins.
    #[must_use]
    pub fn intersect(&self, ray: &Ray, triangles: &[Triangle], t_max: f32) -> Option<RayHit> {
        intersect_node(&self.root, ray, triangles, t_max)
    }
}

fn build_node(triangles: &mut [Triangle], start: usize, count: usize) -> BvhNode {
    let mut bounds = Aabb::EMPTY;
    for tri in &triangles[start..start + count] {
        bounds.expand(tri.v0);
        bounds.expand(tri.v1);
        bounds.expand(tri.v2);
    }

    let mut node = BvhNode {
        bounds,
        left: None,
        right: None,
        start: start as u32,
        count: count as u32,
    };

    if count <= MAX_LEAF_TRIANGLES {
        return node;
    }

    // Longest axis, ties resolved x before y before z.
    let extent = bounds.extent();
    let mut axis = 0;
    if extent.y > extent.x {
        axis = 1;
    }
    if extent.z > extent.x && extent.z > extent.y {
        axis = 2;
    }

    // Split at the mean centroid coordinate.
    let mut split = 0.0f32;
    for tri in &triangles[start..start + count] {
        split += tri.centroid().axis(axis);
    }
    split /= count as f32;

    // In-place partition: centroids below the split move to the front.
    let mut mid = start;
    for i in start..start + count {
        if triangles[i].centroid().axis(axis) < split {
            triangles.swap(i, mid);
            mid += 1;
        }
    }

    // All centroids on one side: keep the range as a leaf.
    if mid == start || mid == start + count {
        return node;
    }

    node.left = Some(Box::new(build_node(triangles, start, mid - start)));
    node.right = Some(Box::new(build_node(triangles, mid, start + count - mid)));
    node
}

fn mark_leaves(node: &BvhNode, seen: &mut [bool]) -> bool {
    if node.is_leaf() {
        for index in node.start..node.start + node.count {
            match seen.get_mut(index as usize) {
                Some(covered) if !*covered => *covered = true,
                _ => return false,
            }
        }
        return true;
    }
    let Some(left) = node.left.as_deref() else {
        return false;
    };
    let Some(right) = node.right.as_deref() else {
        return false;
    };
    mark_leaves(left, seen) && mark_leaves(right, seen)
}

fn intersect_node(
    node: &BvhNode,
    ray: &Ray,
    triangles: &[Triangle],
    t_max: f32,
) -> Option<RayHit> {
    if !node.bounds.intersects(ray) {
        return None;
    }

    if node.is_leaf() {
        let mut closest = t_max;
        let mut best = None;
        for triangle_index in node.start..node.start + node.count {
            let tri = &triangles[triangle_index as usize];
            if let Some((t, u, v)) = tri.intersect(ray) {
                if t < closest {
                    closest = t;
                    best = Some(RayHit {
                        t,
                        u,
                        v,
                        triangle_index,
                    });
                }
            }
        }
        return best;
    }

    let left = node
        .left
        .as_deref()
        .and_then(|child| intersect_node(child, ray, triangles, t_max));
    let right = node
        .right
        .as_deref()
        .and_then(|child| intersect_node(child, ray, triangles, t_max));

    match (left, right) {
        (Some(l), Some(r)) => Some(if l.t < r.t { l } else { r }),
        (l, r) => l.or(r),
    }
}
