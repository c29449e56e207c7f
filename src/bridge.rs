//! Geometry bridge: turns pose-engine output into renderer-consumable buffers.
//!
//! The renderer's axis convention differs from the mesh's native one, so every
//! published position goes through a fixed permutation: `(x, y, z) → (x, z, y)`.
//! Index data never changes after a mesh load; vertex data is republished once
//! per frame from the deformed pose image.

use glam::Vec3;

use crate::mesh::Mesh;
use crate::pose::PoseImage;

/// Fixed coordinate-system adaptation between mesh space and render space.
#[inline]
#[must_use]
pub fn remap_axes(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}

/// The two parallel arrays the renderer consumes.
///
/// Regenerated as a whole — never partially patched — so the index array
/// always references valid positions in the current vertex array.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffers {
    /// Axis-remapped vertex positions, one per mesh vertex.
    pub positions: Vec<Vec3>,
    /// Triangle vertex indices, three per triangle, original winding order.
    pub indices: Vec<u32>,
}

/// Owns the [`GeometryBuffers`] and keeps them consistent with the loaded
/// mesh and the current pose image.
#[derive(Debug, Default)]
pub struct GeometryBridge {
    buffers: GeometryBuffers,
    /// Vertex count of the mesh the buffers were built for; the stale-buffer
    /// guard compares the pose image against this.
    expected_vertices: usize,
}

impl GeometryBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the static topology for a freshly loaded mesh: the index
    /// array (winding preserved, no culling-order inversion) and the vertex
    /// array seeded with remapped rest positions so the mesh is visible
    /// before the first deform completes.
    pub fn sync_topology(&mut self, mesh: &Mesh) {
        self.expected_vertices = mesh.vertex_count();

        self.buffers.positions.clear();
        self.buffers
            .positions
            .extend(mesh.vertices().iter().map(|v| remap_axes(v.position)));

        self.buffers.indices.clear();
        self.buffers.indices.reserve(mesh.triangle_count() * 3);
        for tri in mesh.triangles() {
            self.buffers.indices.extend_from_slice(tri);
        }
    }

    /// Republishes the deformed vertex positions for this frame.
    ///
    /// If the pose image is smaller than the mesh (stale or mid-rebuild),
    /// the previous frame's buffer is retained: one stale frame beats an
    /// out-of-bounds read.
    pub fn sync_deformed_vertices(&mut self, pose_image: &PoseImage) {
        if pose_image.len() < self.expected_vertices {
            log::warn!(
                "pose image has {} positions, expected {}; keeping previous frame",
                pose_image.len(),
                self.expected_vertices
            );
            return;
        }

        self.buffers.positions.clear();
        self.buffers.positions.extend(
            pose_image.positions[..self.expected_vertices]
                .iter()
                .map(|&p| remap_axes(p)),
        );
    }

    /// The renderer-facing buffers for the current frame.
    #[inline]
    #[must_use]
    pub fn buffers(&self) -> &GeometryBuffers {
        &self.buffers
    }
}
