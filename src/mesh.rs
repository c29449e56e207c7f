//! Skinned mesh data model.
//!
//! A [`Mesh`] is the immutable rest-pose geometry plus the bone hierarchy and
//! morph targets that drive its deformation. All index references inside the
//! mesh are validated once at construction; after a `Mesh` exists, the
//! per-frame pipeline can index into it without further range checks.

use glam::Vec3;

use crate::errors::{PuppetError, Result};

/// Maximum number of bones that can influence a single vertex.
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Linear-blend skinning weights for one vertex.
///
/// Unused slots carry weight `0.0`; bone indices in unused slots are ignored
/// but still validated (they default to bone 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinInfluences {
    pub bones: [u16; MAX_BONE_INFLUENCES],
    pub weights: [f32; MAX_BONE_INFLUENCES],
}

impl SkinInfluences {
    /// Rigid binding to a single bone.
    #[must_use]
    pub fn single(bone: u16) -> Self {
        Self {
            bones: [bone, 0, 0, 0],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Even 50/50 split between two bones.
    #[must_use]
    pub fn pair(a: u16, b: u16, weight_a: f32) -> Self {
        Self {
            bones: [a, b, 0, 0],
            weights: [weight_a, 1.0 - weight_a, 0.0, 0.0],
        }
    }
}

impl Default for SkinInfluences {
    fn default() -> Self {
        Self::single(0)
    }
}

/// One mesh vertex: rest-pose position plus its skinning influences.
///
/// Normals, UVs and material data live with the renderer, not here; the
/// playback core only moves positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub influences: SkinInfluences,
}

impl Vertex {
    #[must_use]
    pub fn new(position: Vec3, influences: SkinInfluences) -> Self {
        Self {
            position,
            influences,
        }
    }
}

/// One bone of the hierarchy.
///
/// Bones are stored parent-before-child (`parent < index`), so a single
/// forward pass composes world transforms in dependency order. Rest rotation
/// is identity; the rest pose is fully described by `rest_position` in model
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for roots.
    pub parent: Option<usize>,
    /// Model-space position of the bone in the rest pose.
    pub rest_position: Vec3,
    /// Bones whose final transform comes from the physics/IK step rather
    /// than directly from animation tracks.
    pub physics_dependent: bool,
}

impl Bone {
    #[must_use]
    pub fn new(name: &str, parent: Option<usize>, rest_position: Vec3) -> Self {
        Self {
            name: name.to_string(),
            parent,
            rest_position,
            physics_dependent: false,
        }
    }

    #[must_use]
    pub fn with_physics(mut self) -> Self {
        self.physics_dependent = true;
        self
    }
}

/// A named blend-shape: sparse rest-position offsets, scaled by a weight at
/// pose time.
#[derive(Debug, Clone, PartialEq)]
pub struct Morph {
    pub name: String,
    /// `(vertex index, offset)` pairs; vertices not listed are unaffected.
    pub offsets: Vec<(u32, Vec3)>,
}

impl Morph {
    #[must_use]
    pub fn new(name: &str, offsets: Vec<(u32, Vec3)>) -> Self {
        Self {
            name: name.to_string(),
            offsets,
        }
    }
}

/// Immutable skinned mesh: vertices, triangles, bone hierarchy and morphs.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    vertices: Vec<Vertex>,
    triangles: Vec<[u32; 3]>,
    bones: Vec<Bone>,
    morphs: Vec<Morph>,
}

impl Mesh {
    /// Builds a mesh, validating every internal index reference:
    ///
    /// - triangle indices must address an existing vertex
    /// - bone parents must precede their children
    /// - skin influences must address an existing bone
    /// - morph offsets must address an existing vertex
    pub fn new(
        name: &str,
        vertices: Vec<Vertex>,
        triangles: Vec<[u32; 3]>,
        bones: Vec<Bone>,
        morphs: Vec<Morph>,
    ) -> Result<Self> {
        let vertex_count = vertices.len();
        let bone_count = bones.len();

        for (tri_idx, tri) in triangles.iter().enumerate() {
            for &v in tri {
                if v as usize >= vertex_count {
                    return Err(PuppetError::IndexOutOfBounds {
                        context: format!("triangle {tri_idx} vertex reference"),
                        index: v as usize,
                    });
                }
            }
        }

        for (bone_idx, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= bone_idx {
                    return Err(PuppetError::IndexOutOfBounds {
                        context: format!("bone '{}' parent must precede it", bone.name),
                        index: parent,
                    });
                }
            }
        }

        for (vtx_idx, vertex) in vertices.iter().enumerate() {
            for &b in &vertex.influences.bones {
                if b as usize >= bone_count {
                    return Err(PuppetError::IndexOutOfBounds {
                        context: format!("vertex {vtx_idx} bone influence"),
                        index: b as usize,
                    });
                }
            }
        }

        for morph in &morphs {
            for &(v, _) in &morph.offsets {
                if v as usize >= vertex_count {
                    return Err(PuppetError::IndexOutOfBounds {
                        context: format!("morph '{}' vertex offset", morph.name),
                        index: v as usize,
                    });
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            vertices,
            triangles,
            bones,
            morphs,
        })
    }

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn morphs(&self) -> &[Morph] {
        &self.morphs
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Finds a bone by name; linear scan, used once at player binding time.
    #[must_use]
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Finds a morph by name; linear scan, used once at player binding time.
    #[must_use]
    pub fn morph_index(&self, name: &str) -> Option<usize> {
        self.morphs.iter().position(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new(Vec3::new(0.0, 0.0, 0.0), SkinInfluences::single(0)),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), SkinInfluences::single(0)),
            Vertex::new(Vec3::new(1.0, 1.0, 0.0), SkinInfluences::single(0)),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0), SkinInfluences::single(0)),
        ]
    }

    fn root_bone() -> Vec<Bone> {
        vec![Bone::new("root", None, Vec3::ZERO)]
    }

    #[test]
    fn valid_mesh_passes_validation() {
        let mesh = Mesh::new(
            "quad",
            quad_vertices(),
            vec![[0, 1, 2], [0, 2, 3]],
            root_bone(),
            vec![],
        );
        assert!(mesh.is_ok());
        let mesh = mesh.unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn triangle_index_out_of_range_is_rejected() {
        let result = Mesh::new(
            "bad",
            quad_vertices(),
            vec![[0, 1, 4]],
            root_bone(),
            vec![],
        );
        assert!(matches!(
            result,
            Err(PuppetError::IndexOutOfBounds { index: 4, .. })
        ));
    }

    #[test]
    fn bone_parent_must_precede_child() {
        let bones = vec![
            Bone::new("child", Some(1), Vec3::ZERO),
            Bone::new("root", None, Vec3::ZERO),
        ];
        let result = Mesh::new("bad", quad_vertices(), vec![[0, 1, 2]], bones, vec![]);
        assert!(matches!(result, Err(PuppetError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn influence_bone_out_of_range_is_rejected() {
        let mut vertices = quad_vertices();
        vertices[2].influences = SkinInfluences::single(7);
        let result = Mesh::new("bad", vertices, vec![[0, 1, 2]], root_bone(), vec![]);
        assert!(matches!(
            result,
            Err(PuppetError::IndexOutOfBounds { index: 7, .. })
        ));
    }

    #[test]
    fn morph_offset_out_of_range_is_rejected() {
        let morphs = vec![Morph::new("smile", vec![(9, Vec3::ONE)])];
        let result = Mesh::new("bad", quad_vertices(), vec![[0, 1, 2]], root_bone(), morphs);
        assert!(matches!(
            result,
            Err(PuppetError::IndexOutOfBounds { index: 9, .. })
        ));
    }

    #[test]
    fn bone_and_morph_lookup_by_name() {
        let bones = vec![
            Bone::new("root", None, Vec3::ZERO),
            Bone::new("arm", Some(0), Vec3::X),
        ];
        let morphs = vec![Morph::new("smile", vec![(0, Vec3::ONE)])];
        let mesh = Mesh::new("quad", quad_vertices(), vec![[0, 1, 2]], bones, morphs).unwrap();
        assert_eq!(mesh.bone_index("arm"), Some(1));
        assert_eq!(mesh.bone_index("leg"), None);
        assert_eq!(mesh.morph_index("smile"), Some(0));
    }
}
