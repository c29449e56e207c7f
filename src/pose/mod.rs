//! Pose state and vertex deformation for one mesh instance.
//!
//! A [`PoseEngine`] owns the mutable per-frame pose of a single [`Mesh`]:
//! bone-local pose targets, morph weights, the composed world transforms and
//! the deformed vertex positions ([`PoseImage`]). The per-frame contract is
//!
//! `reset_posing → (pose mutation) → pre_physics_posing → post_physics_posing → deform`
//!
//! Calling out of order produces a stale or rest pose, never an out-of-bounds
//! read; every buffer is sized from the mesh at construction.

use glam::{Affine3A, Quat, Vec3};

use crate::mesh::Mesh;

/// Bone-local pose target, relative to the rest pose.
///
/// `default()` is the rest pose: zero translation offset, identity rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Deformed vertex positions, one per mesh vertex, rewritten every frame.
///
/// Public so consumers can read it directly after `deform`; a consumer must
/// skip the frame if `positions.len()` is smaller than the mesh vertex count.
#[derive(Debug, Clone, Default)]
pub struct PoseImage {
    pub positions: Vec<Vec3>,
}

impl PoseImage {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Per-instance pose state and deformation for one mesh.
///
/// Exactly one engine exists per loaded mesh; it is rebuilt when the mesh is
/// replaced. The engine never stores the mesh itself — callers pass the same
/// mesh back in, which keeps ownership with the asset store.
#[derive(Debug)]
pub struct PoseEngine {
    bone_poses: Vec<BonePose>,
    morph_weights: Vec<f32>,
    /// Model-space transform of each bone, composed parent-before-child.
    world_transforms: Vec<Affine3A>,
    /// Rest-pose model-space bone positions; `world * translate(-rest)` is
    /// the skinning matrix (rest rotation is identity).
    rest_positions: Vec<Vec3>,
    /// Scratch buffer for morph-displaced rest positions.
    morphed: Vec<Vec3>,
    pub pose_image: PoseImage,
}

impl PoseEngine {
    #[must_use]
    pub fn new(mesh: &Mesh) -> Self {
        let bone_count = mesh.bone_count();
        let rest_positions = mesh.bones().iter().map(|b| b.rest_position).collect();
        Self {
            bone_poses: vec![BonePose::default(); bone_count],
            morph_weights: vec![0.0; mesh.morphs().len()],
            world_transforms: mesh
                .bones()
                .iter()
                .map(|b| Affine3A::from_translation(b.rest_position))
                .collect(),
            rest_positions,
            morphed: Vec::with_capacity(mesh.vertex_count()),
            pose_image: PoseImage::default(),
        }
    }

    /// Clears all bone poses and morph weights back to the rest state.
    ///
    /// First call of every frame; guarantees nothing leaks across frames.
    pub fn reset_posing(&mut self) {
        for pose in &mut self.bone_poses {
            *pose = BonePose::default();
        }
        for weight in &mut self.morph_weights {
            *weight = 0.0;
        }
    }

    /// Writes one bone's pose target. Out-of-range indices are ignored
    /// (a timeline can legally carry tracks the mesh cannot bind).
    pub fn set_bone_pose(&mut self, index: usize, pose: BonePose) {
        if let Some(slot) = self.bone_poses.get_mut(index) {
            *slot = pose;
        }
    }

    /// Writes one morph weight. Out-of-range indices are ignored.
    pub fn set_morph_weight(&mut self, index: usize, weight: f32) {
        if let Some(slot) = self.morph_weights.get_mut(index) {
            *slot = weight;
        }
    }

    #[inline]
    #[must_use]
    pub fn bone_pose(&self, index: usize) -> Option<&BonePose> {
        self.bone_poses.get(index)
    }

    #[inline]
    #[must_use]
    pub fn morph_weight(&self, index: usize) -> Option<f32> {
        self.morph_weights.get(index).copied()
    }

    #[inline]
    #[must_use]
    pub fn world_transform(&self, index: usize) -> Option<&Affine3A> {
        self.world_transforms.get(index)
    }

    /// Composes world transforms for all bones NOT flagged physics-dependent,
    /// parent before child. Must run after pose mutation for the frame.
    pub fn pre_physics_posing(&mut self, mesh: &Mesh) {
        self.compose_world_transforms(mesh, false);
    }

    /// Finalizes world transforms for physics-dependent bones. The physics
    /// step itself is an external capability; this pass only guarantees that
    /// those bones are composed after it had its chance to write targets.
    pub fn post_physics_posing(&mut self, mesh: &Mesh) {
        self.compose_world_transforms(mesh, true);
    }

    fn compose_world_transforms(&mut self, mesh: &Mesh, physics_pass: bool) {
        for (i, bone) in mesh.bones().iter().enumerate() {
            if bone.physics_dependent != physics_pass {
                continue;
            }
            let pose = self.bone_poses[i];
            // Local rest offset from the parent's rest position; roots sit
            // at their model-space rest position directly.
            let (parent_world, parent_rest) = match bone.parent {
                Some(p) => (self.world_transforms[p], self.rest_positions[p]),
                None => (Affine3A::IDENTITY, Vec3::ZERO),
            };
            let local = Affine3A::from_rotation_translation(
                pose.rotation,
                bone.rest_position - parent_rest + pose.translation,
            );
            self.world_transforms[i] = parent_world * local;
        }
    }

    /// Applies morph offsets and linear-blend skinning, rewriting the pose
    /// image from the rest-pose mesh and the composed world transforms.
    pub fn deform(&mut self, mesh: &Mesh) {
        // 1. Morph-displaced rest positions.
        self.morphed.clear();
        self.morphed
            .extend(mesh.vertices().iter().map(|v| v.position));
        for (morph, &weight) in mesh.morphs().iter().zip(&self.morph_weights) {
            if weight == 0.0 {
                continue;
            }
            for &(vertex, offset) in &morph.offsets {
                self.morphed[vertex as usize] += offset * weight;
            }
        }

        // 2. Linear-blend skinning into the pose image.
        self.pose_image.positions.clear();
        self.pose_image
            .positions
            .reserve(mesh.vertex_count());
        for (vertex, &base) in mesh.vertices().iter().zip(&self.morphed) {
            let influences = &vertex.influences;
            let mut skinned = Vec3::ZERO;
            let mut total_weight = 0.0;
            for (&bone, &weight) in influences.bones.iter().zip(&influences.weights) {
                if weight == 0.0 {
                    continue;
                }
                let world = self.world_transforms[bone as usize];
                let rest = self.rest_positions[bone as usize];
                skinned += world.transform_point3(base - rest) * weight;
                total_weight += weight;
            }
            // Unweighted vertices keep their (morphed) rest position.
            let position = if total_weight > 0.0 { skinned } else { base };
            self.pose_image.positions.push(position);
        }
    }
}
