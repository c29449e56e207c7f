//! Timeline playback: maps a discrete frame index onto pose-engine targets.
//!
//! A [`TimelinePlayer`] is built only when a mesh-bound [`PoseEngine`] and an
//! [`AnimationTimeline`] exist at the same time, and is rebuilt whenever
//! either side changes. Track names are resolved to bone/morph indices once,
//! at construction; tracks that name nothing in the mesh are dropped.

use crate::mesh::Mesh;
use crate::pose::{BonePose, PoseEngine};
use crate::timeline::AnimationTimeline;
use crate::timeline::tracks::KeyframeCursor;

/// Binding of one bone track to a mesh bone, with sampling cursors.
#[derive(Debug, Clone)]
struct BoneBinding {
    track_index: usize,
    bone_index: usize,
    translation_cursor: KeyframeCursor,
    rotation_cursor: KeyframeCursor,
}

/// Binding of one morph track to a mesh morph target.
#[derive(Debug, Clone)]
struct MorphBinding {
    track_index: usize,
    morph_index: usize,
    weight_cursor: KeyframeCursor,
}

/// Seeks an animation timeline and writes the sampled pose into a
/// [`PoseEngine`].
///
/// The player holds only resolved bindings and cursors; the timeline stays
/// owned by the asset store and is borrowed per seek. Seeking is idempotent
/// for a fixed frame: cursors change lookup cost, never the sampled values.
#[derive(Debug)]
pub struct TimelinePlayer {
    bone_bindings: Vec<BoneBinding>,
    morph_bindings: Vec<MorphBinding>,
}

impl TimelinePlayer {
    /// Resolves the timeline's track names against the mesh.
    ///
    /// Unresolvable tracks are skipped silently — a timeline recorded for a
    /// different mesh is "nothing to animate", not an error.
    #[must_use]
    pub fn new(timeline: &AnimationTimeline, mesh: &Mesh) -> Self {
        let mut bone_bindings = Vec::with_capacity(timeline.bone_tracks.len());
        for (track_index, track) in timeline.bone_tracks.iter().enumerate() {
            if let Some(bone_index) = mesh.bone_index(&track.bone_name) {
                bone_bindings.push(BoneBinding {
                    track_index,
                    bone_index,
                    translation_cursor: KeyframeCursor::default(),
                    rotation_cursor: KeyframeCursor::default(),
                });
            } else {
                log::debug!(
                    "timeline '{}': no bone named '{}' in mesh, track skipped",
                    timeline.name,
                    track.bone_name
                );
            }
        }

        let mut morph_bindings = Vec::with_capacity(timeline.morph_tracks.len());
        for (track_index, track) in timeline.morph_tracks.iter().enumerate() {
            if let Some(morph_index) = mesh.morph_index(&track.morph_name) {
                morph_bindings.push(MorphBinding {
                    track_index,
                    morph_index,
                    weight_cursor: KeyframeCursor::default(),
                });
            } else {
                log::debug!(
                    "timeline '{}': no morph named '{}' in mesh, track skipped",
                    timeline.name,
                    track.morph_name
                );
            }
        }

        Self {
            bone_bindings,
            morph_bindings,
        }
    }

    /// Number of tracks that resolved against the mesh.
    #[must_use]
    pub fn bound_track_count(&self) -> usize {
        self.bone_bindings.len() + self.morph_bindings.len()
    }

    /// Samples every bound track at `frame` and writes absolute pose targets
    /// into the engine. The next `pre_physics_posing` consumes them.
    pub fn seek_frame(
        &mut self,
        frame: u64,
        timeline: &AnimationTimeline,
        engine: &mut PoseEngine,
    ) {
        let at = frame as f32;

        for binding in &mut self.bone_bindings {
            let track = &timeline.bone_tracks[binding.track_index];
            let translation = track
                .translations
                .sample_with_cursor(at, &mut binding.translation_cursor);
            let rotation = track
                .rotations
                .sample_with_cursor(at, &mut binding.rotation_cursor);
            engine.set_bone_pose(
                binding.bone_index,
                BonePose {
                    translation,
                    rotation,
                },
            );
        }

        for binding in &mut self.morph_bindings {
            let track = &timeline.morph_tracks[binding.track_index];
            let weight = track
                .weights
                .sample_with_cursor(at, &mut binding.weight_cursor);
            engine.set_morph_weight(binding.morph_index, weight);
        }
    }
}
