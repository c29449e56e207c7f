//! Animation timeline: named keyframe tracks for bones and morphs.
//!
//! Track keys are expressed in animation frames at a fixed [`SAMPLE_RATE`] of
//! 30 samples per second. The time→frame mapping lives here because it has no
//! dependency on interpolation math; sampling between keys is the job of
//! [`tracks::KeyframeTrack`].

pub mod tracks;

use glam::{Quat, Vec3};

use self::tracks::KeyframeTrack;

/// Animation samples per second of playback time.
pub const SAMPLE_RATE: f32 = 30.0;

/// Maps monotonic elapsed time to a discrete animation frame index.
///
/// `frame = floor(seconds * 30)`, so `1.0s → 30` and `0.999s → 29`.
/// Negative inputs clamp to frame 0.
#[must_use]
pub fn frame_for_time(seconds: f32) -> u64 {
    if seconds <= 0.0 {
        return 0;
    }
    (seconds * SAMPLE_RATE).floor() as u64
}

/// Keyframed pose of one bone: translation offset and rotation, both
/// relative to the bone's rest pose.
#[derive(Debug, Clone)]
pub struct BoneTrack {
    pub bone_name: String,
    pub translations: KeyframeTrack<Vec3>,
    pub rotations: KeyframeTrack<Quat>,
}

/// Keyframed weight of one morph target.
#[derive(Debug, Clone)]
pub struct MorphTrack {
    pub morph_name: String,
    pub weights: KeyframeTrack<f32>,
}

/// A named, immutable collection of bone and morph tracks.
#[derive(Debug, Clone)]
pub struct AnimationTimeline {
    pub name: String,
    pub bone_tracks: Vec<BoneTrack>,
    pub morph_tracks: Vec<MorphTrack>,
}

impl AnimationTimeline {
    #[must_use]
    pub fn new(name: &str, bone_tracks: Vec<BoneTrack>, morph_tracks: Vec<MorphTrack>) -> Self {
        Self {
            name: name.to_string(),
            bone_tracks,
            morph_tracks,
        }
    }

    /// Last keyed frame across all tracks.
    #[must_use]
    pub fn duration_frames(&self) -> f32 {
        let bone_end = self
            .bone_tracks
            .iter()
            .map(|t| t.translations.end_time().max(t.rotations.end_time()))
            .fold(0.0_f32, f32::max);
        let morph_end = self
            .morph_tracks
            .iter()
            .map(|t| t.weights.end_time())
            .fold(0.0_f32, f32::max);
        bone_end.max(morph_end)
    }

    #[must_use]
    pub fn track_count(&self) -> usize {
        self.bone_tracks.len() + self.morph_tracks.len()
    }
}
