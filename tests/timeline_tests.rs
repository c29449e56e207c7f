//! Timeline Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step interpolation and clamping
//! - KeyframeCursor fast path vs. stateless sampling
//! - Track construction validation
//! - AnimationTimeline duration computation
//! - Wall-clock time to animation frame mapping

use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

use puppet::errors::PuppetError;
use puppet::timeline::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
use puppet::timeline::{frame_for_time, AnimationTimeline, BoneTrack, MorphTrack, SAMPLE_RATE};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Linear Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    )
    .unwrap();

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframes() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    )
    .unwrap();

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 10.0));
    assert!(approx(track.sample_with_cursor(2.0, &mut cursor), 20.0));
}

#[test]
fn track_clamps_beyond_last_key() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    )
    .unwrap();

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor), 10.0));
}

#[test]
fn track_clamps_before_first_key() {
    let track = KeyframeTrack::new(
        vec![1.0, 2.0],
        vec![10.0_f32, 20.0],
        InterpolationMode::Linear,
    )
    .unwrap();

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 10.0));
}

#[test]
fn track_linear_vec3_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    )
    .unwrap();

    let val = track.sample(0.5);
    assert!((val - Vec3::new(5.0, 10.0, 15.0)).length() < EPSILON);
}

#[test]
fn track_quat_slerp_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 2.0],
        vec![Quat::IDENTITY, Quat::from_rotation_z(FRAC_PI_2)],
        InterpolationMode::Linear,
    )
    .unwrap();

    let val = track.sample(1.0);
    let expected = Quat::from_rotation_z(FRAC_PI_2 / 2.0);
    assert!(val.angle_between(expected) < 1e-4);
}

// ============================================================================
// KeyframeTrack: Step Interpolation
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    )
    .unwrap();

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(0.99, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 100.0));
    assert!(approx(track.sample_with_cursor(1.5, &mut cursor), 100.0));
}

// ============================================================================
// KeyframeCursor
// ============================================================================

#[test]
fn cursor_sampling_matches_stateless_sampling() {
    let times: Vec<f32> = (0..32).map(|i| i as f32).collect();
    let values: Vec<f32> = (0..32).map(|i| (i * i) as f32).collect();
    let track = KeyframeTrack::new(times, values, InterpolationMode::Linear).unwrap();

    // Sequential playback, a backward jump (loop restart), then a scrub far
    // ahead: the cursor must never change the sampled value.
    let pattern = [0.5, 1.5, 2.25, 3.9, 4.0, 0.25, 0.75, 28.5, 30.1, 5.5];
    let mut cursor = KeyframeCursor::default();
    for &t in &pattern {
        let with_cursor = track.sample_with_cursor(t, &mut cursor);
        let stateless = track.sample(t);
        assert!(
            approx(with_cursor, stateless),
            "at {t}: cursor {with_cursor} vs stateless {stateless}"
        );
    }
}

#[test]
fn single_key_track_is_constant() {
    let track = KeyframeTrack::constant(0.0, 42.0_f32);
    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 42.0));
    assert!(approx(track.sample_with_cursor(100.0, &mut cursor), 42.0));
}

// ============================================================================
// Track construction validation
// ============================================================================

#[test]
fn empty_track_is_rejected() {
    let result = KeyframeTrack::<f32>::new(vec![], vec![], InterpolationMode::Linear);
    assert!(matches!(result, Err(PuppetError::EmptyTrack(_))));
}

#[test]
fn mismatched_lengths_are_rejected() {
    let result = KeyframeTrack::new(vec![0.0, 1.0], vec![1.0_f32], InterpolationMode::Linear);
    assert!(matches!(result, Err(PuppetError::EmptyTrack(_))));
}

#[test]
fn unsorted_times_are_rejected() {
    let result = KeyframeTrack::new(
        vec![1.0, 0.5],
        vec![0.0_f32, 1.0],
        InterpolationMode::Linear,
    );
    assert!(matches!(result, Err(PuppetError::EmptyTrack(_))));
}

// ============================================================================
// AnimationTimeline
// ============================================================================

#[test]
fn timeline_duration_is_last_key_over_all_tracks() {
    let bone = BoneTrack {
        bone_name: "root".to_string(),
        translations: KeyframeTrack::new(
            vec![0.0, 45.0],
            vec![Vec3::ZERO, Vec3::ONE],
            InterpolationMode::Linear,
        )
        .unwrap(),
        rotations: KeyframeTrack::constant(0.0, Quat::IDENTITY),
    };
    let morph = MorphTrack {
        morph_name: "smile".to_string(),
        weights: KeyframeTrack::new(
            vec![0.0, 90.0],
            vec![0.0_f32, 1.0],
            InterpolationMode::Linear,
        )
        .unwrap(),
    };
    let timeline = AnimationTimeline::new("dance", vec![bone], vec![morph]);

    assert!(approx(timeline.duration_frames(), 90.0));
    assert_eq!(timeline.track_count(), 2);
}

// ============================================================================
// Time → frame mapping
// ============================================================================

#[test]
fn frame_mapping_is_floor_of_time_times_rate() {
    assert!(approx(SAMPLE_RATE, 30.0));
    assert_eq!(frame_for_time(0.0), 0);
    assert_eq!(frame_for_time(0.999), 29);
    assert_eq!(frame_for_time(1.0), 30);
    assert_eq!(frame_for_time(2.0), 60);
    assert_eq!(frame_for_time(0.0333), 0);
    assert_eq!(frame_for_time(0.0334), 1);
}

#[test]
fn frame_mapping_clamps_negative_time() {
    assert_eq!(frame_for_time(-1.0), 0);
}
