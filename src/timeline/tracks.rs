//! Keyframe tracks.
//!
//! A [`KeyframeTrack`] is a time-ordered list of keys sampled with a
//! [`KeyframeCursor`]: sequential playback hits an O(1) bounded scan around
//! the last sampled key, and scrubbing falls back to a binary search.
//! Keys are stored in animation-frame units (see [`crate::timeline::SAMPLE_RATE`]).

use glam::{Quat, Vec3};

use crate::errors::{PuppetError, Result};

/// Value types a track can carry.
pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// How far the cursor scans linearly before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers where the previous sample landed.
///
/// Purely an access-pattern optimization: sampling the same instant with any
/// cursor state returns the same value.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track. Times must be non-empty, sorted ascending, and match
    /// the values in length.
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        if times.is_empty() {
            return Err(PuppetError::EmptyTrack("no keyframes".to_string()));
        }
        if times.len() != values.len() {
            return Err(PuppetError::EmptyTrack(format!(
                "{} times but {} values",
                times.len(),
                values.len()
            )));
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(PuppetError::EmptyTrack(
                "keyframe times not sorted".to_string(),
            ));
        }
        Ok(Self {
            times,
            values,
            interpolation,
        })
    }

    /// Single-key track holding one value forever.
    pub fn constant(time: f32, value: T) -> Self {
        Self {
            times: vec![time],
            values: vec![value],
            interpolation: InterpolationMode::Step,
        }
    }

    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    /// Time of the last key; the track clamps beyond it.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        *self.times.last().unwrap_or(&0.0)
    }

    /// Stateless sampling; binary search every call.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let next_idx = self.times.partition_point(|&t| t <= time);
        let idx = next_idx.saturating_sub(1);
        self.sample_at_key(idx, time)
    }

    /// Sampling with a cursor. The cursor is updated to the key interval the
    /// sample landed in, so the next nearby sample resolves in O(1).
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let len = self.times.len();
        if len == 1 {
            return self.values[0];
        }

        let i = cursor.last_index;
        // Cursor may be stale if it came from another track; treat as 0.
        let t_curr = *self.times.get(i).unwrap_or(&self.times[0]);

        let found = if time >= t_curr {
            // Forward scan: playback and fast-forward.
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward scan: loop restart or reverse playback.
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = match found {
            Some(idx) => {
                cursor.last_index = idx;
                idx
            }
            None => {
                // Large jump: binary search fallback.
                let next_idx = self.times.partition_point(|&t| t <= time);
                let idx = next_idx.saturating_sub(1);
                cursor.last_index = idx;
                idx
            }
        };

        self.sample_at_key(final_index, time)
    }

    fn sample_at_key(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            return self.values[len - 1];
        }
        // Before the first key: clamp to the first value.
        if time <= self.times[0] {
            return self.values[0];
        }

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                let t0 = self.times[index];
                let t1 = self.times[index + 1];
                let dt = t1 - t0;
                let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
                T::interpolate_linear(self.values[index], self.values[index + 1], t.clamp(0.0, 1.0))
            }
        }
    }
}
