//! Asset ownership: the store that holds the loaded mesh and timeline.

pub mod loader;

pub use loader::{InputSelection, MeshLoader, TimelineLoader};

use crate::mesh::Mesh;
use crate::timeline::AnimationTimeline;

/// Single owner of the loaded [`Mesh`] and [`AnimationTimeline`].
///
/// Dependents (pose engine, player, bridge) never own assets; they borrow
/// from the store per call. Installation replaces the previous asset; a
/// failed load never reaches installation, so prior state survives failed
/// attempts untouched.
#[derive(Debug, Default)]
pub struct AssetStore {
    mesh: Option<Mesh>,
    timeline: Option<AnimationTimeline>,
}

impl AssetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> Option<&AnimationTimeline> {
        self.timeline.as_ref()
    }

    /// Replaces the stored mesh, returning the previous one if any.
    pub fn install_mesh(&mut self, mesh: Mesh) -> Option<Mesh> {
        self.mesh.replace(mesh)
    }

    /// Replaces the stored timeline, returning the previous one if any.
    pub fn install_timeline(&mut self, timeline: AnimationTimeline) -> Option<AnimationTimeline> {
        self.timeline.replace(timeline)
    }
}
