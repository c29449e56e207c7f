//! Per-frame driver of the playback pipeline.
//!
//! [`FrameOrchestrator`] is the explicit context object that owns every piece
//! of playback state — asset store, pose engine, timeline player, geometry
//! bridge — and runs the fixed frame sequence:
//!
//! 1. `reset_posing`
//! 2. `seek_frame` (only when a timeline is loaded)
//! 3. `pre_physics_posing`, `post_physics_posing` — unconditionally, so a
//!    mesh with no driving animation still resolves a stable rest pose
//! 4. `deform`
//! 5. `sync_deformed_vertices`
//!
//! With no mesh loaded, a frame does nothing and the geometry buffers stay
//! as they were.

use std::path::Path;

use crate::assets::loader::{MeshLoader, TimelineLoader};
use crate::assets::AssetStore;
use crate::bridge::{GeometryBridge, GeometryBuffers};
use crate::errors::Result;
use crate::mesh::Mesh;
use crate::player::TimelinePlayer;
use crate::pose::PoseEngine;
use crate::timeline::{frame_for_time, AnimationTimeline};

/// Owns and sequences the whole playback pipeline for one mesh instance.
#[derive(Debug, Default)]
pub struct FrameOrchestrator {
    assets: AssetStore,
    pose: Option<PoseEngine>,
    player: Option<TimelinePlayer>,
    bridge: GeometryBridge,
    /// Frame index computed by the most recent `advance`.
    current_frame: u64,
    /// Last frame number reported to the log, so progress is emitted once
    /// per second instead of once per rendered frame.
    last_reported_frame: u64,
}

impl FrameOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load lifecycle (blocking, outside the frame loop)
    // ========================================================================

    /// Loads a mesh through the given loader capability.
    ///
    /// On failure the error is reported and returned, and every piece of
    /// prior state — stored mesh, pose engine, player, geometry buffers —
    /// is left exactly as it was.
    pub fn load_mesh(&mut self, path: &Path, loader: &dyn MeshLoader) -> Result<()> {
        match loader.load_mesh(path) {
            Ok(mesh) => {
                self.install_mesh(mesh);
                Ok(())
            }
            Err(err) => {
                log::error!("failed to load mesh '{}': {err}", path.display());
                Err(err)
            }
        }
    }

    /// Loads a timeline through the given loader capability; same failure
    /// semantics as [`load_mesh`](Self::load_mesh).
    pub fn load_timeline(&mut self, path: &Path, loader: &dyn TimelineLoader) -> Result<()> {
        match loader.load_timeline(path) {
            Ok(timeline) => {
                self.install_timeline(timeline);
                Ok(())
            }
            Err(err) => {
                log::error!("failed to load timeline '{}': {err}", path.display());
                Err(err)
            }
        }
    }

    /// Installs an already-built mesh: replaces the stored one, rebuilds the
    /// pose engine for it, republishes topology, and rebinds the player if a
    /// timeline is present.
    pub fn install_mesh(&mut self, mesh: Mesh) {
        log::info!(
            "Loaded mesh '{}': {} vertices, {} triangles, {} bones",
            mesh.name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.bone_count()
        );
        self.pose = Some(PoseEngine::new(&mesh));
        self.bridge.sync_topology(&mesh);
        self.assets.install_mesh(mesh);
        self.rebuild_player();
    }

    /// Installs an already-built timeline and rebinds the player if a
    /// mesh-bound pose engine exists. Without one, playback silently waits —
    /// a timeline alone is nothing to animate yet.
    pub fn install_timeline(&mut self, timeline: AnimationTimeline) {
        log::info!(
            "Loaded timeline '{}': {} tracks, {} frames",
            timeline.name,
            timeline.track_count(),
            timeline.duration_frames()
        );
        self.assets.install_timeline(timeline);
        self.rebuild_player();
    }

    /// The player exists only while both of its dependencies do; it is
    /// rebuilt from scratch whenever either side changes.
    fn rebuild_player(&mut self) {
        self.player = match (self.assets.timeline(), self.assets.mesh(), &self.pose) {
            (Some(timeline), Some(mesh), Some(_)) => Some(TimelinePlayer::new(timeline, mesh)),
            _ => None,
        };
    }

    // ========================================================================
    // Per-frame pipeline
    // ========================================================================

    /// Runs one frame of the pipeline at the given elapsed wall-clock time.
    ///
    /// `elapsed_seconds` is host-supplied and expected to be monotonic; the
    /// discrete animation frame is `floor(elapsed * 30)`.
    pub fn advance(&mut self, elapsed_seconds: f32) {
        let (Some(mesh), Some(engine)) = (self.assets.mesh(), self.pose.as_mut()) else {
            return;
        };

        engine.reset_posing();

        let frame = frame_for_time(elapsed_seconds);
        self.current_frame = frame;

        if let (Some(timeline), Some(player)) = (self.assets.timeline(), self.player.as_mut()) {
            player.seek_frame(frame, timeline, engine);

            if frame != self.last_reported_frame && frame % 30 == 0 {
                log::debug!("animation frame {frame} (time: {elapsed_seconds}s)");
                self.last_reported_frame = frame;
            }
        }

        // Posing runs whether or not a timeline drove targets this frame:
        // an undriven mesh still resolves its rest pose through the
        // hierarchy every frame.
        engine.pre_physics_posing(mesh);
        engine.post_physics_posing(mesh);
        engine.deform(mesh);

        self.bridge.sync_deformed_vertices(&engine.pose_image);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The renderer-facing vertex/index buffers for the current frame.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &GeometryBuffers {
        self.bridge.buffers()
    }

    /// Frame index computed by the most recent [`advance`](Self::advance).
    #[inline]
    #[must_use]
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    #[inline]
    #[must_use]
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    #[inline]
    #[must_use]
    pub fn pose_engine(&self) -> Option<&PoseEngine> {
        self.pose.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn pose_engine_mut(&mut self) -> Option<&mut PoseEngine> {
        self.pose.as_mut()
    }

    #[inline]
    #[must_use]
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }
}
