#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod bridge;
pub mod errors;
pub mod mesh;
pub mod orchestrator;
pub mod player;
pub mod pose;
pub mod timeline;

pub use assets::AssetStore;
pub use assets::loader::{InputSelection, MeshLoader, TimelineLoader};
pub use bridge::{GeometryBridge, GeometryBuffers};
pub use errors::{PuppetError, Result};
pub use mesh::{Bone, Mesh, Morph, SkinInfluences, Vertex};
pub use orchestrator::FrameOrchestrator;
pub use player::TimelinePlayer;
pub use pose::{BonePose, PoseEngine, PoseImage};
pub use timeline::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use timeline::{AnimationTimeline, BoneTrack, MorphTrack, SAMPLE_RATE, frame_for_time};
