//! Loader capability seams and startup input selection.
//!
//! Binary parsing of mesh and timeline formats lives outside this crate;
//! these traits are the boundary it is invoked through. Errors cross the
//! boundary as [`PuppetError`] values and never unwind into the frame loop.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::mesh::Mesh;
use crate::timeline::AnimationTimeline;

/// Produces an in-memory [`Mesh`] from a file.
pub trait MeshLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh>;
}

/// Produces an in-memory [`AnimationTimeline`] from a file.
pub trait TimelineLoader {
    fn load_timeline(&self, path: &Path) -> Result<AnimationTimeline>;
}

/// Startup file selection, classified by extension.
///
/// `.pmx` selects the mesh, `.vmd` the timeline, case-insensitive; other
/// arguments are ignored and a later path of the same kind wins. Built once
/// before the frame loop starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSelection {
    pub mesh_path: Option<PathBuf>,
    pub timeline_path: Option<PathBuf>,
}

impl InputSelection {
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::default();
        for arg in args {
            let path = PathBuf::from(arg.into());
            match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("pmx") => {
                    selection.mesh_path = Some(path);
                }
                Some(ext) if ext.eq_ignore_ascii_case("vmd") => {
                    selection.timeline_path = Some(path);
                }
                _ => {}
            }
        }
        selection
    }
}
