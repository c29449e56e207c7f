//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`PuppetError`] covers all failure modes including:
//! - Mesh and timeline loading errors
//! - Asset validation errors (out-of-range indices)
//! - I/O failures
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, PuppetError>`.
//!
//! ```rust,ignore
//! use puppet::errors::{PuppetError, Result};
//!
//! fn load_asset() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the playback core.
///
/// Every load-boundary failure is represented as a value here; nothing in
/// the per-frame pipeline panics or unwinds across the frame loop.
#[derive(Error, Debug)]
pub enum PuppetError {
    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Load Errors
    // ========================================================================
    /// The mesh file could not be interpreted.
    #[error("Malformed mesh file {path}: {reason}")]
    MalformedMesh {
        /// The file the loader was reading
        path: String,
        /// What the loader tripped over
        reason: String,
    },

    /// The timeline file could not be interpreted.
    #[error("Malformed timeline file {path}: {reason}")]
    MalformedTimeline {
        /// The file the loader was reading
        path: String,
        /// What the loader tripped over
        reason: String,
    },

    /// The file is a recognized format but an unsupported revision of it.
    #[error("Unsupported version in {path}: {version}")]
    UnsupportedVersion {
        /// The file the loader was reading
        path: String,
        /// The version string found in the file
        version: String,
    },

    /// Catch-all for loader failures that fit no specific category.
    /// Kept at the load boundary; never propagates into the frame loop.
    #[error("Loader failed: {0}")]
    LoaderFailed(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// An index inside an asset points outside the range it references.
    #[error("Index out of bounds: {context} (index: {index})")]
    IndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
    },

    /// A keyframe track was constructed without any keys.
    #[error("Empty keyframe track: {0}")]
    EmptyTrack(String),
}

/// Alias for `Result<T, PuppetError>`.
pub type Result<T> = std::result::Result<T, PuppetError>;
