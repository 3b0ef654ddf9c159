//! Error types for the mdview core.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for viewer operations.
///
/// Every variant is recoverable and local: none of them aborts the
/// application. Load and slot errors are surfaced to the user, persistence
/// errors silently fall back to computed defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// Every viewport slot already holds a mesh
    #[error("all {capacity} viewport slots are occupied")]
    SlotsFull { capacity: usize },

    /// A close was requested with no mesh loaded
    #[error("no mesh to close")]
    NoMeshLoaded,

    /// The engine could not produce a mesh node for the given path
    #[error("failed to load mesh {path}: {reason}")]
    MeshLoad { path: PathBuf, reason: String },

    /// Persisted window geometry is unreadable or out of range
    #[error("persisted window geometry rejected: {0}")]
    PersistCorrupt(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a mesh-load error for the given path.
    pub fn mesh_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MeshLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, Error>;
