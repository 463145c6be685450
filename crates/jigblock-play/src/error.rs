//! Error types for puzzle sessions.

use jigblock_geometry::GeometryError;
use thiserror::Error;

/// Errors surfaced by [`crate::PuzzleSession`].
#[derive(Error, Debug)]
pub enum SessionError {
    /// Export was requested before any solid was built.
    #[error("Nothing to export: the puzzle has no pieces")]
    NothingToExport,

    /// Generating the partition failed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The export sink reported a failure.
    #[error("Export failed: {0}")]
    Export(#[source] anyhow::Error),
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
