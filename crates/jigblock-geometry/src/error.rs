//! Error types for partition generation.

use thiserror::Error;

/// Errors raised while turning outlines into solids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The cap fill tessellator rejected an outline.
    #[error("Tessellation failed: {0}")]
    Tessellation(String),

    /// An outline has too few points to enclose an area.
    #[error("Piece {index} has a degenerate outline ({points} points)")]
    DegenerateOutline { index: usize, points: usize },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
