//! # jigblock Geometry
//!
//! Procedural jigsaw partition of a rectangular block.
//!
//! - [`curve`]: cut-style offset functions and edge sampling
//! - [`partition`]: shared edge table and per-cell outlines
//! - [`solid`]: cap tessellation, extrusion and block-space UVs
//! - [`adjacency`]: four-neighbour grid graph
//! - [`ray`]: ray helpers used for picking and drag planes
//! - [`export`]: the seam towards file writers

pub mod adjacency;
pub mod curve;
pub mod error;
pub mod export;
pub mod partition;
pub mod ray;
pub mod solid;

pub use adjacency::{AdjacencyIndex, Edge, Neighbors};
pub use error::{GeometryError, GeometryResult};
pub use export::{ExportBundle, ExportSink, MergedMesh};
pub use partition::{partition, partition_with, EdgeTable, PieceInfo, PieceShape};
pub use ray::Ray;
pub use solid::{extrude, FaceGroup, MaterialSlot, PieceSolid};

use jigblock_core::{PuzzleParams, TextureHandle};

/// Output of one generation pass. Solids are indexed like `pieces`.
#[derive(Debug, Clone)]
pub struct Partition {
    pub params: PuzzleParams,
    pub pieces: Vec<PieceInfo>,
    pub solids: Vec<PieceSolid>,
    pub adjacency: AdjacencyIndex,
    pub texture: Option<TextureHandle>,
}

impl Partition {
    /// A partition with no pieces, as held before the first build.
    pub fn empty(params: PuzzleParams, texture: Option<TextureHandle>) -> Self {
        Self {
            params,
            pieces: Vec::new(),
            solids: Vec::new(),
            adjacency: AdjacencyIndex::new(0, 0),
            texture,
        }
    }

    /// Drops every piece and solid, returning how many solids were retired.
    pub fn clear(&mut self) -> usize {
        let retired = self.solids.len();
        self.pieces.clear();
        self.solids.clear();
        self.adjacency = AdjacencyIndex::new(0, 0);
        retired
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn info(&self, index: usize) -> Option<&PieceInfo> {
        self.pieces.get(index)
    }

    pub fn solid(&self, index: usize) -> Option<&PieceSolid> {
        self.solids.get(index)
    }

    pub fn bundle(&self) -> ExportBundle<'_> {
        ExportBundle {
            solids: &self.solids,
            side_color: self.params.side_color,
            bottom_color: self.params.bottom_color,
            texture: self.texture,
        }
    }
}

/// Cuts the block described by `params` into extruded pieces.
///
/// Parameters are trusted; validate them with [`PuzzleParams::validate`]
/// before calling with outside input.
pub fn generate_partition(
    params: &PuzzleParams,
    texture: Option<TextureHandle>,
) -> GeometryResult<Partition> {
    let adjacency = AdjacencyIndex::new(params.grid_x, params.grid_y);
    let outlines = partition_with(params, &adjacency);
    let mut pieces = Vec::with_capacity(outlines.len());
    let mut solids = Vec::with_capacity(outlines.len());
    for (info, shape) in outlines {
        solids.push(extrude(&info, &shape, params)?);
        pieces.push(info);
    }

    tracing::debug!(
        "Generated {}x{} {} partition: {} pieces, {} triangles",
        params.grid_x,
        params.grid_y,
        params.split_mode,
        pieces.len(),
        solids.iter().map(PieceSolid::triangle_count).sum::<usize>()
    );

    Ok(Partition {
        params: params.clone(),
        pieces,
        solids,
        adjacency,
        texture,
    })
}
