//! Grid adjacency
//!
//! Four-neighbour graph over the piece grid. Pieces are numbered row-major,
//! `index = row * grid_x + col`, with row 0 at the bottom of the block.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// The side of the neighbour that touches this side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// Indices of the pieces sharing an edge with one piece; `None` on the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Neighbors {
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub top: Option<usize>,
    pub bottom: Option<usize>,
}

impl Neighbors {
    pub fn get(&self, edge: Edge) -> Option<usize> {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    /// Present neighbours with the edge they sit on.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, usize)> + '_ {
        Edge::ALL
            .into_iter()
            .filter_map(move |edge| self.get(edge).map(|idx| (edge, idx)))
    }
}

/// Neighbour table for a `grid_x` by `grid_y` partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyIndex {
    grid_x: usize,
    grid_y: usize,
    neighbors: Vec<Neighbors>,
}

impl AdjacencyIndex {
    pub fn new(grid_x: u32, grid_y: u32) -> Self {
        let gx = grid_x as usize;
        let gy = grid_y as usize;
        let idx = |col: usize, row: usize| row * gx + col;

        let mut neighbors = Vec::with_capacity(gx * gy);
        for row in 0..gy {
            for col in 0..gx {
                neighbors.push(Neighbors {
                    left: (col > 0).then(|| idx(col - 1, row)),
                    right: (col + 1 < gx).then(|| idx(col + 1, row)),
                    bottom: (row > 0).then(|| idx(col, row - 1)),
                    top: (row + 1 < gy).then(|| idx(col, row + 1)),
                });
            }
        }

        Self {
            grid_x: gx,
            grid_y: gy,
            neighbors,
        }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn index_of(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.grid_x && row < self.grid_y).then(|| row * self.grid_x + col)
    }

    /// `(col, row)` of a piece index.
    pub fn cell_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.neighbors.len()).then(|| (index % self.grid_x, index / self.grid_x))
    }

    pub fn get(&self, index: usize) -> Option<&Neighbors> {
        self.neighbors.get(index)
    }

    /// Side of `a` that touches `b`, if they are grid neighbours.
    pub fn edge_between(&self, a: usize, b: usize) -> Option<Edge> {
        self.get(a)?
            .iter()
            .find_map(|(edge, idx)| (idx == b).then_some(edge))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Neighbors> {
        self.neighbors.iter()
    }
}
