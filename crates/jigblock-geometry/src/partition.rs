//! Piece partitioner
//!
//! Cuts the block's footprint into `grid_x * grid_y` closed outlines. Every
//! grid-line segment is sampled exactly once into an [`EdgeTable`]; the two
//! cells on either side of it read the same points, one of them reversed, so
//! neighbouring outlines coincide exactly whatever the cut style.

use crate::adjacency::{AdjacencyIndex, Neighbors};
use crate::curve;
use glam::DVec2;
use jigblock_core::{PuzzleParams, SplitMode};
use serde::{Deserialize, Serialize};

/// Grid placement and assembled position of one piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceInfo {
    pub col: usize,
    pub row: usize,
    pub index: usize,
    /// Centroid of the outline in block coordinates
    pub center_x: f64,
    pub center_y: f64,
    pub neighbors: Neighbors,
}

impl PieceInfo {
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.center_x, self.center_y)
    }
}

/// Closed outline of a piece in its local frame (origin at its centroid).
///
/// The ring is implicitly closed: the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieceShape {
    pub points: Vec<DVec2>,
}

impl PieceShape {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn bounds(&self) -> (DVec2, DVec2) {
        self.points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }
}

/// Sampled grid-line segments shared between neighbouring cells.
///
/// `horizontal[line][col]` runs left to right along `y = line * piece_h`;
/// `vertical[line][row]` runs bottom to top along `x = line * piece_w`.
/// Lines on the block border are always straight.
#[derive(Debug, Clone)]
pub struct EdgeTable {
    horizontal: Vec<Vec<Vec<DVec2>>>,
    vertical: Vec<Vec<Vec<DVec2>>>,
}

impl EdgeTable {
    pub fn new(params: &PuzzleParams) -> Self {
        let gx = params.grid_x as usize;
        let gy = params.grid_y as usize;
        let pw = params.piece_width();
        let ph = params.piece_height();
        let amplitude = params.amplitude();
        let res = params.curve_resolution;

        let style_for = |line: usize, last: usize| {
            if line == 0 || line == last {
                SplitMode::Straight
            } else {
                params.split_mode
            }
        };

        let horizontal = (0..=gy)
            .map(|line| {
                let style = style_for(line, gy);
                let y = line as f64 * ph;
                (0..gx)
                    .map(|col| {
                        let x0 = col as f64 * pw;
                        curve::sample_horizontal(x0, x0 + pw, y, style, amplitude, res)
                    })
                    .collect()
            })
            .collect();

        let vertical = (0..=gx)
            .map(|line| {
                let style = style_for(line, gx);
                let x = line as f64 * pw;
                (0..gy)
                    .map(|row| {
                        let y0 = row as f64 * ph;
                        curve::sample_vertical(x, y0, y0 + ph, style, amplitude, res)
                    })
                    .collect()
            })
            .collect();

        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal(&self, line: usize, col: usize) -> Option<&[DVec2]> {
        self.horizontal.get(line)?.get(col).map(Vec::as_slice)
    }

    pub fn vertical(&self, line: usize, row: usize) -> Option<&[DVec2]> {
        self.vertical.get(line)?.get(row).map(Vec::as_slice)
    }

    /// Global outline of cell `(col, row)`, counter-clockwise from its
    /// bottom-left corner, with no repeated corner points.
    pub fn cell_ring(&self, col: usize, row: usize) -> Vec<DVec2> {
        let (Some(bottom), Some(right), Some(top), Some(left)) = (
            self.horizontal(row, col),
            self.vertical(col + 1, row),
            self.horizontal(row + 1, col),
            self.vertical(col, row),
        ) else {
            return Vec::new();
        };

        let mut ring = Vec::with_capacity(bottom.len() + right.len() + top.len() + left.len());
        ring.extend_from_slice(bottom);
        ring.extend(right.iter().skip(1));
        ring.extend(top.iter().rev().skip(1));
        // The last left point is the bottom-left corner we started from.
        let left_len = left.len();
        ring.extend(left.iter().rev().skip(1).take(left_len.saturating_sub(2)));
        ring
    }
}

/// Partitions the block into piece outlines.
///
/// Returns one `(PieceInfo, PieceShape)` per cell in row-major order.
pub fn partition(params: &PuzzleParams) -> Vec<(PieceInfo, PieceShape)> {
    partition_with(params, &AdjacencyIndex::new(params.grid_x, params.grid_y))
}

/// Like [`partition`], reading neighbour sets from a prebuilt index for the
/// same grid.
pub fn partition_with(
    params: &PuzzleParams,
    adjacency: &AdjacencyIndex,
) -> Vec<(PieceInfo, PieceShape)> {
    let table = EdgeTable::new(params);
    let gx = params.grid_x as usize;
    let gy = params.grid_y as usize;

    let mut pieces = Vec::with_capacity(gx * gy);
    for row in 0..gy {
        for col in 0..gx {
            let index = row * gx + col;
            let ring = table.cell_ring(col, row);
            let center = centroid(&ring);
            let points = ring.into_iter().map(|p| p - center).collect();
            pieces.push((
                PieceInfo {
                    col,
                    row,
                    index,
                    center_x: center.x,
                    center_y: center.y,
                    neighbors: adjacency.get(index).copied().unwrap_or_default(),
                },
                PieceShape { points },
            ));
        }
    }
    pieces
}

/// Shoelace signed area.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        acc += points[i].perp_dot(points[(i + 1) % n]);
    }
    acc / 2.0
}

/// Area centroid; falls back to the vertex mean for degenerate rings.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    // Accumulate relative to the first point to keep the cross terms small.
    let origin = points[0];
    let n = points.len();
    let mut area2 = 0.0;
    let mut acc = DVec2::ZERO;
    for i in 0..n {
        let a = points[i] - origin;
        let b = points[(i + 1) % n] - origin;
        let cross = a.perp_dot(b);
        area2 += cross;
        acc += (a + b) * cross;
    }
    if area2.abs() < 1e-12 {
        let sum: DVec2 = points.iter().copied().sum();
        return sum / n as f64;
    }
    origin + acc / (3.0 * area2)
}
