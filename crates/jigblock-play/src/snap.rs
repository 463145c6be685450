//! Snap matching
//!
//! A moving piece locks onto a neighbour when it sits where the assembled
//! puzzle would put it relative to that neighbour: same rotation (within
//! [`ROTATION_MATCH_TOLERANCE`]) and the centroid offset, rotated with the
//! neighbour, reproduced within the snap distance.

use crate::pose::PieceTransform;
use glam::DVec2;
use jigblock_core::constants::ROTATION_MATCH_TOLERANCE;
use jigblock_geometry::{Edge, PieceInfo};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Result of testing one moving/neighbour pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapCandidate {
    pub neighbor_index: usize,
    /// Side of the moving piece that faces the neighbour
    pub edge: Edge,
    /// Distance between actual and expected placement; infinite when the
    /// rotations disagree
    pub distance: f64,
    pub can_snap: bool,
    pub target_x: f64,
    pub target_y: f64,
    pub target_rotation: f64,
}

impl SnapCandidate {
    pub fn target(&self) -> PieceTransform {
        PieceTransform::new(self.target_x, self.target_y, self.target_rotation)
    }
}

/// Whether two rotations agree modulo a full turn.
pub fn rotations_match(a: f64, b: f64) -> bool {
    let diff = (a - b).rem_euclid(TAU);
    diff <= ROTATION_MATCH_TOLERANCE || diff >= TAU - ROTATION_MATCH_TOLERANCE
}

/// Tests `moving` against `neighbor`.
///
/// `None` when either index is out of range or the pieces are not grid
/// neighbours.
pub fn evaluate(
    moving: usize,
    neighbor: usize,
    transforms: &[PieceTransform],
    infos: &[PieceInfo],
    threshold: f64,
) -> Option<SnapCandidate> {
    let moving_info = infos.get(moving)?;
    let neighbor_info = infos.get(neighbor)?;
    let moving_pose = transforms.get(moving)?;
    let neighbor_pose = transforms.get(neighbor)?;

    let edge = moving_info
        .neighbors
        .iter()
        .find_map(|(edge, idx)| (idx == neighbor).then_some(edge))?;

    let expected = DVec2::from_angle(neighbor_pose.rotation)
        .rotate(moving_info.center() - neighbor_info.center());
    let target = neighbor_pose.position() + expected;

    let distance = if rotations_match(moving_pose.rotation, neighbor_pose.rotation) {
        (moving_pose.position() - neighbor_pose.position()).distance(expected)
    } else {
        f64::INFINITY
    };

    Some(SnapCandidate {
        neighbor_index: neighbor,
        edge,
        distance,
        can_snap: distance <= threshold,
        target_x: target.x,
        target_y: target.y,
        target_rotation: neighbor_pose.rotation,
    })
}

/// Candidates against every neighbour of `index`, nearest first.
///
/// Pairs with mismatched rotation are dropped. An out-of-range index yields
/// an empty list.
pub fn find_snap_candidates(
    index: usize,
    transforms: &[PieceTransform],
    infos: &[PieceInfo],
    threshold: f64,
) -> Vec<SnapCandidate> {
    let Some(info) = infos.get(index) else {
        return Vec::new();
    };
    let mut candidates: Vec<SnapCandidate> = info
        .neighbors
        .iter()
        .filter_map(|(_, neighbor)| evaluate(index, neighbor, transforms, infos, threshold))
        .filter(|c| c.distance.is_finite())
        .collect();
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates
}

/// The nearest candidate, if it is close enough to snap.
pub fn best_snap(
    index: usize,
    transforms: &[PieceTransform],
    infos: &[PieceInfo],
    threshold: f64,
) -> Option<SnapCandidate> {
    find_snap_candidates(index, transforms, infos, threshold)
        .into_iter()
        .next()
        .filter(|c| c.can_snap)
}

/// Glow strength for a neighbour at `distance`: `(1 - d / radius)²` inside
/// the radius, 0 outside.
pub fn highlight_intensity(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 || distance.is_nan() || distance >= radius {
        return 0.0;
    }
    let f = 1.0 - distance / radius;
    f * f
}

/// Neighbours of `index` worth highlighting while it is dragged, with their
/// intensity. Searches `factor * snap_distance` around the piece.
pub fn proximity_highlights(
    index: usize,
    transforms: &[PieceTransform],
    infos: &[PieceInfo],
    snap_distance: f64,
    factor: f64,
) -> Vec<(usize, f64)> {
    let radius = snap_distance * factor;
    find_snap_candidates(index, transforms, infos, radius)
        .into_iter()
        .map(|c| (c.neighbor_index, highlight_intensity(c.distance, radius)))
        .filter(|(_, intensity)| *intensity > 0.0)
        .collect()
}
