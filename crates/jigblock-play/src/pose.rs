//! Piece poses
//!
//! One [`PieceTransform`] per piece, index-aligned with the partition's
//! `PieceInfo` list. The scatter and assemble commands produce whole new
//! pose sets; the interaction controller edits single entries.

use glam::DVec2;
use jigblock_core::constants::{SCATTER_MAX_FRACTION, SCATTER_MIN_FRACTION, SCATTER_RADIUS_FACTOR};
use jigblock_geometry::PieceInfo;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Position and rotation (radians, counter-clockwise about Z) of one piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PieceTransform {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
}

impl PieceTransform {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            rotation,
        }
    }

    /// Assembled pose of a piece.
    pub fn assembled(info: &PieceInfo) -> Self {
        Self::new(info.center_x, info.center_y, 0.0)
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: DVec2) {
        self.x = p.x;
        self.y = p.y;
    }
}

/// Every piece at its centroid with zero rotation.
pub fn initial_transforms(infos: &[PieceInfo]) -> Vec<PieceTransform> {
    infos.iter().map(PieceTransform::assembled).collect()
}

/// Same as [`initial_transforms`]; the command name used by the UI.
pub fn assemble(infos: &[PieceInfo]) -> Vec<PieceTransform> {
    initial_transforms(infos)
}

/// Random poses on a ring around the puzzle centre.
///
/// Radius is drawn from `[0.5, 1.0] * 1.5 * max(width, height)`, angle and
/// rotation uniformly from `[0, 2π)`.
pub fn scatter(
    infos: &[PieceInfo],
    width: f64,
    height: f64,
    rng: &mut impl Rng,
) -> Vec<PieceTransform> {
    let center = DVec2::new(width / 2.0, height / 2.0);
    let reach = SCATTER_RADIUS_FACTOR * width.max(height);

    infos
        .iter()
        .map(|_| {
            let angle: f64 = rng.random_range(0.0..TAU);
            let radius = rng.random_range(SCATTER_MIN_FRACTION..=SCATTER_MAX_FRACTION) * reach;
            let rotation: f64 = rng.random_range(0.0..TAU);
            let p = center + DVec2::from_angle(angle) * radius;
            PieceTransform::new(p.x, p.y, rotation)
        })
        .collect()
}

/// Pose vector guarded against drifting out of step with the partition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseStore {
    transforms: Vec<PieceTransform>,
}

impl PoseStore {
    pub fn new(infos: &[PieceInfo]) -> Self {
        Self {
            transforms: initial_transforms(infos),
        }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PieceTransform> {
        self.transforms.get(index)
    }

    pub fn as_slice(&self) -> &[PieceTransform] {
        &self.transforms
    }

    pub fn as_mut_slice(&mut self) -> &mut [PieceTransform] {
        &mut self.transforms
    }

    /// Replaces every pose; rejected when the count does not match.
    pub fn replace(&mut self, transforms: Vec<PieceTransform>) -> bool {
        if transforms.len() != self.transforms.len() {
            tracing::warn!(
                "Ignoring pose set of {} entries for {} pieces",
                transforms.len(),
                self.transforms.len()
            );
            return false;
        }
        self.transforms = transforms;
        true
    }

    pub fn reset(&mut self, infos: &[PieceInfo]) {
        self.transforms = initial_transforms(infos);
    }

    /// Resets to the assembled poses if the count differs from `infos`.
    ///
    /// Returns `true` when a reset happened.
    pub fn ensure_len(&mut self, infos: &[PieceInfo]) -> bool {
        if self.transforms.len() == infos.len() {
            return false;
        }
        tracing::warn!(
            "Pose count {} does not match {} pieces, resetting",
            self.transforms.len(),
            infos.len()
        );
        self.reset(infos);
        true
    }
}
