//! Hit testing
//!
//! The render layer usually owns picking; it reports results through
//! [`HitTester`]. [`SolidPicker`] is the stand-alone implementation that
//! works directly on the extruded solids.

use crate::pose::PieceTransform;
use glam::DVec3;
use jigblock_geometry::{PieceSolid, Ray};

/// Radius of the rotation disc (mm).
pub const ROTATE_HANDLE_RADIUS: f64 = 6.0;

/// Height of the rotation disc above the selected piece's top face (mm).
pub const ROTATE_HANDLE_LIFT: f64 = 10.0;

/// What a pointer ray landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// A piece, with the world-space contact point
    Piece { index: usize, point: DVec3 },
    /// The rotation affordance of the selected piece
    RotateHandle { index: usize },
}

pub trait HitTester {
    fn hit_test(
        &self,
        ray: &Ray,
        transforms: &[PieceTransform],
        selected: Option<usize>,
    ) -> Option<Hit>;
}

/// Ray-casts against every solid in its current pose.
#[derive(Debug, Clone, Copy)]
pub struct SolidPicker<'a> {
    solids: &'a [PieceSolid],
    handle_radius: f64,
    handle_lift: f64,
}

impl<'a> SolidPicker<'a> {
    pub fn new(solids: &'a [PieceSolid]) -> Self {
        Self {
            solids,
            handle_radius: ROTATE_HANDLE_RADIUS,
            handle_lift: ROTATE_HANDLE_LIFT,
        }
    }

    pub fn with_handle(mut self, radius: f64, lift: f64) -> Self {
        self.handle_radius = radius;
        self.handle_lift = lift;
        self
    }

    /// World position of the rotation disc for piece `index`.
    pub fn handle_center(&self, index: usize, transforms: &[PieceTransform]) -> Option<DVec3> {
        let solid = self.solids.get(index)?;
        let pose = transforms.get(index)?;
        Some(DVec3::new(
            pose.x,
            pose.y,
            pose.z + solid.depth + self.handle_lift,
        ))
    }

    fn hit_handle(&self, ray: &Ray, index: usize, transforms: &[PieceTransform]) -> Option<f64> {
        let center = self.handle_center(index, transforms)?;
        let point = ray.intersect_plane_z(center.z)?;
        (point.truncate().distance(center.truncate()) <= self.handle_radius)
            .then(|| point.distance(ray.origin))
    }

    fn hit_piece(&self, ray: &Ray, index: usize, pose: &PieceTransform) -> Option<f64> {
        let solid = self.solids.get(index)?;
        let local = ray.to_local(DVec3::new(pose.x, pose.y, pose.z), pose.rotation);
        solid.intersect_local(&local).map(|(t, _)| t)
    }
}

impl HitTester for SolidPicker<'_> {
    fn hit_test(
        &self,
        ray: &Ray,
        transforms: &[PieceTransform],
        selected: Option<usize>,
    ) -> Option<Hit> {
        // The disc floats above everything, so it wins over pieces.
        if let Some(index) = selected {
            if self.hit_handle(ray, index, transforms).is_some() {
                return Some(Hit::RotateHandle { index });
            }
        }

        // Rotation about Z keeps lengths, so local `t` is a world `t`.
        transforms
            .iter()
            .enumerate()
            .filter_map(|(index, pose)| self.hit_piece(ray, index, pose).map(|t| (index, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, t)| Hit::Piece {
                index,
                point: ray.at(t),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::initial_transforms;
    use jigblock_core::{PuzzleParams, SplitMode};
    use jigblock_geometry::generate_partition;

    fn setup() -> (jigblock_geometry::Partition, Vec<PieceTransform>) {
        let params = PuzzleParams {
            grid_x: 2,
            grid_y: 2,
            split_mode: SplitMode::Straight,
            ..Default::default()
        };
        let partition = generate_partition(&params, None).unwrap();
        let poses = initial_transforms(&partition.pieces);
        (partition, poses)
    }

    fn down_at(x: f64, y: f64) -> Ray {
        Ray::new(DVec3::new(x, y, 100.0), DVec3::NEG_Z)
    }

    #[test]
    fn test_pick_assembled_pieces() {
        let (partition, poses) = setup();
        let picker = SolidPicker::new(&partition.solids);

        let hit = picker.hit_test(&down_at(70.0, 20.0), &poses, None);
        match hit {
            Some(Hit::Piece { index, point }) => {
                assert_eq!(index, 1);
                assert!((point - DVec3::new(70.0, 20.0, 4.0)).length() < 1e-9);
            }
            other => panic!("expected piece 1, got {:?}", other),
        }

        assert!(picker.hit_test(&down_at(150.0, 20.0), &poses, None).is_none());
    }

    #[test]
    fn test_pick_follows_moved_piece() {
        let (partition, mut poses) = setup();
        let picker = SolidPicker::new(&partition.solids);
        poses[0] = PieceTransform::new(200.0, 200.0, 0.3);

        assert!(matches!(
            picker.hit_test(&down_at(200.0, 200.0), &poses, None),
            Some(Hit::Piece { index: 0, .. })
        ));
        assert!(picker.hit_test(&down_at(10.0, 10.0), &poses, None).is_none());
    }

    #[test]
    fn test_rotate_handle_only_when_selected() {
        let (partition, poses) = setup();
        let picker = SolidPicker::new(&partition.solids);
        let ray = down_at(27.0, 25.0);

        assert!(matches!(
            picker.hit_test(&ray, &poses, Some(0)),
            Some(Hit::RotateHandle { index: 0 })
        ));
        assert!(matches!(
            picker.hit_test(&ray, &poses, None),
            Some(Hit::Piece { index: 0, .. })
        ));
        // Stale selection is ignored.
        assert!(matches!(
            picker.hit_test(&ray, &poses, Some(42)),
            Some(Hit::Piece { index: 0, .. })
        ));
    }
}
