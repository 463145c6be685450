//! Snap-matching behaviour on whole partitions.

use jigblock_core::{PuzzleParams, SplitMode};
use jigblock_geometry::{partition, Edge, PieceInfo};
use jigblock_play::{
    assemble, evaluate, find_snap_candidates, initial_transforms, scatter, PieceTransform,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::FRAC_PI_2;

fn infos(gx: u32, gy: u32, mode: SplitMode) -> Vec<PieceInfo> {
    let params = PuzzleParams {
        width: 100.0,
        height: 100.0,
        grid_x: gx,
        grid_y: gy,
        split_mode: mode,
        ..Default::default()
    };
    partition(&params).into_iter().map(|(info, _)| info).collect()
}

#[test]
fn test_assembled_puzzle_snaps_everywhere() {
    for mode in [SplitMode::Straight, SplitMode::Wave, SplitMode::Zigzag] {
        let infos = infos(4, 3, mode);
        let poses = initial_transforms(&infos);
        for info in &infos {
            for (edge, neighbor) in info.neighbors.iter() {
                let c = evaluate(info.index, neighbor, &poses, &infos, 4.0).unwrap();
                assert_eq!(c.edge, edge);
                assert_eq!(c.distance, 0.0, "{mode}: {} -> {}", info.index, neighbor);
                assert!(c.can_snap);
            }
        }
    }
}

#[test]
fn test_drag_piece_one_next_to_piece_zero() {
    let infos = infos(2, 2, SplitMode::Straight);
    assert_eq!(infos.len(), 4);
    let n0 = infos[0].neighbors;
    assert_eq!(
        (n0.left, n0.right, n0.bottom, n0.top),
        (None, Some(1), None, Some(2))
    );

    let mut poses = initial_transforms(&infos);
    // Piece 3 is out of the way so only piece 0 is a candidate.
    poses[3] = PieceTransform::new(300.0, 300.0, 0.0);
    poses[1] = PieceTransform::new(75.6, 25.5, 0.0);

    let candidates = find_snap_candidates(1, &poses, &infos, 4.0);
    let best = candidates.first().expect("piece 0 should be a candidate");
    assert_eq!(best.neighbor_index, 0);
    assert_eq!(best.edge, Edge::Left);
    assert!(best.distance <= 1.0, "distance {}", best.distance);
    assert!(best.can_snap);
    assert!((best.target_x - 75.0).abs() < 1e-9);
    assert!((best.target_y - 25.0).abs() < 1e-9);

    // Sorted ascending, and the far neighbour cannot snap.
    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].distance <= candidates[1].distance);
    assert!(!candidates[1].can_snap);
}

#[test]
fn test_scatter_then_assemble_restores_centroids() {
    let infos = infos(5, 4, SplitMode::Wave);
    let mut rng = StdRng::seed_from_u64(7);
    let scattered = scatter(&infos, 100.0, 100.0, &mut rng);
    assert!(scattered
        .iter()
        .zip(&infos)
        .any(|(p, i)| p.x != i.center_x || p.y != i.center_y));

    let assembled = assemble(&infos);
    for (pose, info) in assembled.iter().zip(&infos) {
        assert_eq!(pose.x, info.center_x);
        assert_eq!(pose.y, info.center_y);
        assert_eq!(pose.rotation, 0.0);
    }
}

proptest! {
    #[test]
    fn quarter_turns_never_snap(
        dx in -50.0f64..50.0,
        dy in -50.0f64..50.0,
        base in 0.0f64..6.28,
        turns in 1i32..4,
    ) {
        let infos = infos(3, 3, SplitMode::Straight);
        let mut poses = initial_transforms(&infos);
        for pose in poses.iter_mut() {
            pose.rotation = base;
        }
        poses[4].x += dx;
        poses[4].y += dy;
        poses[4].rotation = base + turns as f64 * FRAC_PI_2;

        for (_, neighbor) in infos[4].neighbors.iter() {
            let c = evaluate(4, neighbor, &poses, &infos, 1e6).unwrap();
            prop_assert!(!c.can_snap);
            prop_assert!(c.distance.is_infinite());
        }
        prop_assert!(find_snap_candidates(4, &poses, &infos, 1e6).is_empty());
    }

    #[test]
    fn rotated_assembly_still_snaps(angle in 0.0f64..6.28, ox in -200.0f64..200.0, oy in -200.0f64..200.0) {
        // Rigidly rotating and moving the whole assembled puzzle keeps every pair aligned.
        let infos = infos(3, 2, SplitMode::Zigzag);
        let (sin, cos) = angle.sin_cos();
        let poses: Vec<PieceTransform> = infos
            .iter()
            .map(|i| {
                let x = i.center_x * cos - i.center_y * sin + ox;
                let y = i.center_x * sin + i.center_y * cos + oy;
                PieceTransform::new(x, y, angle)
            })
            .collect();

        for info in &infos {
            for c in find_snap_candidates(info.index, &poses, &infos, 1e-6) {
                prop_assert!(c.can_snap, "{} -> {} at {}", info.index, c.neighbor_index, c.distance);
            }
        }
    }
}
