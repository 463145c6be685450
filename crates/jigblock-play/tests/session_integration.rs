//! Pointer-driven sessions against real solids.

use glam::DVec3;
use jigblock_core::{Color, PuzzleParams, SplitMode, TextureHandle};
use jigblock_geometry::{Edge, ExportBundle, ExportSink, Ray};
use jigblock_play::{
    Hit, HitTester, InteractionConfig, InteractionState, PieceTransform, Pointer, PuzzleSession,
    SessionError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn params() -> PuzzleParams {
    PuzzleParams {
        width: 100.0,
        height: 100.0,
        depth: 4.0,
        grid_x: 2,
        grid_y: 2,
        split_mode: SplitMode::Straight,
        ..Default::default()
    }
}

fn session() -> PuzzleSession {
    PuzzleSession::new(params(), None, InteractionConfig::default()).unwrap()
}

fn above(x: f64, y: f64) -> Pointer {
    Pointer::new(Ray::new(DVec3::new(x, y, 100.0), DVec3::NEG_Z), x)
}

#[derive(Default)]
struct CollectingSink {
    triangles: usize,
    texture: Option<TextureHandle>,
    side_color: Option<Color>,
    calls: usize,
}

impl ExportSink for CollectingSink {
    fn write(&mut self, bundle: &ExportBundle<'_>) -> anyhow::Result<()> {
        self.calls += 1;
        self.triangles = bundle.merged().triangles.len();
        self.texture = bundle.texture;
        self.side_color = Some(bundle.side_color);
        Ok(())
    }
}

struct FailingSink;

impl ExportSink for FailingSink {
    fn write(&mut self, _bundle: &ExportBundle<'_>) -> anyhow::Result<()> {
        anyhow::bail!("read-only target")
    }
}

#[test]
fn test_drag_release_snaps_back() {
    let mut s = session();

    s.pointer_down(&above(75.0, 25.0));
    assert!(matches!(s.state(), InteractionState::Dragging { index: 1, .. }));
    assert!(!s.controller().camera_enabled());

    // Away from everything: no highlight, no snap.
    assert!(s.pointer_move(&above(175.0, 125.0)));
    assert!(s.highlights().is_empty());

    // Back within a millimetre of the assembled spot.
    s.pointer_move(&above(75.4, 25.3));
    assert!(!s.highlights().is_empty());
    let snapped = s.pointer_up().expect("release close to home should snap");
    assert!(snapped.can_snap);
    assert!(matches!(snapped.edge, Edge::Left | Edge::Top));

    let pose = s.transforms()[1];
    assert!((pose.x - 75.0).abs() < 1e-9);
    assert!((pose.y - 25.0).abs() < 1e-9);
    assert_eq!(s.state(), InteractionState::Selected { index: 1 });
    assert!(s.controller().camera_enabled());
}

#[test]
fn test_rotate_gesture_does_not_snap() {
    let mut s = session();
    s.pointer_down(&above(25.0, 25.0));
    s.pointer_up();
    assert_eq!(s.state(), InteractionState::Selected { index: 0 });

    // The rotation disc floats above the selected piece's centre.
    s.pointer_down(&above(25.0, 25.0));
    assert!(matches!(s.state(), InteractionState::Rotating { index: 0, .. }));

    s.pointer_move(&above(25.0 + 157.0, 25.0));
    assert!((s.transforms()[0].rotation - 1.57).abs() < 1e-9);
    assert!(s.pointer_leave().is_none());
    assert_eq!(s.state(), InteractionState::Selected { index: 0 });
}

#[test]
fn test_click_on_empty_space_deselects() {
    let mut s = session();
    s.pointer_down(&above(25.0, 25.0));
    s.pointer_up();
    s.pointer_down(&above(-50.0, -50.0));
    assert_eq!(s.state(), InteractionState::Idle);
}

#[test]
fn test_scatter_and_assemble_clear_selection() {
    let mut s = session();
    s.pointer_down(&above(25.0, 25.0));
    s.pointer_up();

    s.scatter(&mut StdRng::seed_from_u64(3));
    assert_eq!(s.state(), InteractionState::Idle);
    assert_eq!(s.transforms().len(), 4);

    s.assemble();
    for (pose, info) in s.transforms().iter().zip(s.pieces()) {
        assert_eq!(*pose, PieceTransform::new(info.center_x, info.center_y, 0.0));
    }
}

#[test]
fn test_rebuild_replaces_pieces_and_poses() {
    let mut s = session();
    s.pointer_down(&above(75.0, 25.0));

    let mut bigger = params();
    bigger.grid_x = 3;
    bigger.grid_y = 3;
    bigger.split_mode = SplitMode::Wave;
    s.rebuild(bigger).unwrap();

    assert_eq!(s.pieces().len(), 9);
    assert_eq!(s.solids().len(), 9);
    assert_eq!(s.transforms().len(), 9);
    assert_eq!(s.state(), InteractionState::Idle);

    // Neighbour sets and the index the session keeps come from one build.
    assert_eq!(s.adjacency().len(), 9);
    for info in s.pieces() {
        assert_eq!(s.adjacency().get(info.index), Some(&info.neighbors));
    }

    // Releasing the gesture that started before the rebuild is harmless.
    assert!(s.pointer_up().is_none());
}

#[test]
fn test_external_hit_tester() {
    struct Always(usize);
    impl HitTester for Always {
        fn hit_test(&self, _: &Ray, _: &[PieceTransform], _: Option<usize>) -> Option<Hit> {
            Some(Hit::Piece {
                index: self.0,
                point: DVec3::new(0.0, 0.0, 4.0),
            })
        }
    }

    let mut s = session();
    s.pointer_down_with(&Always(2), &above(0.0, 0.0));
    assert!(matches!(s.state(), InteractionState::Dragging { index: 2, .. }));

    let mut s = session();
    s.pointer_down_with(&Always(99), &above(0.0, 0.0));
    assert_eq!(s.state(), InteractionState::Idle);
}

#[test]
fn test_export_hands_over_solids() {
    let mut colored = params();
    colored.side_color = Color::rgb(0x12, 0x34, 0x56);
    let mut s = PuzzleSession::new(colored, None, InteractionConfig::default()).unwrap();
    s.set_texture(Some(TextureHandle(11))).unwrap();

    let mut sink = CollectingSink::default();
    s.export(&mut sink).unwrap();
    assert_eq!(sink.calls, 1);
    assert_eq!(sink.texture, Some(TextureHandle(11)));
    assert_eq!(sink.triangles, 4 * 12);
    assert_eq!(sink.side_color, Some(Color::rgb(0x12, 0x34, 0x56)));

    assert!(matches!(
        s.export(&mut FailingSink),
        Err(SessionError::Export(_))
    ));
}

#[test]
fn test_export_without_pieces() {
    let mut empty = params();
    empty.grid_x = 0;
    let s = PuzzleSession::new(empty, None, InteractionConfig::default()).unwrap();
    assert!(s.solids().is_empty());
    assert!(s.adjacency().is_empty());
    assert!(matches!(
        s.export(&mut CollectingSink::default()),
        Err(SessionError::NothingToExport)
    ));
}
