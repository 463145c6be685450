//! # jigblock Play
//!
//! Everything that happens after the block has been cut: piece poses, the
//! snap-matching engine, hit testing, the drag/rotate state machine and the
//! [`PuzzleSession`] that ties them to a generated partition.

pub mod error;
pub mod interaction;
pub mod picking;
pub mod pose;
pub mod session;
pub mod snap;

pub use error::{SessionError, SessionResult};
pub use interaction::{InteractionConfig, InteractionController, InteractionState, Pointer};
pub use picking::{Hit, HitTester, SolidPicker};
pub use pose::{assemble, initial_transforms, scatter, PieceTransform, PoseStore};
pub use session::PuzzleSession;
pub use snap::{
    best_snap, evaluate, find_snap_candidates, highlight_intensity, proximity_highlights,
    rotations_match, SnapCandidate,
};
