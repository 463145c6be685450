//! Interaction state machine
//!
//! Pointer events plus hit results drive a piece through
//! `Idle -> Dragging -> Selected -> Rotating -> Selected`. Releasing a drag
//! runs snap matching against the piece's neighbours. Camera control is
//! suspended for the duration of every gesture.

use crate::picking::Hit;
use crate::pose::PieceTransform;
use crate::snap::{self, SnapCandidate};
use glam::DVec2;
use jigblock_core::constants::{DEFAULT_HIGHLIGHT_FACTOR, DEFAULT_ROTATE_SENSITIVITY};
use jigblock_geometry::{PieceInfo, Ray};
use serde::{Deserialize, Serialize};

/// Tuning consumed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Snap threshold (mm)
    pub snap_distance: f64,
    /// Radians per pixel of horizontal pointer travel while rotating
    pub rotate_sensitivity: f64,
    /// Proximity highlighting radius as a multiple of `snap_distance`
    pub highlight_factor: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snap_distance: 4.0,
            rotate_sensitivity: DEFAULT_ROTATE_SENSITIVITY,
            highlight_factor: DEFAULT_HIGHLIGHT_FACTOR,
        }
    }
}

/// A pointer sample: the world ray under the cursor and its screen x (px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub ray: Ray,
    pub screen_x: f64,
}

impl Pointer {
    pub fn new(ray: Ray, screen_x: f64) -> Self {
        Self { ray, screen_x }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected {
        index: usize,
    },
    Dragging {
        index: usize,
        /// Piece position minus the grab point, in the drag plane
        grab_offset: DVec2,
        /// Height of the horizontal drag plane
        plane_z: f64,
    },
    Rotating {
        index: usize,
        start_pointer_x: f64,
        start_rotation: f64,
    },
}

impl InteractionState {
    /// Piece the state refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Self::Idle => None,
            Self::Selected { index }
            | Self::Dragging { index, .. }
            | Self::Rotating { index, .. } => Some(index),
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::Dragging { .. } | Self::Rotating { .. })
    }
}

/// Drives [`InteractionState`] from pointer events.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    config: InteractionConfig,
    camera_enabled: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            config,
            camera_enabled: true,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    /// Currently selected, dragged or rotated piece.
    pub fn selected(&self) -> Option<usize> {
        self.state.index()
    }

    /// False while a gesture owns the pointer.
    pub fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    /// Drops any selection or gesture and hands the camera back.
    pub fn clear(&mut self) {
        self.state = InteractionState::Idle;
        self.camera_enabled = true;
    }

    pub fn pointer_down(
        &mut self,
        pointer: &Pointer,
        hit: Option<Hit>,
        transforms: &[PieceTransform],
    ) {
        if self.state.is_gesture() {
            return;
        }

        match (hit, self.state) {
            (Some(Hit::RotateHandle { index }), InteractionState::Selected { index: selected })
                if index == selected =>
            {
                let Some(pose) = self.live_pose(index, transforms) else {
                    return;
                };
                self.state = InteractionState::Rotating {
                    index,
                    start_pointer_x: pointer.screen_x,
                    start_rotation: pose.rotation,
                };
                self.camera_enabled = false;
                tracing::debug!("Rotating piece {}", index);
            }
            (Some(Hit::Piece { index, point }), _) => {
                let Some(pose) = self.live_pose(index, transforms) else {
                    return;
                };
                self.state = InteractionState::Dragging {
                    index,
                    grab_offset: pose.position() - point.truncate(),
                    plane_z: point.z,
                };
                self.camera_enabled = false;
                tracing::debug!("Dragging piece {}", index);
            }
            _ => self.state = InteractionState::Idle,
        }
    }

    /// Moves or turns the active piece. Returns `true` if a pose changed.
    pub fn pointer_move(&mut self, pointer: &Pointer, transforms: &mut [PieceTransform]) -> bool {
        match self.state {
            InteractionState::Dragging {
                index,
                grab_offset,
                plane_z,
            } => {
                let Some(point) = pointer.ray.intersect_plane_z(plane_z) else {
                    return false;
                };
                let Some(pose) = self.live_pose_mut(index, transforms) else {
                    return false;
                };
                pose.set_position(point.truncate() + grab_offset);
                true
            }
            InteractionState::Rotating {
                index,
                start_pointer_x,
                start_rotation,
            } => {
                let k = self.config.rotate_sensitivity;
                let Some(pose) = self.live_pose_mut(index, transforms) else {
                    return false;
                };
                pose.rotation = start_rotation + (pointer.screen_x - start_pointer_x) * k;
                true
            }
            InteractionState::Idle | InteractionState::Selected { .. } => false,
        }
    }

    /// Ends the gesture. A released drag snaps to the nearest matching
    /// neighbour and returns the candidate used.
    pub fn pointer_up(
        &mut self,
        transforms: &mut [PieceTransform],
        infos: &[PieceInfo],
    ) -> Option<SnapCandidate> {
        if let Some(index) = self.state.index() {
            if index >= transforms.len() {
                self.drop_stale(index, transforms.len());
                return None;
            }
        }

        match self.state {
            InteractionState::Dragging { index, .. } => {
                self.end_gesture(index);
                let best = snap::best_snap(index, transforms, infos, self.config.snap_distance)?;
                let pose = transforms.get_mut(index)?;
                let z = pose.z;
                *pose = best.target();
                pose.z = z;
                tracing::debug!(
                    "Snapped piece {} to {} on its {} edge ({:.3} mm)",
                    index,
                    best.neighbor_index,
                    best.edge,
                    best.distance
                );
                Some(best)
            }
            InteractionState::Rotating { index, .. } => {
                self.end_gesture(index);
                None
            }
            InteractionState::Idle | InteractionState::Selected { .. } => None,
        }
    }

    /// Pointer left the viewport; same as releasing.
    pub fn pointer_leave(
        &mut self,
        transforms: &mut [PieceTransform],
        infos: &[PieceInfo],
    ) -> Option<SnapCandidate> {
        self.pointer_up(transforms, infos)
    }

    fn end_gesture(&mut self, index: usize) {
        self.state = InteractionState::Selected { index };
        self.camera_enabled = true;
    }

    fn live_pose<'t>(
        &mut self,
        index: usize,
        transforms: &'t [PieceTransform],
    ) -> Option<&'t PieceTransform> {
        let pose = transforms.get(index);
        if pose.is_none() {
            self.drop_stale(index, transforms.len());
        }
        pose
    }

    fn live_pose_mut<'t>(
        &mut self,
        index: usize,
        transforms: &'t mut [PieceTransform],
    ) -> Option<&'t mut PieceTransform> {
        let len = transforms.len();
        let pose = transforms.get_mut(index);
        if pose.is_none() {
            self.drop_stale(index, len);
        }
        pose
    }

    fn drop_stale(&mut self, index: usize, len: usize) {
        tracing::warn!("Ignoring stale piece index {} ({} pieces)", index, len);
        self.clear();
    }
}
