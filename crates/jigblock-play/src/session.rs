//! Puzzle session
//!
//! Owns everything one open puzzle needs: the current partition (which
//! carries parameters, texture and the solid arena), poses and the
//! interaction controller. Every parameter or texture
//! change is a full rebuild that retires the previous solids first.

use crate::error::{SessionError, SessionResult};
use crate::interaction::{InteractionConfig, InteractionController, InteractionState, Pointer};
use crate::picking::{Hit, HitTester, SolidPicker};
use crate::pose::{self, PieceTransform, PoseStore};
use crate::snap::{self, SnapCandidate};
use jigblock_core::{PuzzleParams, TextureHandle};
use jigblock_geometry::{
    generate_partition, AdjacencyIndex, ExportSink, Partition, PieceInfo, PieceSolid, Ray,
};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    partition: Partition,
    poses: PoseStore,
    controller: InteractionController,
}

impl PuzzleSession {
    /// Builds the partition for `params` with every piece assembled.
    pub fn new(
        params: PuzzleParams,
        texture: Option<TextureHandle>,
        config: InteractionConfig,
    ) -> SessionResult<Self> {
        let mut session = Self {
            partition: Partition::empty(params, texture),
            poses: PoseStore::default(),
            controller: InteractionController::new(config),
        };
        session.regenerate()?;
        Ok(session)
    }

    pub fn params(&self) -> &PuzzleParams {
        &self.partition.params
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.partition.texture
    }

    pub fn pieces(&self) -> &[PieceInfo] {
        &self.partition.pieces
    }

    pub fn solids(&self) -> &[PieceSolid] {
        &self.partition.solids
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.partition.adjacency
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn transforms(&self) -> &[PieceTransform] {
        self.poses.as_slice()
    }

    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.controller.set_config(config);
    }

    /// Replaces the parameters and rebuilds every piece.
    pub fn rebuild(&mut self, params: PuzzleParams) -> SessionResult<()> {
        self.partition.params = params;
        self.regenerate()
    }

    /// Swaps the top-face image; solids are rebuilt so they carry the new handle.
    pub fn set_texture(&mut self, texture: Option<TextureHandle>) -> SessionResult<()> {
        self.partition.texture = texture;
        self.regenerate()
    }

    fn regenerate(&mut self) -> SessionResult<()> {
        let retired = self.partition.clear();
        self.controller.clear();
        if retired > 0 {
            tracing::debug!("Retired {} solids", retired);
        }

        match generate_partition(&self.partition.params, self.partition.texture) {
            Ok(partition) => self.partition = partition,
            Err(e) => {
                self.poses.reset(&self.partition.pieces);
                return Err(e.into());
            }
        }
        self.poses.reset(&self.partition.pieces);

        let params = &self.partition.params;
        tracing::info!(
            "Built {}x{} {} puzzle with {} pieces",
            params.grid_x,
            params.grid_y,
            params.split_mode,
            self.partition.len()
        );
        Ok(())
    }

    /// Throws every piece onto a ring around the puzzle and clears the selection.
    pub fn scatter(&mut self, rng: &mut impl Rng) {
        let Partition { params, pieces, .. } = &self.partition;
        let poses = pose::scatter(pieces, params.width, params.height, rng);
        self.poses.replace(poses);
        self.controller.clear();
        tracing::info!("Scattered {} pieces", pieces.len());
    }

    /// Puts every piece back in place and clears the selection.
    pub fn assemble(&mut self) {
        self.poses.reset(&self.partition.pieces);
        self.controller.clear();
        tracing::info!("Assembled {} pieces", self.partition.len());
    }

    /// Ray-casts against the solids in their current poses.
    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        SolidPicker::new(&self.partition.solids).hit_test(ray, self.poses.as_slice(), self.controller.selected())
    }

    /// Pointer press, picking with the built-in solid picker.
    pub fn pointer_down(&mut self, pointer: &Pointer) {
        self.poses.ensure_len(&self.partition.pieces);
        let hit = self.pick(&pointer.ray);
        self.controller
            .pointer_down(pointer, hit, self.poses.as_slice());
    }

    /// Pointer press with a hit result from an external picker.
    pub fn pointer_down_with(&mut self, tester: &dyn HitTester, pointer: &Pointer) {
        self.poses.ensure_len(&self.partition.pieces);
        let hit = tester.hit_test(&pointer.ray, self.poses.as_slice(), self.controller.selected());
        self.controller
            .pointer_down(pointer, hit, self.poses.as_slice());
    }

    pub fn pointer_move(&mut self, pointer: &Pointer) -> bool {
        if self.poses.ensure_len(&self.partition.pieces) {
            self.controller.clear();
        }
        self.controller
            .pointer_move(pointer, self.poses.as_mut_slice())
    }

    pub fn pointer_up(&mut self) -> Option<SnapCandidate> {
        if self.poses.ensure_len(&self.partition.pieces) {
            self.controller.clear();
        }
        self.controller
            .pointer_up(self.poses.as_mut_slice(), &self.partition.pieces)
    }

    pub fn pointer_leave(&mut self) -> Option<SnapCandidate> {
        if self.poses.ensure_len(&self.partition.pieces) {
            self.controller.clear();
        }
        self.controller
            .pointer_leave(self.poses.as_mut_slice(), &self.partition.pieces)
    }

    /// Neighbours of the dragged piece within highlighting range.
    pub fn highlights(&self) -> Vec<(usize, f64)> {
        let InteractionState::Dragging { index, .. } = self.controller.state() else {
            return Vec::new();
        };
        let config = self.controller.config();
        snap::proximity_highlights(
            index,
            self.poses.as_slice(),
            &self.partition.pieces,
            config.snap_distance,
            config.highlight_factor,
        )
    }

    /// Hands the solids, colors and texture to `sink`.
    pub fn export(&self, sink: &mut dyn ExportSink) -> SessionResult<()> {
        if self.partition.solids.is_empty() {
            return Err(SessionError::NothingToExport);
        }
        let bundle = self.partition.bundle();
        sink.write(&bundle).map_err(SessionError::Export)?;
        tracing::info!(
            "Exported {} solids ({} triangles)",
            bundle.solids.len(),
            bundle.triangle_count()
        );
        Ok(())
    }
}
