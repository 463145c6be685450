//! Export seam
//!
//! File writers live outside this workspace. They receive an
//! [`ExportBundle`] holding every solid, the two flat colors and the texture
//! handle, and decide on their own format.

use crate::solid::{MaterialSlot, PieceSolid};
use glam::{DVec2, DVec3};
use jigblock_core::{Color, TextureHandle};

/// Receiver of a finished partition.
pub trait ExportSink {
    fn write(&mut self, bundle: &ExportBundle<'_>) -> anyhow::Result<()>;
}

/// Everything a writer needs to reproduce the printable block.
#[derive(Debug, Clone, Copy)]
pub struct ExportBundle<'a> {
    pub solids: &'a [PieceSolid],
    pub side_color: Color,
    pub bottom_color: Color,
    pub texture: Option<TextureHandle>,
}

/// All solids placed at their assembled positions in one vertex buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedMesh {
    pub positions: Vec<DVec3>,
    pub normals: Vec<DVec3>,
    pub uvs: Vec<DVec2>,
    pub triangles: Vec<[u32; 3]>,
    /// Material of each triangle, parallel to `triangles`.
    pub materials: Vec<MaterialSlot>,
}

impl ExportBundle<'_> {
    pub fn triangle_count(&self) -> usize {
        self.solids.iter().map(PieceSolid::triangle_count).sum()
    }

    pub fn color_of(&self, slot: MaterialSlot) -> Option<Color> {
        match slot {
            MaterialSlot::Top => None,
            MaterialSlot::Side => Some(self.side_color),
            MaterialSlot::Bottom => Some(self.bottom_color),
        }
    }

    /// Concatenates the solids, each translated to its centroid.
    pub fn merged(&self) -> MergedMesh {
        let mut mesh = MergedMesh::default();
        for solid in self.solids {
            let base = mesh.positions.len() as u32;
            let offset = DVec3::new(solid.center_x, solid.center_y, 0.0);
            mesh.positions
                .extend(solid.positions.iter().map(|p| *p + offset));
            mesh.normals.extend_from_slice(&solid.normals);
            mesh.uvs.extend_from_slice(&solid.uvs);
            mesh.triangles.extend(
                solid
                    .triangles
                    .iter()
                    .map(|t| [base + t[0], base + t[1], base + t[2]]),
            );
            mesh.materials.resize(mesh.triangles.len(), MaterialSlot::Side);
            for group in &solid.groups {
                let start = mesh.materials.len() - solid.triangles.len() + group.start;
                if let Some(run) = mesh.materials.get_mut(start..start + group.count) {
                    run.fill(group.material);
                }
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_partition;
    use jigblock_core::{PuzzleParams, SplitMode};

    #[test]
    fn test_merged_mesh_spans_block() {
        let params = PuzzleParams {
            grid_x: 2,
            grid_y: 2,
            split_mode: SplitMode::Straight,
            ..Default::default()
        };
        let partition = generate_partition(&params, Some(TextureHandle(7))).unwrap();
        let bundle = partition.bundle();
        let mesh = bundle.merged();

        assert_eq!(mesh.triangles.len(), bundle.triangle_count());
        assert_eq!(mesh.materials.len(), mesh.triangles.len());
        let (min, max) = mesh.positions.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        assert!((min - DVec3::ZERO).length() < 1e-9);
        assert!((max - DVec3::new(100.0, 100.0, 4.0)).length() < 1e-9);

        let tops = mesh
            .materials
            .iter()
            .filter(|m| **m == MaterialSlot::Top)
            .count();
        assert_eq!(tops, 8);
        assert_eq!(bundle.texture, Some(TextureHandle(7)));
        assert_eq!(bundle.color_of(MaterialSlot::Side), Some(params.side_color));
        assert_eq!(bundle.color_of(MaterialSlot::Top), None);
    }
}
