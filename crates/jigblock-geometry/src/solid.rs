//! Solid extruder and UV corrector
//!
//! Turns a piece outline into a closed prism: a tessellated cap at `z = 0`
//! and `z = depth`, plus one quad per outline edge. Cap texture coordinates
//! are then rewritten into block-normalized space so a single image spans
//! every piece exactly as it would span the uncut block.

use crate::error::{GeometryError, GeometryResult};
use crate::partition::{PieceInfo, PieceShape};
use crate::ray::Ray;
use glam::{DVec2, DVec3};
use jigblock_core::constants::CAP_NORMAL_MAX_TILT_DEG;
use jigblock_core::PuzzleParams;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};
use serde::{Deserialize, Serialize};

/// Tessellator output closer than this to an outline point is snapped onto it.
const CAP_VERTEX_SNAP: f64 = 1e-3;

/// Which material a run of triangles is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialSlot {
    /// Textured with the puzzle image
    Top,
    /// Flat `bottom_color`
    Bottom,
    /// Flat `side_color`
    Side,
}

/// Contiguous triangle range sharing one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGroup {
    pub start: usize,
    pub count: usize,
    pub material: MaterialSlot,
}

/// Extruded piece mesh in the piece's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceSolid {
    pub index: usize,
    pub positions: Vec<DVec3>,
    pub normals: Vec<DVec3>,
    pub uvs: Vec<DVec2>,
    pub triangles: Vec<[u32; 3]>,
    pub groups: Vec<FaceGroup>,
    pub center_x: f64,
    pub center_y: f64,
    pub depth: f64,
}

impl PieceSolid {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle(&self, i: usize) -> Option<[DVec3; 3]> {
        let tri = self.triangles.get(i)?;
        Some([
            *self.positions.get(tri[0] as usize)?,
            *self.positions.get(tri[1] as usize)?,
            *self.positions.get(tri[2] as usize)?,
        ])
    }

    /// Unnormalized face normal (length = twice the triangle area).
    pub fn face_normal(&self, i: usize) -> Option<DVec3> {
        let [a, b, c] = self.triangle(i)?;
        Some((b - a).cross(c - a))
    }

    pub fn group(&self, material: MaterialSlot) -> Option<&FaceGroup> {
        self.groups.iter().find(|g| g.material == material)
    }

    /// Nearest hit of a ray given in the piece's local frame.
    pub fn intersect_local(&self, ray: &Ray) -> Option<(f64, DVec3)> {
        (0..self.triangles.len())
            .filter_map(|i| {
                let [a, b, c] = self.triangle(i)?;
                ray.intersect_triangle(a, b, c)
            })
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| (t, ray.at(t)))
    }
}

/// Extrudes one outline into a solid with corrected cap UVs and smooth normals.
pub fn extrude(
    info: &PieceInfo,
    shape: &PieceShape,
    params: &PuzzleParams,
) -> GeometryResult<PieceSolid> {
    let ring = &shape.points;
    if ring.len() < 3 {
        return Err(GeometryError::DegenerateOutline {
            index: info.index,
            points: ring.len(),
        });
    }

    let depth = params.depth;
    let (cap_points, cap_tris) = tessellate_cap(ring)?;
    let (min, max) = shape.bounds();
    let extent = (max - min).max(DVec2::splat(f64::EPSILON));

    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut triangles = Vec::new();
    let mut groups = Vec::new();

    // Top cap, counter-clockwise seen from +Z.
    let base = positions.len() as u32;
    for p in &cap_points {
        positions.push(p.extend(depth));
        uvs.push((*p - min) / extent);
    }
    triangles.extend(cap_tris.iter().map(|t| [base + t[0], base + t[1], base + t[2]]));
    groups.push(FaceGroup {
        start: 0,
        count: cap_tris.len(),
        material: MaterialSlot::Top,
    });

    // Bottom cap, reversed winding.
    let base = positions.len() as u32;
    for p in &cap_points {
        positions.push(p.extend(0.0));
        uvs.push((*p - min) / extent);
    }
    let start = triangles.len();
    triangles.extend(cap_tris.iter().map(|t| [base + t[0], base + t[2], base + t[1]]));
    groups.push(FaceGroup {
        start,
        count: cap_tris.len(),
        material: MaterialSlot::Bottom,
    });

    // Side walls, one flat quad per ring edge.
    let perimeter: f64 = (0..ring.len())
        .map(|i| ring[i].distance(ring[(i + 1) % ring.len()]))
        .sum();
    let start = triangles.len();
    let mut run = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        let u0 = run / perimeter;
        run += a.distance(b);
        let u1 = run / perimeter;

        let base = positions.len() as u32;
        positions.extend([a.extend(0.0), b.extend(0.0), b.extend(depth), a.extend(depth)]);
        uvs.extend([
            DVec2::new(u0, 0.0),
            DVec2::new(u1, 0.0),
            DVec2::new(u1, 1.0),
            DVec2::new(u0, 1.0),
        ]);
        triangles.push([base, base + 1, base + 2]);
        triangles.push([base, base + 2, base + 3]);
    }
    groups.push(FaceGroup {
        start,
        count: triangles.len() - start,
        material: MaterialSlot::Side,
    });

    let mut solid = PieceSolid {
        index: info.index,
        normals: vec![DVec3::ZERO; positions.len()],
        positions,
        uvs,
        triangles,
        groups,
        center_x: info.center_x,
        center_y: info.center_y,
        depth,
    };
    correct_cap_uvs(&mut solid, params.width, params.height);
    compute_vertex_normals(&mut solid);
    Ok(solid)
}

/// Rewrites UVs of cap-facing triangles into block-normalized space.
///
/// A triangle counts as a cap when its normal is within
/// [`CAP_NORMAL_MAX_TILT_DEG`] of the vertical axis; side walls keep their UVs.
pub fn correct_cap_uvs(solid: &mut PieceSolid, width: f64, height: f64) {
    let min_cos = CAP_NORMAL_MAX_TILT_DEG.to_radians().cos();
    let center = DVec2::new(solid.center_x, solid.center_y);
    let size = DVec2::new(width, height);

    for i in 0..solid.triangles.len() {
        let Some(normal) = solid.face_normal(i) else {
            continue;
        };
        let normal = normal.normalize_or_zero();
        if normal.z.abs() < min_cos {
            continue;
        }
        for &v in &solid.triangles[i] {
            let v = v as usize;
            if let (Some(p), Some(uv)) = (solid.positions.get(v), solid.uvs.get_mut(v)) {
                *uv = (p.truncate() + center) / size;
            }
        }
    }
}

/// Area-weighted vertex normals from the current faces.
pub fn compute_vertex_normals(solid: &mut PieceSolid) {
    let mut acc = vec![DVec3::ZERO; solid.positions.len()];
    for i in 0..solid.triangles.len() {
        let Some(n) = solid.face_normal(i) else {
            continue;
        };
        for &v in &solid.triangles[i] {
            if let Some(slot) = acc.get_mut(v as usize) {
                *slot += n;
            }
        }
    }
    solid.normals = acc.into_iter().map(DVec3::normalize_or_zero).collect();
}

/// Fill-tessellates a ring into counter-clockwise triangles.
///
/// Output vertices that coincide with ring points are snapped back onto them
/// so caps and walls share exact coordinates.
fn tessellate_cap(ring: &[DVec2]) -> GeometryResult<(Vec<DVec2>, Vec<[u32; 3]>)> {
    let mut builder = Path::builder();
    builder.begin(point(ring[0].x as f32, ring[0].y as f32));
    for p in &ring[1..] {
        builder.line_to(point(p.x as f32, p.y as f32));
    }
    builder.end(true);
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position().to_array()),
        )
        .map_err(|e| GeometryError::Tessellation(format!("{:?}", e)))?;

    let points: Vec<DVec2> = buffers
        .vertices
        .iter()
        .map(|v| {
            let p = DVec2::new(v[0] as f64, v[1] as f64);
            ring.iter()
                .copied()
                .min_by(|a, b| a.distance_squared(p).total_cmp(&b.distance_squared(p)))
                .filter(|q| q.distance(p) < CAP_VERTEX_SNAP)
                .unwrap_or(p)
        })
        .collect();

    let mut triangles = Vec::with_capacity(buffers.indices.len() / 3);
    for tri in buffers.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]];
        let (pa, pb, pc) = (points[a as usize], points[b as usize], points[c as usize]);
        let area2 = (pb - pa).perp_dot(pc - pa);
        if area2 > 0.0 {
            triangles.push([a, b, c]);
        } else if area2 < 0.0 {
            triangles.push([a, c, b]);
        }
    }

    if triangles.is_empty() {
        return Err(GeometryError::Tessellation(
            "cap produced no triangles".to_string(),
        ));
    }
    Ok((points, triangles))
}
