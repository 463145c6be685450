//! Rays for picking and drag-plane projection.

use glam::DVec3;

const EPSILON: f64 = 1e-9;

/// Half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Point where the ray crosses the horizontal plane at height `z`.
    pub fn intersect_plane_z(&self, z: f64) -> Option<DVec3> {
        if self.direction.z.abs() < EPSILON {
            return None;
        }
        let t = (z - self.origin.z) / self.direction.z;
        (t >= 0.0).then(|| self.at(t))
    }

    /// Möller–Trumbore ray/triangle test, returning the ray parameter.
    ///
    /// Both windings are hit.
    pub fn intersect_triangle(&self, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
        let edge1 = b - a;
        let edge2 = c - a;
        let h = self.direction.cross(edge2);
        let det = edge1.dot(h);
        if det.abs() < EPSILON {
            return None;
        }

        let inv = 1.0 / det;
        let s = self.origin - a;
        let u = inv * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv * edge2.dot(q);
        (t > EPSILON).then_some(t)
    }

    /// The same ray expressed in a frame translated by `offset` and rotated
    /// by `rotation` about Z.
    pub fn to_local(&self, offset: DVec3, rotation: f64) -> Self {
        let (sin, cos) = (-rotation).sin_cos();
        let rot = |v: DVec3| DVec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z);
        Self {
            origin: rot(self.origin - offset),
            direction: rot(self.direction),
        }
    }
}
