//! Boundary curves
//!
//! A cut style is a scalar offset function over the normalized edge
//! parameter `t`. Sampling turns it into an ordered point run along one grid
//! edge, displacing the coordinate transverse to the edge.

use glam::DVec2;
use jigblock_core::constants::CORNER_TAPER;
use jigblock_core::SplitMode;
use std::f64::consts::PI;

/// Zigzag period as a fraction of the edge length.
const ZIGZAG_PERIOD: f64 = 1.0 / 8.0;

/// Lateral offset of a cut at parameter `t` in `[0, 1]`.
///
/// Every style returns exactly 0 at both ends so cell corners stay on the
/// grid, and ramps in linearly over the first and last [`CORNER_TAPER`] of the
/// edge. With the amplitude capped below `CORNER_TAPER` times the cell size,
/// each cut stays inside the 45° cone at its corners and never crosses the
/// perpendicular cut leaving the same lattice point.
pub fn offset(t: f64, style: SplitMode, amplitude: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return 0.0;
    }
    let raw = match style {
        SplitMode::Straight => return 0.0,
        SplitMode::Wave => (t * 4.0 * PI).sin() * amplitude,
        SplitMode::Zigzag => {
            // Triangle wave in [-1, 1], phase shifted a quarter period so it
            // crosses zero at t = 0.
            let phase = (t / ZIGZAG_PERIOD + 0.25).rem_euclid(1.0);
            let tri = 1.0 - 4.0 * (phase - 0.5).abs();
            tri * amplitude / 2.0
        }
    };
    raw * corner_taper(t)
}

/// Linear ramp from 0 at either corner to 1 once `CORNER_TAPER` in.
fn corner_taper(t: f64) -> f64 {
    (t.min(1.0 - t) / CORNER_TAPER).min(1.0)
}

/// Samples a horizontal edge from `(x0, y)` to `(x1, y)`.
///
/// Straight edges only carry their two end points.
pub fn sample_horizontal(
    x0: f64,
    x1: f64,
    y: f64,
    style: SplitMode,
    amplitude: f64,
    segments: u32,
) -> Vec<DVec2> {
    sample(style, segments, |t| {
        DVec2::new(x0 + (x1 - x0) * t, y + offset(t, style, amplitude))
    })
}

/// Samples a vertical edge from `(x, y0)` to `(x, y1)`.
pub fn sample_vertical(
    x: f64,
    y0: f64,
    y1: f64,
    style: SplitMode,
    amplitude: f64,
    segments: u32,
) -> Vec<DVec2> {
    sample(style, segments, |t| {
        DVec2::new(x + offset(t, style, amplitude), y0 + (y1 - y0) * t)
    })
}

fn sample(style: SplitMode, segments: u32, at: impl Fn(f64) -> DVec2) -> Vec<DVec2> {
    sample_params(style, segments).into_iter().map(at).collect()
}

/// Edge parameters to sample for `style`, ascending from 0 to 1.
///
/// Zigzag edges always include their crest and trough parameters so the
/// polyline keeps its sharp vertices at any resolution.
fn sample_params(style: SplitMode, segments: u32) -> Vec<f64> {
    let segments = match style {
        SplitMode::Straight => 1,
        _ => segments.max(1),
    };
    let mut ts: Vec<f64> = (0..=segments)
        .map(|i| i as f64 / segments as f64)
        .collect();
    if style == SplitMode::Zigzag {
        let vertices = (2.0 / ZIGZAG_PERIOD).round() as u32;
        ts.extend((0..vertices).map(|k| ZIGZAG_PERIOD * (0.25 + k as f64 / 2.0)));
        ts.sort_by(|a, b| a.total_cmp(b));
        ts.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    }
    ts
}
