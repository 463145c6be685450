//! Workspace-wide numeric constants.
//! Lengths are expressed in millimeters, angles in radians unless noted otherwise.

/// Segments used when sampling one boundary edge of a piece.
pub const DEFAULT_CURVE_RESOLUTION: u32 = 30;

/// Cut amplitude as a fraction of the shorter piece dimension.
pub const DEFAULT_AMPLITUDE_RATIO: f64 = 0.08;

/// Maximum angular difference (rad) for two pieces to be considered aligned.
pub const ROTATION_MATCH_TOLERANCE: f64 = 0.1;

/// Radians of rotation per pixel of horizontal pointer travel.
pub const DEFAULT_ROTATE_SENSITIVITY: f64 = 0.01;

/// Faces tilted less than this (degrees) from vertical count as caps.
pub const CAP_NORMAL_MAX_TILT_DEG: f64 = 25.0;

/// Proximity highlighting looks this many snap distances away.
pub const DEFAULT_HIGHLIGHT_FACTOR: f64 = 2.0;

/// Scatter radius as a multiple of the longer puzzle side.
pub const SCATTER_RADIUS_FACTOR: f64 = 1.5;

/// Lower bound of the random scatter radius fraction.
pub const SCATTER_MIN_FRACTION: f64 = 0.5;

/// Upper bound of the random scatter radius fraction.
pub const SCATTER_MAX_FRACTION: f64 = 1.0;

/// Fraction of an edge, from each corner, over which a cut's offset ramps
/// in linearly from zero.
pub const CORNER_TAPER: f64 = 0.25;

/// Largest accepted amplitude ratio.
///
/// Must stay below [`CORNER_TAPER`]: an offset bounded by
/// `amplitude * min(t, 1 - t) / CORNER_TAPER` then keeps every cut inside the
/// 45° cone around its own grid line at both corners, so cuts meeting at a
/// lattice point never cross.
pub const MAX_AMPLITUDE_RATIO: f64 = 0.2;
