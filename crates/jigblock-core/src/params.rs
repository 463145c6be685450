//! Puzzle parameters
//!
//! `PuzzleParams` is the immutable snapshot every generation pass consumes.
//! It is owned by whoever stores the user's choices (settings file, UI store);
//! the geometry code only ever borrows it.

use crate::constants::{DEFAULT_AMPLITUDE_RATIO, DEFAULT_CURVE_RESOLUTION, MAX_AMPLITUDE_RATIO};
use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest grid accepted in either direction.
pub const MAX_GRID: u32 = 50;

/// Cut style applied to the interior grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Plain straight cuts
    #[default]
    Straight,
    /// Sine wave, two periods per edge
    Wave,
    /// Triangular wave, eight periods per edge
    Zigzag,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight => write!(f, "straight"),
            Self::Wave => write!(f, "wave"),
            Self::Zigzag => write!(f, "zigzag"),
        }
    }
}

impl FromStr for SplitMode {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(Self::Straight),
            "wave" => Ok(Self::Wave),
            "zigzag" => Ok(Self::Zigzag),
            other => Err(ParameterError::InvalidValue {
                name: "split_mode".to_string(),
                reason: format!("unknown cut style '{}'", other),
            }),
        }
    }
}

/// RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> ParameterResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || ParameterError::InvalidValue {
            name: "color".to_string(),
            reason: format!("expected #rrggbb, got '{}'", s),
        };
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear channels in `0.0..=1.0`, the form render back-ends expect.
    pub fn to_unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = ParameterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Opaque handle for the image mapped onto the puzzle's top faces.
///
/// The core never looks inside; it is handed through to the solids and the
/// export sink unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// Parameters of one partition pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleParams {
    /// Block width along X (mm)
    pub width: f64,
    /// Block height along Y (mm)
    pub height: f64,
    /// Block thickness along Z (mm)
    pub depth: f64,
    /// Columns
    pub grid_x: u32,
    /// Rows
    pub grid_y: u32,
    #[serde(default)]
    pub split_mode: SplitMode,
    pub side_color: Color,
    pub bottom_color: Color,
    /// Segments per sampled edge.
    #[serde(default = "default_curve_resolution")]
    pub curve_resolution: u32,
    /// Cut amplitude as a fraction of the shorter piece side.
    #[serde(default = "default_amplitude_ratio")]
    pub amplitude_ratio: f64,
}

fn default_curve_resolution() -> u32 {
    DEFAULT_CURVE_RESOLUTION
}

fn default_amplitude_ratio() -> f64 {
    DEFAULT_AMPLITUDE_RATIO
}

impl Default for PuzzleParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            depth: 4.0,
            grid_x: 4,
            grid_y: 4,
            split_mode: SplitMode::Wave,
            side_color: Color::rgb(0xee, 0xee, 0xee),
            bottom_color: Color::rgb(0xcc, 0xcc, 0xcc),
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            amplitude_ratio: DEFAULT_AMPLITUDE_RATIO,
        }
    }
}

impl PuzzleParams {
    pub fn piece_width(&self) -> f64 {
        self.width / self.grid_x as f64
    }

    pub fn piece_height(&self) -> f64 {
        self.height / self.grid_y as f64
    }

    pub fn piece_count(&self) -> usize {
        self.grid_x as usize * self.grid_y as usize
    }

    /// Lateral cut deviation, proportional to the shorter piece side.
    pub fn amplitude(&self) -> f64 {
        self.piece_width().min(self.piece_height()) * self.amplitude_ratio
    }

    /// Checks the preconditions generation relies on.
    pub fn validate(&self) -> ParameterResult<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError::InvalidDimensions(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [("grid_x", self.grid_x), ("grid_y", self.grid_y)] {
            if value < 1 || value > MAX_GRID {
                return Err(ParameterError::OutOfRange {
                    name: name.to_string(),
                    value: value as f64,
                    min: 1.0,
                    max: MAX_GRID as f64,
                });
            }
        }

        if self.curve_resolution < 1 || self.curve_resolution > 512 {
            return Err(ParameterError::OutOfRange {
                name: "curve_resolution".to_string(),
                value: self.curve_resolution as f64,
                min: 1.0,
                max: 512.0,
            });
        }

        if !(0.0..=MAX_AMPLITUDE_RATIO).contains(&self.amplitude_ratio) {
            return Err(ParameterError::OutOfRange {
                name: "amplitude_ratio".to_string(),
                value: self.amplitude_ratio,
                min: 0.0,
                max: MAX_AMPLITUDE_RATIO,
            });
        }

        Ok(())
    }
}
