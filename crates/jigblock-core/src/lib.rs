//! # jigblock Core
//!
//! Shared domain types for the jigblock workspace: the puzzle parameter
//! snapshot consumed by every generation pass, cut styles, colors, the
//! opaque texture handle, numeric constants and parameter validation errors.

pub mod constants;
pub mod error;
pub mod params;

pub use error::{ParameterError, ParameterResult};
pub use params::{Color, PuzzleParams, SplitMode, TextureHandle};
