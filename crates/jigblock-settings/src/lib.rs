//! jigblock Settings Crate
//!
//! Loads and saves the puzzle parameters and interaction preferences.

pub mod config;
pub mod error;

pub use config::{Config, Difficulty, PlaySettings};
pub use error::{SettingsError, SettingsResult};
