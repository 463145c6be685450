//! # jigblock
//!
//! Cuts a rectangular, print-ready block into an N×M grid of interlocking
//! pieces and lets a user put them back together with drag, rotate and
//! distance-based snapping.
//!
//! ## Architecture
//!
//! 1. **jigblock-core** - parameters, colors, constants, validation errors
//! 2. **jigblock-geometry** - cut curves, outlines, extruded solids, adjacency
//! 3. **jigblock-play** - poses, snap matching, hit testing, interaction state
//! 4. **jigblock-settings** - JSON/TOML configuration
//! 5. **jigblock** - this facade and the headless demo binary

pub use jigblock_geometry as geometry;
pub use jigblock_play as play;
pub use jigblock_settings as settings;

pub use jigblock_core::{Color, ParameterError, PuzzleParams, SplitMode, TextureHandle};
pub use jigblock_geometry::{
    generate_partition, AdjacencyIndex, Edge, ExportBundle, ExportSink, GeometryError,
    MaterialSlot, Neighbors, Partition, PieceInfo, PieceShape, PieceSolid, Ray,
};
pub use jigblock_play::{
    assemble, find_snap_candidates, initial_transforms, scatter, Hit, HitTester,
    InteractionConfig, InteractionController, InteractionState, PieceTransform, Pointer,
    PuzzleSession, SessionError, SnapCandidate, SolidPicker,
};
pub use jigblock_settings::{Config, Difficulty, PlaySettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Controller tuning for the given play preferences.
pub fn interaction_config(play: &PlaySettings) -> InteractionConfig {
    InteractionConfig {
        snap_distance: play.snap_distance(),
        rotate_sensitivity: play.rotate_sensitivity,
        highlight_factor: play.highlight_factor,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - JSON lines instead when `JIGBLOCK_LOG_JSON` is set
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if std::env::var_os("JIGBLOCK_LOG_JSON").is_some() {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
        return Ok(());
    }

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_config_follows_difficulty() {
        let play = PlaySettings {
            difficulty: Difficulty::Easy,
            ..Default::default()
        };
        let config = interaction_config(&play);
        assert_eq!(config.snap_distance, 8.0);
        assert_eq!(config.rotate_sensitivity, play.rotate_sensitivity);
        assert_eq!(config.highlight_factor, 2.0);
    }
}
