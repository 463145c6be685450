//! Configuration for jigblock
//!
//! Two sections:
//! - `puzzle`: the block and cut parameters
//! - `play`: difficulty and pointer tuning
//!
//! Files are JSON or TOML, chosen by extension, and are validated on both
//! load and save.

use crate::error::{SettingsError, SettingsResult};
use jigblock_core::constants::{DEFAULT_HIGHLIGHT_FACTOR, DEFAULT_ROTATE_SENSITIVITY};
use jigblock_core::PuzzleParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How forgiving snapping is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Snap threshold in millimeters.
    pub fn snap_distance(self) -> f64 {
        match self {
            Self::Easy => 8.0,
            Self::Normal => 4.0,
            Self::Hard => 2.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            other => Err(SettingsError::InvalidSetting {
                key: "difficulty".to_string(),
                reason: format!("unknown difficulty '{}'", other),
            }),
        }
    }
}

/// Interaction preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaySettings {
    pub difficulty: Difficulty,
    /// Radians per pixel while rotating
    pub rotate_sensitivity: f64,
    /// Highlight radius as a multiple of the snap distance
    pub highlight_factor: f64,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            rotate_sensitivity: DEFAULT_ROTATE_SENSITIVITY,
            highlight_factor: DEFAULT_HIGHLIGHT_FACTOR,
        }
    }
}

impl PlaySettings {
    pub fn snap_distance(&self) -> f64 {
        self.difficulty.snap_distance()
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub puzzle: PuzzleParams,
    #[serde(default)]
    pub play: PlaySettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/jigblock/config.toml`, creating the directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        path.push("jigblock");
        std::fs::create_dir_all(&path)
            .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", path.display(), e)))?;
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        self.puzzle.validate()?;

        let sensitivity = self.play.rotate_sensitivity;
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "play.rotate_sensitivity".to_string(),
                reason: format!("must be positive, got {}", sensitivity),
            });
        }

        if !self.play.highlight_factor.is_finite() || self.play.highlight_factor < 1.0 {
            return Err(SettingsError::InvalidSetting {
                key: "play.highlight_factor".to_string(),
                reason: format!("must be at least 1, got {}", self.play.highlight_factor),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_snap_distance() {
        assert_eq!(Difficulty::Easy.snap_distance(), 8.0);
        assert_eq!(Difficulty::Normal.snap_distance(), 4.0);
        assert_eq!(Difficulty::Hard.snap_distance(), 2.0);
        assert_eq!(PlaySettings::default().snap_distance(), 4.0);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_play_settings() {
        let mut config = Config::new();
        config.play.rotate_sensitivity = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));

        let mut config = Config::new();
        config.play.highlight_factor = 0.5;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.puzzle.grid_y = 0;
        assert!(matches!(config.validate(), Err(SettingsError::Parameter(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new().save_to_file(Path::new("config.yaml"));
        assert!(matches!(err, Err(SettingsError::UnsupportedFormat(ext)) if ext == "yaml"));
    }
}
