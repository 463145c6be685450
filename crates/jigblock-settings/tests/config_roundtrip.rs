use jigblock_core::{Color, SplitMode};
use jigblock_settings::{Config, Difficulty, SettingsError};
use tempfile::TempDir;

fn custom() -> Config {
    let mut config = Config::new();
    config.puzzle.width = 150.0;
    config.puzzle.height = 90.0;
    config.puzzle.grid_x = 6;
    config.puzzle.grid_y = 3;
    config.puzzle.split_mode = SplitMode::Zigzag;
    config.puzzle.side_color = Color::rgb(0x12, 0x34, 0x56);
    config.play.difficulty = Difficulty::Hard;
    config
}

#[test]
fn test_json_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    custom().save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, custom());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"#123456\""));
    assert!(text.contains("\"zigzag\""));
}

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    custom().save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, custom());
    assert_eq!(loaded.play.snap_distance(), 2.0);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(
        &path,
        r##"
[puzzle]
width = 80.0
height = 60.0
depth = 3.0
grid_x = 4
grid_y = 3
side_color = "#ffffff"
bottom_color = "#000000"

[play]
difficulty = "easy"
"##,
    )
    .unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.puzzle.split_mode, SplitMode::Straight);
    assert_eq!(loaded.puzzle.curve_resolution, 30);
    assert_eq!(loaded.play.snap_distance(), 8.0);
    assert_eq!(loaded.play.rotate_sensitivity, 0.01);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r##"{"puzzle": {"width": -1.0, "height": 10.0, "depth": 1.0, "grid_x": 2, "grid_y": 2,
            "side_color": "#ffffff", "bottom_color": "#000000"}}"##,
    )
    .unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Parameter(_))
    ));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, Config::default());
}
