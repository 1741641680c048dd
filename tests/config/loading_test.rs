//! Tests for loading simulator configs from disk

use tempfile::TempDir;

use parking_guidance::{Direction, GuidanceError, SimulatorConfig};

#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("absent.toml");

    let config = SimulatorConfig::load_or_default(&path).expect("defaults");
    assert_eq!(config, SimulatorConfig::default());

    assert!(matches!(
        SimulatorConfig::load(&path),
        Err(GuidanceError::Io(_))
    ));
}

#[test]
fn test_saved_config_loads_back() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("guidance.toml");

    let mut config = SimulatorConfig::default();
    config.tick_interval_ms = 100;
    config.steps[1].direction = Direction::Backward;
    let content = config.to_toml_string().expect("serialize");
    std::fs::write(&path, content).expect("write config");

    let loaded = SimulatorConfig::load(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_file_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "initial_distance = [").expect("write config");

    assert!(matches!(
        SimulatorConfig::load(&path),
        Err(GuidanceError::ConfigParse(_))
    ));
}

#[test]
fn test_file_with_overlapping_thresholds_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("coarse.toml");
    std::fs::write(&path, "step_size_meters = 10\n").expect("write config");

    // 23m and 15m are only 8m apart
    assert!(matches!(
        SimulatorConfig::load_or_default(&path),
        Err(GuidanceError::InvalidConfig(_))
    ));
}

#[test]
fn test_default_path_uses_crate_directory() {
    let path = SimulatorConfig::default_path();
    assert!(path.ends_with("parking-guidance/guidance.toml"));
}
