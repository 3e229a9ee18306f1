//! Integration tests for Settings loading from a config file.
//!
//! These tests assume no `ANIMALS_*` variables are set; the environment
//! layer has its own test binary (config_env_test.rs).

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use animals::application::ApplicationError;
use animals::config::Settings;

#[test]
fn given_missing_config_file_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(&dir.path().join("animals.toml"))).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_no_config_path_when_loading_then_uses_defaults() {
    let settings = Settings::load_from(None).expect("load settings");

    assert_eq!(settings.data_file, PathBuf::from("animals.dat"));
    assert_eq!(settings.default_animal, "human");
}

#[test]
fn given_config_file_when_loading_then_overrides_specified_fields() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("animals.toml");
    let data_file = dir.path().join("zoo.dat");
    fs::write(
        &config_path,
        format!(
            "data_file = \"{}\"\ndefault_animal = \"cat\"\n",
            data_file.display()
        ),
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(Some(&config_path)).unwrap();

    // Assert: max_input_len not specified, keeps default
    assert_eq!(settings.data_file, data_file);
    assert_eq!(settings.default_animal, "cat");
    assert_eq!(settings.max_input_len, 255);
}

#[test]
fn given_home_relative_data_file_when_loading_then_expands_tilde() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("animals.toml");
    fs::write(&config_path, "data_file = \"~/animals.dat\"\n").unwrap();

    let settings = Settings::load_from(Some(&config_path)).unwrap();

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.data_file, PathBuf::from(home).join("animals.dat"));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("animals.toml");
    fs::write(&config_path, "data_file = [unterminated\n").unwrap();

    let result = Settings::load_from(Some(&config_path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_zero_input_limit_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("animals.toml");
    fs::write(&config_path, "max_input_len = 0\n").unwrap();

    let result = Settings::load_from(Some(&config_path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
