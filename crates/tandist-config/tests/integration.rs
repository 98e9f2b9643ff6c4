//! File-level tests for configuration loading and saving.

use std::fs;

use tandist_config::{ConfigError, FileOp, TanDistConfig, ValidationError};
use tempfile::TempDir;

#[test]
fn save_creates_parent_and_load_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = TanDistConfig::default();
    config.surface.sensitivity = 0.01;
    config.save(&path).unwrap();

    assert!(path.exists());
    assert_eq!(TanDistConfig::load(&path).unwrap(), config);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = TanDistConfig::load(&path).unwrap_err();
    assert_eq!(err.file_op(), Some(FileOp::Read));
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn explicit_path_is_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[smoothing]\ncoefficient = 2.0\n").unwrap();

    let err = TanDistConfig::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid(ValidationError::CoefficientOutOfRange(_))
    ));
}

#[test]
fn infinite_time_constant_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inf.toml");
    fs::write(&path, "[smoothing]\ntime_constant_ms = inf\n").unwrap();

    // Parses fine, but would freeze the smoothed gain
    let parsed = TanDistConfig::load(&path).unwrap();
    assert_eq!(parsed.smoothing.time_constant_ms, Some(f32::INFINITY));

    let err = TanDistConfig::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid(ValidationError::NonPositive {
            field: "smoothing.time_constant_ms",
            ..
        })
    ));
}

#[test]
fn explicit_partial_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    fs::write(&path, "[audio]\nblock_size = 32\n").unwrap();

    let config = TanDistConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.audio.block_size, 32);
    assert_eq!(config.audio.sample_rate, 48000);
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[surface\nwidth = 1").unwrap();
    assert!(matches!(
        TanDistConfig::load(&path),
        Err(ConfigError::Parse(_))
    ));
}
