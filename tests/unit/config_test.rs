//! Tests for configuration loading

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use mentor_verify::config::AppConfig;

#[test]
fn test_missing_file_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::load(Some(&temp.path().join("absent.toml"))).unwrap();
    assert_eq!(config, AppConfig::default());

    let settings = config.settings().unwrap();
    assert!((settings.weights.source() - 0.5).abs() < f64::EPSILON);
    assert!((settings.policy.verified_threshold - 70.0).abs() < f64::EPSILON);
    assert_eq!(settings.max_conflict_retries, 3);
    assert_eq!(settings.verifier_timeout, Duration::from_secs(10));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let config = AppConfig::parse(
        r#"
[storage]
data_dir = "/var/lib/mentor-verify"

[orchestrator]
verifier_timeout_secs = 3
"#,
    )
    .unwrap();

    assert_eq!(config.data_dir(), PathBuf::from("/var/lib/mentor-verify"));
    assert_eq!(config.orchestrator.verifier_timeout_secs, 3);
    assert_eq!(config.orchestrator.max_conflict_retries, 3);
    assert_eq!(config.server.bind, "127.0.0.1:7878");
    assert!(config.documents.allowed_types.contains(&"application/pdf".to_string()));
}

#[test]
fn test_weights_must_sum_to_one() {
    let err = AppConfig::parse(
        r"
[scoring]
source_weight = 0.6
document_weight = 0.3
identity_weight = 0.2
",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("sum to 1.0"));
}

#[test]
fn test_tunable_sections_are_plain_values() {
    let config = AppConfig::parse("[scoring]\nverified_threshold = 80.0\n").unwrap();

    let scoring = config.scoring;
    let orchestrator = config.orchestrator;

    // Both sections are still usable on `config` after being copied out
    assert_eq!(scoring, config.scoring);
    assert_eq!(orchestrator, config.orchestrator);
    assert!((scoring.verified_threshold - 80.0).abs() < f64::EPSILON);
}

#[test]
fn test_threshold_out_of_range_rejected() {
    let result = AppConfig::parse("[scoring]\nverified_threshold = 120.0\n");
    assert!(result.is_err());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[scoring\nsource_weight = ").unwrap();

    assert!(AppConfig::load(Some(&path)).is_err());
}

#[test]
fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config.toml");
    let mut config = AppConfig::default();
    config.storage.data_dir = Some(temp.path().join("data"));
    config.github.token = Some("ghp_test".to_string());

    let written = config.save(Some(&path)).unwrap();

    assert_eq!(written, path);
    assert_eq!(AppConfig::load(Some(&path)).unwrap(), config);
}
