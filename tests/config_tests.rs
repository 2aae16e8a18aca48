use std::io::Write;
use study_ahead::config::{DEFAULT_DAYS_AHEAD, DEFAULT_UPCOMING_LIMIT, MAX_DAYS_AHEAD};
use study_ahead::{ConfigError, PlanMode, PlannerConfig};
use tempfile::NamedTempFile;

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_are_two_days_balanced() {
    let config = PlannerConfig::default();
    assert_eq!(config.days_ahead, DEFAULT_DAYS_AHEAD);
    assert_eq!(config.upcoming_limit, DEFAULT_UPCOMING_LIMIT);
    assert_eq!(config.mode, PlanMode::Balanced);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let file = config_file(r#"{"mode": "direct"}"#);
    let config = PlannerConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.mode, PlanMode::Direct);
    assert_eq!(config.days_ahead, DEFAULT_DAYS_AHEAD);
}

#[test]
fn invalid_values_are_rejected() {
    let file = config_file(r#"{"days_ahead": -1}"#);
    assert!(matches!(
        PlannerConfig::from_json_file(file.path()),
        Err(ConfigError::Invalid(_))
    ));

    let config = PlannerConfig {
        upcoming_limit: 0,
        ..PlannerConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn days_ahead_is_bounded_above() {
    let at_limit = PlannerConfig {
        days_ahead: MAX_DAYS_AHEAD,
        ..PlannerConfig::default()
    };
    assert!(at_limit.validate().is_ok());

    let too_far = PlannerConfig {
        days_ahead: 100_000_000,
        ..PlannerConfig::default()
    };
    assert!(matches!(too_far.validate(), Err(ConfigError::Invalid(_))));

    let file = config_file(r#"{"days_ahead": 100000000}"#);
    assert!(matches!(
        PlannerConfig::from_json_file(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = config_file("{ not json");
    assert!(matches!(
        PlannerConfig::from_json_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}
