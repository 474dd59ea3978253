use mediatag::core::config::{ConfigLoader, ConfigValidator, MediatagConfig};
use mediatag::core::types::OutputFormat;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_mediatag_env() {
    for v in &[
        "MEDIATAG_SCHEMA_PATH",
        "MEDIATAG_ORDERING_CHECK_CYCLES",
        "MEDIATAG_ORDERING_MAX_MOVES",
        "MEDIATAG_OUTPUT_FORMAT",
    ] {
        env::remove_var(v);
    }
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    clear_mediatag_env();
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();

    assert_eq!(config.schema.path, PathBuf::from("events_tags.yaml"));
    assert!(config.ordering.check_cycles);
    assert_eq!(config.ordering.max_moves, None);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
#[serial]
fn test_config_loading_integration() {
    clear_mediatag_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("mediatag.toml"),
        r#"
[schema]
path = "schemas/tags.yaml"

[ordering]
check_cycles = false
max_moves = 500

[output]
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    assert_eq!(config.schema.path, PathBuf::from("schemas/tags.yaml"));
    assert!(!config.ordering.check_cycles);
    assert_eq!(config.ordering.max_moves, Some(500));
    assert_eq!(config.output.format, OutputFormat::Json);

    let options = config.ordering.options();
    assert!(!options.check_cycles);
    assert_eq!(options.max_moves, Some(500));
}

#[test]
#[serial]
fn test_env_overrides_take_precedence() {
    clear_mediatag_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("mediatag.toml"),
        "[output]\nformat = \"text\"\n",
    )
    .unwrap();

    env::set_var("MEDIATAG_SCHEMA_PATH", "/tmp/other.yaml");
    env::set_var("MEDIATAG_ORDERING_CHECK_CYCLES", "false");
    env::set_var("MEDIATAG_ORDERING_MAX_MOVES", "42");
    env::set_var("MEDIATAG_OUTPUT_FORMAT", "JSON");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    clear_mediatag_env();

    assert_eq!(config.schema.path, PathBuf::from("/tmp/other.yaml"));
    assert!(!config.ordering.check_cycles);
    assert_eq!(config.ordering.max_moves, Some(42));
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
#[serial]
fn test_unparseable_env_values_are_ignored() {
    clear_mediatag_env();
    let temp_dir = TempDir::new().unwrap();
    env::set_var("MEDIATAG_ORDERING_MAX_MOVES", "lots");
    env::set_var("MEDIATAG_OUTPUT_FORMAT", "xml");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    clear_mediatag_env();

    assert_eq!(config.ordering.max_moves, None);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
#[serial]
fn test_explicit_config_must_exist() {
    clear_mediatag_env();
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_explicit(&temp_dir.path().join("missing.toml")).unwrap_err();
    assert_eq!(err.code, "CFG-001");
}

#[test]
#[serial]
fn test_malformed_config_reports_parse_error() {
    clear_mediatag_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("mediatag.toml"), "[ordering]\nmax_moves = \"x\"\n").unwrap();
    let err = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap_err();
    assert_eq!(err.code, "CFG-001");
    assert!(err.message.contains("Failed to parse config file"));
}

#[test]
fn test_validator_rejects_zero_move_budget() {
    let mut config = MediatagConfig::default();
    config.ordering.max_moves = Some(0);
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert_eq!(err.code, "CFG-002");
}
