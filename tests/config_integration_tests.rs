//! Integration tests for config loading from fixture files.

use std::fs;
use std::path::Path;

use season_organizer::organize::{CliOptions, OrgSeasonConfig, OrganizeConfig};

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_file_exists() {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    assert!(config_path.exists(), "Sample config file should exist");
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn orgseason_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let orgseason = value.get("orgseason").expect("should have orgseason section");

    assert!(orgseason.get("auto").unwrap().is_bool());
    assert!(orgseason.get("debug").unwrap().is_bool());
    assert!(orgseason.get("dryrun").unwrap().is_bool());
    assert!(orgseason.get("verbose").unwrap().is_bool());
    assert!(orgseason.get("trash_extensions").unwrap().is_array());
}

#[test]
fn sample_config_parses_into_orgseason_config() {
    let config = OrgSeasonConfig::from_toml_str(&read_sample_config()).expect("should parse");

    assert!(!config.auto);
    assert!(!config.dryrun);
    assert!(config.verbose);
    assert_eq!(config.trash_extensions, vec!["url", ".jpg", "SFV"]);
}

#[test]
fn sample_config_merges_with_cli_options() {
    let user_config = OrgSeasonConfig::from_toml_str(&read_sample_config()).expect("should parse");
    let cli = CliOptions {
        dryrun: true,
        trash_extensions: vec!["url".to_string(), "srr".to_string()],
        ..CliOptions::default()
    };

    let config = OrganizeConfig::merge(user_config, cli);

    assert!(config.dryrun);
    assert!(config.verbose);
    assert!(!config.auto);
    assert_eq!(config.trash_extensions, vec!["txt", "nfo", "exe", "url", "jpg", "sfv", "srr"]);
}

#[test]
fn wrong_value_type_is_an_error() {
    let result = OrgSeasonConfig::from_toml_str("[orgseason]\nauto = \"yes\"\n");
    assert!(result.is_err());
}
