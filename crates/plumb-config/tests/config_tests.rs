// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Plumb configuration system.

use plumb_config::diagnostic::ConfigError;
use plumb_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes() {
    let toml = r#"
[log]
level = "debug"

[settings]
path = "/tmp/plumb/settings.json"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.settings.path, "/tmp/plumb/settings.json");
}

/// Empty input yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should be valid");
    assert_eq!(config.log.level, "info");
    assert!(config.settings.path.ends_with("settings.json"));
}

/// A misspelled key is rejected with a suggestion.
#[test]
fn unknown_key_gets_suggestion() {
    let toml = "[log]\nlevle = \"debug\"\n";
    let errors = load_and_validate_str(toml).expect_err("should reject unknown key");

    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "levle");
            assert_eq!(suggestion.as_deref(), Some("level"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown top-level sections are rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = "[plugins]\ndisabled = []\n";
    let errors = load_and_validate_str(toml).expect_err("should reject unknown section");
    assert!(matches!(errors[0], ConfigError::UnknownKey { ref key, .. } if key == "plugins"));
}

/// Wrong value types are reported against their key path.
#[test]
fn wrong_type_is_reported() {
    let toml = "[log]\nlevel = 3\n";
    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "log.level"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

/// Semantic validation runs after a successful parse.
#[test]
fn invalid_level_fails_validation() {
    let errors = load_and_validate_str("[log]\nlevel = \"verbose\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// An explicit config file is read.
#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plumb.toml");
    std::fs::write(&path, "[settings]\npath = \"custom.json\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file should load");
    assert_eq!(config.settings.path, "custom.json");
}
