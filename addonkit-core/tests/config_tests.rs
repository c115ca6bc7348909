//! Config error-message and loading integration tests.
//! Storage: ~/.addonkit/mirror.yaml

use addonkit_core::{config, ConfigError, MirrorConfig};
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;
use std::fs;

fn write_config(home: &assert_fs::TempDir, yaml: &str) {
    home.child(".addonkit").child("mirror.yaml").write_str(yaml).expect("write");
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_config_returns_not_found() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("config not found"));
    assert!(err.to_string().contains("mirror.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(&home, ": : corrupt : yaml : !!!\n  - broken: [unclosed");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("mirror.yaml"), "must contain file path, got: {err}");
}

#[test]
fn corrupt_yaml_is_not_masked_by_default_fallback() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(&home, "- a list, not a mapping\n");
    assert!(config::load_or_default_at(home.path()).is_err());
}

#[rstest]
#[case("source_url: ''\ndestinations: []\n")]
#[case("source_url: /srv/repo\nsubdir: ../escape\n")]
#[case("source_url: /srv/repo\nsubdir: nested/dir\n")]
fn invalid_configs_are_rejected(#[case] yaml: &str) {
    let home = assert_fs::TempDir::new().expect("tempdir");
    write_config(&home, yaml);
    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Persisted layout
// ---------------------------------------------------------------------------

#[test]
fn init_writes_default_config_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = config::init_at(home.path(), false).expect("init");

    home.child(".addonkit")
        .child("mirror.yaml")
        .assert(predicate::str::contains("WoWThreads.git"));
    home.child(".addonkit")
        .child("mirror.yaml")
        .assert(predicate::str::contains("exclude:"));
    assert_eq!(config::load_at(home.path()).expect("load"), MirrorConfig::default());
    assert_eq!(path, config::config_path_at(home.path()));
}

#[test]
fn explicit_file_loads_from_anywhere() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("custom.yaml");
    file.write_str(
        "source_url: https://example.com/Addon.git\n\
         destinations:\n  - /games/a\n  - /games/b\n\
         git:\n  branch: main\n",
    )
    .expect("write");

    let cfg = config::load_from(file.path()).expect("load");
    assert_eq!(cfg.destinations.len(), 2);
    assert_eq!(cfg.git.branch.as_deref(), Some("main"));
    assert_eq!(cfg.git.program, "git");
    assert_eq!(cfg.resolved_subdir(), "Addon");
    assert!(fs::metadata(file.path()).is_ok());
}
