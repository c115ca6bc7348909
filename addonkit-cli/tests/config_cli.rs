use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn addonkit_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("addonkit"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

#[test]
fn show_without_file_prints_builtin_defaults() {
    let home = TempDir::new().unwrap();
    addonkit_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("WoWThreads.git"))
        .stdout(contains("_classic_era_"));
}

#[test]
fn init_then_refuse_then_force() {
    let home = TempDir::new().unwrap();
    addonkit_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(contains("mirror.yaml"));
    assert!(home.path().join(".addonkit").join("mirror.yaml").exists());

    addonkit_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(contains("--force"));

    addonkit_cmd(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn home_config_is_picked_up() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".addonkit");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("mirror.yaml"),
        "source_url: https://example.com/owner/Custom.git\ndestinations: []\n",
    )
    .unwrap();

    addonkit_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("Custom.git"));
}

#[test]
fn path_points_into_home() {
    let home = TempDir::new().unwrap();
    addonkit_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(contains(".addonkit"));
}
