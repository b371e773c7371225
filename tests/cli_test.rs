use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

fn cleaner() -> Command {
    let mut command = Command::cargo_bin("app-data-cleaner").unwrap();
    command.env_remove("RUST_LOG");
    command
}

/// Creates the private directories of `pkg` beneath `data_root`, each with
/// one file.
fn create_app_data(data_root: &Path) {
    let data_directory = data_root.join("pkg");
    for name in ["cache", "databases", "shared_prefs", "files"] {
        fs::create_dir_all(data_directory.join(name)).unwrap();
        fs::write(data_directory.join(name).join("entry"), b"data").unwrap();
    }
    fs::create_dir_all(data_directory.join("lib")).unwrap();
    fs::write(data_directory.join("lib").join("libnative.so"), b"elf").unwrap();
}

#[test]
fn test_erase_file() {
    let directory = tempfile::tempdir().unwrap();
    let file = directory.path().join("a.txt");
    fs::write(&file, b"a").unwrap();

    cleaner()
        .arg("erase")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"));
    assert!(!file.exists());
}

#[test]
fn test_erase_missing_path_fails() {
    let directory = tempfile::tempdir().unwrap();

    cleaner()
        .arg("erase")
        .arg(directory.path().join("missing"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("could not be fully cleared"));
}

#[test]
fn test_erase_json_report() {
    let directory = tempfile::tempdir().unwrap();
    let root = directory.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.txt"), b"b").unwrap();

    let output = cleaner()
        .args(["erase", "--json", "--remove-shells"])
        .arg(&root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let target = &summary["targets"][0];
    assert_eq!(target["kind"], "custom");
    assert_eq!(target["succeeded"], true);
    assert_eq!(target["report"]["records"].as_array().unwrap().len(), 3);
    assert!(!root.exists());
}

#[test]
fn test_clean_without_package_fails() {
    cleaner()
        .arg("clean")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package name"));
}

#[test]
fn test_clean_well_known_directories() {
    let directory = tempfile::tempdir().unwrap();
    create_app_data(directory.path());

    cleaner()
        .args(["clean", "--package", "pkg", "--no-external", "--json"])
        .arg("--data-root")
        .arg(directory.path())
        .assert()
        .success();

    let data_directory = directory.path().join("pkg");
    for name in ["cache", "databases", "shared_prefs", "files"] {
        assert!(data_directory.join(name).is_dir());
        assert!(!data_directory.join(name).join("entry").exists());
    }
    assert!(data_directory.join("lib").join("libnative.so").exists());
}

#[test]
fn test_clean_with_config_file() {
    let directory = tempfile::tempdir().unwrap();
    create_app_data(directory.path());
    let extra = directory.path().join("extra.log");
    fs::write(&extra, b"log").unwrap();

    let config = directory.path().join("cleaner.json");
    fs::write(
        &config,
        serde_json::json!({
            "package": "pkg",
            "data_root": directory.path(),
            "external_mounted": false,
            "custom_paths": [extra],
        })
        .to_string(),
    )
    .unwrap();

    cleaner()
        .args(["clean", "--json", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(!extra.exists());
}

#[cfg(unix)]
#[test]
fn test_clean_restarts_with_configured_commands() {
    let directory = tempfile::tempdir().unwrap();
    create_app_data(directory.path());
    let marker = directory.path().join("launched-pkg");

    let config = directory.path().join("cleaner.json");
    fs::write(
        &config,
        serde_json::json!({
            "package": "pkg",
            "data_root": directory.path(),
            "external_mounted": false,
            "restart_stop_command": ["true"],
            "restart_launch_command": ["touch", marker],
        })
        .to_string(),
    )
    .unwrap();

    cleaner()
        .args(["clean", "--restart", "--json", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(marker.exists());
}

#[cfg(unix)]
#[test]
fn test_clean_reports_failed_restart() {
    let directory = tempfile::tempdir().unwrap();
    create_app_data(directory.path());

    let config = directory.path().join("cleaner.json");
    fs::write(
        &config,
        serde_json::json!({
            "package": "pkg",
            "data_root": directory.path(),
            "external_mounted": false,
            "restart_stop_command": ["false"],
        })
        .to_string(),
    )
    .unwrap();

    cleaner()
        .args(["clean", "--restart", "--json", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'false' failed"));
    assert!(!directory.path().join("pkg").join("cache").join("entry").exists());
}

#[test]
fn test_drop_database_rejects_relative_names() {
    let directory = tempfile::tempdir().unwrap();
    create_app_data(directory.path());
    let native = directory.path().join("pkg").join("lib").join("libnative.so");

    cleaner()
        .args(["drop-database", "../lib", "--package", "pkg", "--no-external"])
        .arg("--data-root")
        .arg(directory.path())
        .assert()
        .failure();
    assert!(native.exists());
}

#[test]
fn test_drop_database() {
    let directory = tempfile::tempdir().unwrap();
    let databases = directory.path().join("pkg").join("databases");
    fs::create_dir_all(&databases).unwrap();
    fs::write(databases.join("app.db"), b"db").unwrap();
    fs::write(databases.join("app.db-wal"), b"wal").unwrap();

    cleaner()
        .args(["drop-database", "app.db", "--package", "pkg", "--no-external"])
        .arg("--data-root")
        .arg(directory.path())
        .assert()
        .success();
    assert!(!databases.join("app.db").exists());
    assert!(!databases.join("app.db-wal").exists());
}

#[test]
fn test_usage_json() {
    let directory = tempfile::tempdir().unwrap();
    create_app_data(directory.path());

    let output = cleaner()
        .args(["usage", "--json", "--package", "pkg", "--no-external"])
        .arg("--data-root")
        .arg(directory.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let usage: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let usage = usage.as_array().unwrap();
    assert_eq!(usage.len(), 4);
    assert!(usage.iter().all(|target| target["bytes"] == 4));
}
