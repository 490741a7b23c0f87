//! Integration tests for the fitlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Creating, updating and deleting entries
//! - Data persistence between invocations
//! - Import and export of data files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI pointed at a data directory, isolated from any user config
fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitlog"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn add_entry(data_dir: &Path, date: &str, heart_rate: &str) {
    cli(data_dir)
        .args([
            "add",
            "--date",
            date,
            "--heart-rate",
            heart_rate,
            "--steps",
            "7500",
            "--calories",
            "400",
            "--sleep",
            "8",
            "--weight",
            "71",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry created!"));
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("fitlog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily fitness measurement log"));
}

#[test]
fn test_list_empty() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_add_persists_entry() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");

    let contents = fs::read_to_string(data_dir.join("fitness.csv")).unwrap();
    assert_eq!(
        contents,
        "Date,HeartRate,Steps,Calories,Sleep,Weight\n2024-01-01,70,7500,400,8.0,71.0\n"
    );

    // Default command lists entries
    cli(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. 2024-01-01 | HR: 70 | Steps: 7500 | Calories: 400 | Sleep: 8.0h | Weight: 71.0kg",
        ));
}

#[test]
fn test_add_accepts_comma_decimals() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args([
            "add", "--date", "2024-01-01", "--heart-rate", "70", "--steps", "7500",
            "--calories", "400", "--sleep", "7,5", "--weight", "71,2",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(data_dir.join("fitness.csv")).unwrap();
    assert!(contents.contains("2024-01-01,70,7500,400,7.5,71.2"));
}

#[test]
fn test_add_rejects_invalid_values() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args([
            "add", "--date", "2024-01-01", "--heart-rate", "70", "--steps", "-10",
            "--calories", "400", "--sleep", "8", "--weight", "71",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Steps cannot be negative"));

    cli(data_dir)
        .args([
            "add", "--date", "2024-01-01", "--heart-rate", "70", "--steps", "10",
            "--calories", "400", "--sleep", "lots", "--weight", "71",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number format"));

    assert!(!data_dir.join("fitness.csv").exists());
}

#[test]
fn test_update_entry() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");
    add_entry(data_dir, "2024-01-02", "72");

    cli(data_dir)
        .args(["update", "2", "--steps", "12000", "--sleep", "6,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry updated!"));

    let contents = fs::read_to_string(data_dir.join("fitness.csv")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[1], "2024-01-01,70,7500,400,8.0,71.0");
    assert_eq!(lines[2], "2024-01-02,72,12000,400,6.5,71.0");
}

#[test]
fn test_update_rejects_invalid_value() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");

    cli(data_dir)
        .args(["update", "1", "--heart-rate", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Heart rate must be positive"));

    // Original entry is untouched
    let contents = fs::read_to_string(data_dir.join("fitness.csv")).unwrap();
    assert!(contents.contains("2024-01-01,70,7500,400,8.0,71.0"));
}

#[test]
fn test_delete_entry() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");
    add_entry(data_dir, "2024-01-02", "72");
    add_entry(data_dir, "2024-01-03", "74");

    cli(data_dir)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: 2024-01-02"));

    let contents = fs::read_to_string(data_dir.join("fitness.csv")).unwrap();
    assert!(!contents.contains("2024-01-02"));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_delete_last_entry_leaves_header() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");
    cli(data_dir).args(["delete", "1"]).assert().success();

    let contents = fs::read_to_string(data_dir.join("fitness.csv")).unwrap();
    assert_eq!(contents, "Date,HeartRate,Steps,Calories,Sleep,Weight\n");
}

#[test]
fn test_invalid_entry_number() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");

    cli(data_dir)
        .args(["delete", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entry position 0"));

    cli(data_dir)
        .args(["update", "5", "--steps", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("have 1 entries"));
}

#[test]
fn test_import_appends_entries() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");
    fs::write(
        data_dir.join("old.csv"),
        "Date,HeartRate,Steps,Calories,Sleep,Weight\n\
         2023-12-30,66,5000,300,7.0,72.0\n\
         broken line\n\
         2023-12-31,68,5500,320,7.5,71.8\n",
    )
    .unwrap();

    cli(data_dir)
        .args(["import", "old.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 entries."));

    cli(data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 2024-01-01"))
        .stdout(predicate::str::contains("2. 2023-12-30"))
        .stdout(predicate::str::contains("3. 2023-12-31"));
}

#[test]
fn test_import_missing_file() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["import", "missing.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data loaded."));
}

#[test]
fn test_export_and_custom_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");

    cli(data_dir)
        .args(["export", "backup.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 entries"));

    cli(data_dir)
        .args(["--file", "backup.csv", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 2024-01-01"));
}

#[test]
fn test_list_json() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    add_entry(data_dir, "2024-01-01", "70");

    let output = cli(data_dir).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["date"], "2024-01-01");
    assert_eq!(entries[0]["heart_rate"], 70);
    assert_eq!(entries[0]["weight_kg"], 71.0);
}

#[test]
fn test_config_file_sets_data_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let config_dir = data_dir.join("config").join("fitlog");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[data]\nfile_name = \"custom.csv\"\n",
    )
    .unwrap();

    add_entry(data_dir, "2024-01-01", "70");

    assert!(data_dir.join("custom.csv").exists());
    assert!(!data_dir.join("fitness.csv").exists());
}
