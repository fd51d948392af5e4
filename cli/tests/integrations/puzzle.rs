use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_puzzle_for_date_is_stable() {
    let run = || {
        let mut cmd = Command::cargo_bin("reckon").unwrap();
        cmd.arg("puzzle").arg("--date").arg("2024-03-15").arg("--json");
        cmd.assert().success().get_output().stdout.clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_cli_puzzle_json_record() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("puzzle").arg("--seed").arg("738000").arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let record: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(record["numbers"].as_array().unwrap().len(), 6);
    let target = record["target"].as_i64().unwrap();
    assert!((100..=999).contains(&target));
}

#[test]
fn test_cli_puzzle_table() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("puzzle").arg("--date").arg("2024-03-15");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Puzzle (2024-03-15)"))
        .stdout(predicate::str::contains("Target"));
}

#[test]
fn test_cli_puzzle_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"number_count": 4, "max_large": 2, "target_min": 10, "target_max": 10}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("puzzle")
        .arg("--seed")
        .arg("1")
        .arg("--config")
        .arg(&config)
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let record: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(record["numbers"].as_array().unwrap().len(), 4);
    assert_eq!(record["target"], 10);
}

#[test]
fn test_cli_puzzle_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"target_min": 900, "target_max": 100}"#).unwrap();

    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("puzzle").arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid puzzle"));
}

#[test]
fn test_cli_date_and_seed_conflict() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("puzzle")
        .arg("--date")
        .arg("2024-03-15")
        .arg("--seed")
        .arg("1");

    cmd.assert().failure();
}
