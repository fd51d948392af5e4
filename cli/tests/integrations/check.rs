use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_solution() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check")
        .arg("(4 × 6) + 2")
        .arg("--numbers")
        .arg("4,6,2")
        .arg("--target")
        .arg("26");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("finalize 4 × 6"))
        .stdout(predicate::str::contains("Solved: 26 = 26"));
}

#[test]
fn test_cli_check_miss() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check")
        .arg("4 × 6")
        .arg("--numbers")
        .arg("4,6,2")
        .arg("--target")
        .arg("26");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Missed: got 24, target 26"));
}

#[test]
fn test_cli_check_reused_number() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check")
        .arg("4 + 4")
        .arg("--numbers")
        .arg("4,6")
        .arg("--target")
        .arg("8");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("4 is not available"))
        .stdout(predicate::str::contains("Stopped at '4'"));
}

#[test]
fn test_cli_check_puzzle_file() {
    let temp_dir = TempDir::new().unwrap();
    let puzzle = temp_dir.path().join("puzzle.json");
    fs::write(&puzzle, r#"{"numbers": [10, 3, 5], "target": 2}"#).unwrap();

    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check")
        .arg("10 ÷ 5")
        .arg("--puzzle")
        .arg(&puzzle)
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let body: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(body["accepted"], true);
    assert_eq!(body["submission"]["type"], "solved");
}

#[test]
fn test_cli_check_unsafe_move() {
    let temp_dir = TempDir::new().unwrap();
    let puzzle = temp_dir.path().join("puzzle.json");
    fs::write(&puzzle, r#"{"numbers": [10, 3], "target": 3}"#).unwrap();

    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check").arg("10 ÷ 3").arg("--puzzle").arg(&puzzle);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rejected"));
}

#[test]
fn test_cli_check_missing_puzzle_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check")
        .arg("1 + 2")
        .arg("--puzzle")
        .arg(temp_dir.path().join("missing.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read puzzle file"));
}

#[test]
fn test_cli_check_numbers_require_target() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("check").arg("1 + 2").arg("--numbers").arg("1,2");

    cmd.assert().failure();
}
