use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_eval_precedence() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("eval").arg("2 + 3 × 4");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 + 3 × 4 = 14"));
}

#[test]
fn test_cli_eval_ascii_operators() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("eval").arg("(100 - 4) / 8 * 3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("= 36"));
}

#[test]
fn test_cli_eval_division_by_zero() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("eval").arg("5 ÷ 0");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("undefined"));
}

#[test]
fn test_cli_eval_partial_expression() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("eval").arg("4 × 6 +");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("= 24"))
        .stdout(predicate::str::contains("not complete"));
}

#[test]
fn test_cli_eval_json() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("eval").arg("4 × 6 + 2").arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let body: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(body["value"]["value"], "26");
    assert_eq!(body["complete"], true);
}

#[test]
fn test_cli_eval_syntax_error() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("eval").arg("4 x 6");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
