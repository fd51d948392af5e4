use assert_cmd::Command;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("server"))
        .stdout(predicates::str::contains("play"));
}

#[test]
fn test_server_rejects_bad_port() {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.arg("server").arg("--port").arg("not-a-port");

    cmd.assert().failure();
}
