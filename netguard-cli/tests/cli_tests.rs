//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the netguard-cli binary.
fn netguard_cli() -> Command {
    cargo_bin_cmd!("netguard-cli")
}

/// Path to netguard library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("netguard")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = netguard_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Netlist"));
}

#[test]
fn test_cli_version() {
    let mut cmd = netguard_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_check_valid_file() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("valid_design.json");

    cmd.arg("check").arg(path).arg("--fail-on-failure");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All Passed"));
}

#[test]
fn test_cli_check_failures_without_flag_succeed() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("sample_netlist.json");

    cmd.arg("check").arg(path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[FAIL] GndConnections"))
        .stdout(predicate::str::contains("CONN1"));
}

#[test]
fn test_cli_check_fail_on_failure() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("dangling_connection.json");

    cmd.arg("check").arg(path).arg("--fail-on-failure");

    cmd.assert().failure().code(1);
}

#[test]
fn test_cli_check_json_output() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("sample_netlist.json");

    cmd.arg("check").arg(path).arg("--format").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");

    let results = json["results"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 7);
    assert_eq!(results[6]["rule"], "GndConnections");
    assert_eq!(results[6]["componentIds"], serde_json::json!(["CONN1"]));
    assert_eq!(json["summary"]["failed_rules"], 1);
}

#[test]
fn test_cli_check_document_output() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("valid_design.json");

    cmd.arg("check").arg(path).arg("-f").arg("document");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["name"], "valid_design");
    assert_eq!(json["validationResults"].as_array().unwrap().len(), 7);
    assert_eq!(json["components"][0]["id"], "R1");
}

#[test]
fn test_cli_check_github_output() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("dangling_connection.json");

    cmd.arg("check").arg(path).arg("--format").arg("github");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("::error"))
        .stdout(predicate::str::contains("title=ValidConnections"));
}

#[test]
fn test_cli_check_bad_shape() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("bad_shape.json");

    cmd.arg("check").arg(path);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("components"));
}

#[test]
fn test_cli_check_size_limit() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("sample_netlist.json");

    cmd.arg("check").arg(path).arg("--max-components").arg("2");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Input too large"));
}

#[test]
fn test_cli_check_nonexistent_file() {
    let mut cmd = netguard_cli();

    cmd.arg("check").arg("nonexistent.json");

    cmd.assert().failure();
}

#[test]
fn test_cli_project() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixtures_dir().join("valid_design.json"),
        dir.path().join("board.json"),
    )
    .unwrap();

    let mut cmd = netguard_cli();
    cmd.arg("project").arg(dir.path()).arg("--fail-on-failure");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("board.json"));
}

#[test]
fn test_cli_rules() {
    let mut cmd = netguard_cli();

    cmd.arg("rules").arg("--verbose");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1. ComponentNameRequired"))
        .stdout(predicate::str::contains("6. ValidConnections"))
        .stdout(predicate::str::contains("7. GndNetRequired | GndConnections"));
}

#[test]
fn test_cli_sample_round_trips_through_check() {
    let output = netguard_cli()
        .arg("sample")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.json");
    std::fs::write(&path, output).unwrap();

    netguard_cli()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Issues Found"));
}

#[test]
fn test_cli_stats() {
    let mut cmd = netguard_cli();
    let path = fixtures_dir().join("dangling_connection.json");

    cmd.arg("stats").arg(path);

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["danglingConnections"], 1);
    assert_eq!(json["unconnectedComponents"], 1);
}
