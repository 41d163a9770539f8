//! End-to-end tests for the `claw-alert-check` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const CONFIG: &str = r"
global:
  slack_api_url: https://hooks.slack.com/services/T000/B000/XXXX
route:
  receiver: default
  group_by: [alertname, cluster]
  routes:
    - match: {severity: critical}
      receiver: pager
      continue: true
    - match_re: {service: '^(db|cache)$'}
      receiver: dba
receivers:
  - name: default
  - name: pager
    slack_configs:
      - channel: '#oncall'
  - name: dba
inhibit_rules:
  - source_match: {severity: critical}
    target_match: {severity: warning}
    equal: [cluster]
";

fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("claw-alert-check").unwrap();
    cmd.env_remove("CLAW_ALERT_CONFIG");
    cmd
}

// ==================== Check ====================

#[test]
fn check_valid_config_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    cli()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"))
        .stdout(predicate::str::contains("pager: slack=1"));
}

#[test]
fn check_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", "route:\n  receiver: ghost\n");

    cli()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("1 of 1 file(s) failed the check"));
}

#[test]
fn check_requires_files() {
    cli().arg("check").assert().failure();
}

#[test]
fn check_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    let output = cli()
        .args(["--format", "json", "check"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["files"][0]["valid"], true);
    assert_eq!(value["files"][0]["summary"]["routes"], 3);
}

// ==================== Routes ====================

#[test]
fn routes_resolves_fan_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    let output = cli()
        .args(["-f", "json", "routes", "-c"])
        .arg(&path)
        .args(["severity=critical", "service=db"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["receivers"], serde_json::json!(["pager", "dba"]));
    assert_eq!(value["routes"][1]["group_by"], serde_json::json!(["alertname", "cluster"]));
}

#[test]
fn routes_reads_config_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    cli()
        .env("CLAW_ALERT_CONFIG", &path)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 3 route(s)"));
}

#[test]
fn routes_rejects_bad_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    cli()
        .args(["routes", "-c"])
        .arg(&path)
        .arg("0bad=x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid label name"));
}

// ==================== Inhibit ====================

#[test]
fn inhibit_reports_muted_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    cli()
        .args(["inhibit", "-c"])
        .arg(&path)
        .args(["--source", "severity=critical,cluster=eu"])
        .args(["--target", "severity=warning,cluster=eu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target muted: yes"));
}

#[test]
fn inhibit_different_cluster_not_muted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "am.yml", CONFIG);

    cli()
        .args(["inhibit", "-c"])
        .arg(&path)
        .args(["--source", "severity=critical,cluster=eu"])
        .args(["--target", "severity=warning,cluster=us"])
        .assert()
        .success()
        .stdout(predicate::str::contains("equal mismatch"))
        .stdout(predicate::str::contains("Target muted: no"));
}

#[test]
fn missing_config_file_fails() {
    cli()
        .args(["routes", "-c", "/nonexistent/am.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
