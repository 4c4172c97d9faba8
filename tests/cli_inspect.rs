//! Integration tests for the keystore-inspect binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn keystore_inspect_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_keystore-inspect"))
}

fn run(args: &[&str]) -> Output {
    Command::new(keystore_inspect_bin())
        .args(args)
        .env_remove("KEYSTORE_PATH")
        .env_remove("KEYSTORE_PASSWORD")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_str().unwrap().to_string()
}

#[test]
fn test_inspect_json() {
    let output = run(&[&fixture("server.p12"), "-p", "changeit", "--format", "json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "inspect failed: {}", stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Should be valid JSON");
    assert_eq!(json["keyStorePath"], fixture("server.p12"));
    assert_eq!(
        json["certificates"]["server"]["subject"],
        "CN=server.example.com,O=Example Org,C=US"
    );
    assert_eq!(json["sslProvider"], "rustls (ring)");
    assert_eq!(json["sslProtocol"], "TLSv1.3");
}

#[test]
fn test_inspect_wrong_password_exits_2_with_report() {
    let output = run(&[&fixture("server.p12"), "-p", "wrong", "--format", "json"]);

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["certificates"], serde_json::json!({}));
    assert!(json["error"].as_str().unwrap().contains("password"));
}

#[test]
fn test_inspect_password_from_env() {
    let output = Command::new(keystore_inspect_bin())
        .args([&fixture("server.p12"), "--format", "json"])
        .env_remove("KEYSTORE_PATH")
        .env("KEYSTORE_PASSWORD", "changeit")
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());
}

#[test]
fn test_inspect_pem_plain() {
    let output = run(&[&fixture("bundle.pem"), "-t", "pem", "--format", "plain"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "inspect failed: {}", stdout);
    assert!(stdout.contains("[cert-0]"));
    assert!(stdout.contains("[cert-1]"));
    assert!(!stdout.contains("private-key-0"));
    assert!(stdout.contains(
        "subjectAlternativeNames: dNSName: example.com, dNSName: www.example.com"
    ));
}

#[test]
fn test_inspect_table() {
    let output = run(&[&fixture("server.p12"), "--no-color"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "inspect failed: {}", stdout);
    assert!(stdout.contains("Alias: server"));
    assert!(stdout.contains("Basic Constraints"));
}

#[test]
fn test_inspect_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");

    let output = run(&[
        &fixture("server.p12"),
        "--format",
        "plain",
        "-o",
        report_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert!(written["certificates"]["server"]["sha256Fingerprint"].is_string());
}

#[test]
fn test_inspect_without_path_reports_not_configured() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    let output = run(&["-c", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["keyStorePath"], "Not configured");
    assert!(json["error"].is_string());
}

#[test]
fn test_inspect_missing_config_file_exits_1() {
    let output = run(&[&fixture("server.p12"), "-c", "/nonexistent/settings.toml"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration file not found"));
}
