//! Integration tests for infill-pattern CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Path to the binary Cargo built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_infill-pattern"))
}

/// Run the binary with `args`, feeding `stdin` to it.
fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write request");

    child.wait_with_output().expect("Failed to wait for command")
}

fn square_request(pattern: &str, settings: &str) -> String {
    format!(
        r#"{{
            "pattern": "{pattern}",
            "settings": {settings},
            "infill_areas": [{{"outline": [
                {{"x": 0, "y": 0}}, {{"x": 1000, "y": 0}},
                {{"x": 1000, "y": 1000}}, {{"x": 0, "y": 1000}}
            ]}}]
        }}"#
    )
}

const HILBERT_ID: &str = "PLUGIN::CuraEnginePattern@0.1.0::HILBERT";
const LINE_DISTANCE: &str = r#"{"infill_line_distance": "0.25"}"#;

#[test]
fn patterns_command_lists_hilbert() {
    let output = Command::new(binary_path())
        .arg("patterns")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(HILBERT_ID), "Should list the hilbert identifier");
    assert!(stdout.contains("Hilbert Curve"), "Should list the hilbert label");
}

#[test]
fn generate_from_stdin_returns_lines() {
    let output = run_with_stdin(&["generate"], &square_request(HILBERT_ID, LINE_DISTANCE));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(response["status"], "OK");

    let lines = response["poly_lines"].as_array().expect("poly_lines should be an array");
    assert_eq!(lines.len(), 15);
    for line in lines {
        for point in line.as_array().unwrap() {
            let x = point["x"].as_i64().unwrap();
            let y = point["y"].as_i64().unwrap();
            assert!(x > 0 && x < 1000 && y > 0 && y < 1000, "({x}, {y}) outside the square");
        }
    }
    assert_eq!(response["polygons"].as_array().unwrap().len(), 0);
}

#[test]
fn generate_reads_and_writes_files() {
    let dir = std::env::temp_dir().join(format!("infill-pattern-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let request = dir.join("request.json");
    let response = dir.join("response.json");
    std::fs::write(&request, square_request(HILBERT_ID, LINE_DISTANCE)).unwrap();

    let output = Command::new(binary_path())
        .args(["generate", request.to_str().unwrap(), "-o", response.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "Response should go to the file");

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&response).unwrap()).unwrap();
    assert_eq!(written["status"], "OK");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_pattern_is_internal_error() {
    let output = run_with_stdin(&["generate", "-"], &square_request("FOO", LINE_DISTANCE));
    assert!(!output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(response["status"], "INTERNAL");
    assert_eq!(response["message"], "Pattern: FOO is unknown");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not create infill generator"), "stderr: {stderr}");
}

#[test]
fn missing_line_distance_is_internal_error() {
    let output = run_with_stdin(&["generate"], &square_request(HILBERT_ID, "{}"));
    assert!(!output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(response["status"], "INTERNAL");
    assert_eq!(response["message"], "missing setting: infill_line_distance");
}

#[test]
fn preview_produces_svg() {
    let output = run_with_stdin(&["preview"], &square_request(HILBERT_ID, LINE_DISTANCE));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("<polyline"), "Should have infill lines");
    assert!(stdout.contains("<polygon"), "Should have the outline");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}
