//! Integration tests over the graph fixtures
//!
//! `tests/fixtures/valid` holds graphs that must generate; `tests/fixtures/invalid` holds graphs that must fail
//! generation (upstream errors or unencodable values) while still loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use infragen::backend::{Backend, JsonBackend};
use infragen::load_program;

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut paths: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "json"))
        .collect();
    paths.sort();
    paths
}

fn fixture(kind: &str, name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(kind)
        .join(name)
}

/// Test that all valid fixtures generate successfully
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty(), "no valid fixtures found");

    for path in paths {
        let program = load_program(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let result = JsonBackend::new().generate_program(&program);
        assert!(
            result.is_ok(),
            "Expected {} to generate successfully, got: {}",
            path.display(),
            result.unwrap_err()
        );
    }
}

/// Test that invalid fixtures load but fail generation
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty(), "no invalid fixtures found");

    for path in paths {
        let program = load_program(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert!(
            JsonBackend::new().generate_program(&program).is_err(),
            "Expected {} to fail generation",
            path.display()
        );
    }
}

#[test]
fn test_network_fixture_document() {
    let program = load_program(&fixture("valid", "network.json")).unwrap();
    let generated = JsonBackend::new().generate_program(&program).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&generated.files["program.json"]).unwrap();

    // The component is skipped
    let nodes = doc["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);

    let attributes = &nodes[1]["attributes"];
    assert_eq!(attributes["cidrBlock"]["type"], "IndexExpression");
    assert_eq!(attributes["availabilityZone"]["traversal"][1]["key"], 0);
    assert!(attributes["mapPublicIpOnLaunch"].is_null());
    assert_eq!(doc["packages"][0]["version"], serde_json::Value::Null);
}

#[test]
fn test_static_site_fixture_document() {
    let program = load_program(&fixture("valid", "static_site.json")).unwrap();
    let generated = JsonBackend::new().generate_program(&program).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&generated.files["program.json"]).unwrap();

    let nodes = doc["nodes"].as_array().unwrap();
    assert_eq!(nodes[0]["defaultValue"]["value"], "www");
    assert_eq!(nodes[1]["logicalName"], "site-bucket");
    assert_eq!(nodes[1]["options"]["protect"]["value"], true);
    assert_eq!(
        nodes[1]["attributes"]["website"]["properties"]["indexDocument"]["value"],
        "index.html"
    );
    assert_eq!(nodes[2]["value"]["type"], "TemplateExpression");
}

// ============================================================================
// Binary
// ============================================================================

fn infragen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_infragen"))
}

#[test]
fn test_cli_gen_writes_program_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("site");

    let output = infragen()
        .arg("gen")
        .arg(fixture("valid", "static_site.json"))
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("program.json").is_file());
}

#[test]
fn test_cli_check_reports_errors() {
    let output = infragen()
        .arg("check")
        .arg(fixture("invalid", "unbound_reference.json"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("undefined variable site"));
}

#[test]
fn test_cli_emit_json_prints_document() {
    let output = infragen()
        .arg("--emit-json")
        .arg(fixture("valid", "network.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["nodes"][0]["name"], "cidrs");
}

#[test]
fn test_cli_emit_json_honours_indent() {
    let output = infragen()
        .arg("--emit-json")
        .arg(fixture("valid", "network.json"))
        .args(["--indent", "4"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("{\n    \"nodes\": ["));
}

#[test]
fn test_cli_gen_failure_creates_no_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let output = infragen()
        .arg("gen")
        .arg(fixture("invalid", "unbound_reference.json"))
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn test_cli_rejects_parent_dir_output() {
    let output = infragen()
        .args(["gen", "graph.json", "../escape"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
