//! CLI integration tests.
//!
//! These run the actual barq binary via std::process::Command against a
//! temporary catalog file.

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const CATALOG_JSON: &str = r#"{
    "name": "test-store",
    "version": "1",
    "organization": "GIANT_EAGLE",
    "items": [
        {"name": "Bananas", "value": "4011", "tags": ["produce"]},
        {"name": "Whole Milk", "value": "070038", "tags": ["dairy"]},
        {"name": "Ghost", "value": "1", "duplicate": true}
    ]
}"#;

fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp catalog");
    file.write_all(CATALOG_JSON.as_bytes())
        .expect("write temp catalog");
    file
}

fn barq() -> Command {
    Command::new(env!("CARGO_BIN_EXE_barq"))
}

#[test]
fn resolve_finds_catalog_items() {
    let catalog = catalog_file();
    let output = barq()
        .args([
            "resolve",
            "--catalog",
            catalog.path().to_str().unwrap(),
            "banana",
        ])
        .output()
        .expect("run barq");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bananas"));
}

#[test]
fn resolve_json_has_envelope() {
    let catalog = catalog_file();
    let output = barq()
        .args([
            "resolve",
            "--catalog",
            catalog.path().to_str().unwrap(),
            "--format",
            "json",
            "4011",
        ])
        .output()
        .expect("run barq");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert_eq!(value["tool"], "barq");
    assert_eq!(value["schema_version"], "1.0.0");
    let typed = &value["data"]["segments"][0]["typed_code"];
    assert_eq!(typed["classification"], "plu");
    assert_eq!(typed["upc"], "000000040112");
}

#[test]
fn resolve_without_catalog_still_derives_values() {
    let output = barq()
        .args(["resolve", "2+2;37"])
        .output()
        .expect("run barq");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("= 4"));
    assert!(stdout.contains("round up: 63"));
}

#[test]
fn missing_catalog_fails_with_error_code() {
    let output = barq()
        .args(["resolve", "--catalog", "/nonexistent/store.json", "banana"])
        .output()
        .expect("run barq");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BQ-E001"));
}

#[test]
fn invalid_catalog_json_is_reported() {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(b"not json at all").expect("write temp file");
    let output = barq()
        .args([
            "resolve",
            "--catalog",
            file.path().to_str().unwrap(),
            "banana",
        ])
        .output()
        .expect("run barq");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BQ-E002"));
}

#[test]
fn code_subcommand_classifies() {
    let output = barq().args(["code", "4011"]).output().expect("run barq");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("classification: plu"));
    assert!(stdout.contains("upc: 000000040112"));
}

#[test]
fn code_subcommand_reports_fallback() {
    let output = barq().args(["code", "xyz"]).output().expect("run barq");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("classification: none"));
    assert!(stdout.contains("fallback"));
}

#[test]
fn combo_subcommand_matches() {
    let output = barq()
        .args(["combo", "^+c", "--key", "c", "--ctrl", "--shift"])
        .output()
        .expect("run barq");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "match");

    let output = barq()
        .args(["combo", "^+c", "--key", "c", "--ctrl"])
        .output()
        .expect("run barq");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "no match");
}

#[test]
fn user_items_file_is_merged() {
    let catalog = catalog_file();
    let mut items = NamedTempFile::new().expect("create temp items");
    items
        .write_all(b"Reusable bag: 00042\n")
        .expect("write temp items");
    let output = barq()
        .args([
            "resolve",
            "--catalog",
            catalog.path().to_str().unwrap(),
            "--user-items",
            items.path().to_str().unwrap(),
            "#user",
        ])
        .output()
        .expect("run barq");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Reusable bag"));
    assert!(stdout.contains("00042"));
}
